pub mod compiler;
pub mod decompiler;
pub mod error;
pub mod query;
pub mod reference;
pub mod registry;
pub mod scanner;

#[cfg(feature = "cli")]
pub mod cli;

pub use compiler::{compile, ChainState, Compiler};
pub use decompiler::decompile;
pub use error::{CompileError, Result};
pub use query::{
    InputRef, InputTarget, MultiStageQuery, NamedInput, StageQuery, SurfaceQuery, SurfaceStage,
};
pub use reference::{DatasetOid, ReferenceValidator};
pub use registry::{InputRegistry, NameTable};
