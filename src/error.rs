//! Errors raised while compiling or decompiling a pipeline.
//!
//! Every variant is a configuration error: nothing here is transient, and a
//! failed call never yields a partial query.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// No inputs declared for the query.
    #[error("at least one input must be declared")]
    InputsMissing,

    /// No stages declared for the query.
    #[error("at least one stage must be declared")]
    StagesMissing,

    /// A stage has an empty transformation body.
    #[error("stage {index}: pipeline must not be empty")]
    StagePipelineMissing { index: usize },

    /// An explicit stage input does not name a declared input, earlier stage or alias.
    #[error("stage {index}: input \"{name}\" does not match any declared input, earlier stage or alias")]
    StageInputUnresolved { index: usize, name: String },

    /// A stage has no default input and none can be inferred.
    #[error("stage {index}: no input declared and none can be inferred")]
    StageInputMissing { index: usize },

    /// A declared input's reference is not a well-formed dataset reference.
    #[error("input \"{name}\": \"{reference}\" is not a valid dataset reference")]
    InvalidReference { name: String, reference: String },

    /// A declared input has no reference value.
    #[error("input \"{name}\": dataset reference is empty")]
    EmptyInput { name: String },

    /// A name is already bound to a different target.
    #[error("name \"{name}\" is already bound to a different input")]
    NameConflict { name: String },

    /// A declared input uses a name reserved for generated stage ids.
    #[error("input \"{name}\": names of the form stage-<n> are reserved for stage ids")]
    ReservedInputName { name: String },

    /// A backend query's output stage is not its last stage.
    #[error("output stage \"{output_stage}\" is not the last stage \"{last_stage}\"")]
    OutputStageMismatch {
        output_stage: String,
        last_stage: String,
    },

    /// Two backend stages share an id.
    #[error("stage id \"{id}\" is used by more than one stage")]
    StageIdDuplicate { id: String },
}

pub type Result<T> = std::result::Result<T, CompileError>;
