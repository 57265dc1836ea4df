//! Forward pass: surface configuration → backend multi-stage query.
//!
//! Compilation walks the stages in order and threads a single piece of state,
//! the current default input, from one stage to the next (see [`ChainState`]).
//! Each stage:
//!
//! 1. must have a non-empty pipeline body;
//! 2. gets the positional id `stage-<index>`;
//! 3. replaces the default with its explicit input, if it names one;
//! 4. lists the default first, then every other visible name its body
//!    references as `@name`, in sorted name order;
//! 5. becomes the default for the next stage and binds its id (and alias, if
//!    any) as names visible to later stages only.
//!
//! # Examples
//!
//! ```
//! use stageline::{compile, SurfaceQuery, SurfaceStage};
//!
//! let surface = SurfaceQuery::new()
//!     .input("in", "410000")
//!     .stage(SurfaceStage::new("filter true"));
//!
//! let backend = compile(&surface).unwrap();
//! assert_eq!(backend.output_stage, "stage-0");
//! assert_eq!(backend.stages[0].input[0].dataset_id.as_deref(), Some("410000"));
//! ```

use tracing::debug;

use crate::error::{CompileError, Result};
use crate::query::{stage_id, MultiStageQuery, NamedInput, StageQuery, SurfaceQuery, SurfaceStage};
use crate::reference::{DatasetOid, ReferenceValidator};
use crate::registry::{InputRegistry, NameTable};
use crate::scanner::referenced_names;

/// The state carried from one stage to the next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainState {
    /// Input the next stage uses when it does not name one
    pub default: Option<NamedInput>,
}

impl ChainState {
    /// Initial state: the only declared input, or unset when there are zero
    /// or several.
    pub fn initial(table: &NameTable) -> Self {
        let mut declared = table.iter();
        match (declared.next(), declared.next()) {
            (Some(only), None) => ChainState {
                default: Some(only.clone()),
            },
            _ => ChainState::default(),
        }
    }

    /// State after a stage: that stage's own output is the new default.
    pub fn after(stage_id: &str) -> Self {
        ChainState {
            default: Some(NamedInput::stage(stage_id, stage_id)),
        }
    }
}

/// Compiles surface queries against a dataset reference validator.
pub struct Compiler<'v> {
    validator: &'v dyn ReferenceValidator,
}

impl Default for Compiler<'static> {
    fn default() -> Self {
        Compiler {
            validator: &DatasetOid,
        }
    }
}

impl<'v> Compiler<'v> {
    pub fn new(validator: &'v dyn ReferenceValidator) -> Self {
        Compiler { validator }
    }

    /// Compiles `query` into its backend form.
    pub fn compile(&self, query: &SurfaceQuery) -> Result<MultiStageQuery> {
        let mut names = InputRegistry::new(self.validator).register(&query.inputs)?;

        if query.stages.is_empty() {
            return Err(CompileError::StagesMissing);
        }

        let mut state = ChainState::initial(&names);
        let mut stages = Vec::with_capacity(query.stages.len());
        for (index, stage) in query.stages.iter().enumerate() {
            let (compiled, next) = compile_stage(&mut names, state, index, stage)?;
            stages.push(compiled);
            state = next;
        }

        let output_stage = stage_id(stages.len() - 1);
        Ok(MultiStageQuery {
            output_stage,
            stages,
        })
    }
}

/// Compiles one stage.
///
/// Takes the state left by the previous stage and returns the backend stage
/// together with the state for the next one. On success the stage's id and
/// alias are bound in `names`.
pub fn compile_stage(
    names: &mut NameTable,
    state: ChainState,
    index: usize,
    stage: &SurfaceStage,
) -> Result<(StageQuery, ChainState)> {
    if stage.pipeline.trim().is_empty() {
        return Err(CompileError::StagePipelineMissing { index });
    }

    let id = stage_id(index);

    let default = match &stage.input {
        Some(name) => Some(names.resolve(name).cloned().ok_or_else(|| {
            CompileError::StageInputUnresolved {
                index,
                name: name.clone(),
            }
        })?),
        None => state.default,
    };
    let default = default.ok_or(CompileError::StageInputMissing { index })?;

    let candidates: Vec<&str> = names
        .sorted_names()
        .into_iter()
        .filter(|name| *name != default.name)
        .collect();
    let mut input = vec![default.to_input_ref()];
    for name in referenced_names(&stage.pipeline, &candidates) {
        if let Some(bound) = names.resolve(name) {
            input.push(bound.to_input_ref());
        }
    }

    debug!(
        index,
        stage = %id,
        default_input = %default.name,
        inputs = input.len(),
        "compiled stage"
    );

    names.bind(NamedInput::stage(&id, &id))?;
    if let Some(alias) = &stage.alias {
        names.bind(NamedInput::stage(alias, &id))?;
        debug!(stage = %id, alias = %alias, "registered stage alias");
    }

    let next = ChainState::after(&id);
    Ok((
        StageQuery {
            id,
            pipeline: stage.pipeline.clone(),
            input,
        },
        next,
    ))
}

/// Compiles `query` with the stock [`DatasetOid`] validator.
pub fn compile(query: &SurfaceQuery) -> Result<MultiStageQuery> {
    Compiler::default().compile(query)
}
