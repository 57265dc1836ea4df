use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single user-facing stage.
///
/// Position is significant: a stage without `input` continues from the
/// stage before it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceStage {
    /// Name under which later stages may refer to this stage's output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Explicit default input (declared input, earlier stage id or alias)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Opaque transformation body
    #[serde(default)]
    pub pipeline: String,
}

impl SurfaceStage {
    /// A stage that only carries a pipeline body.
    pub fn new(pipeline: impl Into<String>) -> Self {
        SurfaceStage {
            alias: None,
            input: None,
            pipeline: pipeline.into(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }
}

/// The user-facing pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceQuery {
    /// Declared inputs: name → external dataset reference
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,

    /// Stages in execution order
    #[serde(default)]
    pub stages: Vec<SurfaceStage>,
}

impl SurfaceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(mut self, name: impl Into<String>, reference: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), reference.into());
        self
    }

    pub fn stage(mut self, stage: SurfaceStage) -> Self {
        self.stages.push(stage);
        self
    }
}
