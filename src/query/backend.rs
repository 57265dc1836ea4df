use serde::{Deserialize, Serialize};

/// One entry of a backend stage's input list.
///
/// A real reference sets exactly one of `dataset_id` / `stage_id`. A
/// reference carrying only a name is a pass-through placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRef {
    pub input_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<String>,
}

impl InputRef {
    pub fn dataset(name: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        InputRef {
            input_name: name.into(),
            dataset_id: Some(dataset_id.into()),
            stage_id: None,
        }
    }

    pub fn stage(name: impl Into<String>, stage_id: impl Into<String>) -> Self {
        InputRef {
            input_name: name.into(),
            dataset_id: None,
            stage_id: Some(stage_id.into()),
        }
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        InputRef {
            input_name: name.into(),
            dataset_id: None,
            stage_id: None,
        }
    }
}

/// A fully explicit backend stage. The first input is the stage's default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageQuery {
    pub id: String,
    pub pipeline: String,
    pub input: Vec<InputRef>,
}

impl StageQuery {
    /// The stage's default (primary) input.
    pub fn primary_input(&self) -> Option<&InputRef> {
        self.input.first()
    }
}

/// The backend's canonical multi-stage query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiStageQuery {
    /// Id of the stage whose output is the query result (always the last one)
    pub output_stage: String,
    pub stages: Vec<StageQuery>,
}
