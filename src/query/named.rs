use super::backend::InputRef;

/// What a name is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTarget {
    /// An external dataset, by bare dataset id
    Dataset(String),

    /// The output of a stage, by stage id
    Stage(String),
}

/// A name bound to a dataset or to a stage output.
///
/// Created from declared inputs or from stage ids and aliases during a single
/// compile; never rebound afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedInput {
    pub name: String,
    pub target: InputTarget,
}

impl NamedInput {
    pub fn dataset(name: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        NamedInput {
            name: name.into(),
            target: InputTarget::Dataset(dataset_id.into()),
        }
    }

    pub fn stage(name: impl Into<String>, stage_id: impl Into<String>) -> Self {
        NamedInput {
            name: name.into(),
            target: InputTarget::Stage(stage_id.into()),
        }
    }

    /// Backend input reference for this binding.
    pub fn to_input_ref(&self) -> InputRef {
        match &self.target {
            InputTarget::Dataset(id) => InputRef::dataset(&self.name, id),
            InputTarget::Stage(id) => InputRef::stage(&self.name, id),
        }
    }
}
