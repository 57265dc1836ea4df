//! Documentation content for the stageline CLI

use super::CliError;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Inputs,
    Stages,
    Aliases,
    References,
    Backend,
}

impl DocTopic {
    /// Parse topic name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "inputs" | "input" => Some(Self::Inputs),
            "stages" | "stage" | "chaining" => Some(Self::Stages),
            "aliases" | "alias" => Some(Self::Aliases),
            "references" | "reference" | "refs" => Some(Self::References),
            "backend" | "wire" => Some(Self::Backend),
            _ => None,
        }
    }

    fn content(self) -> &'static str {
        match self {
            Self::Inputs => INPUTS,
            Self::Stages => STAGES,
            Self::Aliases => ALIASES,
            Self::References => REFERENCES,
            Self::Backend => BACKEND,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"STAGELINE DOCUMENTATION

Stageline compiles a declarative multi-stage pipeline configuration into the
fully explicit form the backend stores, and reconstructs the declarative form
from a stored query.

TOPICS

  inputs        Declaring named dataset inputs
  stages        Stage order and implicit chaining
  aliases       Naming a stage's output for later stages
  references    @name references inside pipeline bodies
  backend       The explicit backend JSON form

COMMANDS

  stageline compile     Surface JSON  -> backend JSON
  stageline decompile   Backend JSON  -> surface JSON
  stageline validate    Check that surface JSON compiles
  stageline doc <topic> Show one topic
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<&'static str, CliError> {
    DocTopic::from_str(name)
        .map(DocTopic::content)
        .ok_or_else(|| CliError::UnknownTopic(name.to_string()))
}

const INPUTS: &str = r#"INPUTS

Every query declares at least one named input:

  "inputs": { "logs": "o:::dataset:41000123", "users": "41000456" }

A reference is either a bare numeric dataset id or a dataset OID, optionally
with a /<version> suffix. The backend always receives the bare id.

Names of the form stage-<n> (stage-0, stage-1, ...) are reserved for stage
ids and cannot be declared as inputs.

When exactly one input is declared, the first stage uses it without naming it.
With several inputs the first stage must name one via "input".
"#;

const STAGES: &str = r#"STAGES

Stages run in order. A stage without "input" continues from the stage before
it; a stage with "input" starts from that name instead.

  "stages": [
    { "input": "logs", "pipeline": "filter level = \"error\"" },
    { "pipeline": "statsby count(), group_by(service)" }
  ]

Each stage gets the id stage-<position> (stage-0, stage-1, ...). The last
stage is the query's output. A later stage may name an earlier one by id.
"#;

const ALIASES: &str = r#"ALIASES

An alias names a stage's output for later stages:

  { "alias": "errors", "pipeline": "filter level = \"error\"" },
  { "pipeline": "statsby count()" },
  { "input": "errors", "pipeline": "pick_col message" }

An alias is visible only to the stages after it. A name can be bound once:
reusing a declared input name or another stage's alias is an error.
"#;

const REFERENCES: &str = r#"REFERENCES

A pipeline body that mentions @name pulls that input in alongside the stage's
default input:

  { "pipeline": "join on(id = @users.id)" }

Detection is textual. @name inside a string or comment counts too, and so does
a longer name that starts with it (@users_v2 also matches @users).
"#;

const BACKEND: &str = r#"BACKEND FORM

  {
    "outputStage": "stage-1",
    "stages": [
      { "id": "stage-0", "pipeline": "...",
        "input": [{ "inputName": "logs", "datasetId": "41000123" }] },
      { "id": "stage-1", "pipeline": "...",
        "input": [{ "inputName": "stage-0", "stageId": "stage-0" }] }
    ]
  }

The first entry of "input" is the stage's default input. Further entries come
from @name references, sorted by name.
"#;
