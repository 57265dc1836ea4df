//! # Pipeline Data Model
//!
//! Two representations of the same multi-stage pipeline live here:
//!
//! - **[surface]** - the user-facing form. Stages chain positionally and may
//!   carry a human-chosen alias; an input is only named when it differs from
//!   the one implied by position.
//! - **[backend]** - the fully explicit form. Every stage has a unique id and
//!   the complete, ordered list of its inputs.
//! - **[named]** - a name bound to a dataset or to a stage output, the unit the
//!   compiler threads between stages.
//!
//! ## Surface JSON
//!
//! ```text
//! {
//!   "inputs": { "in": "410000" },
//!   "stages": [
//!     { "alias": "base", "pipeline": "filter true" },
//!     { "pipeline": "make_col x:1" }
//!   ]
//! }
//! ```
//!
//! ## Backend JSON
//!
//! ```text
//! {
//!   "outputStage": "stage-1",
//!   "stages": [
//!     { "id": "stage-0", "pipeline": "filter true",
//!       "input": [{ "inputName": "in", "datasetId": "410000" }] },
//!     { "id": "stage-1", "pipeline": "make_col x:1",
//!       "input": [{ "inputName": "stage-0", "stageId": "stage-0" }] }
//!   ]
//! }
//! ```
pub mod backend;
pub mod named;
pub mod surface;

pub use backend::{InputRef, MultiStageQuery, StageQuery};
pub use named::{InputTarget, NamedInput};
pub use surface::{SurfaceQuery, SurfaceStage};

/// Prefix of every generated stage id.
pub const STAGE_ID_PREFIX: &str = "stage-";

/// Returns the id the compiler generates for the stage at `index`.
///
/// Ids depend only on position, so recompiling an unchanged stage list
/// yields identical ids.
pub fn stage_id(index: usize) -> String {
    format!("{}{}", STAGE_ID_PREFIX, index)
}

/// Whether `name` has exactly the shape of a generated stage id.
pub fn is_stage_id(name: &str) -> bool {
    name.strip_prefix(STAGE_ID_PREFIX)
        .and_then(|n| n.parse::<usize>().ok())
        .is_some_and(|n| stage_id(n) == name)
}

#[test]
fn test_stage_id_shape() {
    assert!(is_stage_id("stage-0"));
    assert!(is_stage_id("stage-17"));
    assert!(!is_stage_id("stage-"));
    assert!(!is_stage_id("stage-01"));
    assert!(!is_stage_id("stage-x"));
    assert!(!is_stage_id("staging"));
}

#[test]
fn test_stage_id_is_positional() {
    assert_eq!(stage_id(0), "stage-0");
    assert_eq!(stage_id(12), "stage-12");
}
