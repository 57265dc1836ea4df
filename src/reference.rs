//! Dataset reference shape checks.
//!
//! The compiler never decides on its own what a dataset reference looks like;
//! it asks a [`ReferenceValidator`]. [`DatasetOid`] is the stock one.

use std::sync::LazyLock;

use regex::Regex;

/// Decides whether a string is a well-formed external dataset reference.
pub trait ReferenceValidator {
    /// Returns the bare dataset id the backend should carry, or `None` when
    /// `reference` is malformed.
    fn dataset_id(&self, reference: &str) -> Option<String>;
}

static DATASET_OID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:o:::dataset:)?(?P<id>[0-9]+)(?:/[0-9]+)?$").expect("dataset OID pattern")
});

/// Accepts a bare numeric id (`41000123`) or a dataset OID
/// (`o:::dataset:41000123`, optionally with a `/<version>` suffix).
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetOid;

impl ReferenceValidator for DatasetOid {
    fn dataset_id(&self, reference: &str) -> Option<String> {
        DATASET_OID
            .captures(reference.trim())
            .map(|caps| caps["id"].to_string())
    }
}

#[test]
fn test_dataset_oid_shapes() {
    assert_eq!(DatasetOid.dataset_id("410000"), Some("410000".to_string()));
    assert_eq!(DatasetOid.dataset_id("o:::dataset:410000"), Some("410000".to_string()));
    assert_eq!(DatasetOid.dataset_id("o:::dataset:410000/7"), Some("410000".to_string()));
    assert_eq!(DatasetOid.dataset_id("o:::monitor:410000"), None);
    assert_eq!(DatasetOid.dataset_id("abc"), None);
    assert_eq!(DatasetOid.dataset_id("410000/"), None);
}
