//! Name resolution for a single compile.
//!
//! [`NameTable`] is append-only: a stage can see every name bound before it
//! but none bound after it, and a bound name is never retargeted.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{CompileError, Result};
use crate::query::{is_stage_id, NamedInput};
use crate::reference::ReferenceValidator;

/// Ordered, append-only table of name bindings.
#[derive(Debug, Default, Clone)]
pub struct NameTable {
    entries: Vec<NamedInput>,
    index: HashMap<String, usize>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `input.name`.
    ///
    /// Binding a name again to the same target is a no-op; binding it to a
    /// different target is a [`CompileError::NameConflict`].
    pub fn bind(&mut self, input: NamedInput) -> Result<()> {
        if let Some(&pos) = self.index.get(&input.name) {
            if self.entries[pos] == input {
                return Ok(());
            }
            return Err(CompileError::NameConflict { name: input.name });
        }
        self.index.insert(input.name.clone(), self.entries.len());
        self.entries.push(input);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Option<&NamedInput> {
        self.index.get(name).map(|&pos| &self.entries[pos])
    }

    /// Every bound name, sorted.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Bindings in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = &NamedInput> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validates declared inputs and seeds a [`NameTable`] with them.
pub struct InputRegistry<'v> {
    validator: &'v dyn ReferenceValidator,
}

impl<'v> InputRegistry<'v> {
    pub fn new(validator: &'v dyn ReferenceValidator) -> Self {
        InputRegistry { validator }
    }

    /// Builds the name table for `inputs`.
    ///
    /// Fails on an empty declaration set, a name shaped like a generated stage
    /// id, an empty reference, or a reference the validator rejects.
    pub fn register(&self, inputs: &BTreeMap<String, String>) -> Result<NameTable> {
        if inputs.is_empty() {
            return Err(CompileError::InputsMissing);
        }

        let mut table = NameTable::new();
        for (name, reference) in inputs {
            if is_stage_id(name) {
                return Err(CompileError::ReservedInputName { name: name.clone() });
            }
            if reference.trim().is_empty() {
                return Err(CompileError::EmptyInput { name: name.clone() });
            }
            let dataset_id =
                self.validator
                    .dataset_id(reference)
                    .ok_or_else(|| CompileError::InvalidReference {
                        name: name.clone(),
                        reference: reference.clone(),
                    })?;
            debug!(input = %name, dataset = %dataset_id, "registered input");
            table.bind(NamedInput::dataset(name, dataset_id))?;
        }
        Ok(table)
    }
}

#[test]
fn test_rebinding_same_target_is_noop() {
    let mut table = NameTable::new();
    table.bind(NamedInput::stage("base", "stage-0")).unwrap();
    table.bind(NamedInput::stage("base", "stage-0")).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn test_rebinding_other_target_conflicts() {
    let mut table = NameTable::new();
    table.bind(NamedInput::dataset("in", "1")).unwrap();
    let err = table.bind(NamedInput::stage("in", "stage-0")).unwrap_err();
    assert_eq!(err, CompileError::NameConflict { name: "in".into() });
    assert_eq!(table.resolve("in"), Some(&NamedInput::dataset("in", "1")));
}

#[test]
fn test_sorted_names() {
    let mut table = NameTable::new();
    table.bind(NamedInput::dataset("zeta", "1")).unwrap();
    table.bind(NamedInput::dataset("alpha", "2")).unwrap();
    assert_eq!(table.sorted_names(), vec!["alpha", "zeta"]);
    assert_eq!(table.iter().next().map(|e| e.name.as_str()), Some("zeta"));
}
