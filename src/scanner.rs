//! Textual detection of `@name` references inside an opaque pipeline body.
//!
//! This is a substring heuristic, not a parse. `@name` inside a string
//! literal or comment still counts, and `@ab` also counts as a reference to
//! `a`. Callers rely on exactly this behavior.

use tracing::trace;

/// Sigil that marks an input reference in a pipeline body.
pub const REFERENCE_SIGIL: char = '@';

/// Returns the candidates referenced as `@name` in `pipeline`, in the order
/// they appear in `candidates`.
pub fn referenced_names<'a>(pipeline: &str, candidates: &[&'a str]) -> Vec<&'a str> {
    candidates
        .iter()
        .copied()
        .filter(|name| {
            let hit = !name.is_empty() && is_referenced(pipeline, name);
            if hit {
                trace!(input = %name, "pipeline references input");
            }
            hit
        })
        .collect()
}

/// Whether `pipeline` contains the sigil immediately followed by `name`.
pub fn is_referenced(pipeline: &str, name: &str) -> bool {
    let mut needle = String::with_capacity(name.len() + 1);
    needle.push(REFERENCE_SIGIL);
    needle.push_str(name);
    pipeline.contains(&needle)
}
