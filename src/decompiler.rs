//! Reverse pass: backend multi-stage query → minimal surface configuration.
//!
//! The reconstruction drops every annotation that recompiling would infer
//! again from position, so reading a stored query and writing it back does
//! not grow it. Supplemental inputs are not carried over; recompiling
//! rediscovers them from the `@name` references in each pipeline body.
//!
//! The stored query must name its last stage as the output and must bind each
//! input name to a single target; anything else is rejected rather than
//! normalized.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::error::{CompileError, Result};
use crate::query::{stage_id, InputRef, MultiStageQuery, StageQuery, SurfaceQuery, SurfaceStage};
use crate::scanner::is_referenced;

/// Reconstructs the surface form of `query`.
pub fn decompile(query: &MultiStageQuery) -> Result<SurfaceQuery> {
    if query.stages.is_empty() {
        return Err(CompileError::StagesMissing);
    }

    let positions = stage_positions(&query.stages)?;
    if let Some(last) = query.stages.last() {
        if query.output_stage != last.id {
            return Err(CompileError::OutputStageMismatch {
                output_stage: query.output_stage.clone(),
                last_stage: last.id.clone(),
            });
        }
    }
    for (index, stage) in query.stages.iter().enumerate() {
        if stage.input.is_empty() {
            return Err(CompileError::StageInputMissing { index });
        }
    }

    let inputs = collect_inputs(&query.stages)?;
    if inputs.is_empty() {
        return Err(CompileError::InputsMissing);
    }

    let aliases = collect_aliases(&query.stages, &positions);

    let mut stages = Vec::with_capacity(query.stages.len());
    for (index, stage) in query.stages.iter().enumerate() {
        let alias = aliases.get(stage.id.as_str()).map(|a| a.to_string());
        let input = if is_implied(&query.stages, index, &inputs, &aliases) {
            None
        } else {
            stage.primary_input().map(|p| p.input_name.clone())
        };

        debug!(
            index,
            stage = %stage.id,
            alias = alias.as_deref().unwrap_or(""),
            explicit_input = input.as_deref().unwrap_or(""),
            "decompiled stage"
        );

        stages.push(SurfaceStage {
            alias,
            input,
            pipeline: stage.pipeline.clone(),
        });
    }

    Ok(SurfaceQuery { inputs, stages })
}

/// Stage id → position, rejecting duplicate ids.
fn stage_positions(stages: &[StageQuery]) -> Result<HashMap<&str, usize>> {
    let mut positions = HashMap::with_capacity(stages.len());
    for (index, stage) in stages.iter().enumerate() {
        if positions.insert(stage.id.as_str(), index).is_some() {
            return Err(CompileError::StageIdDuplicate {
                id: stage.id.clone(),
            });
        }
    }
    Ok(positions)
}

/// Every dataset-bound input across all stages.
///
/// Inputs are kept even when no stage ends up naming them explicitly. A name
/// bound to two datasets, or to a dataset and a stage, is a
/// [`CompileError::NameConflict`].
fn collect_inputs(stages: &[StageQuery]) -> Result<BTreeMap<String, String>> {
    let mut inputs: BTreeMap<String, String> = BTreeMap::new();
    for input in stages.iter().flat_map(|s| s.input.iter()) {
        let Some(dataset_id) = &input.dataset_id else {
            continue;
        };
        match inputs.get(&input.input_name) {
            Some(bound) if bound != dataset_id => {
                return Err(CompileError::NameConflict {
                    name: input.input_name.clone(),
                });
            }
            Some(_) => {}
            None => {
                inputs.insert(input.input_name.clone(), dataset_id.clone());
            }
        }
    }

    let stage_named = stages
        .iter()
        .flat_map(|s| s.input.iter())
        .filter(|i| i.stage_id.is_some())
        .find(|i| inputs.contains_key(&i.input_name));
    if let Some(input) = stage_named {
        return Err(CompileError::NameConflict {
            name: input.input_name.clone(),
        });
    }

    Ok(inputs)
}

/// Stage id → the name a later stage uses for it, when that name is not the
/// id recompilation would generate for the stage.
fn collect_aliases<'q>(
    stages: &'q [StageQuery],
    positions: &HashMap<&str, usize>,
) -> HashMap<&'q str, &'q str> {
    let mut aliases = HashMap::new();
    let mut taken = HashSet::new();
    for (index, stage) in stages.iter().enumerate() {
        for input in &stage.input {
            let Some(origin) = input.stage_id.as_deref() else {
                continue;
            };
            let Some(&origin_pos) = positions.get(origin) else {
                continue;
            };
            if origin_pos >= index || input.input_name == stage_id(origin_pos) {
                continue;
            }
            if !aliases.contains_key(origin) && taken.insert(input.input_name.as_str()) {
                aliases.insert(origin, input.input_name.as_str());
            }
        }
    }
    aliases
}

/// Whether the stage at `index` gets its primary input by position alone.
fn is_implied(
    stages: &[StageQuery],
    index: usize,
    inputs: &BTreeMap<String, String>,
    aliases: &HashMap<&str, &str>,
) -> bool {
    let Some(primary) = stages[index].primary_input() else {
        return false;
    };

    if index == 0 {
        return inputs.len() == 1
            && primary.dataset_id.is_some()
            && inputs.contains_key(&primary.input_name);
    }

    let stage = &stages[index];
    let previous = &stages[index - 1];
    if !continues_from(primary, previous, aliases.get(previous.id.as_str()).copied()) {
        return false;
    }

    // Recompiling names the default after the previous stage's generated id.
    // Any other name the body mentions would then become an extra input.
    let generated = stage_id(index - 1);
    primary.input_name == generated
        || !(is_referenced(&stage.pipeline, &primary.input_name)
            || is_referenced(&stage.pipeline, &generated))
}

/// Whether `primary` is the output of `previous`, named either by its id or
/// by its alias. Name-only placeholders match on the name alone.
fn continues_from(primary: &InputRef, previous: &StageQuery, alias: Option<&str>) -> bool {
    if primary.dataset_id.is_some() {
        return false;
    }
    if let Some(origin) = primary.stage_id.as_deref() {
        if origin != previous.id {
            return false;
        }
    }
    primary.input_name == previous.id || alias == Some(primary.input_name.as_str())
}
