use proptest::prelude::*;
use stageline::{compile, decompile, MultiStageQuery, SurfaceQuery, SurfaceStage};

/// Per stage, the (dataset, stage) origin of every input in order.
fn resolution(query: &MultiStageQuery) -> Vec<Vec<(Option<String>, Option<String>)>> {
    query
        .stages
        .iter()
        .map(|s| {
            s.input
                .iter()
                .map(|i| (i.dataset_id.clone(), i.stage_id.clone()))
                .collect()
        })
        .collect()
}

fn assert_stable(original: &SurfaceQuery) {
    let first = compile(original).unwrap();
    let surface = decompile(&first).unwrap();
    let second = compile(&surface).unwrap();

    assert_eq!(first.stages.len(), second.stages.len());
    assert_eq!(resolution(&first), resolution(&second));
    assert_eq!(first.output_stage, second.output_stage);
}

#[test]
fn test_single_stage_is_stable() {
    assert_stable(
        &SurfaceQuery::new()
            .input("in", "410000")
            .stage(SurfaceStage::new("filter true")),
    );
}

#[test]
fn test_alias_chain_is_stable() {
    assert_stable(
        &SurfaceQuery::new()
            .input("in", "1")
            .stage(SurfaceStage::new("filter true").with_alias("base"))
            .stage(SurfaceStage::new("union @base @stage-0").with_input("base"))
            .stage(SurfaceStage::new("pick_col a").with_input("base")),
    );
}

#[test]
fn test_decompile_does_not_grow() {
    let original = SurfaceQuery::new()
        .input("a", "100")
        .input("b", "200")
        .stage(SurfaceStage::new("filter true").with_input("a").with_alias("first"))
        .stage(SurfaceStage::new("join @b"))
        .stage(SurfaceStage::new("union @first"));

    let once = decompile(&compile(&original).unwrap()).unwrap();
    let twice = decompile(&compile(&once).unwrap()).unwrap();

    assert_eq!(once, twice);
}

const INPUT_NAMES: [&str; 3] = ["in", "logs", "users"];

#[derive(Debug, Clone)]
struct StagePlan {
    alias: bool,
    input: Option<usize>,
    references: Vec<usize>,
}

fn stage_plan() -> impl Strategy<Value = StagePlan> {
    (
        any::<bool>(),
        proptest::option::of(0usize..32),
        proptest::collection::vec(0usize..32, 0..3),
    )
        .prop_map(|(alias, input, references)| StagePlan {
            alias,
            input,
            references,
        })
}

/// Builds a valid surface query: every explicit input and body reference
/// picks from the names visible at that stage.
fn build_query(input_count: usize, plans: &[StagePlan]) -> SurfaceQuery {
    let mut query = SurfaceQuery::new();
    let mut visible: Vec<String> = Vec::new();
    for (i, name) in INPUT_NAMES.iter().take(input_count).enumerate() {
        query = query.input(*name, (1000 + i).to_string());
        visible.push(name.to_string());
    }

    for (index, plan) in plans.iter().enumerate() {
        let mut body = format!("op{}", index);
        for r in &plan.references {
            body.push_str(&format!(" @{}", visible[r % visible.len()]));
        }
        let mut stage = SurfaceStage::new(body);
        let needs_input = index == 0 && input_count > 1;
        match plan.input {
            Some(pick) => stage = stage.with_input(visible[pick % visible.len()].clone()),
            None if needs_input => stage = stage.with_input(visible[0].clone()),
            None => {}
        }
        visible.push(format!("stage-{}", index));
        if plan.alias {
            let alias = format!("alias{}", index);
            stage = stage.with_alias(alias.clone());
            visible.push(alias);
        }
        query = query.stage(stage);
    }
    query
}

proptest! {
    #[test]
    fn prop_compile_decompile_compile_is_stable(
        input_count in 1usize..=3,
        plans in proptest::collection::vec(stage_plan(), 1..8),
    ) {
        let original = build_query(input_count, &plans);

        let first = compile(&original).unwrap();
        prop_assert_eq!(&first.output_stage, &first.stages.last().unwrap().id);

        let surface = decompile(&first).unwrap();
        let second = compile(&surface).unwrap();

        prop_assert_eq!(first.stages.len(), second.stages.len());
        prop_assert_eq!(resolution(&first), resolution(&second));
        prop_assert_eq!(first.output_stage, second.output_stage);
    }

    #[test]
    fn prop_recompiling_is_deterministic(
        input_count in 1usize..=3,
        plans in proptest::collection::vec(stage_plan(), 1..8),
    ) {
        let original = build_query(input_count, &plans);
        prop_assert_eq!(compile(&original).unwrap(), compile(&original).unwrap());
    }
}
