#![cfg(feature = "cli")]

use serde_json::{json, Value};
use stageline::cli::{
    execute_compile, execute_decompile, execute_validate, get_doc_topic, get_docs_overview,
    CliError, ConvertOptions,
};
use stageline::CompileError;

fn options(document: Value) -> ConvertOptions {
    ConvertOptions {
        input: Some(document.to_string()),
        pretty: false,
    }
}

#[test]
fn test_compile_command() {
    let out = execute_compile(&options(json!({
        "inputs": { "in": "o:::dataset:410000" },
        "stages": [{ "pipeline": "filter true" }]
    })))
    .unwrap();

    let backend: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        backend,
        json!({
            "outputStage": "stage-0",
            "stages": [{
                "id": "stage-0",
                "pipeline": "filter true",
                "input": [{ "inputName": "in", "datasetId": "410000" }]
            }]
        })
    );
}

#[test]
fn test_decompile_command() {
    let out = execute_decompile(&options(json!({
        "outputStage": "stage-1",
        "stages": [
            { "id": "stage-0", "pipeline": "filter true",
              "input": [{ "inputName": "in", "datasetId": "1" }] },
            { "id": "stage-1", "pipeline": "make_col a:1",
              "input": [{ "inputName": "base", "stageId": "stage-0" }] }
        ]
    })))
    .unwrap();

    let surface: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        surface,
        json!({
            "inputs": { "in": "1" },
            "stages": [
                { "alias": "base", "pipeline": "filter true" },
                { "pipeline": "make_col a:1" }
            ]
        })
    );
}

#[test]
fn test_pretty_output() {
    let mut opts = options(json!({
        "inputs": { "in": "1" },
        "stages": [{ "pipeline": "filter true" }]
    }));
    opts.pretty = true;

    let out = execute_compile(&opts).unwrap();
    assert!(out.contains("\n  \"outputStage\": \"stage-0\""));
}

#[test]
fn test_validate_command() {
    let stages = execute_validate(&options(json!({
        "inputs": { "in": "1" },
        "stages": [{ "pipeline": "filter true" }, { "pipeline": "make_col a:1" }]
    })))
    .unwrap();
    assert_eq!(stages, 2);
}

#[test]
fn test_compile_error_is_reported() {
    let err = execute_compile(&options(json!({
        "inputs": {},
        "stages": [{ "pipeline": "filter true" }]
    })))
    .unwrap_err();

    assert!(matches!(err, CliError::Compile(CompileError::InputsMissing)));
    assert_eq!(
        err.to_string(),
        "Invalid configuration: at least one input must be declared"
    );
}

#[test]
fn test_invalid_json() {
    let opts = ConvertOptions {
        input: Some("{ not json".into()),
        pretty: false,
    };
    assert!(matches!(execute_compile(&opts), Err(CliError::Json(_))));
}

#[test]
fn test_missing_input() {
    let opts = ConvertOptions::default();
    assert!(matches!(execute_decompile(&opts), Err(CliError::NoInput)));
}

#[test]
fn test_docs() {
    assert!(get_docs_overview().contains("TOPICS"));
    assert!(get_doc_topic("alias").unwrap().starts_with("ALIASES"));
    assert!(matches!(
        get_doc_topic("nope"),
        Err(CliError::UnknownTopic(t)) if t == "nope"
    ));
}
