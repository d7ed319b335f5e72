mod common;

use std::sync::Arc;

use common::RecordingExecutor;
use serde_json::json;
use snowform::{DdlError, Defaults, Inputs, ResourceLifecycle, ResourceProvider, resources};

fn file_format_provider(executor: Arc<RecordingExecutor>) -> ResourceProvider {
    common::init();
    ResourceProvider::new(resources::file_format().unwrap(), Defaults::default(), executor)
}

fn inputs(value: serde_json::Value) -> Inputs {
    Inputs::from_json(value).unwrap()
}

#[tokio::test]
async fn type_is_inlined_and_keyword_options_render_bare() {
    let executor = Arc::new(RecordingExecutor::default());
    let provider = file_format_provider(executor.clone());

    provider
        .create(&inputs(json!({
            "name": "test_format",
            "database": "test_db",
            "schema": "test_schema",
            "type": "CSV",
            "compression": "AUTO",
            "field_delimiter": "none",
            "encoding": "UTF8"
        })))
        .await
        .unwrap();

    let calls = executor.calls();
    assert_eq!(
        calls[0].0,
        "CREATE FILE FORMAT test_db.test_schema.test_format\nTYPE = CSV\nCOMPRESSION = AUTO\nFIELD_DELIMITER = NONE\nENCODING = %s"
    );
    assert_eq!(calls[0].1, vec!["UTF8"]);
}

#[tokio::test]
async fn non_keyword_values_delegate_to_the_inner_kind() {
    let executor = Arc::new(RecordingExecutor::default());
    let provider = file_format_provider(executor.clone());

    provider
        .create(&inputs(json!({
            "name": "test_format",
            "database": "test_db",
            "schema": "test_schema",
            "type": "CSV",
            "compression": "GZIP",
            "field_delimiter": "|",
            "null_if": ["N", "NULL"]
        })))
        .await
        .unwrap();

    let calls = executor.calls();
    assert_eq!(
        calls[0].0,
        "CREATE FILE FORMAT test_db.test_schema.test_format\nTYPE = CSV\nCOMPRESSION = %s\nFIELD_DELIMITER = %s\nNULL_IF = (%s,%s)"
    );
    assert_eq!(calls[0].1, vec!["GZIP", "|", "N", "NULL"]);
}

#[tokio::test]
async fn missing_required_type_fails_before_any_execution() {
    let executor = Arc::new(RecordingExecutor::default());
    let provider = file_format_provider(executor.clone());

    let err = provider
        .create(&inputs(json!({
            "name": "test_format",
            "database": "test_db",
            "schema": "test_schema",
            "comment": "no type given"
        })))
        .await
        .unwrap_err();

    assert!(matches!(err, DdlError::MissingRequiredAttribute(field) if field == "type"));
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn unnamed_resources_get_an_autogenerated_name() {
    let executor = Arc::new(RecordingExecutor::default());
    common::init();
    let provider = ResourceProvider::new(
        resources::file_format().unwrap(),
        Defaults {
            database: Some("test_db".to_string()),
            schema: Some("test_schema".to_string()),
        },
        executor.clone(),
    );

    let result = provider
        .create(&inputs(json!({ "type": "CSV" })))
        .await
        .unwrap();

    let name = result.outputs.get("name").and_then(|v| v.as_str()).unwrap().to_string();
    assert!(name.starts_with("file_format_"), "unexpected name: {name}");
    assert_eq!(name.len(), "file_format_".len() + 8);
    assert_eq!(result.id, format!("test_db.test_schema.{name}"));
}

#[tokio::test]
async fn invalid_names_fail_before_any_execution() {
    let executor = Arc::new(RecordingExecutor::default());
    let provider = file_format_provider(executor.clone());

    let err = provider
        .create(&inputs(json!({ "name": "bad;name", "type": "CSV" })))
        .await
        .unwrap_err();

    assert!(matches!(err, DdlError::InvalidObjectName(_)));
    assert!(executor.calls().is_empty());
}
