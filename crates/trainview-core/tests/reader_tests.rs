use serde_json::json;
use tempfile::TempDir;
use trainview_core::{read_data, SourceError};

#[tokio::test]
async fn returns_a_valid_document_unchanged() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("demo.json");
    let doc = json!({
        "rasa_nlu_data": {
            "common_examples": [
                { "text": "book a table for two", "intent": "book_table", "entities": [] },
                { "text": "hi", "intent": "greet" },
                { "text": "what is the weather" }
            ]
        }
    });
    tokio::fs::write(&path, serde_json::to_string_pretty(&doc).unwrap())
        .await
        .unwrap();

    let loaded = read_data(&path).await.unwrap();
    assert_eq!(loaded, doc);
}

#[tokio::test]
async fn extra_top_level_keys_are_preserved() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("demo.json");
    let doc = json!({
        "rasa_nlu_data": { "common_examples": [] },
        "generated_by": "some-other-tool"
    });
    tokio::fs::write(&path, doc.to_string()).await.unwrap();

    let loaded = read_data(&path).await.unwrap();
    assert_eq!(loaded["generated_by"], "some-other-tool");
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    tokio::fs::write(&path, "{ \"rasa_nlu_data\": ").await.unwrap();

    let err = read_data(&path).await.unwrap_err();
    assert!(matches!(err, SourceError::Parse { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[tokio::test]
async fn missing_required_key_is_a_validation_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("other.json");
    tokio::fs::write(&path, "{ \"something_else\": [] }")
        .await
        .unwrap();

    let err = read_data(&path).await.unwrap_err();
    assert!(matches!(err, SourceError::Validation { .. }));
    assert!(err.to_string().contains("rasa_nlu_data"));
}

#[tokio::test]
async fn non_object_document_is_a_validation_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("list.json");
    tokio::fs::write(&path, "[1, 2, 3]").await.unwrap();

    let err = read_data(&path).await.unwrap_err();
    assert!(matches!(err, SourceError::Validation { .. }));
}

#[tokio::test]
async fn missing_file_is_a_read_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nope.json");

    let err = read_data(&path).await.unwrap_err();
    assert!(matches!(err, SourceError::Read { .. }));
    assert!(err.to_string().contains("nope.json"));
}
