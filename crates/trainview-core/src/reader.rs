use serde_json::Value;
use std::path::Path;

use crate::error::{Result, SourceError};

/// Top-level key a candidate document must carry to be eligible for binding.
pub const REQUIRED_KEY: &str = "rasa_nlu_data";

/// True when the document carries the training-data key. Key presence is the
/// sole validity criterion; the record shape underneath is opaque here.
pub fn has_training_data(doc: &Value) -> bool {
    doc.get(REQUIRED_KEY).is_some()
}

/// Load a candidate file: read, parse, check the required key.
///
/// Returns the parsed document unchanged. No side effects beyond the read;
/// every failure names the offending path.
pub async fn read_data(path: &Path) -> Result<Value> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let doc: Value = serde_json::from_str(&raw).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !has_training_data(&doc) {
        return Err(SourceError::Validation {
            path: path.to_path_buf(),
        });
    }

    Ok(doc)
}
