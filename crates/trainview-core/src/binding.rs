use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Result, SourceError};

/// Process-wide binding to the single source file being served.
///
/// Once bound, the path never changes for the lifetime of the process; only
/// the content is ever replaced, and always wholesale. All three fields move
/// together under one lock, which is never held across an await point.
pub struct SourceBinding {
    state: Mutex<State>,
}

struct State {
    path: Option<PathBuf>,
    content: Value,
    is_loaded: bool,
}

/// Point-in-time copy of the binding state.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub path: Option<PathBuf>,
    pub content: Value,
    pub is_loaded: bool,
}

impl SourceBinding {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                path: None,
                content: Value::Null,
                is_loaded: false,
            }),
        }
    }

    /// Commit a loaded document. The check-then-set is indivisible, so
    /// concurrent discovery results race safely: exactly one caller wins,
    /// the rest receive `AlreadyBound` carrying the winning path.
    pub fn bind(&self, path: &Path, content: Value) -> Result<()> {
        let mut state = self.state.lock().expect("binding lock poisoned");
        if state.is_loaded {
            return Err(SourceError::AlreadyBound {
                path: state.path.clone().unwrap_or_default(),
            });
        }
        state.path = Some(path.to_path_buf());
        state.content = content;
        state.is_loaded = true;
        Ok(())
    }

    /// Replace the in-memory document after a save or reload.
    pub fn replace_content(&self, content: Value) -> Result<()> {
        let mut state = self.state.lock().expect("binding lock poisoned");
        if !state.is_loaded {
            return Err(SourceError::Unbound);
        }
        state.content = content;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.lock().expect("binding lock poisoned");
        Snapshot {
            path: state.path.clone(),
            content: state.content.clone(),
            is_loaded: state.is_loaded,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state.lock().expect("binding lock poisoned").is_loaded
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.state.lock().expect("binding lock poisoned").path.clone()
    }
}

impl Default for SourceBinding {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn starts_unbound() {
        let binding = SourceBinding::new();
        let snapshot = binding.snapshot();
        assert!(!snapshot.is_loaded);
        assert!(snapshot.path.is_none());
        assert_eq!(snapshot.content, Value::Null);
    }

    #[test]
    fn bind_is_exactly_once() {
        let binding = SourceBinding::new();
        binding
            .bind(Path::new("a.json"), json!({"rasa_nlu_data": {}}))
            .unwrap();

        let err = binding
            .bind(Path::new("b.json"), json!({"rasa_nlu_data": {}}))
            .unwrap_err();
        assert!(matches!(err, SourceError::AlreadyBound { ref path } if path == Path::new("a.json")));

        // The loser never disturbs the committed state.
        assert_eq!(binding.path().unwrap(), PathBuf::from("a.json"));
    }

    #[test]
    fn replace_content_requires_a_binding() {
        let binding = SourceBinding::new();
        let err = binding.replace_content(json!({})).unwrap_err();
        assert!(matches!(err, SourceError::Unbound));
    }

    #[test]
    fn replace_content_keeps_the_path() {
        let binding = SourceBinding::new();
        binding
            .bind(Path::new("a.json"), json!({"rasa_nlu_data": {"v": 1}}))
            .unwrap();
        binding
            .replace_content(json!({"rasa_nlu_data": {"v": 2}}))
            .unwrap();

        let snapshot = binding.snapshot();
        assert_eq!(snapshot.path.unwrap(), PathBuf::from("a.json"));
        assert_eq!(snapshot.content["rasa_nlu_data"]["v"], 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_commits_produce_exactly_one_winner() {
        let binding = Arc::new(SourceBinding::new());
        let barrier = Arc::new(tokio::sync::Barrier::new(16));

        let mut tasks = Vec::new();
        for i in 0..16 {
            let binding = Arc::clone(&binding);
            let barrier = Arc::clone(&barrier);
            tasks.push(tokio::spawn(async move {
                barrier.wait().await;
                let path = PathBuf::from(format!("candidate-{i}.json"));
                binding.bind(&path, json!({"rasa_nlu_data": {"id": i}})).is_ok()
            }));
        }

        let mut winners = 0;
        for task in tasks {
            if task.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert!(binding.is_loaded());
    }
}
