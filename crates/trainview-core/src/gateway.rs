use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::binding::{Snapshot, SourceBinding};
use crate::error::{Result, SourceError};
use crate::reader;

/// The operations the HTTP layer performs against the bound file.
pub struct SyncGateway {
    binding: Arc<SourceBinding>,
}

impl SyncGateway {
    pub fn new(binding: Arc<SourceBinding>) -> Self {
        Self { binding }
    }

    /// Current path and document, verbatim.
    pub fn fetch(&self) -> Result<Snapshot> {
        let snapshot = self.binding.snapshot();
        if !snapshot.is_loaded {
            return Err(SourceError::Unbound);
        }
        Ok(snapshot)
    }

    /// Persist an edited document to the bound path.
    ///
    /// A document missing the training-data key is rejected before anything
    /// touches the disk. After a successful write the in-memory document is
    /// refreshed from a re-read of the file, so memory matches the on-disk
    /// bytes as re-parsed. A refresh failure is logged but does not fail the
    /// save; the write itself already succeeded.
    pub async fn save(&self, new_content: Value) -> Result<()> {
        let path = self.binding.path().ok_or(SourceError::Unbound)?;

        if !reader::has_training_data(&new_content) {
            return Err(SourceError::Validation { path });
        }

        let pretty =
            serde_json::to_string_pretty(&new_content).map_err(|source| SourceError::Write {
                path: path.clone(),
                source: source.into(),
            })?;

        tokio::fs::write(&path, pretty)
            .await
            .map_err(|source| SourceError::Write {
                path: path.clone(),
                source,
            })?;

        match reader::read_data(&path).await {
            Ok(doc) => self.binding.replace_content(doc)?,
            Err(err) => warn!("saved but couldn't re-read {}: {err}", path.display()),
        }

        Ok(())
    }

    /// Refresh the in-memory document after an external job may have
    /// rewritten the file out-of-band. Keeps the prior document when the
    /// file is unreadable; stale content beats none.
    pub async fn reload_after_job(&self) -> Result<()> {
        let path = self.binding.path().ok_or(SourceError::Unbound)?;

        match reader::read_data(&path).await {
            Ok(doc) => self.binding.replace_content(doc)?,
            Err(err) => warn!("couldn't reload {}: {err}", path.display()),
        }

        Ok(())
    }
}
