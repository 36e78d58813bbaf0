use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::binding::SourceBinding;
use crate::error::{Result, SourceError};
use crate::reader;

/// Directory names never descended into during discovery.
pub const PRUNED_DIRS: &[&str] = &[".git", "node_modules", "target"];

const CANDIDATE_EXTENSION: &str = "json";

/// Cap on overlapping candidate reads. The walk itself streams freely; the
/// reads are what balloon on a large tree full of json files.
const MAX_IN_FLIGHT_READS: usize = 64;

/// Finds and binds the single source file when no explicit path is given.
pub struct FileLocator {
    binding: Arc<SourceBinding>,
}

impl FileLocator {
    pub fn new(binding: Arc<SourceBinding>) -> Self {
        Self { binding }
    }

    /// Walk the tree under `root` and feed every `.json` candidate to the
    /// reader until one of them binds.
    ///
    /// Read completions arrive in arbitrary order; the binding's own
    /// check-then-set decides the winner, and losing results are discarded.
    /// Failed reads of any kind are skipped, since most entries in a working
    /// tree are not training files. Returns the bound path, or `NoFileFound` once
    /// the walk has finished and every in-flight read has settled without a
    /// single valid candidate.
    pub async fn discover(&self, root: &Path) -> Result<PathBuf> {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let walk_root = root.to_path_buf();
        let walker = tokio::task::spawn_blocking(move || {
            // Ignore-file semantics are all off: the exclusion set is the
            // only pruning, and hidden entries are fair game.
            let walk = WalkBuilder::new(&walk_root)
                .hidden(false)
                .ignore(false)
                .parents(false)
                .git_ignore(false)
                .git_global(false)
                .git_exclude(false)
                .filter_entry(|entry| {
                    let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                    !(is_dir
                        && entry
                            .file_name()
                            .to_str()
                            .is_some_and(|name| PRUNED_DIRS.contains(&name)))
                })
                .build();

            for entry in walk.flatten() {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                let is_candidate = entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == CANDIDATE_EXTENSION);
                if is_candidate && tx.send(entry.into_path()).is_err() {
                    break;
                }
            }
        });

        let mut reads: JoinSet<()> = JoinSet::new();

        while let Some(candidate) = rx.recv().await {
            // Once bound, drain the rest of the traversal without issuing
            // further reads; in-flight ones are left to finish and lose.
            if self.binding.is_loaded() {
                continue;
            }

            while reads.len() >= MAX_IN_FLIGHT_READS {
                reads.join_next().await;
            }

            let binding = Arc::clone(&self.binding);
            reads.spawn(async move {
                match reader::read_data(&candidate).await {
                    Ok(doc) => match binding.bind(&candidate, doc) {
                        Ok(()) => info!("found {}", candidate.display()),
                        Err(_) => debug!("discarding {}: already bound", candidate.display()),
                    },
                    Err(err) => debug!("skipping candidate: {err}"),
                }
            });
        }

        // Traversal is complete; wait for every in-flight read to settle
        // before deciding the outcome.
        while reads.join_next().await.is_some() {}
        walker.await.ok();

        match self.binding.path() {
            Some(path) => Ok(path),
            None => Err(SourceError::NoFileFound),
        }
    }
}

/// Bind an explicitly supplied path, skipping discovery. Unlike discovery,
/// errors here are fatal to startup rather than swallowed.
pub async fn bind_explicit(binding: &SourceBinding, path: &Path) -> Result<()> {
    let doc = reader::read_data(path).await?;
    binding.bind(path, doc)
}
