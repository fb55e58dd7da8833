//! Asynchronous write-up loading with a fixed fallback document.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::util::normalize_relative;

/// Document shown in place of a write-up that could not be loaded.
pub const FALLBACK_DOCUMENT: &str = "# Error\nCould not load writeup.";

/// Failure to load write-up text.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Write-up not found: {0}")]
    NotFound(String),

    #[error("Write-up path escapes content root: {0}")]
    OutsideRoot(String),

    #[error("Failed to read write-up {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Source of raw write-up text.
pub trait ContentLoader: Send + Sync {
    /// Resolves a content path to its text.
    fn load(&self, path: &str) -> impl Future<Output = Result<String, LoadError>> + Send;
}

/// Loads write-ups from files under a content root.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a content path, or None if it leaves the root.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        normalize_relative(Path::new(path)).map(|rel| self.root.join(rel))
    }
}

impl ContentLoader for FsLoader {
    async fn load(&self, path: &str) -> Result<String, LoadError> {
        let full = self
            .resolve(path)
            .ok_or_else(|| LoadError::OutsideRoot(path.to_string()))?;

        debug!("Loading write-up: {}", full.display());

        tokio::fs::read_to_string(&full).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_string())
            } else {
                LoadError::Io {
                    path: path.to_string(),
                    source: e,
                }
            }
        })
    }
}

/// Text of a write-up, or the fallback document and the reason for it.
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(String),
    Fallback(LoadError),
}

impl LoadOutcome {
    /// Text to hand to the transformer.
    pub fn text(&self) -> &str {
        match self {
            Self::Loaded(text) => text,
            Self::Fallback(_) => FALLBACK_DOCUMENT,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Loaded(text) => text,
            Self::Fallback(_) => FALLBACK_DOCUMENT.to_string(),
        }
    }
}

/// Loads a write-up, replacing any failure with the fallback document.
pub async fn load_or_fallback<L: ContentLoader>(loader: &L, path: &str) -> LoadOutcome {
    match loader.load(path).await {
        Ok(text) => LoadOutcome::Loaded(text),
        Err(e) => {
            warn!("Using fallback document: {}", e);
            LoadOutcome::Fallback(e)
        }
    }
}

/// Write-up currently committed to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: String,
    pub text: String,
    pub fallback: bool,
}

/// Tracks the write-up the reader last asked for.
///
/// Every `select` takes a ticket from a monotonically increasing counter.
/// A finished load commits only while its ticket is still the newest, so a
/// slow earlier request never overwrites a later one.
pub struct WriteupSession<L> {
    loader: L,
    latest: AtomicU64,
    current: Mutex<Option<Selection>>,
}

impl<L: ContentLoader> WriteupSession<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            latest: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// Loads a write-up and commits it unless a newer request was made.
    ///
    /// # Returns
    ///
    /// True if this request's result became the current selection
    pub async fn select(&self, path: &str) -> bool {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let outcome = load_or_fallback(&self.loader, path).await;

        let mut current = self.current.lock().await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!("Discarding stale load of {}", path);
            return false;
        }

        let fallback = outcome.is_fallback();
        *current = Some(Selection {
            path: path.to_string(),
            text: outcome.into_text(),
            fallback,
        });
        true
    }

    pub async fn current(&self) -> Option<Selection> {
        self.current.lock().await.clone()
    }

    /// Clears the selection and invalidates loads still in flight.
    pub async fn close(&self) {
        let mut current = self.current.lock().await;
        self.latest.fetch_add(1, Ordering::SeqCst);
        *current = None;
    }
}
