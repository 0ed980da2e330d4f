//! Resume loading — read the PDF once, join its pages, keep the text.
//!
//! `initialize` runs before the HTTP listener binds, so every request sees a
//! fully populated `DocumentCache`. The cache is an `Arc<str>` and is never
//! written again.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse document {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("document {path} contains no extractable text")]
    Empty { path: PathBuf },
}

/// What to do when the resume cannot be loaded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Refuse to start serving.
    FailFast,
    /// Log the failure and serve with an empty document.
    Degraded,
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadPolicy::FailFast => f.write_str("fail-fast"),
            LoadPolicy::Degraded => f.write_str("degraded"),
        }
    }
}

#[derive(Debug, Error)]
#[error("DOCUMENT_LOAD_POLICY must be 'fail-fast' or 'degraded', got '{0}'")]
pub struct UnknownLoadPolicy(String);

impl FromStr for LoadPolicy {
    type Err = UnknownLoadPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "fail_fast" | "failfast" => Ok(LoadPolicy::FailFast),
            "degraded" => Ok(LoadPolicy::Degraded),
            other => Err(UnknownLoadPolicy(other.to_string())),
        }
    }
}

/// Extracted resume text, shared read-only across request handlers.
#[derive(Debug, Clone)]
pub struct DocumentCache {
    text: Arc<str>,
    page_count: usize,
}

impl DocumentCache {
    pub fn new(text: impl Into<Arc<str>>, page_count: usize) -> Self {
        Self {
            text: text.into(),
            page_count,
        }
    }

    /// The degraded-mode cache: no text, reported as not loaded.
    pub fn empty() -> Self {
        Self::new("", 0)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn is_loaded(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Reads the PDF at `path` and returns its text, one page after another,
/// separated by a single newline.
pub fn load(path: &Path) -> Result<DocumentCache, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
        LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let text = join_pages(&pages);
    if text.trim().is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(DocumentCache::new(text, pages.len()))
}

fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Loads the resume on the blocking pool and applies `policy` to failures.
///
/// Returns `Err` only under `LoadPolicy::FailFast`; the caller must not bind
/// the listener in that case.
pub async fn initialize(path: &Path, policy: LoadPolicy) -> Result<DocumentCache, LoadError> {
    let owned = path.to_path_buf();
    let result = tokio::task::spawn_blocking(move || load(&owned))
        .await
        .unwrap_or_else(|join_err| {
            // pdf-extract can panic on malformed fonts; treat that as unparseable.
            Err(LoadError::Parse {
                path: path.to_path_buf(),
                message: format!("extraction aborted: {join_err}"),
            })
        });

    match result {
        Ok(cache) => {
            info!(
                "Loaded resume from {} ({} pages, {} chars)",
                path.display(),
                cache.page_count(),
                cache.text().chars().count()
            );
            Ok(cache)
        }
        Err(e) => match policy {
            LoadPolicy::FailFast => Err(e),
            LoadPolicy::Degraded => {
                error!("Resume load failed, serving without document context: {e}");
                Ok(DocumentCache::empty())
            }
        },
    }
}
