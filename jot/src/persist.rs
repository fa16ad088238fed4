//! Document persistence: whole-file reads and writes plus path binding.
//!
//! The [`PersistenceManager`] owns the association between the in-memory
//! document and a filesystem path. A new or reset document has no bound
//! path; the first successful [`read`](PersistenceManager::read) or
//! [`write`](PersistenceManager::write) binds one, and every later success
//! rebinds. A failed call always leaves the binding unchanged.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Display name used while no path is bound.
const UNTITLED: &str = "Untitled";

/// Errors raised by document reads and writes.
///
/// This is the only error surface of the editor core; search and autosave
/// never fail outward.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("{path} is not valid UTF-8 text")]
    Decode { path: PathBuf },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistError {
    fn from_read(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    fn from_write(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Owns the document's path binding and performs whole-file I/O.
///
/// Stateless with respect to the document content -- the buffer is passed
/// in as an argument. The bound path is the manager's only state, and it
/// mutates only inside [`read`](Self::read), [`write`](Self::write), and
/// [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct PersistenceManager {
    bound_path: Option<PathBuf>,
}

impl PersistenceManager {
    /// Create a manager with no bound path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the bound path. No I/O; always succeeds.
    pub fn reset(&mut self) {
        tracing::debug!("clearing document binding");
        self.bound_path = None;
    }

    /// The path currently associated with the document, if any.
    pub fn bound_path(&self) -> Option<&Path> {
        self.bound_path.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.bound_path.is_some()
    }

    /// File name for title/status display; "Untitled" while unbound.
    pub fn display_name(&self) -> String {
        self.bound_path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .unwrap_or(UNTITLED)
            .to_string()
    }

    /// Full bound path for status display; "Untitled" while unbound.
    pub fn display_path(&self) -> String {
        self.bound_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    /// Read the full contents of `path` as UTF-8 text.
    ///
    /// On success the document is rebound to `path`. On failure the
    /// previous binding is left untouched. Exactly one file handle is
    /// opened and closed per call.
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<String, PersistError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| PersistError::from_read(path, e))?;
        let content = String::from_utf8(bytes).map_err(|_| PersistError::Decode {
            path: path.to_path_buf(),
        })?;

        tracing::info!(path = %path.display(), bytes = content.len(), "read document");
        self.bound_path = Some(path.to_path_buf());
        Ok(content)
    }

    /// Write `content` to `path` in full, overwriting any existing file.
    ///
    /// The bytes given are the bytes persisted; no line-ending conversion.
    /// Internally the content goes to a sibling temp file that is renamed
    /// over the target, so a failed write never truncates existing data.
    /// On success the document is rebound to `path`; on failure the
    /// previous binding is left untouched. The caller is responsible for
    /// any confirm-overwrite interaction before calling this.
    pub fn write(&mut self, path: impl AsRef<Path>, content: &str) -> Result<(), PersistError> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp =
            tempfile::NamedTempFile::new_in(dir).map_err(|e| PersistError::from_write(path, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| PersistError::from_write(path, e))?;
        tmp.persist(path)
            .map_err(|e| PersistError::from_write(path, e.error))?;

        tracing::info!(path = %path.display(), bytes = content.len(), "wrote document");
        self.bound_path = Some(path.to_path_buf());
        Ok(())
    }
}
