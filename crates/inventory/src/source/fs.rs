use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::r#trait::{DocumentError, DocumentSource};

/// Directory relative document paths are resolved against.
pub const DEFAULT_ITEMS_DIR: &str = "Items_JSON";

/// Largest document accepted by default.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 999;

/// Reads item documents from disk, one whole file per call.
#[derive(Debug, Clone)]
pub struct FsDocumentSource {
    root: PathBuf,
    max_bytes: usize,
}

impl Default for FsDocumentSource {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_DIR, DEFAULT_MAX_DOCUMENT_BYTES)
    }
}

impl FsDocumentSource {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Absolute paths are used as given; relative ones live under the root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl DocumentSource for FsDocumentSource {
    fn read(&self, path: &Path) -> Result<String, DocumentError> {
        let full = self.resolve(path);
        let io_error = |source| DocumentError::Io {
            path: full.clone(),
            source,
        };

        let file = File::open(&full).map_err(io_error)?;
        let len = file.metadata().map_err(io_error)?.len();
        if len > self.max_bytes as u64 {
            return Err(DocumentError::TooLarge {
                path: full,
                len,
                max: self.max_bytes,
            });
        }

        let expected = len as usize;
        let mut buf = Vec::new();
        buf.try_reserve_exact(expected)
            .map_err(|_| DocumentError::Allocation {
                path: full.clone(),
                len: expected,
            })?;

        // The file may have grown since the metadata call.
        file.take(self.max_bytes as u64 + 1)
            .read_to_end(&mut buf)
            .map_err(io_error)?;
        if buf.len() > self.max_bytes {
            return Err(DocumentError::TooLarge {
                path: full,
                len: buf.len() as u64,
                max: self.max_bytes,
            });
        }

        tracing::debug!(path = %full.display(), bytes = buf.len(), "document read");
        String::from_utf8(buf).map_err(|_| DocumentError::Encoding { path: full })
    }
}
