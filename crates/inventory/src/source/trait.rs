use std::path::{Path, PathBuf};

use thiserror::Error;

/// Reading a single item document failed.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}` is {len} bytes, documents are limited to {max} bytes", .path.display())]
    TooLarge { path: PathBuf, len: u64, max: usize },

    #[error("cannot allocate {len} bytes to read `{}`", .path.display())]
    Allocation { path: PathBuf, len: usize },

    #[error("`{}` is not valid UTF-8", .path.display())]
    Encoding { path: PathBuf },
}

impl DocumentError {
    pub fn path(&self) -> &Path {
        match self {
            DocumentError::Io { path, .. }
            | DocumentError::TooLarge { path, .. }
            | DocumentError::Allocation { path, .. }
            | DocumentError::Encoding { path } => path,
        }
    }
}

/// Read-only access to item documents by path.
///
/// Implementations read the whole document at once; there is no streaming.
pub trait DocumentSource {
    fn read(&self, path: &Path) -> Result<String, DocumentError>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn read(&self, path: &Path) -> Result<String, DocumentError> {
        (**self).read(path)
    }
}
