use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::r#trait::{DocumentError, DocumentSource};

/// In-memory document source.
///
/// Intended for tests/dev.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentSource {
    documents: HashMap<PathBuf, String>,
}

impl InMemoryDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.documents.insert(path.into(), text.into());
    }

    pub fn with_document(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }
}

impl DocumentSource for InMemoryDocumentSource {
    fn read(&self, path: &Path) -> Result<String, DocumentError> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| DocumentError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such document"),
            })
    }
}
