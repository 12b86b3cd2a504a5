//! Where item documents come from.
//!
//! The inventory never touches the filesystem itself: callers hand the batch
//! loader a [`DocumentSource`] and get the document text back, or a
//! [`DocumentError`] naming the path that failed.

pub mod fs;
pub mod in_memory;
pub mod r#trait;

pub use fs::{DEFAULT_ITEMS_DIR, DEFAULT_MAX_DOCUMENT_BYTES, FsDocumentSource};
pub use in_memory::InMemoryDocumentSource;
pub use r#trait::{DocumentError, DocumentSource};
