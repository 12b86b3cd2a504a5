//! Inventory domain: items, the item ring, the inventory aggregate and the
//! loading of item documents.
//!
//! The domain types (`Item`, `ItemCollection`, `Inventory`) are deterministic
//! and do no IO. Reading documents goes through a [`DocumentSource`].

pub mod collection;
pub mod inventory;
pub mod item;
pub mod loader;
pub mod parser;
pub mod source;

pub use collection::{ItemCollection, ItemHandle};
pub use inventory::{
    Inventory, InventoryCommand, InventoryEvent, InventoryStatus, ItemPopped, ItemPushed, PopItem,
    PushItem,
};
pub use item::{Item, ItemDraft, UNSET_WEIGHT};
pub use loader::{ItemRequest, LoadAttempt, LoadError, LoadOutcome, LoadReport, load, load_one};
pub use parser::{DEFAULT_MAX_FIELD_LEN, Field, ItemParser, ParseError, ScanLimits, parse_item};
pub use source::{
    DEFAULT_ITEMS_DIR, DEFAULT_MAX_DOCUMENT_BYTES, DocumentError, DocumentSource,
    FsDocumentSource, InMemoryDocumentSource,
};
