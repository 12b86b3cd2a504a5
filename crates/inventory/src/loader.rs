//! Batch loading of item documents into an inventory.
//!
//! Every requested copy is attempted in order. A document that cannot be
//! read or parsed, or an item the inventory refuses, is recorded in the
//! report and the batch moves on.

use std::path::{Path, PathBuf};

use thiserror::Error;

use haversack_core::{DomainError, ItemId};

use crate::inventory::Inventory;
use crate::item::Item;
use crate::parser::{ItemParser, ParseError, ScanLimits};
use crate::source::{DocumentError, DocumentSource};

/// One document to load, possibly several times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub path: PathBuf,
    pub copies: u32,
}

impl ItemRequest {
    pub fn new(path: impl Into<PathBuf>, copies: u32) -> Self {
        Self {
            path: path.into(),
            copies,
        }
    }

    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self::new(path, 1)
    }
}

/// A document could not be turned into an item.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("cannot parse `{}`: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

#[derive(Debug)]
pub enum LoadOutcome {
    Pushed { item_id: ItemId, display_name: String },
    Rejected { item_id: ItemId, reason: DomainError },
    Failed { error: LoadError },
}

/// Result of loading one copy of one document.
#[derive(Debug)]
pub struct LoadAttempt {
    pub path: PathBuf,
    pub copy: u32,
    pub outcome: LoadOutcome,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub attempts: Vec<LoadAttempt>,
}

impl LoadReport {
    pub fn pushed_count(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, LoadOutcome::Pushed { .. }))
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.pushed_count() == self.attempts.len()
    }
}

/// Read, parse and push a single document.
///
/// A repeated document gets the next free copy id (`dagger`, `dagger-2`, ...).
pub fn load_one<S: DocumentSource>(
    source: &S,
    parser: &ItemParser,
    path: &Path,
    inventory: &mut Inventory,
) -> LoadOutcome {
    let item = match read_item(source, parser, path) {
        Ok(item) => item,
        Err(error) => {
            tracing::warn!(path = %path.display(), error = %error, "document skipped");
            return LoadOutcome::Failed { error };
        }
    };

    let item_id = inventory.unique_id(item.id_typed());
    let item = item.renamed(item_id.clone());
    let display_name = item.display_name().to_string();
    match inventory.push(item) {
        Ok(()) => LoadOutcome::Pushed {
            item_id,
            display_name,
        },
        Err(reason) => LoadOutcome::Rejected { item_id, reason },
    }
}

/// Load every requested copy, in order, into `inventory`.
pub fn load<S: DocumentSource>(
    source: &S,
    requests: &[ItemRequest],
    inventory: &mut Inventory,
    limits: ScanLimits,
) -> LoadReport {
    let parser = ItemParser::new(limits);
    let mut report = LoadReport::default();

    for request in requests {
        for copy in 1..=request.copies {
            let outcome = load_one(source, &parser, &request.path, inventory);
            report.attempts.push(LoadAttempt {
                path: request.path.clone(),
                copy,
                outcome,
            });
        }
    }

    tracing::info!(
        attempted = report.attempts.len(),
        pushed = report.pushed_count(),
        "batch load finished"
    );
    report
}

fn read_item<S: DocumentSource>(
    source: &S,
    parser: &ItemParser,
    path: &Path,
) -> Result<Item, LoadError> {
    let text = source.read(path)?;
    let item = parser.parse(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(item.with_source(path))
}
