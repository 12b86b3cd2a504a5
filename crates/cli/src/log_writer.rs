//! Camp log: a record of the inventory written when the session ends.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use haversack_core::Money;
use haversack_inventory::{Inventory, InventoryStatus};

#[derive(Debug, Error)]
pub enum LogError {
    #[error("cannot write camp log `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode camp log entry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One carried item as recorded in the camp log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampItem {
    pub id: String,
    pub display_name: String,
    pub weight: f64,
    pub cost: Money,
    pub source: Option<PathBuf>,
}

/// Inventory state at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampSnapshot {
    pub recorded_at: DateTime<Utc>,
    pub status: InventoryStatus,
    pub items: Vec<CampItem>,
}

impl CampSnapshot {
    pub fn capture(inventory: &Inventory, recorded_at: DateTime<Utc>) -> Self {
        Self {
            recorded_at,
            status: inventory.status(),
            items: inventory
                .items()
                .iter()
                .map(|item| CampItem {
                    id: item.id_typed().to_string(),
                    display_name: item.display_name().to_string(),
                    weight: item.weight(),
                    cost: item.cost(),
                    source: item.source().map(Path::to_path_buf),
                })
                .collect(),
        }
    }
}

pub trait LogWriter {
    fn write_snapshot(&mut self, snapshot: &CampSnapshot) -> Result<(), LogError>;
}

/// Used when no camp log was requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogWriter;

impl LogWriter for NoopLogWriter {
    fn write_snapshot(&mut self, _snapshot: &CampSnapshot) -> Result<(), LogError> {
        Ok(())
    }
}

/// Appends one JSON object per snapshot to a file.
#[derive(Debug, Clone)]
pub struct JsonLinesLogWriter {
    path: PathBuf,
}

impl JsonLinesLogWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogWriter for JsonLinesLogWriter {
    fn write_snapshot(&mut self, snapshot: &CampSnapshot) -> Result<(), LogError> {
        let mut line = serde_json::to_vec(snapshot)?;
        line.push(b'\n');

        let io_error = |source| LogError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        file.write_all(&line).map_err(io_error)?;

        tracing::info!(
            path = %self.path.display(),
            items = snapshot.items.len(),
            "camp log written"
        );
        Ok(())
    }
}

/// Writer for an optional camp log path.
pub fn writer_for(path: Option<&Path>) -> Box<dyn LogWriter> {
    match path {
        Some(path) => Box::new(JsonLinesLogWriter::new(path)),
        None => Box::new(NoopLogWriter),
    }
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn write_snapshot(&mut self, snapshot: &CampSnapshot) -> Result<(), LogError> {
        (**self).write_snapshot(snapshot)
    }
}
