//! Environment configuration, read once at startup.

use std::path::PathBuf;
use std::str::FromStr;

use haversack_inventory::{
    DEFAULT_ITEMS_DIR, DEFAULT_MAX_DOCUMENT_BYTES, DEFAULT_MAX_FIELD_LEN, ScanLimits,
};

pub const ITEMS_DIR_VAR: &str = "HAVERSACK_ITEMS_DIR";
pub const MAX_DOCUMENT_BYTES_VAR: &str = "HAVERSACK_MAX_DOCUMENT_BYTES";
pub const MAX_FIELD_LEN_VAR: &str = "HAVERSACK_MAX_FIELD_LEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub items_dir: PathBuf,
    pub max_document_bytes: usize,
    pub max_field_len: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            items_dir: PathBuf::from(DEFAULT_ITEMS_DIR),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or invalid values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            items_dir: lookup(ITEMS_DIR_VAR)
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.items_dir),
            max_document_bytes: positive(&lookup, MAX_DOCUMENT_BYTES_VAR)
                .unwrap_or(defaults.max_document_bytes),
            max_field_len: positive(&lookup, MAX_FIELD_LEN_VAR).unwrap_or(defaults.max_field_len),
        }
    }

    pub fn scan_limits(&self) -> ScanLimits {
        ScanLimits {
            max_field_len: self.max_field_len,
        }
    }
}

fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<usize> {
    let raw = lookup(key)?;
    match usize::from_str(raw.trim()) {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::warn!(key, value = %raw, "invalid setting; using the default");
            None
        }
    }
}
