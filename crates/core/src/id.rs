//! Strongly-typed identifiers used across the domain.
//!
//! Item documents carry human-readable slugs (`"greatsword"`,
//! `"explorers-pack"`), so identifiers wrap strings rather than UUIDs.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an item (the document's top-level `index`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Identifier of an equipment category (the nested `equipment_category.index`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

macro_rules! impl_slug_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a value that was already validated by the caller.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                if trimmed.chars().any(char::is_whitespace) {
                    return Err(DomainError::invalid_id(format!(
                        "{}: `{}` contains whitespace",
                        $name, trimmed
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

impl_slug_newtype!(ItemId, "ItemId");
impl_slug_newtype!(CategoryId, "CategoryId");

impl ItemId {
    /// Id for the `n`-th copy of the same document (`dagger`, `dagger-2`, ...).
    pub fn with_copy_number(&self, n: u32) -> Self {
        if n <= 1 {
            self.clone()
        } else {
            Self(format!("{}-{}", self.0, n))
        }
    }
}

impl core::borrow::Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
