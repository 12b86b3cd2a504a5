use std::path::{Path, PathBuf};

use haversack_core::{CategoryId, Entity, ItemId, Money};

/// Weight value of a draft whose `weight` key has not been read yet.
pub const UNSET_WEIGHT: f64 = -1.0;

/// One inventory entry parsed from an item document.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    display_name: String,
    cost: Money,
    weight: f64,
    url: Option<String>,
    equipment_category: Option<CategoryId>,
    source: Option<PathBuf>,
}

impl Item {
    /// Weightless, free item. Use the `with_*` methods for the rest.
    pub fn new(id: ItemId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            cost: Money::zero(),
            weight: 0.0,
            url: None,
            equipment_category: None,
            source: None,
        }
    }

    pub fn with_cost(mut self, cost: Money) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_equipment_category(mut self, category: CategoryId) -> Self {
        self.equipment_category = Some(category);
        self
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Same item under another id (used for repeated copies of a document).
    pub fn renamed(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn id_typed(&self) -> &ItemId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn equipment_category(&self) -> Option<&CategoryId> {
        self.equipment_category.as_ref()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Item record while the scanner is still filling it in.
///
/// Every field starts unset; `weight` uses the [`UNSET_WEIGHT`] sentinel so
/// the "first unset wins" rule can test it the same way as the other slots.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub cost: Money,
    pub weight: f64,
    pub url: Option<String>,
    pub equipment_category: Option<String>,
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            id: None,
            display_name: None,
            cost: Money::zero(),
            weight: UNSET_WEIGHT,
            url: None,
            equipment_category: None,
        }
    }
}

impl ItemDraft {
    pub fn has_weight(&self) -> bool {
        self.weight >= 0.0
    }
}
