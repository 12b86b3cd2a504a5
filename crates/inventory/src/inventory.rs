use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use haversack_core::{Aggregate, DomainError, ItemId, Money, Weight};
use haversack_events::{Event, execute};

use crate::collection::ItemCollection;
use crate::item::Item;

/// Command: PushItem.
#[derive(Debug, Clone, PartialEq)]
pub struct PushItem {
    pub item: Item,
    pub occurred_at: DateTime<Utc>,
}

/// Command: PopItem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopItem {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InventoryCommand {
    PushItem(PushItem),
    PopItem(PopItem),
}

/// Event: ItemPushed.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPushed {
    pub item: Item,
    pub remaining_weight: Weight,
    pub remaining_money: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemPopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPopped {
    pub item_id: ItemId,
    pub refunded_weight: Weight,
    pub refunded_cost: Money,
    pub remaining_weight: Weight,
    pub remaining_money: Money,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InventoryEvent {
    ItemPushed(ItemPushed),
    ItemPopped(ItemPopped),
}

impl InventoryEvent {
    pub fn item_id(&self) -> &ItemId {
        match self {
            InventoryEvent::ItemPushed(e) => e.item.id_typed(),
            InventoryEvent::ItemPopped(e) => &e.item_id,
        }
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemPushed(_) => "inventory.item.pushed",
            InventoryEvent::ItemPopped(_) => "inventory.item.popped",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemPushed(e) => e.occurred_at,
            InventoryEvent::ItemPopped(e) => e.occurred_at,
        }
    }
}

/// Point-in-time view of the inventory totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryStatus {
    pub weight_budget: f64,
    pub max_weight: f64,
    pub money: Money,
    pub item_count: usize,
}

/// A character's carried gear: weight budget, purse and items.
///
/// Weights are kept in hundredths so that repeated pushes and pops never
/// drift; item weights are rounded to the nearest hundredth on push.
#[derive(Debug, Clone)]
pub struct Inventory {
    max_weight: Weight,
    weight_budget: Weight,
    money: Money,
    items: ItemCollection,
    version: u64,
}

impl Inventory {
    /// Empty inventory with the full `max_weight` available.
    pub fn new(max_weight: f64, money: Money) -> Self {
        let max_weight = Weight::from_f64(max_weight);
        Self {
            max_weight,
            weight_budget: max_weight,
            money: money.normalized(),
            items: ItemCollection::new(),
            version: 0,
        }
    }

    /// Add `item` if it fits the remaining weight and the purse can pay for it.
    ///
    /// On rejection the inventory is unchanged.
    pub fn push(&mut self, item: Item) -> Result<(), DomainError> {
        let item_id = item.id_typed().clone();
        let command = InventoryCommand::PushItem(PushItem {
            item,
            occurred_at: Utc::now(),
        });
        match execute(self, &command) {
            Ok(_) => Ok(()),
            Err(err) if err.is_rejection() => {
                tracing::warn!(item_id = %item_id, error = %err, "push rejected");
                Err(err)
            }
            Err(err) => {
                tracing::error!(item_id = %item_id, error = %err, "invalid item refused");
                Err(err)
            }
        }
    }

    /// Remove the item with `id`, refunding its weight and cost, and hand the
    /// unlinked item back.
    pub fn pop(&mut self, id: &ItemId) -> Result<Item, DomainError> {
        let command = InventoryCommand::PopItem(PopItem {
            item_id: id.clone(),
            occurred_at: Utc::now(),
        });
        let events = self.handle(&command)?;
        let mut removed = None;
        for event in &events {
            removed = self.evolve(event).or(removed);
        }
        removed.ok_or_else(|| DomainError::invariant(format!("pop of `{id}` unlinked no item")))
    }

    pub fn item_count(&self) -> usize {
        self.items.count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains(id)
    }

    pub fn items(&self) -> &ItemCollection {
        &self.items
    }

    pub fn weight_budget(&self) -> f64 {
        self.weight_budget.as_f64()
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight.as_f64()
    }

    pub fn money(&self) -> Money {
        self.money
    }

    pub fn status(&self) -> InventoryStatus {
        InventoryStatus {
            weight_budget: self.weight_budget.as_f64(),
            max_weight: self.max_weight.as_f64(),
            money: self.money,
            item_count: self.items.count(),
        }
    }

    /// First of `base`, `base-2`, `base-3`, ... not already carried.
    pub fn unique_id(&self, base: &ItemId) -> ItemId {
        let mut n = 1;
        loop {
            let candidate = base.with_copy_number(n);
            if !self.items.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Aggregate for Inventory {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        self.evolve(event);
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::PushItem(cmd) => self.handle_push(cmd),
            InventoryCommand::PopItem(cmd) => self.handle_pop(cmd),
        }
    }
}

impl Inventory {
    /// Write `event` down. Returns the item a pop unlinked.
    fn evolve(&mut self, event: &InventoryEvent) -> Option<Item> {
        let removed = match event {
            InventoryEvent::ItemPushed(e) => {
                let inserted = self.items.insert_at_end(e.item.clone());
                debug_assert!(inserted.is_ok(), "push was decided against stale state");
                self.weight_budget = e.remaining_weight;
                self.money = e.remaining_money;
                None
            }
            InventoryEvent::ItemPopped(e) => {
                let removed = self.items.remove_by_id(&e.item_id);
                debug_assert!(removed.is_some(), "pop was decided against stale state");
                self.weight_budget = e.remaining_weight;
                self.money = e.remaining_money;
                removed
            }
        };

        self.version += 1;
        tracing::info!(
            event = event.event_type(),
            event_version = event.version(),
            occurred_at = %event.occurred_at(),
            item_id = %event.item_id(),
            remaining_weight = %self.weight_budget,
            remaining_money = %self.money,
            version = self.version,
            "inventory event applied"
        );
        removed
    }

    fn handle_push(&self, cmd: &PushItem) -> Result<Vec<InventoryEvent>, DomainError> {
        let raw_weight = cmd.item.weight();
        if !raw_weight.is_finite() || raw_weight < 0.0 {
            return Err(DomainError::validation(format!(
                "item `{}` has invalid weight {raw_weight}",
                cmd.item.id_typed()
            )));
        }

        let weight = Weight::from_f64(raw_weight);
        let remaining_weight = self.weight_budget.checked_sub(weight).ok_or_else(|| {
            DomainError::exceeds_capacity(weight.as_f64(), self.weight_budget.as_f64())
        })?;

        let remaining_money = self.money.subtract(&cmd.item.cost())?;

        if self.items.contains(cmd.item.id_typed()) {
            return Err(DomainError::duplicate_id(cmd.item.id_typed().to_string()));
        }

        Ok(vec![InventoryEvent::ItemPushed(ItemPushed {
            item: cmd.item.clone(),
            remaining_weight,
            remaining_money,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_pop(&self, cmd: &PopItem) -> Result<Vec<InventoryEvent>, DomainError> {
        let item = self
            .items
            .find(&cmd.item_id)
            .and_then(|handle| self.items.get(handle))
            .ok_or_else(|| DomainError::not_found(cmd.item_id.to_string()))?;

        let refunded_weight = Weight::from_f64(item.weight());
        let refunded_cost = item.cost();
        Ok(vec![InventoryEvent::ItemPopped(ItemPopped {
            item_id: cmd.item_id.clone(),
            refunded_weight,
            refunded_cost,
            remaining_weight: self.weight_budget.saturating_add(refunded_weight),
            remaining_money: self.money.add(&refunded_cost),
            occurred_at: cmd.occurred_at,
        })])
    }
}
