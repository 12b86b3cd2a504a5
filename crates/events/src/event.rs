use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are facts: once `handle` returned them the change is accepted and
/// `apply` only has to write it down.
pub trait Event: Clone + core::fmt::Debug + 'static {
    /// Stable event name/type identifier (e.g. "inventory.item.pushed").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (wall-clock time of the command).
    fn occurred_at(&self) -> DateTime<Utc>;
}
