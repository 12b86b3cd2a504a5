//! Aggregate trait for command/event driven domain models.

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, cmd)` checks every rule and returns
///   the events describing the accepted change, or an error. It must not
///   mutate state, so a rejected command leaves the aggregate untouched.
/// - **State mutation**: `apply(&mut self, event)` evolves state and cannot
///   fail; all checks already happened in `handle`.
///
/// Aggregates must not perform IO or side effects.
pub trait Aggregate {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Number of events applied so far (+1 per applied event).
    fn version(&self) -> u64;

    /// Evolve in-memory state from a single event.
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and a command.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}
