//! Building blocks shared by the haversack inventory tracker.
//!
//! This crate contains **pure domain** primitives (no file access, no terminal
//! I/O): the currency model, fixed-point weight, typed identifiers and the
//! domain error.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;
pub mod weight;

pub use aggregate::Aggregate;
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ItemId};
pub use money::{Denomination, InsufficientFunds, Money};
pub use value_object::ValueObject;
pub use weight::Weight;
