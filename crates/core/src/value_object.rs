//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two instances holding the same values are
/// interchangeable. `Money` is the main one here: a purse of `4gp 42sp 69cp`
/// is a value, while the greatsword bought with it is an entity.
///
/// "Modifying" a value object means producing a new one, which is why the
/// currency operations return fresh `Money` rather than mutating in place.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
