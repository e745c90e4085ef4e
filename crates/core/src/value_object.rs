//! Value object trait: equality by value, not identity.
//!
//! Amounts and shares have **no identity**. Two shares naming the same
//! participant and amount are interchangeable.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (`Money`, `Share`, `Settlement`)
/// - **Entity**: has identity (`Participant`, keyed by its handle)
///
/// Value objects are immutable once built. To "modify" one, create a new one.
///
/// ```ignore
/// let a = Money::from_minor(3333);
/// let b = Money::from_minor(3333);
/// assert_eq!(a, b);  // Equal by value, not identity
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
