//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are domain objects that are **immutable** and **compared by value**.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (`Dollars` of 4.00 equals any other 4.00)
/// - **Entity**: Has identity (two customers with the same name are different customers)
///
/// ## Construction
///
/// Value objects are only built through validating factories returning
/// `DomainResult`, so an instance that exists is always valid. Deserialization
/// goes through the same factories. To "modify" a value object, create a new one.
///
/// ## Design Constraints
///
/// The trait requires:
/// - **Clone**: Value objects are values, copying them is fine
/// - **Eq + Hash**: Value objects are compared and hashed by their attribute values
/// - **Debug**: Value objects should be debuggable (helpful for logging, testing)
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct Dollars(u64);
///
/// impl ValueObject for Dollars {}
///
/// assert_eq!(Dollars::whole(4)?, Dollars::from_cents(400)?);
/// ```
pub trait ValueObject: Clone + Eq + core::hash::Hash + core::fmt::Debug {}
