//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. A consumption record (lot snapshot + drawn quantity) is
//! one: two draws of the same quantity from the same lot snapshot are equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Draw {
///     lot: LotId,
///     qty: f64,
/// }
///
/// impl ValueObject for Draw {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
