//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. In the
/// storefront these are amounts ([`Money`](crate::Money)), totals and the
/// snapshot lines copied into pending sales and orders. To "modify" one,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

impl<T: ValueObject> ValueObject for &T {}
