//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity** and are defined entirely by their
//! attribute values. A parsed tax identifier or a password strength report are
//! value objects: two instances holding the same digits/flags are the same
//! value.

/// Marker trait for value objects.
///
/// The trait requires:
/// - **Clone**: value objects are cheap to copy
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: value objects show up in logs and test failures
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Crmv(String);
///
/// impl ValueObject for Crmv {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
