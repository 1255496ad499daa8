//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. A
/// [`Company`](crate::Company) handed to this service, a scheduled mail entry,
/// or a rendered mail are all value objects: they are passed in, read, and
/// never mutated by the lifecycle.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ScheduledMailDetails {
///     mail_type_id: MailTypeId,
///     delay: Duration,
/// }
///
/// impl ValueObject for ScheduledMailDetails {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
