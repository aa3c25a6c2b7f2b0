//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Boxed underlying cause carried by a [`DomainRuleViolation`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which write-once field a binding attempt targeted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BindingField {
    /// The tenant identifier of a tenant-scoped entity.
    Tenant,
    /// The owning user identifier of a tenant-scoped entity.
    Owner,
}

impl BindingField {
    pub fn as_str(self) -> &'static str {
        match self {
            BindingField::Tenant => "tenant",
            BindingField::Owner => "owner",
        }
    }
}

impl core::fmt::Display for BindingField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A write-once field was asked to change after it had been bound.
///
/// This always indicates a programming error upstream (an attempt to re-home an
/// entity into another tenant or owner). It is never transient and must not be
/// retried.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[error("{field} identifier cannot be changed once set")]
pub struct InvalidBindingState {
    pub field: BindingField,
}

impl InvalidBindingState {
    pub fn new(field: BindingField) -> Self {
        Self { field }
    }
}

/// A business rule was violated.
///
/// Raised by business logic built on top of the kernel, never by the kernel
/// itself. Carries an optional message and an optional underlying cause, which
/// is exposed through [`std::error::Error::source`].
#[derive(Debug, Error, Default)]
#[error("{}", .message.as_deref().unwrap_or("domain rule violated"))]
pub struct DomainRuleViolation {
    message: Option<String>,
    #[source]
    cause: Option<BoxedCause>,
}

impl DomainRuleViolation {
    /// A violation without a message.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            cause: None,
        }
    }

    /// A violation with a message and the error that caused it.
    pub fn with_cause(
        message: impl Into<String>,
        cause: impl Into<BoxedCause>,
    ) -> Self {
        Self {
            message: Some(message.into()),
            cause: Some(cause.into()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures. Infrastructure
/// concerns belong elsewhere.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A write-once binding was asked to change.
    #[error(transparent)]
    Binding(#[from] InvalidBindingState),

    /// A business rule was violated.
    #[error(transparent)]
    RuleViolation(#[from] DomainRuleViolation),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn rule(msg: impl Into<String>) -> Self {
        Self::RuleViolation(DomainRuleViolation::with_message(msg))
    }

    pub fn is_binding(&self) -> bool {
        matches!(self, DomainError::Binding(_))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[derive(Debug, Error)]
    #[error("ledger is closed")]
    struct LedgerClosed;

    #[test]
    fn binding_error_names_the_field() {
        let tenant = InvalidBindingState::new(BindingField::Tenant);
        let owner = InvalidBindingState::new(BindingField::Owner);

        assert_eq!(tenant.to_string(), "tenant identifier cannot be changed once set");
        assert_eq!(owner.to_string(), "owner identifier cannot be changed once set");
    }

    #[test]
    fn rule_violation_without_message_has_default_display() {
        let err = DomainRuleViolation::new();
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "domain rule violated");
        assert!(err.source().is_none());
    }

    #[test]
    fn rule_violation_with_message() {
        let err = DomainRuleViolation::with_message("menu must have at least one item");
        assert_eq!(err.message(), Some("menu must have at least one item"));
        assert_eq!(err.to_string(), "menu must have at least one item");
        assert!(err.source().is_none());
    }

    #[test]
    fn rule_violation_exposes_cause_as_source() {
        let err = DomainRuleViolation::with_cause("cannot post entry", LedgerClosed);

        assert_eq!(err.to_string(), "cannot post entry");
        let source = err.source().expect("cause should be the source");
        assert_eq!(source.to_string(), "ledger is closed");
        assert!(err.cause().is_some());
    }

    #[test]
    fn domain_error_is_transparent_over_its_variants() {
        let err: DomainError = InvalidBindingState::new(BindingField::Tenant).into();
        assert!(err.is_binding());
        assert_eq!(err.to_string(), "tenant identifier cannot be changed once set");

        let err = DomainError::rule("price must be positive");
        assert!(!err.is_binding());
        assert_eq!(err.to_string(), "price must be positive");
    }
}
