//! Write-once fields.
//!
//! A [`WriteOnce`] starts [`WriteOnce::Unset`] and may be bound exactly once.
//! Re-binding to the same value is accepted as a no-op; binding to a different
//! value is rejected and leaves the field untouched. Nothing ever returns a
//! bound field to `Unset`.

use crate::error::{BindingField, InvalidBindingState};
use crate::id::{TenantId, UserId};

/// Values with a distinguished "no value" sentinel.
///
/// Binding a sentinel to an unset field never counts as binding it.
pub trait Sentinel {
    fn is_sentinel(&self) -> bool;
}

impl Sentinel for TenantId {
    fn is_sentinel(&self) -> bool {
        self.is_nil()
    }
}

impl Sentinel for UserId {
    fn is_sentinel(&self) -> bool {
        self.is_nil()
    }
}

/// Outcome of a successful [`WriteOnce::bind`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Binding {
    /// The field went from unset to bound.
    Bound,
    /// The field already held this value.
    Unchanged,
    /// The sentinel was supplied to an unset field, which stays unset.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WriteOnce<T> {
    #[default]
    Unset,
    Bound(T),
}

impl<T> WriteOnce<T>
where
    T: Sentinel + PartialEq + core::fmt::Debug,
{
    /// Bind the field, enforcing the write-once rule for `field`.
    pub fn bind(&mut self, value: T, field: BindingField) -> Result<Binding, InvalidBindingState> {
        match self {
            WriteOnce::Unset if value.is_sentinel() => Ok(Binding::Ignored),
            WriteOnce::Unset => {
                *self = WriteOnce::Bound(value);
                Ok(Binding::Bound)
            }
            WriteOnce::Bound(current) if *current == value => Ok(Binding::Unchanged),
            WriteOnce::Bound(current) => {
                tracing::warn!(
                    field = %field,
                    current = ?current,
                    attempted = ?value,
                    "rejected attempt to change a bound identifier"
                );
                Err(InvalidBindingState::new(field))
            }
        }
    }
}

impl<T: Sentinel> WriteOnce<T> {
    /// State for a value read back from storage: the sentinel is `Unset`,
    /// anything else is `Bound`.
    pub fn restore(value: T) -> Self {
        if value.is_sentinel() {
            WriteOnce::Unset
        } else {
            WriteOnce::Bound(value)
        }
    }
}

impl<T> WriteOnce<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            WriteOnce::Unset => None,
            WriteOnce::Bound(value) => Some(value),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, WriteOnce::Bound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_bind_moves_from_unset_to_bound() {
        let mut field = WriteOnce::default();
        let tenant = TenantId::new();

        assert_eq!(field.bind(tenant, BindingField::Tenant), Ok(Binding::Bound));
        assert_eq!(field, WriteOnce::Bound(tenant));
    }

    #[test]
    fn same_value_is_a_no_op() {
        let tenant = TenantId::new();
        let mut field = WriteOnce::Bound(tenant);

        assert_eq!(field.bind(tenant, BindingField::Tenant), Ok(Binding::Unchanged));
        assert_eq!(field.get(), Some(&tenant));
    }

    #[test]
    fn different_value_is_rejected_and_field_is_kept() {
        let first = UserId::new();
        let mut field = WriteOnce::Bound(first);

        let err = field.bind(UserId::new(), BindingField::Owner).unwrap_err();
        assert_eq!(err.field, BindingField::Owner);
        assert_eq!(field.get(), Some(&first));
    }

    #[test]
    fn sentinel_never_binds() {
        let mut field: WriteOnce<TenantId> = WriteOnce::Unset;

        for _ in 0..3 {
            assert_eq!(field.bind(TenantId::nil(), BindingField::Tenant), Ok(Binding::Ignored));
            assert!(!field.is_bound());
        }

        let tenant = TenantId::new();
        assert_eq!(field.bind(tenant, BindingField::Tenant), Ok(Binding::Bound));
    }

    #[test]
    fn restore_maps_sentinel_to_unset() {
        assert_eq!(WriteOnce::restore(UserId::nil()), WriteOnce::Unset);

        let user = UserId::new();
        assert_eq!(WriteOnce::restore(user), WriteOnce::Bound(user));
    }

    #[test]
    fn sentinel_cannot_unbind() {
        let tenant = TenantId::new();
        let mut field = WriteOnce::Bound(tenant);

        let err = field.bind(TenantId::nil(), BindingField::Tenant).unwrap_err();
        assert_eq!(err.field, BindingField::Tenant);
        assert_eq!(field.get(), Some(&tenant));
    }
}
