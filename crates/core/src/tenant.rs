//! Tenant and owner binding for tenant-scoped entities.
//!
//! Every tenant-scoped entity belongs to exactly one tenant and one owning
//! user. Both identifiers may arrive a step after the entity is constructed
//! (e.g. from the verified request context, before the first save), so they
//! start unset and are bound once. After that they can only be re-confirmed.

use crate::binding::{Binding, WriteOnce};
use crate::entity::Entity;
use crate::error::{BindingField, InvalidBindingState};
use crate::id::{TenantId, UserId};

/// The write-once tenant and owner identifiers of an entity.
///
/// The two fields are independent: binding one never checks the other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TenantBinding {
    tenant: WriteOnce<TenantId>,
    owner: WriteOnce<UserId>,
}

impl TenantBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a binding read back from storage. Nil identifiers stay unset.
    pub fn restore(tenant_id: TenantId, owner_id: UserId) -> Self {
        Self {
            tenant: WriteOnce::restore(tenant_id),
            owner: WriteOnce::restore(owner_id),
        }
    }

    /// Tenant identifier, or the nil sentinel while unset.
    pub fn tenant_id(&self) -> TenantId {
        self.tenant.get().copied().unwrap_or_default()
    }

    /// Owning user identifier, or the nil sentinel while unset.
    pub fn owner_id(&self) -> UserId {
        self.owner.get().copied().unwrap_or_default()
    }

    pub fn is_tenant_bound(&self) -> bool {
        self.tenant.is_bound()
    }

    pub fn is_owner_bound(&self) -> bool {
        self.owner.is_bound()
    }

    /// Bind the tenant.
    ///
    /// Succeeds if the tenant is unset or already equal to `tenant_id`. The nil
    /// identifier leaves an unset tenant unset.
    pub fn set_tenant(&mut self, tenant_id: TenantId) -> Result<Binding, InvalidBindingState> {
        self.tenant.bind(tenant_id, BindingField::Tenant)
    }

    /// Bind the owning user. Same rules as [`TenantBinding::set_tenant`].
    pub fn set_user(&mut self, user_id: UserId) -> Result<Binding, InvalidBindingState> {
        self.owner.bind(user_id, BindingField::Owner)
    }

    /// `true` only if bound to `tenant_id`. An unset binding belongs to no one.
    pub fn belongs_to(&self, tenant_id: TenantId) -> bool {
        self.tenant.get() == Some(&tenant_id)
    }

    /// Mutation handle handed out through [`TenantScoped::binding_mut`].
    pub fn handle(&mut self) -> BindingMut<'_> {
        BindingMut { binding: self }
    }
}

/// Write access to a [`TenantBinding`] that only binds.
///
/// There is no way to reach the binding itself through the handle, so a
/// bound tenant can never be reset or replaced:
///
/// ```compile_fail
/// use tessera_core::{TenantBinding, TenantScoped};
///
/// fn rehome<T: TenantScoped>(entity: &mut T) {
///     *entity.binding_mut() = TenantBinding::new();
/// }
/// ```
#[derive(Debug)]
pub struct BindingMut<'a> {
    binding: &'a mut TenantBinding,
}

impl BindingMut<'_> {
    pub fn set_tenant(&mut self, tenant_id: TenantId) -> Result<Binding, InvalidBindingState> {
        self.binding.set_tenant(tenant_id)
    }

    pub fn set_user(&mut self, user_id: UserId) -> Result<Binding, InvalidBindingState> {
        self.binding.set_user(user_id)
    }
}

/// An entity whose data is isolated per tenant.
pub trait TenantScoped: Entity {
    fn binding(&self) -> &TenantBinding;

    /// Binding handle over the embedded binding; implement as
    /// `self.binding.handle()`.
    fn binding_mut(&mut self) -> BindingMut<'_>;

    fn tenant_id(&self) -> TenantId {
        self.binding().tenant_id()
    }

    fn owner_id(&self) -> UserId {
        self.binding().owner_id()
    }

    fn set_tenant(&mut self, tenant_id: TenantId) -> Result<(), InvalidBindingState> {
        self.binding_mut().set_tenant(tenant_id).map(|_| ())
    }

    fn set_user(&mut self, user_id: UserId) -> Result<(), InvalidBindingState> {
        self.binding_mut().set_user(user_id).map(|_| ())
    }

    fn belongs_to(&self, tenant_id: TenantId) -> bool {
        self.binding().belongs_to(tenant_id)
    }
}
