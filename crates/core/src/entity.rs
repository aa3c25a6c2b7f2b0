//! Entity: identity + continuity across state changes.
//!
//! Concrete entities embed an [`EntityBase`] and implement [`Entity`] by
//! handing out a shared reference to it and an [`EntityMut`] handle over it.
//! Everything else (identity accessors, audit stamps, the domain event buffer)
//! comes from provided methods.

use chrono::{DateTime, Utc};

use crate::audit::AuditStamps;
use crate::clock::Clock;
use crate::event::{EventBuffer, HasDomainEvents};
use crate::id::{EntityKey, ExternalId};

/// Identity, audit stamps and pending events shared by every entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityBase<E> {
    id: EntityKey,
    external_id: ExternalId,
    audit: AuditStamps,
    events: EventBuffer<E>,
}

impl<E> EntityBase<E> {
    /// A brand-new, not yet persisted entity created at the clock's current
    /// instant, with a freshly generated external id.
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            id: EntityKey::UNASSIGNED,
            external_id: ExternalId::new(),
            audit: AuditStamps::new(clock),
            events: EventBuffer::new(),
        }
    }

    /// Rehydrate an entity read back from storage. No events are pending.
    pub fn restore(
        id: EntityKey,
        external_id: ExternalId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            external_id,
            audit: AuditStamps::restore(created_at, updated_at),
            events: EventBuffer::new(),
        }
    }

    pub fn id(&self) -> EntityKey {
        self.id
    }

    /// Set by the persistence layer once the entity has been stored.
    pub fn set_id(&mut self, id: EntityKey) {
        self.id = id;
    }

    pub fn external_id(&self) -> ExternalId {
        self.external_id
    }

    pub fn audit(&self) -> &AuditStamps {
        &self.audit
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.audit.created_at()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.audit.updated_at()
    }

    pub fn touch(&mut self, clock: &impl Clock) {
        self.audit.touch(clock);
    }

    pub fn events(&self) -> &EventBuffer<E> {
        &self.events
    }

    /// Mutation handle handed out through [`Entity::entity_mut`].
    pub fn handle(&mut self) -> EntityMut<'_, E> {
        EntityMut { base: self }
    }
}

/// Write access to an [`EntityBase`], limited to the operations the entity
/// contract allows.
///
/// The handle never yields the base itself, so the external id and the audit
/// stamps cannot be swapped out from under the entity:
///
/// ```compile_fail
/// use chrono::Utc;
/// use tessera_core::{Entity, EntityBase, EntityKey, ExternalId};
///
/// fn rehydrate_over<T: Entity<Event = ()>>(entity: &mut T) {
///     *entity.entity_mut() =
///         EntityBase::restore(EntityKey::new(1), ExternalId::new(), Utc::now(), Utc::now());
/// }
/// ```
#[derive(Debug)]
pub struct EntityMut<'a, E> {
    base: &'a mut EntityBase<E>,
}

impl<E> EntityMut<'_, E> {
    /// Set by the persistence layer once the entity has been stored.
    pub fn set_id(&mut self, id: EntityKey) {
        self.base.set_id(id);
    }

    pub fn touch(&mut self, clock: &impl Clock) {
        self.base.touch(clock);
    }

    pub fn register_event(&mut self, event: E) {
        self.base.events.register(event);
    }

    pub fn clear_events(&mut self) {
        self.base.events.clear();
    }

    pub fn take_events(&mut self) -> Vec<E> {
        self.base.events.take()
    }
}

/// Entity marker + minimal interface.
pub trait Entity {
    /// Domain event type accumulated by this entity.
    type Event;

    fn entity(&self) -> &EntityBase<Self::Event>;

    /// Mutation handle over the embedded base; implement as
    /// `self.base.handle()`.
    fn entity_mut(&mut self) -> EntityMut<'_, Self::Event>;

    /// Internal storage key ([`EntityKey::UNASSIGNED`] until persisted).
    fn id(&self) -> EntityKey {
        self.entity().id()
    }

    fn external_id(&self) -> ExternalId {
        self.entity().external_id()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.entity().created_at()
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.entity().updated_at()
    }

    /// Refresh `updated_at`; it never moves backward.
    fn touch(&mut self, clock: &impl Clock)
    where
        Self: Sized,
    {
        self.entity_mut().touch(clock);
    }
}

impl<E> Entity for EntityBase<E> {
    type Event = E;

    fn entity(&self) -> &EntityBase<E> {
        self
    }

    fn entity_mut(&mut self) -> EntityMut<'_, E> {
        self.handle()
    }
}

impl<T: Entity> HasDomainEvents for T {
    type Event = T::Event;

    fn domain_events(&self) -> &[Self::Event] {
        self.entity().events().events()
    }

    fn register_domain_event(&mut self, event: Self::Event) {
        self.entity_mut().register_event(event);
    }

    fn clear_domain_events(&mut self) {
        self.entity_mut().clear_events();
    }

    fn take_domain_events(&mut self) -> Vec<Self::Event> {
        self.entity_mut().take_events()
    }
}
