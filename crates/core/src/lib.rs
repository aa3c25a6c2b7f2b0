//! `tessera-core` — domain kernel building blocks.
//!
//! Base abstractions every persisted business entity is built from:
//!
//! - identity: internal [`EntityKey`] + exposed [`ExternalId`]
//! - audit stamps that only move forward
//! - an append-only buffer of pending domain events
//! - write-once tenant/owner binding for tenant-scoped data
//! - [`DomainRuleViolation`] for business-rule failures
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod audit;
pub mod binding;
pub mod clock;
pub mod entity;
pub mod error;
pub mod event;
pub mod id;
pub mod tenant;

pub use aggregate::AggregateRoot;
pub use audit::AuditStamps;
pub use binding::{Binding, Sentinel, WriteOnce};
pub use clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use entity::{Entity, EntityBase, EntityMut};
pub use error::{
    BindingField, DomainError, DomainResult, DomainRuleViolation, InvalidBindingState,
};
pub use event::{DomainEvent, EventBuffer, EventMetadata, HasDomainEvents};
pub use id::{EntityKey, ExternalId, TenantId, UserId};
pub use tenant::{BindingMut, TenantBinding, TenantScoped};
