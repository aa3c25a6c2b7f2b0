//! `tessera-events` — getting pending domain events off aggregates.
//!
//! The kernel (`tessera-core`) only accumulates events. This crate provides the
//! dispatch side: envelopes, the publisher seam, an in-memory publisher, and
//! the read → publish → clear routine that a unit of work runs before it
//! commits.

pub mod dispatch;
pub mod envelope;
pub mod in_memory;
pub mod publisher;

pub use dispatch::{DispatchError, aggregate_type_name, dispatch_pending, dispatch_tenant_pending};
pub use envelope::EventEnvelope;
pub use in_memory::{InMemoryPublishError, InMemoryPublisher};
pub use publisher::EventPublisher;
