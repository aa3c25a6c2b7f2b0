//! Event publication seam.
//!
//! The kernel stops at "pending events on an aggregate". Getting them onto a
//! transport (in-memory fan-out, a broker, an outbox table) is the job of an
//! [`EventPublisher`] implementation supplied by the application.
//!
//! ## Delivery
//!
//! Publication is **at-least-once** from the aggregate's point of view: if a
//! batch fails half way, the events stay pending and the whole batch is
//! published again on retry. Consumers must be idempotent (the envelope's
//! `event_id` changes between attempts; deduplicate on payload identity).

use std::sync::Arc;

use crate::EventEnvelope;

/// Publishes enveloped domain events to a transport.
///
/// Implementations must be safe to share across threads.
pub trait EventPublisher<E>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn publish(&self, envelope: EventEnvelope<E>) -> Result<(), Self::Error>;
}

impl<E, P> EventPublisher<E> for Arc<P>
where
    P: EventPublisher<E> + ?Sized,
{
    type Error = P::Error;

    fn publish(&self, envelope: EventEnvelope<E>) -> Result<(), Self::Error> {
        (**self).publish(envelope)
    }
}
