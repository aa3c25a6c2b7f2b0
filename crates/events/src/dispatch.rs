//! Dispatching pending domain events off an aggregate.
//!
//! The lifecycle is **read → publish → clear**:
//!
//! 1. Read the aggregate's pending events (they stay on the aggregate).
//! 2. Wrap each one in an [`EventEnvelope`] and publish it, in registration
//!    order.
//! 3. Only after every publish succeeded, clear the aggregate's buffer.
//!
//! The caller commits its unit of work after dispatch returns `Ok`. If any
//! publish fails, nothing is cleared, so the same dispatch can simply be run
//! again without re-registering events.

use thiserror::Error;

use tessera_core::{AggregateRoot, DomainEvent, HasDomainEvents, TenantId, TenantScoped};

use crate::{EventEnvelope, EventPublisher};

/// Publishing one of the pending events failed; the aggregate still holds
/// all of them.
#[derive(Debug, Error)]
#[error("failed to publish event {index} of {total} for {aggregate_type}")]
pub struct DispatchError<P>
where
    P: std::error::Error + 'static,
{
    pub aggregate_type: String,
    /// Zero-based position of the event that failed.
    pub index: usize,
    pub total: usize,
    #[source]
    pub source: P,
}

/// Short type name of an aggregate, used as `aggregate_type` on envelopes.
pub fn aggregate_type_name<A>() -> &'static str {
    let full = core::any::type_name::<A>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Publish every pending event of `aggregate`, then clear them.
///
/// Returns the number of events published. `tenant_id` is copied onto every
/// envelope.
pub fn dispatch_pending<A, P>(
    aggregate: &mut A,
    tenant_id: Option<TenantId>,
    publisher: &P,
) -> Result<usize, DispatchError<P::Error>>
where
    A: AggregateRoot,
    A::Event: DomainEvent + Clone,
    P: EventPublisher<A::Event> + ?Sized,
{
    let aggregate_type = aggregate_type_name::<A>();
    let aggregate_id = aggregate.external_id();
    let total = aggregate.domain_events().len();

    if total == 0 {
        return Ok(0);
    }

    for (index, event) in aggregate.domain_events().iter().enumerate() {
        let envelope = EventEnvelope::new(
            tenant_id,
            aggregate_id,
            aggregate_type,
            index as u64,
            event.clone(),
        );

        if let Err(source) = publisher.publish(envelope) {
            tracing::error!(
                aggregate_type,
                aggregate_id = %aggregate_id,
                event_type = event.event_type(),
                index,
                total,
                error = %source,
                "domain event publication failed; events left pending"
            );
            return Err(DispatchError {
                aggregate_type: aggregate_type.to_string(),
                index,
                total,
                source,
            });
        }
    }

    aggregate.clear_domain_events();
    tracing::debug!(
        aggregate_type,
        aggregate_id = %aggregate_id,
        count = total,
        "dispatched domain events"
    );

    Ok(total)
}

/// [`dispatch_pending`] for tenant-scoped aggregates, stamping envelopes with
/// the aggregate's bound tenant (none while unbound).
pub fn dispatch_tenant_pending<A, P>(
    aggregate: &mut A,
    publisher: &P,
) -> Result<usize, DispatchError<P::Error>>
where
    A: AggregateRoot + TenantScoped,
    A::Event: DomainEvent + Clone,
    P: EventPublisher<A::Event> + ?Sized,
{
    let tenant_id = Some(aggregate.tenant_id()).filter(|t| !t.is_nil());
    dispatch_pending(aggregate, tenant_id, publisher)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    struct Generic<T>(T);

    #[test]
    fn aggregate_type_name_strips_module_path_and_generics() {
        assert_eq!(aggregate_type_name::<Plain>(), "Plain");
        assert_eq!(aggregate_type_name::<Generic<u8>>(), "Generic");
    }
}
