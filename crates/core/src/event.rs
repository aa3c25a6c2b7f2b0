//! Domain events and the per-entity event buffer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Something business-significant that happened.
///
/// Concrete events are defined by callers. The only thing the kernel relies on
/// is the instant the event occurred, fixed when the event value is built.
pub trait DomainEvent: core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "menus.menu.published").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (captured at construction).
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// Common header embedded in concrete domain events.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Stamp an event being built right now.
    pub fn now(clock: &impl Clock) -> Self {
        Self {
            occurred_at: clock.now(),
        }
    }

    pub fn at(occurred_at: DateTime<Utc>) -> Self {
        Self { occurred_at }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Append-only, insertion-ordered buffer of pending domain events.
///
/// Events can only be appended or drained as a whole. Readers get a shared
/// slice or an owned snapshot, never the backing `Vec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBuffer<E> {
    events: Vec<E>,
}

impl<E> Default for EventBuffer<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> EventBuffer<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, event: E) {
        self.events.push(event);
    }

    /// Read-only view of the pending events, oldest first.
    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn iter(&self) -> core::slice::Iter<'_, E> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop every pending event. Clearing an empty buffer is a no-op.
    pub fn clear(&mut self) {
        if !self.events.is_empty() {
            tracing::trace!(count = self.events.len(), "clearing domain events");
        }
        self.events.clear();
    }

    /// Drain every pending event, returning them in registration order.
    pub fn take(&mut self) -> Vec<E> {
        core::mem::take(&mut self.events)
    }
}

impl<E: Clone> EventBuffer<E> {
    /// Owned copy of the pending events.
    pub fn snapshot(&self) -> Vec<E> {
        self.events.clone()
    }
}

impl<'a, E> IntoIterator for &'a EventBuffer<E> {
    type Item = &'a E;
    type IntoIter = core::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Anything that accumulates domain events.
///
/// Implemented for every [`crate::Entity`]; dispatchers use this to read the
/// pending events and clear them once they have been published.
pub trait HasDomainEvents {
    type Event;

    fn domain_events(&self) -> &[Self::Event];

    fn register_domain_event(&mut self, event: Self::Event);

    fn clear_domain_events(&mut self);

    fn take_domain_events(&mut self) -> Vec<Self::Event>;
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;
    use crate::clock::FixedClock;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct ItemAdded {
        meta: EventMetadata,
        sku: String,
    }

    impl DomainEvent for ItemAdded {
        fn event_type(&self) -> &'static str {
            "tests.item.added"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.meta.occurred_at()
        }
    }

    fn item(sku: &str) -> ItemAdded {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        ItemAdded {
            meta: EventMetadata::now(&clock),
            sku: sku.to_string(),
        }
    }

    #[test]
    fn events_keep_registration_order() {
        let mut buffer = EventBuffer::new();
        let (e1, e2, e3) = (item("a"), item("b"), item("c"));

        buffer.register(e1.clone());
        buffer.register(e2.clone());
        buffer.register(e3.clone());

        assert_eq!(buffer.events(), &[e1, e2, e3]);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut buffer = EventBuffer::new();
        buffer.register(item("a"));

        buffer.clear();
        assert!(buffer.events().is_empty());

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn mutating_a_snapshot_does_not_touch_the_buffer() {
        let mut buffer = EventBuffer::new();
        buffer.register(item("a"));

        let mut snapshot = buffer.snapshot();
        snapshot.push(item("b"));
        snapshot[0].sku = "changed".to_string();

        assert_eq!(buffer.events(), &[item("a")]);
    }

    #[test]
    fn take_drains_in_order() {
        let mut buffer = EventBuffer::new();
        buffer.register(item("a"));
        buffer.register(item("b"));

        let drained = buffer.take();
        assert_eq!(drained, vec![item("a"), item("b")]);
        assert!(buffer.is_empty());
        assert!(buffer.take().is_empty());
    }

    #[test]
    fn occurred_at_is_fixed_at_construction() {
        let event = item("a");
        let mut buffer = EventBuffer::new();
        buffer.register(event.clone());

        assert_eq!(
            buffer.events()[0].occurred_at(),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(buffer.events()[0].event_type(), "tests.item.added");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the buffer replays exactly what was registered, in order.
        #[test]
        fn buffer_preserves_any_registration_sequence(values in proptest::collection::vec(any::<u32>(), 0..64)) {
            let mut buffer = EventBuffer::new();
            for v in &values {
                buffer.register(*v);
            }

            prop_assert_eq!(buffer.events(), values.as_slice());
            prop_assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), values.clone());

            buffer.clear();
            prop_assert!(buffer.events().is_empty());
        }
    }
}
