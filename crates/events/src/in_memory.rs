//! In-memory publisher for tests/dev.

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::{EventEnvelope, EventPublisher};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InMemoryPublishError {
    /// Publish failed due to internal lock poisoning.
    #[error("in-memory publisher lock poisoned")]
    Poisoned,

    /// The publisher was armed to fail (see [`InMemoryPublisher::fail_after`]).
    #[error("publisher rejected event (simulated failure)")]
    Rejected,
}

#[derive(Debug)]
struct State<E> {
    published: Vec<EventEnvelope<E>>,
    /// Remaining successful publishes before every call fails.
    remaining: Option<usize>,
}

/// Records every published envelope in memory.
///
/// - No IO / no async
/// - Can simulate a transport outage to exercise retry paths
#[derive(Debug)]
pub struct InMemoryPublisher<E> {
    state: Mutex<State<E>>,
}

impl<E> InMemoryPublisher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `successes` more publishes, then fail every call.
    /// `None` disarms the failure.
    pub fn fail_after(&self, successes: Option<usize>) {
        self.state().remaining = successes;
    }

    pub fn len(&self) -> usize {
        self.state().published.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Test hooks keep working after a panicking publisher thread; only
    // `publish` reports the poisoning.
    fn state(&self) -> MutexGuard<'_, State<E>> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<E: Clone> InMemoryPublisher<E> {
    /// Everything published so far, in publish order.
    pub fn published(&self) -> Vec<EventEnvelope<E>> {
        self.state().published.clone()
    }
}

impl<E> Default for InMemoryPublisher<E> {
    fn default() -> Self {
        Self {
            state: Mutex::new(State {
                published: Vec::new(),
                remaining: None,
            }),
        }
    }
}

impl<E> EventPublisher<E> for InMemoryPublisher<E>
where
    E: Send,
{
    type Error = InMemoryPublishError;

    fn publish(&self, envelope: EventEnvelope<E>) -> Result<(), Self::Error> {
        let mut state = self.state.lock().map_err(|_| InMemoryPublishError::Poisoned)?;

        match state.remaining {
            Some(0) => return Err(InMemoryPublishError::Rejected),
            Some(n) => state.remaining = Some(n - 1),
            None => {}
        }

        state.published.push(envelope);
        Ok(())
    }
}
