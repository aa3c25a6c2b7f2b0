//! Aggregate root marker.

use crate::entity::Entity;

/// Marks an entity as a consistency boundary.
///
/// Domain events registered anywhere inside an aggregate accumulate on its
/// root and are dispatched (then cleared) together once the unit of work that
/// produced them completes. The trait carries no behavior; dispatch helpers
/// only accept types that opt into it.
pub trait AggregateRoot: Entity {}
