//! Common types shared by all aggregates

pub mod aggregate_id;
pub mod entity_ref;
pub mod lenient;
pub mod record;

// Re-exports
pub use aggregate_id::AggregateId;
pub use entity_ref::EntityRef;
pub use record::{FieldPair, NormalizedField, Record};
