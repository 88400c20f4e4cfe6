//! Common types shared by all catalog aggregates

pub mod aggregate_id;
pub mod error;

// Re-exports
pub use aggregate_id::AggregateId;
pub use error::{CatalogError, FormField, ValidationErrors};
