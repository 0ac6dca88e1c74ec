//! Common types and traits for all inventory entities

pub mod entity;

// Re-exports
pub use entity::{Entity, EntityId};
