//! Common types and traits for all entity sections

pub mod entity;

pub use entity::{details_of, DisplayRecord, Entity, Summary};
