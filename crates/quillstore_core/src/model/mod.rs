//! Document metadata model shared by the save pipeline.
//!
//! # Responsibility
//! - Define the `Document` contract and its static field metadata.
//! - Keep reference/cascade semantics in one tagged state per field.
//!
//! # Invariants
//! - Field metadata is immutable per type and computed at model
//!   construction time, never re-derived per save.
//! - A cascade target type must declare a primary-key field.

pub mod audit;
pub mod document;
pub mod searchable;
