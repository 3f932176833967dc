//! Full-text search support: n-gram generation and language negotiation.
//!
//! # Responsibility
//! - Derive prefix/infix n-gram corpora for fuzzy matching.
//! - Resolve preferred search languages from weighted header input.
//!
//! # Invariants
//! - N-gram generation is pure and deterministic for a given input.
//! - The supported language set is closed; no runtime extension.

pub mod language;
pub mod ngram;
