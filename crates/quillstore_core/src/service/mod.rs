//! Core use-case services.
//!
//! # Responsibility
//! - Wrap store primitives into stable caller-facing APIs.
//! - Keep callers decoupled from SQL/session details.

pub mod sequence_service;
