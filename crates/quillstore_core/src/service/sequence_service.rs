//! Monotonic named-sequence generation.
//!
//! # Responsibility
//! - Produce strictly increasing per-name integer IDs.
//!
//! # Invariants
//! - Correctness under concurrency rests entirely on the store's atomic
//!   increment primitive; no locks or retries are layered on top.
//! - Values start at 1 and never repeat for one name.

use crate::store::{StoreResult, StoreSession};
use log::debug;

/// Use-case wrapper around the store's atomic sequence primitive.
pub struct SequenceService<S: StoreSession> {
    session: S,
}

impl<S: StoreSession> SequenceService<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// Returns the next value for the named sequence, creating it at 1
    /// on first use.
    ///
    /// With upsert-and-return semantics the store never yields an empty
    /// result; the fallback to 1 is defensive only.
    pub fn next_value(&mut self, name: &str) -> StoreResult<i64> {
        let value = self.session.increment_sequence(name)?.unwrap_or(1);
        debug!("event=sequence_next module=service status=ok name={name} value={value}");
        Ok(value)
    }

    /// Releases the underlying session.
    pub fn into_session(self) -> S {
        self.session
    }
}
