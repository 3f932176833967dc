//! Memoized primary-key eligibility checks for cascade targets.
//!
//! # Responsibility
//! - Answer "does this document type declare a primary-key field" from a
//!   bounded, shared cache.
//!
//! # Invariants
//! - The answer is a pure function of the type's field metadata, so a
//!   cached entry never goes stale within a process.
//! - Concurrent lookups need no caller-side synchronization.

use crate::model::document::TypeDescriptor;
use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

const DEFAULT_CAPACITY: usize = 1024;

/// Bounded LRU memo keyed by type name.
///
/// Construct once and share (typically via `Arc`); no ambient singleton
/// is involved.
pub struct EligibilityCache {
    entries: Mutex<LruCache<&'static str, bool>>,
    scans: AtomicU64,
}

impl Default for EligibilityCache {
    fn default() -> Self {
        Self::with_capacity(
            NonZeroUsize::new(DEFAULT_CAPACITY).expect("default capacity is non-zero"),
        )
    }
}

impl EligibilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            scans: AtomicU64::new(0),
        }
    }

    /// Returns whether the type declares at least one primary-key field.
    ///
    /// The first lookup per type scans its field descriptors; later
    /// lookups hit the cache unless the entry was evicted.
    pub fn has_primary_key(&self, descriptor: &'static TypeDescriptor) -> bool {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(answer) = entries.get(descriptor.name) {
            return *answer;
        }

        let answer = descriptor.fields.iter().any(|field| field.primary_key);
        self.scans.fetch_add(1, Ordering::Relaxed);
        debug!(
            "event=primary_key_scan module=pipeline status=ok type={} has_primary_key={answer}",
            descriptor.name
        );
        entries.put(descriptor.name, answer);

        answer
    }

    /// Number of uncached scans performed so far; diagnostic probe.
    pub fn scan_count(&self) -> u64 {
        self.scans.load(Ordering::Relaxed)
    }
}
