//! Document-store persistence core with a pre-persistence enrichment
//! pipeline: cascade saves, n-gram full-text materialization, atomic
//! named sequences and memoized eligibility checks.

pub mod db;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{init_logging, logging_status};
pub use model::audit::{AuditDetails, AuditStamp};
pub use model::document::{
    Document, FieldDescriptor, FieldMarkers, FieldState, FieldValue, ReferenceValue,
    TypeDescriptor,
};
pub use model::searchable::SearchableDocument;
pub use pipeline::cascade::CascadeGraphPersister;
pub use pipeline::eligibility::EligibilityCache;
pub use pipeline::fulltext::{NgramFullTextMaterializer, MAX_FULLTEXT_INDEX_BYTES};
pub use pipeline::{
    ConfigurationError, EnrichmentStep, SaveError, SavePipeline, SaveResult, MAX_CASCADE_DEPTH,
};
pub use search::language::{negotiate_languages, SearchLanguage};
pub use search::ngram::{NgramConfig, NgramGenerator, NgramMode, WindowNgramGenerator};
pub use service::sequence_service::SequenceService;
pub use store::{SqliteSession, StoreError, StoreResult, StoreSession};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
