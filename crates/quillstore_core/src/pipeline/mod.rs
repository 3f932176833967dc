//! Pre-persistence enrichment pipeline.
//!
//! # Responsibility
//! - Run an explicit, ordered list of enrichment steps before each
//!   document write.
//! - Write the document itself only after every step succeeded.
//!
//! # Invariants
//! - Steps run synchronously on the caller's thread, in registration
//!   order, for every document in a cascade graph.
//! - A failing step aborts the enclosing write; children persisted by
//!   earlier steps stay committed (no compensating rollback).
//! - Nested saves deeper than [`MAX_CASCADE_DEPTH`] are rejected; the
//!   cascade graph must be acyclic.

use crate::model::document::Document;
use crate::store::{StoreError, StoreSession};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod cascade;
pub mod eligibility;
pub mod fulltext;

/// Defensive bound standing in for a real cycle guard; a legitimate
/// cascade graph never nests this deep.
pub const MAX_CASCADE_DEPTH: usize = 64;

pub type SaveResult<T> = Result<T, SaveError>;

/// Document/type declaration problems; always fatal and never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Cascade marker without a reference marker.
    CascadeWithoutReference {
        type_name: &'static str,
        field: &'static str,
    },
    /// Cascade combined with a deferred-load reference.
    LazyCascadeReference {
        type_name: &'static str,
        field: &'static str,
    },
    /// Cascade target declares no primary-key field.
    MissingPrimaryKey { type_name: &'static str },
    /// Nested saves exceeded [`MAX_CASCADE_DEPTH`]; the reference graph
    /// is almost certainly cyclic.
    CascadeDepthExceeded {
        type_name: &'static str,
        depth: usize,
    },
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CascadeWithoutReference { type_name, field } => write!(
                f,
                "field `{type_name}.{field}` has a cascade marker but no reference marker"
            ),
            Self::LazyCascadeReference { type_name, field } => write!(
                f,
                "field `{type_name}.{field}` must not combine cascade with a lazy reference"
            ),
            Self::MissingPrimaryKey { type_name } => write!(
                f,
                "cannot cascade-save `{type_name}`: it declares no primary-key field"
            ),
            Self::CascadeDepthExceeded { type_name, depth } => write!(
                f,
                "cascade depth {depth} exceeded while saving `{type_name}`; reference graph must be acyclic"
            ),
        }
    }
}

impl Error for ConfigurationError {}

/// Save-time error: either a declaration problem or a store failure.
#[derive(Debug)]
pub enum SaveError {
    Configuration(ConfigurationError),
    Store(StoreError),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ConfigurationError> for SaveError {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(value)
    }
}

impl From<StoreError> for SaveError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Re-entry handle steps use to push a child document through the full
/// pipeline before the parent write.
pub trait ChildPersister {
    fn persist_child(
        &self,
        child: &mut dyn Document,
        session: &mut dyn StoreSession,
    ) -> SaveResult<()>;
}

/// One synchronous enrichment hook run before a document write.
pub trait EnrichmentStep {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        document: &mut dyn Document,
        session: &mut dyn StoreSession,
        children: &dyn ChildPersister,
    ) -> SaveResult<()>;
}

/// Explicit save orchestrator: ordered steps, then the document write.
#[derive(Default)]
pub struct SavePipeline {
    steps: Vec<Box<dyn EnrichmentStep>>,
}

impl SavePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step; steps run in registration order.
    pub fn push_step(mut self, step: Box<dyn EnrichmentStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Runs every step against the document, then upserts it.
    ///
    /// Cascade-persisted descendants re-enter this same method, so each
    /// child is enriched and written strictly before its parent.
    pub fn save(
        &self,
        document: &mut dyn Document,
        session: &mut dyn StoreSession,
    ) -> SaveResult<()> {
        self.save_nested(document, session, 0)
    }

    fn save_nested(
        &self,
        document: &mut dyn Document,
        session: &mut dyn StoreSession,
        depth: usize,
    ) -> SaveResult<()> {
        let descriptor = document.descriptor();

        if depth > MAX_CASCADE_DEPTH {
            return Err(ConfigurationError::CascadeDepthExceeded {
                type_name: descriptor.name,
                depth,
            }
            .into());
        }

        let scope = NestedScope {
            pipeline: self,
            depth,
        };
        for step in &self.steps {
            step.apply(document, session, &scope)?;
        }

        let id = document
            .identity()
            .ok_or(StoreError::MissingIdentity(descriptor.name))?;
        let body = document.body().map_err(StoreError::Serialize)?;
        session.upsert(descriptor.collection, &id, &body)?;

        debug!(
            "event=document_saved module=pipeline status=ok type={} collection={} id={id} depth={depth}",
            descriptor.name, descriptor.collection
        );

        Ok(())
    }
}

struct NestedScope<'a> {
    pipeline: &'a SavePipeline,
    depth: usize,
}

impl ChildPersister for NestedScope<'_> {
    fn persist_child(
        &self,
        child: &mut dyn Document,
        session: &mut dyn StoreSession,
    ) -> SaveResult<()> {
        self.pipeline.save_nested(child, session, self.depth + 1)
    }
}
