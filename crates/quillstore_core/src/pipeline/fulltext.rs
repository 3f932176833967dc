//! Write-time materialization of tiered n-gram index fields.
//!
//! # Responsibility
//! - Build the composite search string from a document's value producers.
//! - Derive prefix/infix n-gram corpora and store them, capped per field.
//!
//! # Invariants
//! - Pure and deterministic for fixed producer outputs; idempotent.
//! - Neither index field ever exceeds [`MAX_FULLTEXT_INDEX_BYTES`].
//! - The document's language tag is never touched.

use crate::model::document::Document;
use crate::pipeline::{ChildPersister, EnrichmentStep, SaveResult};
use crate::search::ngram::{NgramConfig, NgramGenerator, NgramMode};
use crate::store::StoreSession;
use log::debug;

/// 1 MiB per index field, to keep stored rows from ballooning. A rough
/// estimate is that 100 words yield 1000 n-grams.
pub const MAX_FULLTEXT_INDEX_BYTES: usize = 1_048_576;

/// Enrichment step deriving `high_priority`/`low_priority` index fields
/// on documents that expose full-text sources.
pub struct NgramFullTextMaterializer<G: NgramGenerator> {
    generator: G,
    config: NgramConfig,
}

impl<G: NgramGenerator> NgramFullTextMaterializer<G> {
    pub fn new(generator: G, config: NgramConfig) -> Self {
        Self { generator, config }
    }
}

impl<G: NgramGenerator> EnrichmentStep for NgramFullTextMaterializer<G> {
    fn name(&self) -> &'static str {
        "fulltext_materialize"
    }

    fn apply(
        &self,
        document: &mut dyn Document,
        _session: &mut dyn StoreSession,
        _children: &dyn ChildPersister,
    ) -> SaveResult<()> {
        let type_name = document.descriptor().name;
        let Some(searchable) = document.as_searchable_mut() else {
            return Ok(());
        };

        let composite = searchable
            .fulltext_sources()
            .iter()
            .filter_map(|source| source())
            .filter(|value| !value.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let high_priority = truncate_to_bytes(
            self.generator
                .create_ngrams(&composite, NgramMode::PrefixOnly, &self.config)
                .join(" "),
            MAX_FULLTEXT_INDEX_BYTES,
        );
        let low_priority = truncate_to_bytes(
            self.generator
                .create_ngrams(&composite, NgramMode::InfixOnly, &self.config)
                .join(" "),
            MAX_FULLTEXT_INDEX_BYTES,
        );

        debug!(
            "event=fulltext_materialize module=pipeline status=ok type={type_name} high_bytes={} low_bytes={}",
            high_priority.len(),
            low_priority.len()
        );
        searchable.set_fulltext_index(high_priority, low_priority);

        Ok(())
    }
}

/// Hard byte cut, backed off to the nearest char boundary.
fn truncate_to_bytes(mut value: String, max_bytes: usize) -> String {
    if value.len() <= max_bytes {
        return value;
    }

    let mut cut = max_bytes;
    while !value.is_char_boundary(cut) {
        cut -= 1;
    }
    value.truncate(cut);
    value
}
