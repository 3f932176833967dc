//! Contract for documents carrying derived full-text index fields.

use crate::model::document::Document;
use crate::search::language::SearchLanguage;

/// A document whose save materializes two ranked n-gram index fields.
///
/// `sources` order is fixed per type; the materializer joins produced
/// values in that order, so reordering sources changes the index bytes.
pub trait SearchableDocument: Document {
    /// Zero-argument value producers, one per indexed property. `None`
    /// and blank productions are dropped.
    fn fulltext_sources(&self) -> Vec<Box<dyn Fn() -> Option<String> + '_>>;

    /// Stores the derived index fields: prefix n-grams carry the higher
    /// search weight, infix n-grams the lower one.
    fn set_fulltext_index(&mut self, high_priority: String, low_priority: String);

    /// Document language tag, owned by the caller; the materializer never
    /// touches it.
    fn language(&self) -> Option<SearchLanguage>;
}
