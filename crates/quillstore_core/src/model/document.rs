//! Document contract and per-type field metadata.
//!
//! # Responsibility
//! - Describe each document type once: name, collection, ordered fields.
//! - Encode reference/cascade markers as a single tagged `FieldState`.
//! - Expose live child references for cascade traversal.
//!
//! # Invariants
//! - `TypeDescriptor.fields` order is field declaration order; cascade
//!   traversal follows it.
//! - `FieldState` is fixed per field; validity is checked at save time so
//!   malformed declarations fail independent of field values.

use crate::model::searchable::SearchableDocument;

/// Raw per-field markers, the Rust analogue of the reference/cascade
/// annotations a reflective mapper would probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMarkers {
    /// Field holds another document's identity.
    pub reference: bool,
    /// Referenced document must be written alongside the parent.
    pub cascade: bool,
    /// Target identity is resolved through a deferred loader.
    pub lazy: bool,
}

/// Tagged reference state, computed once per field at model construction.
///
/// The malformed marker combination stays representable so the save
/// pipeline can reject it no matter what value the field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Plain value field; never traversed.
    NotReference,
    /// Holds a foreign identity but the target is managed elsewhere.
    ReferenceOnly,
    /// Referenced document is written before the parent. `lazy` must be
    /// false; a deferred loader can report a value as present yet fail to
    /// dereference it later.
    ReferenceWithCascade { lazy: bool },
    /// Cascade marker without a reference marker; always rejected.
    CascadeWithoutReference,
}

impl FieldState {
    /// Collapses raw markers into the tagged state.
    pub const fn from_markers(markers: FieldMarkers) -> Self {
        match (markers.reference, markers.cascade) {
            (false, false) => Self::NotReference,
            (true, false) => Self::ReferenceOnly,
            (true, true) => Self::ReferenceWithCascade { lazy: markers.lazy },
            (false, true) => Self::CascadeWithoutReference,
        }
    }
}

/// Static metadata for one document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    /// Primary-key marker; cascade targets need at least one such field.
    pub primary_key: bool,
    pub state: FieldState,
}

impl FieldDescriptor {
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            primary_key: false,
            state: FieldState::NotReference,
        }
    }

    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            primary_key: true,
            state: FieldState::NotReference,
        }
    }

    pub const fn reference(name: &'static str) -> Self {
        Self {
            name,
            primary_key: false,
            state: FieldState::ReferenceOnly,
        }
    }

    pub const fn cascade(name: &'static str) -> Self {
        Self {
            name,
            primary_key: false,
            state: FieldState::ReferenceWithCascade { lazy: false },
        }
    }

    pub const fn lazy_cascade(name: &'static str) -> Self {
        Self {
            name,
            primary_key: false,
            state: FieldState::ReferenceWithCascade { lazy: true },
        }
    }

    pub const fn with_markers(name: &'static str, markers: FieldMarkers) -> Self {
        Self {
            name,
            primary_key: false,
            state: FieldState::from_markers(markers),
        }
    }
}

/// Static metadata for one document type.
///
/// Declared once per type (usually as a `static`) and handed out by
/// [`Document::descriptor`]; the eligibility cache keys on `name`.
#[derive(Debug)]
pub struct TypeDescriptor {
    /// Unique type name; doubles as the eligibility-cache key.
    pub name: &'static str,
    /// Target collection for upserts.
    pub collection: &'static str,
    /// Fields in declaration order.
    pub fields: &'static [FieldDescriptor],
}

/// Live value of one reference field during cascade traversal.
pub enum ReferenceValue<'a> {
    /// Null reference; nothing to cascade.
    Absent,
    /// Value could not be produced; recovered by skipping the field.
    Unreadable,
    One(&'a mut dyn Document),
    Many(Vec<&'a mut dyn Document>),
}

/// Pairs a field's static metadata with its live value.
pub struct FieldValue<'a> {
    pub descriptor: &'static FieldDescriptor,
    pub value: ReferenceValue<'a>,
}

/// Contract every persistable document implements.
///
/// Implementations return `fields_mut` entries in the same order as
/// `descriptor().fields`; non-reference fields report
/// [`ReferenceValue::Absent`].
pub trait Document {
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Stored identity. `None` means the document cannot be addressed by
    /// the upsert primitive and its write fails.
    fn identity(&self) -> Option<String>;

    /// Serialized body written to the store.
    fn body(&self) -> Result<serde_json::Value, serde_json::Error>;

    /// Live field values in declaration order, children borrowed mutably
    /// so nested saves can enrich them in place.
    fn fields_mut(&mut self) -> Vec<FieldValue<'_>>;

    /// Downcast hook for the full-text materializer; plain documents keep
    /// the default.
    fn as_searchable_mut(&mut self) -> Option<&mut dyn SearchableDocument> {
        None
    }
}
