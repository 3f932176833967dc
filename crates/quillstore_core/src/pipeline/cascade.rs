//! Cascade persistence of referenced child documents.
//!
//! # Responsibility
//! - Classify each parent field by its tagged reference state.
//! - Persist cascade-marked children, in field declaration order,
//!   strictly before the parent's own write.
//!
//! # Invariants
//! - Declaration problems fail independent of field values.
//! - Children re-enter the full pipeline, so nested cascades and
//!   full-text enrichment apply to them too.
//! - No parent field is mutated here.

use crate::model::document::{Document, FieldState, ReferenceValue};
use crate::pipeline::eligibility::EligibilityCache;
use crate::pipeline::{ChildPersister, ConfigurationError, EnrichmentStep, SaveResult};
use crate::store::StoreSession;
use log::{debug, trace, warn};
use std::sync::Arc;

/// Enrichment step walking the parent's reference fields.
pub struct CascadeGraphPersister {
    eligibility: Arc<EligibilityCache>,
}

impl CascadeGraphPersister {
    pub fn new(eligibility: Arc<EligibilityCache>) -> Self {
        Self { eligibility }
    }

    fn cascade_child(
        &self,
        parent_type: &'static str,
        field: &'static str,
        child: &mut dyn Document,
        session: &mut dyn StoreSession,
        children: &dyn ChildPersister,
    ) -> SaveResult<()> {
        let descriptor = child.descriptor();

        // An identity-less cascade target risks duplicate inserts.
        if !self.eligibility.has_primary_key(descriptor) {
            return Err(ConfigurationError::MissingPrimaryKey {
                type_name: descriptor.name,
            }
            .into());
        }

        debug!(
            "event=cascade_save module=pipeline status=start child={} field={field} parent={parent_type}",
            descriptor.name
        );
        children.persist_child(child, session)
    }
}

impl EnrichmentStep for CascadeGraphPersister {
    fn name(&self) -> &'static str {
        "cascade_save"
    }

    fn apply(
        &self,
        document: &mut dyn Document,
        session: &mut dyn StoreSession,
        children: &dyn ChildPersister,
    ) -> SaveResult<()> {
        let type_name = document.descriptor().name;

        for field in document.fields_mut() {
            let field_name = field.descriptor.name;

            match field.descriptor.state {
                FieldState::NotReference => continue,
                FieldState::ReferenceOnly => {
                    // May be intentional: referring to rows managed elsewhere.
                    trace!(
                        "event=cascade_skip module=pipeline status=ok reason=reference_without_cascade type={type_name} field={field_name}"
                    );
                    continue;
                }
                FieldState::CascadeWithoutReference => {
                    return Err(ConfigurationError::CascadeWithoutReference {
                        type_name,
                        field: field_name,
                    }
                    .into());
                }
                FieldState::ReferenceWithCascade { lazy: true } => {
                    return Err(ConfigurationError::LazyCascadeReference {
                        type_name,
                        field: field_name,
                    }
                    .into());
                }
                FieldState::ReferenceWithCascade { lazy: false } => {}
            }

            match field.value {
                ReferenceValue::Absent => {}
                ReferenceValue::Unreadable => {
                    warn!(
                        "event=cascade_skip module=pipeline status=warn reason=unreadable_field type={type_name} field={field_name}"
                    );
                }
                ReferenceValue::One(child) => {
                    self.cascade_child(type_name, field_name, child, session, children)?;
                }
                ReferenceValue::Many(children_values) => {
                    for child in children_values {
                        self.cascade_child(type_name, field_name, child, session, children)?;
                    }
                }
            }
        }

        Ok(())
    }
}
