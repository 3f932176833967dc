//! Audit bookkeeping data attached by the save orchestrator.
//!
//! This core only carries the shapes; it never fills them in.

use serde::{Deserialize, Serialize};

/// Actor identity recorded on writes.
///
/// `user_id` may refer to a user that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditDetails {
    pub user_id: String,
    pub username: Option<String>,
}

impl AuditDetails {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: None,
        }
    }
}

/// Created/last-modified pair kept on auditable documents.
///
/// Timestamps are unix epoch milliseconds. Modification is not creation,
/// so the last-modified pair stays `None` until the first update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStamp {
    pub created_at: Option<i64>,
    pub created_by: Option<AuditDetails>,
    pub last_modified_at: Option<i64>,
    pub last_modified_by: Option<AuditDetails>,
}
