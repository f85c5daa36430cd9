//! # Reviewer Roster
//!
//! Tracks which principals the administrator has granted assessment
//! rights. Grants are idempotent on the `enabled` flag and revocation
//! keeps the grant record around — `enrolled_at` is history, not state,
//! and a revoked reviewer's past decisions stay valid on the assets that
//! carry them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::registry::{Principal, Timepoint};

/// One reviewer's standing with the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewerGrant {
    /// The granted principal.
    pub reviewer: Principal,
    /// Whether the reviewer may currently assess assets.
    pub enabled: bool,
    /// Logical time of the first grant. Preserved across revocations and
    /// re-grants.
    pub enrolled_at: Timepoint,
}

/// The set of all reviewer grants, past and present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewerRoster {
    grants: HashMap<Principal, ReviewerGrant>,
    /// Count of currently enabled reviewers, maintained on every flip.
    enabled_count: usize,
}

impl ReviewerRoster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self {
            grants: HashMap::new(),
            enabled_count: 0,
        }
    }

    /// Enables a reviewer. Returns `true` if the enabled flag changed,
    /// `false` for an idempotent re-grant. First-time grants record
    /// `enrolled_at`; re-grants never touch it.
    pub fn grant(&mut self, subject: &str, at: Timepoint) -> bool {
        if let Some(grant) = self.grants.get_mut(subject) {
            if grant.enabled {
                return false;
            }
            grant.enabled = true;
            self.enabled_count += 1;
            return true;
        }

        self.grants.insert(
            subject.to_string(),
            ReviewerGrant {
                reviewer: subject.to_string(),
                enabled: true,
                enrolled_at: at,
            },
        );
        self.enabled_count += 1;
        true
    }

    /// Disables a reviewer. Returns `true` if the enabled flag changed.
    /// Revoking a principal that was never granted is a no-op — there is
    /// no history to preserve for it.
    pub fn revoke(&mut self, subject: &str) -> bool {
        match self.grants.get_mut(subject) {
            Some(grant) if grant.enabled => {
                grant.enabled = false;
                self.enabled_count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Whether the subject may currently assess assets. Unknown subjects
    /// are disabled by definition.
    pub fn is_enabled(&self, subject: &str) -> bool {
        self.grants.get(subject).map(|g| g.enabled).unwrap_or(false)
    }

    /// The full grant record for a subject, including revoked ones.
    pub fn grant_of(&self, subject: &str) -> Option<&ReviewerGrant> {
        self.grants.get(subject)
    }

    /// Number of currently enabled reviewers.
    pub fn enabled_count(&self) -> usize {
        self.enabled_count
    }

    /// Number of principals ever granted, enabled or not.
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    /// Returns `true` if no principal was ever granted.
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}
