//! # Asset Registry
//!
//! The authoritative record for every enrolled asset: identity, lifecycle
//! state, metadata pointer, review decision, and the decommission flag.
//! Records are never deleted — decommissioning transitions a record to a
//! terminal state and leaves it in place, so the registry doubles as the
//! audit trail of everything that ever existed.
//!
//! All lifecycle transitions are methods on [`AssetRecord`]: the operation
//! layer decides *whether* a transition may run, the record decides *what*
//! the transition writes. The `decommissioned == true ⇔ state == Inactive`
//! invariant is maintained entirely inside [`AssetRecord::decommission`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier of an enrolled asset. Bounded to 36 bytes by the host's
/// input layer; unique for the lifetime of the ledger.
pub type AssetId = String;

/// An authenticated caller identity, as supplied by the execution host.
pub type Principal = String;

/// A point on the host's logical clock. Monotonically non-decreasing
/// across operations; block height in the original deployment.
pub type Timepoint = u64;

// ---------------------------------------------------------------------------
// Lifecycle State
// ---------------------------------------------------------------------------

/// Lifecycle state of an enrolled asset.
///
/// ```text
/// Pending -> { Approved, Declined }   (review decision)
/// Approved -> Active                  (tokenization)
/// any -> Inactive                     (decommission, terminal)
/// ```
///
/// `Declined` has no outgoing edge toward `Active`: a declined asset can
/// never be tokenized. Review decisions themselves are permanent by
/// design — there is no transition back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetState {
    /// Enrolled, awaiting an independent review decision.
    Pending,
    /// A reviewer approved the asset; eligible for tokenization.
    Approved,
    /// A reviewer declined the asset. Terminal for tokenization purposes.
    Declined,
    /// Tokenized: a supply exists and balances may move.
    Active,
    /// Decommissioned. Terminal, one-way.
    Inactive,
}

impl std::fmt::Display for AssetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetState::Pending => write!(f, "Pending"),
            AssetState::Approved => write!(f, "Approved"),
            AssetState::Declined => write!(f, "Declined"),
            AssetState::Active => write!(f, "Active"),
            AssetState::Inactive => write!(f, "Inactive"),
        }
    }
}

// ---------------------------------------------------------------------------
// AssetRecord
// ---------------------------------------------------------------------------

/// The on-ledger record of one off-chain physical asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Unique identifier, immutable after enrollment.
    pub id: AssetId,
    /// The principal that enrolled the asset. Immutable; holds amend,
    /// issue, and decommission rights.
    pub originator: Principal,
    /// Current lifecycle state.
    pub state: AssetState,
    /// The reviewer that recorded the current decision, if any.
    pub reviewer: Option<Principal>,
    /// Logical time of the current review decision, if any.
    pub reviewed_at: Option<Timepoint>,
    /// Pointer to off-ledger metadata (content-addressed blob, document
    /// store, …). Stored and served, never fetched or validated here.
    pub metadata_uri: String,
    /// Logical time of enrollment.
    pub created_at: Timepoint,
    /// Logical time of the most recent mutation.
    pub modified_at: Timepoint,
    /// Opaque integrity digest of the off-chain item, immutable after
    /// enrollment. Verification is an operator concern.
    pub integrity_hash: String,
    /// Monotonic flag: flips false -> true exactly once, together with
    /// the transition to [`AssetState::Inactive`].
    pub decommissioned: bool,
}

impl AssetRecord {
    /// Creates the record for a freshly enrolled asset, in `Pending`
    /// state with the caller as originator.
    pub fn enroll(
        id: &str,
        originator: &str,
        metadata_uri: &str,
        integrity_hash: &str,
        at: Timepoint,
    ) -> Self {
        Self {
            id: id.to_string(),
            originator: originator.to_string(),
            state: AssetState::Pending,
            reviewer: None,
            reviewed_at: None,
            metadata_uri: metadata_uri.to_string(),
            created_at: at,
            modified_at: at,
            integrity_hash: integrity_hash.to_string(),
            decommissioned: false,
        }
    }

    /// Records a review decision: `Approved` or `Declined`, with the
    /// deciding reviewer and time. A later decision overwrites an earlier
    /// one wholesale — reviewer, timestamp, and state.
    pub fn record_decision(&mut self, reviewer: &str, approve: bool, at: Timepoint) -> AssetState {
        self.state = if approve {
            AssetState::Approved
        } else {
            AssetState::Declined
        };
        self.reviewer = Some(reviewer.to_string());
        self.reviewed_at = Some(at);
        self.modified_at = at;
        self.state
    }

    /// Marks the asset tokenized. Called exactly once, by the issuance
    /// path, after its guards held.
    pub fn activate(&mut self, at: Timepoint) -> AssetState {
        self.state = AssetState::Active;
        self.modified_at = at;
        self.state
    }

    /// Retires the asset: state to `Inactive` and the decommission flag
    /// set, in one write so the two can never disagree.
    pub fn decommission(&mut self, at: Timepoint) -> AssetState {
        self.state = AssetState::Inactive;
        self.decommissioned = true;
        self.modified_at = at;
        self.state
    }

    /// Replaces the metadata URI. Originator-gated by the operation
    /// layer; the integrity hash and originator have no setter at all.
    pub fn amend_uri(&mut self, new_uri: &str, at: Timepoint) {
        self.metadata_uri = new_uri.to_string();
        self.modified_at = at;
    }
}

// ---------------------------------------------------------------------------
// AssetRegistry
// ---------------------------------------------------------------------------

/// The map of all asset records ever enrolled, keyed by id.
///
/// Insert-only: ids are never freed, so `len()` is also the count of all
/// enrollments since genesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRegistry {
    assets: HashMap<AssetId, AssetRecord>,
}

impl AssetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }

    /// Returns `true` if an asset with this id has ever been enrolled.
    pub fn contains(&self, id: &str) -> bool {
        self.assets.contains_key(id)
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &str) -> Option<&AssetRecord> {
        self.assets.get(id)
    }

    /// Looks up a record for mutation. Only the operation layer calls
    /// this, after its guards held.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut AssetRecord> {
        self.assets.get_mut(id)
    }

    /// Inserts a freshly enrolled record. The caller has already checked
    /// uniqueness; a collision here is a programming error.
    pub fn insert(&mut self, record: AssetRecord) {
        let prior = self.assets.insert(record.id.clone(), record);
        debug_assert!(prior.is_none(), "enrollment over an existing asset id");
    }

    /// Number of assets ever enrolled.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns `true` if nothing has been enrolled yet.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
