//! # Operation Layer
//!
//! The [`AssetLedger`] owns every map and counter and is their sole
//! writer. Each public operation takes the authenticated caller and the
//! host's logical clock as explicit arguments, runs its guards in a fixed
//! order, and only then mutates — so a returned error always means an
//! untouched store, and the first failing guard is the one reported.
//! Guard order is observable behavior and is part of the compatibility
//! contract with existing callers.
//!
//! ## Atomicity
//!
//! Operations take `&mut self`; the exclusive borrow is the single-writer
//! guarantee. Hosts that serve concurrent callers must wrap the ledger in
//! a mutex (or a transaction that commits the whole store) so each
//! operation runs to completion before the next begins — the conservation
//! and uniqueness invariants assume it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::balance::BalanceBook;
use crate::error::LedgerError;
use crate::journal::{TransferJournal, TransferRecord};
use crate::registry::{AssetId, AssetRecord, AssetRegistry, AssetState, Principal, Timepoint};
use crate::review::{ReviewerGrant, ReviewerRoster};
use crate::token::{TokenBook, TokenSpec};

/// The complete ledger state: asset registry, token specs, holder
/// balances, reviewer roster, and the transfer journal, plus the
/// administrator identity fixed at construction.
///
/// Serializable as a whole so hosts can snapshot and restore the entire
/// store in one piece.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetLedger {
    administrator: Principal,
    registry: AssetRegistry,
    tokens: TokenBook,
    balances: BalanceBook,
    journal: TransferJournal,
    reviewers: ReviewerRoster,
}

impl AssetLedger {
    /// Creates an empty ledger administered by the given principal. The
    /// administrator identity is immutable for the ledger's lifetime.
    pub fn new(administrator: &str) -> Self {
        Self {
            administrator: administrator.to_string(),
            registry: AssetRegistry::new(),
            tokens: TokenBook::new(),
            balances: BalanceBook::new(),
            journal: TransferJournal::new(),
            reviewers: ReviewerRoster::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Access control gate
    // -----------------------------------------------------------------------

    fn is_administrator(&self, caller: &str) -> bool {
        self.administrator == caller
    }

    /// False when the asset is absent — the gate never panics on
    /// unknown ids.
    fn is_originator(&self, id: &str, caller: &str) -> bool {
        self.registry
            .get(id)
            .map(|record| record.originator == caller)
            .unwrap_or(false)
    }

    fn is_enabled_reviewer(&self, caller: &str) -> bool {
        self.reviewers.is_enabled(caller)
    }

    // -----------------------------------------------------------------------
    // Registration & metadata
    // -----------------------------------------------------------------------

    /// Enrolls a new asset under the caller, in `Pending` state.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AssetExists`] if the id was ever enrolled
    /// before, by anyone — ids are not reusable.
    pub fn enroll(
        &mut self,
        caller: &str,
        at: Timepoint,
        id: &str,
        metadata_uri: &str,
        integrity_hash: &str,
    ) -> Result<(AssetId, AssetState), LedgerError> {
        if self.registry.contains(id) {
            return Err(LedgerError::AssetExists(id.to_string()));
        }

        let record = AssetRecord::enroll(id, caller, metadata_uri, integrity_hash, at);
        let state = record.state;
        self.registry.insert(record);

        info!(asset = %id, originator = %caller, at, "asset enrolled");
        Ok((id.to_string(), state))
    }

    /// Replaces an asset's metadata URI. Only the originator may amend,
    /// and only while the asset is not decommissioned. The integrity
    /// hash and originator are never mutable.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for unknown ids,
    /// [`LedgerError::Unauthorized`] when the caller is not the
    /// originator, [`LedgerError::Decommissioned`] for retired assets.
    pub fn amend(
        &mut self,
        caller: &str,
        at: Timepoint,
        id: &str,
        new_uri: &str,
    ) -> Result<(), LedgerError> {
        let record = self
            .registry
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        if !self.is_originator(id, caller) {
            return Err(LedgerError::Unauthorized);
        }
        if record.decommissioned {
            return Err(LedgerError::Decommissioned);
        }

        let record = self.registry.get_mut(id).expect("guarded lookup");
        record.amend_uri(new_uri, at);

        debug!(asset = %id, at, "metadata amended");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reviewer management
    // -----------------------------------------------------------------------

    /// Enables a reviewer. Administrator-only; idempotent on the enabled
    /// flag. Returns whether the flag actually changed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] when the caller is not the
    /// administrator.
    pub fn grant_reviewer(
        &mut self,
        caller: &str,
        at: Timepoint,
        subject: &str,
    ) -> Result<bool, LedgerError> {
        if !self.is_administrator(caller) {
            return Err(LedgerError::Unauthorized);
        }

        let changed = self.reviewers.grant(subject, at);
        if changed {
            info!(reviewer = %subject, at, "reviewer enabled");
        } else {
            debug!(reviewer = %subject, "reviewer grant was already in effect");
        }
        Ok(changed)
    }

    /// Disables a reviewer. Administrator-only; idempotent. The grant
    /// history stays on the roster and decisions the reviewer already
    /// recorded remain valid on their assets.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] when the caller is not the
    /// administrator.
    pub fn revoke_reviewer(&mut self, caller: &str, subject: &str) -> Result<bool, LedgerError> {
        if !self.is_administrator(caller) {
            return Err(LedgerError::Unauthorized);
        }

        let changed = self.reviewers.revoke(subject);
        if changed {
            info!(reviewer = %subject, "reviewer revoked");
        } else {
            debug!(reviewer = %subject, "reviewer revoke was already in effect");
        }
        Ok(changed)
    }

    // -----------------------------------------------------------------------
    // Assessment
    // -----------------------------------------------------------------------

    /// Records a review decision on an asset and returns the new state.
    ///
    /// There is deliberately no state guard here: a later assessment —
    /// by the same reviewer or another — overwrites the earlier decision,
    /// reviewer, and timestamp wholesale. Callers that want
    /// first-decision-wins semantics must enforce it upstream.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for unknown ids and
    /// [`LedgerError::VerifierOnly`] when the caller is not an enabled
    /// reviewer.
    pub fn assess(
        &mut self,
        caller: &str,
        at: Timepoint,
        id: &str,
        approve: bool,
    ) -> Result<AssetState, LedgerError> {
        if !self.registry.contains(id) {
            return Err(LedgerError::NotFound(id.to_string()));
        }
        if !self.is_enabled_reviewer(caller) {
            return Err(LedgerError::VerifierOnly);
        }

        let record = self.registry.get_mut(id).expect("guarded lookup");
        let state = record.record_decision(caller, approve, at);

        info!(asset = %id, reviewer = %caller, approved = approve, at, "asset assessed");
        Ok(state)
    }

    // -----------------------------------------------------------------------
    // Tokenization
    // -----------------------------------------------------------------------

    /// Fractionalizes an approved asset: files its one-shot token spec,
    /// moves the asset to `Active`, and mints the entire supply to the
    /// caller (the originator, by the guard below).
    ///
    /// The duplicate check runs on token-spec existence rather than
    /// lifecycle state, so a second issuance reports
    /// [`LedgerError::AlreadyTokenized`] even after the asset was
    /// decommissioned and its state left `Active`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for unknown ids,
    /// [`LedgerError::Unauthorized`] when the caller is not the
    /// originator, [`LedgerError::AlreadyTokenized`] when a spec exists,
    /// [`LedgerError::Unverified`] unless the asset is `Approved`.
    pub fn issue(
        &mut self,
        caller: &str,
        at: Timepoint,
        id: &str,
        supply: u64,
        precision: u8,
        token_uri: &str,
    ) -> Result<AssetState, LedgerError> {
        let record = self
            .registry
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        if !self.is_originator(id, caller) {
            return Err(LedgerError::Unauthorized);
        }
        if self.tokens.contains(id) {
            return Err(LedgerError::AlreadyTokenized);
        }
        if record.state != AssetState::Approved {
            return Err(LedgerError::Unverified);
        }

        let record = self.registry.get_mut(id).expect("guarded lookup");
        let state = record.activate(at);
        self.tokens.insert(TokenSpec {
            asset_id: id.to_string(),
            supply,
            precision,
            token_uri: token_uri.to_string(),
            activated_at: at,
        });
        self.balances.mint(id, caller, supply);

        info!(asset = %id, supply, precision, at, "asset tokenized, supply minted to originator");
        Ok(state)
    }

    // -----------------------------------------------------------------------
    // Transfer
    // -----------------------------------------------------------------------

    /// Moves quantity from the caller to the recipient and journals the
    /// settlement. Returns the journal sequence number.
    ///
    /// Guards run in a fixed, caller-observable order: existence,
    /// tokenization, decommission flag, amount, balance, and finally the
    /// redundant compliance re-check immediately before balances move.
    ///
    /// # Errors
    ///
    /// In guard order: [`LedgerError::NotFound`],
    /// [`LedgerError::Unverified`] (never tokenized),
    /// [`LedgerError::Decommissioned`], [`LedgerError::InvalidAmount`]
    /// (zero), [`LedgerError::LowBalance`],
    /// [`LedgerError::ComplianceBlock`].
    pub fn transfer(
        &mut self,
        caller: &str,
        at: Timepoint,
        id: &str,
        recipient: &str,
        amount: u64,
    ) -> Result<u64, LedgerError> {
        let record = self
            .registry
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        if !self.tokens.contains(id) {
            return Err(LedgerError::Unverified);
        }
        if record.decommissioned {
            return Err(LedgerError::Decommissioned);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let available = self.balances.balance_of(id, caller);
        if amount > available {
            return Err(LedgerError::LowBalance {
                available,
                requested: amount,
            });
        }
        if !self.compliance_ok(id, caller, recipient, amount) {
            warn!(asset = %id, sender = %caller, amount, "compliance re-check rejected a transfer");
            return Err(LedgerError::ComplianceBlock);
        }

        self.balances.debit(id, caller, amount);
        self.balances.credit(id, recipient, amount);
        let sequence = self.journal.append(id, caller, recipient, amount, at);

        info!(
            asset = %id,
            sender = %caller,
            receiver = %recipient,
            amount,
            sequence,
            at,
            "transfer settled"
        );
        Ok(sequence)
    }

    /// The compliance predicate: active, not decommissioned, positive
    /// amount, covered by the sender's balance. Run once as discrete
    /// guards and once more here, in one breath, right before mutation.
    fn compliance_ok(&self, id: &str, from: &str, to: &str, amount: u64) -> bool {
        // Recipient screening is a host concern; `to` is part of the
        // predicate's shape but not consulted on-ledger.
        let _ = to;
        match self.registry.get(id) {
            None => false,
            Some(record) => {
                record.state == AssetState::Active
                    && !record.decommissioned
                    && amount > 0
                    && self.balances.balance_of(id, from) >= amount
            }
        }
    }

    // -----------------------------------------------------------------------
    // Decommissioning
    // -----------------------------------------------------------------------

    /// Retires an asset: state to `Inactive`, decommission flag set.
    /// Irreversible. The originator or the administrator may retire.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for unknown ids,
    /// [`LedgerError::Unauthorized`] for other callers,
    /// [`LedgerError::Decommissioned`] if already retired.
    pub fn decommission(
        &mut self,
        caller: &str,
        at: Timepoint,
        id: &str,
    ) -> Result<AssetState, LedgerError> {
        let record = self
            .registry
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        if !self.is_originator(id, caller) && !self.is_administrator(caller) {
            return Err(LedgerError::Unauthorized);
        }
        if record.decommissioned {
            return Err(LedgerError::Decommissioned);
        }

        let record = self.registry.get_mut(id).expect("guarded lookup");
        let state = record.decommission(at);

        info!(asset = %id, by = %caller, at, "asset decommissioned");
        Ok(state)
    }

    // -----------------------------------------------------------------------
    // Read-only queries
    // -----------------------------------------------------------------------

    /// The full record for an asset, if enrolled.
    pub fn asset(&self, id: &str) -> Option<&AssetRecord> {
        self.registry.get(id)
    }

    /// The token spec of an actively tokenized asset.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for unknown ids and
    /// [`LedgerError::Unverified`] unless the asset is `Active` — a
    /// decommissioned asset's spec still exists but is no longer served.
    pub fn token_spec(&self, id: &str) -> Result<&TokenSpec, LedgerError> {
        let record = self
            .registry
            .get(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        if record.state != AssetState::Active {
            return Err(LedgerError::Unverified);
        }
        Ok(self
            .tokens
            .get(id)
            .expect("active asset without a token spec"))
    }

    /// The holder's balance for an asset. Unknown assets and holders
    /// read as zero; this query never fails.
    pub fn balance_of(&self, id: &str, holder: &str) -> u64 {
        self.balances.balance_of(id, holder)
    }

    /// Re-runs the transfer compliance predicate without mutating.
    pub fn transfer_eligible(&self, id: &str, from: &str, to: &str, amount: u64) -> bool {
        self.compliance_ok(id, from, to, amount)
    }

    /// Whether the subject currently holds assessment rights.
    pub fn is_reviewer_enabled(&self, subject: &str) -> bool {
        self.reviewers.is_enabled(subject)
    }

    /// The grant record for a subject, revoked grants included. Audit
    /// accessor — `enrolled_at` survives revocation.
    pub fn reviewer_grant(&self, subject: &str) -> Option<&ReviewerGrant> {
        self.reviewers.grant_of(subject)
    }

    /// The administrator fixed at construction.
    pub fn administrator(&self) -> &str {
        &self.administrator
    }

    /// Number of assets ever enrolled.
    pub fn asset_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of currently enabled reviewers.
    pub fn reviewer_count(&self) -> usize {
        self.reviewers.enabled_count()
    }

    /// Number of settled transfers.
    pub fn transfer_count(&self) -> usize {
        self.journal.len()
    }

    /// A settled transfer by its global sequence number.
    pub fn transfer_record(&self, sequence: u64) -> Option<&TransferRecord> {
        self.journal.get(sequence)
    }

    /// All settled transfers, in settlement order.
    pub fn transfers(&self) -> &[TransferRecord] {
        self.journal.entries()
    }

    /// Journal entries touching one asset, in settlement order.
    pub fn transfers_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a TransferRecord> {
        self.journal.for_asset(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN: &str = "registry-admin";
    const ORIGINATOR: &str = "mill-operator";
    const REVIEWER: &str = "auditor-a";

    /// Helper: a ledger with one approved asset, ready to issue.
    fn approved_ledger(id: &str) -> AssetLedger {
        let mut ledger = AssetLedger::new(ADMIN);
        ledger.enroll(ORIGINATOR, 1, id, "ipfs://meta", "cafebabe").unwrap();
        ledger.grant_reviewer(ADMIN, 2, REVIEWER).unwrap();
        ledger.assess(REVIEWER, 3, id, true).unwrap();
        ledger
    }

    #[test]
    fn enroll_returns_id_and_pending() {
        let mut ledger = AssetLedger::new(ADMIN);
        let (id, state) = ledger
            .enroll(ORIGINATOR, 1, "lot-7", "ipfs://meta", "cafebabe")
            .unwrap();
        assert_eq!(id, "lot-7");
        assert_eq!(state, AssetState::Pending);
        assert_eq!(ledger.asset_count(), 1);
    }

    #[test]
    fn administrator_is_fixed_at_construction() {
        let ledger = AssetLedger::new(ADMIN);
        assert_eq!(ledger.administrator(), ADMIN);
    }

    #[test]
    fn admin_has_no_implicit_reviewer_or_originator_rights() {
        let mut ledger = approved_ledger("lot-7");
        // Not a reviewer...
        assert_eq!(
            ledger.assess(ADMIN, 4, "lot-7", true),
            Err(LedgerError::VerifierOnly)
        );
        // ...and not the originator.
        assert_eq!(
            ledger.issue(ADMIN, 4, "lot-7", 1_000, 8, "ipfs://tok"),
            Err(LedgerError::Unauthorized)
        );
    }

    #[test]
    fn issue_guard_order_unauthorized_before_unverified() {
        let mut ledger = AssetLedger::new(ADMIN);
        ledger
            .enroll(ORIGINATOR, 1, "lot-7", "ipfs://meta", "cafebabe")
            .unwrap();
        // Still Pending, and the caller is a stranger: the role guard
        // fires before the verification guard.
        assert_eq!(
            ledger.issue("stranger", 2, "lot-7", 1_000, 8, "ipfs://tok"),
            Err(LedgerError::Unauthorized)
        );
    }

    #[test]
    fn token_spec_query_guards() {
        let mut ledger = approved_ledger("lot-7");
        assert_eq!(
            ledger.token_spec("lot-9"),
            Err(LedgerError::NotFound("lot-9".into()))
        );
        // Approved but not yet issued.
        assert_eq!(ledger.token_spec("lot-7"), Err(LedgerError::Unverified));

        ledger
            .issue(ORIGINATOR, 4, "lot-7", 1_000_000, 8, "ipfs://tok")
            .unwrap();
        assert_eq!(ledger.token_spec("lot-7").unwrap().supply, 1_000_000);

        // Decommissioning stops the spec from being served.
        ledger.decommission(ADMIN, 5, "lot-7").unwrap();
        assert_eq!(ledger.token_spec("lot-7"), Err(LedgerError::Unverified));
    }

    #[test]
    fn eligibility_predicate_is_pure() {
        let mut ledger = approved_ledger("lot-7");
        ledger
            .issue(ORIGINATOR, 4, "lot-7", 1_000, 8, "ipfs://tok")
            .unwrap();

        assert!(ledger.transfer_eligible("lot-7", ORIGINATOR, "investor-x", 500));
        assert!(!ledger.transfer_eligible("lot-7", ORIGINATOR, "investor-x", 0));
        assert!(!ledger.transfer_eligible("lot-7", "investor-x", ORIGINATOR, 1));
        assert!(!ledger.transfer_eligible("lot-9", ORIGINATOR, "investor-x", 1));

        // Probing changed nothing.
        assert_eq!(ledger.balance_of("lot-7", ORIGINATOR), 1_000);
        assert_eq!(ledger.transfer_count(), 0);
    }

    #[test]
    fn snapshot_roundtrip_preserves_the_store() {
        let mut ledger = approved_ledger("lot-7");
        ledger
            .issue(ORIGINATOR, 4, "lot-7", 1_000_000, 8, "ipfs://tok")
            .unwrap();
        ledger
            .transfer(ORIGINATOR, 5, "lot-7", "investor-x", 250_000)
            .unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: AssetLedger = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.administrator(), ADMIN);
        assert_eq!(restored.balance_of("lot-7", ORIGINATOR), 750_000);
        assert_eq!(restored.balance_of("lot-7", "investor-x"), 250_000);
        assert_eq!(restored.asset("lot-7").unwrap().state, AssetState::Active);
        assert_eq!(restored.transfer_count(), 1);
        assert!(restored.is_reviewer_enabled(REVIEWER));
    }
}
