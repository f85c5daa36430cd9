//! # Error Taxonomy
//!
//! Every failure a ledger operation can report, collected in one enum with
//! a frozen numeric code per kind. Callers on the wire key on the numeric
//! identity (the original deployment surfaced these as `u100`..`u111`), so
//! the codes never move: new kinds get new numbers, retired kinds keep
//! theirs as reserved slots.
//!
//! Errors are always returned, never thrown. The only panics in this crate
//! are internal invariant violations — a lookup of an entry a prior guard
//! proved to exist, or an addition the conservation law bounds — which are
//! programming errors, not conditions a caller can recover from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by ledger operations.
///
/// The numeric code (see [`LedgerError::code`]) is part of the public
/// contract. Variants may grow context fields; their codes may not change.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LedgerError {
    /// The caller does not hold the role the operation requires.
    #[error("unauthorized: caller lacks the required role")]
    Unauthorized,

    /// An asset with this id is already enrolled. Ids are single-use for
    /// the lifetime of the ledger — there is no deletion to free them.
    #[error("asset already enrolled: {0}")]
    AssetExists(String),

    /// The referenced asset does not exist.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The asset is not in the verification state this operation requires.
    #[error("asset is not verified for this operation")]
    Unverified,

    /// The sender's balance cannot cover the requested quantity.
    #[error("insufficient balance: available {available}, requested {requested}")]
    LowBalance {
        /// The sender's current balance.
        available: u64,
        /// The quantity the caller asked to move.
        requested: u64,
    },

    /// Reserved. No current operation reports this kind; the code slot is
    /// kept so downstream match arms stay exhaustive across deployments.
    #[error("transaction failed")]
    TxnFailed,

    /// The asset already has a token spec. Tokenization is one-shot and
    /// survives decommissioning.
    #[error("asset has already been tokenized")]
    AlreadyTokenized,

    /// Reserved. Input shape violations are rejected by the host's input
    /// layer before an operation executes.
    #[error("malformed input")]
    BadInput,

    /// The caller is not an enabled reviewer.
    #[error("caller is not an enabled reviewer")]
    VerifierOnly,

    /// The asset has been decommissioned and no longer accepts mutations.
    #[error("asset is decommissioned")]
    Decommissioned,

    /// The final compliance re-validation, run immediately before
    /// balances move, failed after the discrete guards had passed.
    #[error("transfer blocked by compliance re-check")]
    ComplianceBlock,

    /// Transfer quantities must be positive.
    #[error("amount must be positive")]
    InvalidAmount,
}

impl LedgerError {
    /// Returns the stable numeric code for this error kind.
    pub const fn code(&self) -> u32 {
        match self {
            LedgerError::Unauthorized => 100,
            LedgerError::AssetExists(_) => 101,
            LedgerError::NotFound(_) => 102,
            LedgerError::Unverified => 103,
            LedgerError::LowBalance { .. } => 104,
            LedgerError::TxnFailed => 105,
            LedgerError::AlreadyTokenized => 106,
            LedgerError::BadInput => 107,
            LedgerError::VerifierOnly => 108,
            LedgerError::Decommissioned => 109,
            LedgerError::ComplianceBlock => 110,
            LedgerError::InvalidAmount => 111,
        }
    }
}
