//! # Ledger Constants
//!
//! Every bound and fixed value in VERA lives here. The ledger core trusts
//! its host to reject out-of-bounds input before an operation executes;
//! these constants are the contract both sides validate against.

// ---------------------------------------------------------------------------
// Input Bounds
// ---------------------------------------------------------------------------

/// Maximum length of an asset identifier, in bytes.
///
/// 36 bytes fits a canonical hyphenated UUID, the format most deployments
/// use for asset ids. The core never generates ids — callers bring their
/// own.
pub const MAX_ASSET_ID_LEN: usize = 36;

/// Maximum length of an integrity hash, in bytes.
///
/// 64 bytes fits a hex-encoded SHA-256 digest. The hash is stored as an
/// opaque string and never verified on-ledger.
pub const MAX_INTEGRITY_HASH_LEN: usize = 64;

/// Maximum length of a metadata or token URI, in bytes.
pub const MAX_URI_LEN: usize = 256;

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

/// Sequence number assigned to the first journal entry. The journal
/// counter is global across assets and never resets.
pub const GENESIS_SEQUENCE: u64 = 0;

// ---------------------------------------------------------------------------
// Host Helpers
// ---------------------------------------------------------------------------

/// Returns `true` if the given enrollment inputs fit the wire bounds.
///
/// Host input layers call this before dispatching `enroll`; the core
/// itself assumes bounds were already enforced.
pub fn within_bounds(id: &str, integrity_hash: &str, uri: &str) -> bool {
    id.len() <= MAX_ASSET_ID_LEN
        && !id.is_empty()
        && integrity_hash.len() <= MAX_INTEGRITY_HASH_LEN
        && uri.len() <= MAX_URI_LEN
}
