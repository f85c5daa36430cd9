//! # Tokenization Ledger
//!
//! The supply record created when an asset is fractionalized. One spec
//! per asset, forever: existence of a [`TokenSpec`] is what makes
//! re-issuance refusable even after the asset itself is decommissioned,
//! so specs are never deleted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::registry::{AssetId, Timepoint};

/// The immutable supply record of a tokenized asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSpec {
    /// The asset this supply fractionalizes.
    pub asset_id: AssetId,
    /// Total units minted at issuance. Fixed for the asset's lifetime —
    /// there is no further minting and no burning.
    pub supply: u64,
    /// Display precision: number of decimal places a unit subdivides
    /// into. 8 is the customary choice.
    pub precision: u8,
    /// Pointer to off-ledger token documentation.
    pub token_uri: String,
    /// Logical time of issuance.
    pub activated_at: Timepoint,
}

/// All token specs, keyed by asset id. Insert-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenBook {
    specs: HashMap<AssetId, TokenSpec>,
}

impl TokenBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self {
            specs: HashMap::new(),
        }
    }

    /// Returns `true` if the asset has ever been issued.
    pub fn contains(&self, asset_id: &str) -> bool {
        self.specs.contains_key(asset_id)
    }

    /// Looks up the spec for an asset.
    pub fn get(&self, asset_id: &str) -> Option<&TokenSpec> {
        self.specs.get(asset_id)
    }

    /// Files a freshly issued spec. The issuance guards already refused
    /// duplicates; a collision here is a programming error.
    pub fn insert(&mut self, spec: TokenSpec) {
        let prior = self.specs.insert(spec.asset_id.clone(), spec);
        debug_assert!(prior.is_none(), "token spec issued twice for one asset");
    }

    /// Number of tokenized assets.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if no asset has been tokenized yet.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> TokenSpec {
        TokenSpec {
            asset_id: "lot-7".into(),
            supply: 1_000_000,
            precision: 8,
            token_uri: "ipfs://token-doc".into(),
            activated_at: 33,
        }
    }

    #[test]
    fn insert_then_lookup() {
        let mut book = TokenBook::new();
        assert!(!book.contains("lot-7"));
        book.insert(spec());
        assert!(book.contains("lot-7"));
        let found = book.get("lot-7").unwrap();
        assert_eq!(found.supply, 1_000_000);
        assert_eq!(found.precision, 8);
        assert_eq!(found.activated_at, 33);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn unknown_asset_has_no_spec() {
        let book = TokenBook::new();
        assert!(book.get("lot-9").is_none());
        assert!(book.is_empty());
    }
}
