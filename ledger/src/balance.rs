//! # Balance Book
//!
//! Per-(asset, holder) integer quantities. This is deliberately dumb
//! storage: no lifecycle checks, no authorization, no amount validation —
//! the operation layer runs every guard before a single unit moves here.
//! What the book does enforce is arithmetic sanity: a debit below zero or
//! a credit past `u64::MAX` can only mean the conservation law was already
//! broken upstream, and both are fatal.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::registry::{AssetId, Principal};

/// Holder balances for every tokenized asset.
///
/// Outer map is keyed by asset id, inner map by holder principal. Holders
/// with no entry hold zero; entries are created on first credit and never
/// removed (a drained balance stays as an explicit zero).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceBook {
    books: HashMap<AssetId, HashMap<Principal, u64>>,
}

impl BalanceBook {
    /// Creates an empty balance book.
    pub fn new() -> Self {
        Self {
            books: HashMap::new(),
        }
    }

    /// Opens the book for an asset by crediting its entire supply to one
    /// holder. Issuance calls this exactly once per asset.
    pub fn mint(&mut self, asset_id: &str, holder: &str, supply: u64) {
        let book = self.books.entry(asset_id.to_string()).or_default();
        let prior = book.insert(holder.to_string(), supply);
        debug_assert!(prior.is_none(), "mint over an existing balance book");
    }

    /// Adds quantity to a holder, creating the entry at zero first if
    /// absent. Overflow is impossible while conservation holds (the sum
    /// of balances never exceeds the minted supply), so it panics.
    pub fn credit(&mut self, asset_id: &str, holder: &str, amount: u64) -> u64 {
        let book = self.books.entry(asset_id.to_string()).or_default();
        let balance = book.entry(holder.to_string()).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .expect("balance credit overflow violates conservation");
        *balance
    }

    /// Removes quantity from a holder and returns the remainder. The
    /// operation layer has already proven the balance covers the amount;
    /// anything else is a programming error.
    pub fn debit(&mut self, asset_id: &str, holder: &str, amount: u64) -> u64 {
        let balance = self
            .books
            .get_mut(asset_id)
            .and_then(|book| book.get_mut(holder))
            .expect("debit from a holder with no balance entry");
        *balance = balance
            .checked_sub(amount)
            .expect("balance debit below zero violates conservation");
        *balance
    }

    /// The holder's quantity for an asset. Unknown assets and unknown
    /// holders both read as zero; this query cannot fail.
    pub fn balance_of(&self, asset_id: &str, holder: &str) -> u64 {
        self.books
            .get(asset_id)
            .and_then(|book| book.get(holder))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all holder balances for an asset. Equals the minted supply
    /// at every point after issuance — the conservation law.
    pub fn total_for(&self, asset_id: &str) -> u64 {
        self.books
            .get(asset_id)
            .map(|book| book.values().sum())
            .unwrap_or(0)
    }

    /// Number of holders with an entry for the asset, zero balances
    /// included.
    pub fn holder_count(&self, asset_id: &str) -> usize {
        self.books.get(asset_id).map(|book| book.len()).unwrap_or(0)
    }
}
