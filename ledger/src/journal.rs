//! # Transfer Journal
//!
//! Append-only log of every settled transfer, across all assets, in
//! settlement order. Sequence numbers come from one global counter that
//! starts at zero and never resets, reuses, or reorders — entry `n` is
//! always at index `n`.

use serde::{Deserialize, Serialize};

use crate::registry::{AssetId, Principal, Timepoint};

/// One settled transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// The asset whose balances moved.
    pub asset_id: AssetId,
    /// Position in the global journal, starting at 0.
    pub sequence: u64,
    /// The debited holder.
    pub sender: Principal,
    /// The credited holder.
    pub receiver: Principal,
    /// Quantity moved. Always positive — zero-amount transfers are
    /// rejected before settlement.
    pub quantity: u64,
    /// Logical time of settlement.
    pub occurred_at: Timepoint,
}

/// The append-only transfer log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferJournal {
    entries: Vec<TransferRecord>,
    next_sequence: u64,
}

impl TransferJournal {
    /// Creates an empty journal.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Appends a settled transfer and returns the sequence number it was
    /// filed under.
    pub fn append(
        &mut self,
        asset_id: &str,
        sender: &str,
        receiver: &str,
        quantity: u64,
        at: Timepoint,
    ) -> u64 {
        let sequence = self.next_sequence;
        self.entries.push(TransferRecord {
            asset_id: asset_id.to_string(),
            sequence,
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            quantity,
            occurred_at: at,
        });
        self.next_sequence += 1;
        sequence
    }

    /// Looks up an entry by its sequence number.
    pub fn get(&self, sequence: u64) -> Option<&TransferRecord> {
        self.entries.get(sequence as usize)
    }

    /// All entries, in settlement order.
    pub fn entries(&self) -> &[TransferRecord] {
        &self.entries
    }

    /// Entries touching one asset, in settlement order.
    pub fn for_asset<'a>(&'a self, asset_id: &'a str) -> impl Iterator<Item = &'a TransferRecord> {
        self.entries.iter().filter(move |r| r.asset_id == asset_id)
    }

    /// The sequence number the next settlement will take.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Number of settled transfers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has settled yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_start_at_zero_and_increment() {
        let mut journal = TransferJournal::new();
        assert_eq!(journal.append("lot-7", "a", "b", 10, 100), 0);
        assert_eq!(journal.append("lot-7", "b", "c", 5, 101), 1);
        assert_eq!(journal.append("lot-8", "x", "y", 7, 101), 2);
        assert_eq!(journal.next_sequence(), 3);
        assert_eq!(journal.len(), 3);
    }

    #[test]
    fn sequence_doubles_as_index() {
        let mut journal = TransferJournal::new();
        journal.append("lot-7", "a", "b", 10, 100);
        journal.append("lot-8", "x", "y", 7, 101);
        let entry = journal.get(1).unwrap();
        assert_eq!(entry.sequence, 1);
        assert_eq!(entry.asset_id, "lot-8");
        assert!(journal.get(2).is_none());
    }

    #[test]
    fn per_asset_view_preserves_order() {
        let mut journal = TransferJournal::new();
        journal.append("lot-7", "a", "b", 1, 100);
        journal.append("lot-8", "x", "y", 2, 100);
        journal.append("lot-7", "b", "c", 3, 101);
        let sequences: Vec<u64> = journal.for_asset("lot-7").map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![0, 2]);
    }

    #[test]
    fn record_fields_are_kept_verbatim() {
        let mut journal = TransferJournal::new();
        journal.append("lot-7", "mill-operator", "investor-x", 100_000, 42);
        let entry = journal.get(0).unwrap();
        assert_eq!(entry.sender, "mill-operator");
        assert_eq!(entry.receiver, "investor-x");
        assert_eq!(entry.quantity, 100_000);
        assert_eq!(entry.occurred_at, 42);
    }
}
