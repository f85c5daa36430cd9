// Copyright (c) 2026 VERA Labs. MIT License.
// See LICENSE for details.

//! # VERA Ledger — Core Library
//!
//! The ledger state machine behind VERA, a registry for verified
//! real-world assets: off-chain physical items enrolled under an
//! identifier, reviewed by independent assessors, fractionalized into a
//! fixed token supply, traded holder-to-holder, and eventually
//! decommissioned — with every step gated, journaled, and irreversible
//! where it should be.
//!
//! ## Architecture
//!
//! One module per concern, leaves first:
//!
//! - **config** — Input bounds and fixed constants shared with hosts.
//! - **error** — The error taxonomy, with frozen numeric codes.
//! - **registry** — Authoritative asset records and the lifecycle
//!   state machine.
//! - **review** — Reviewer grants: who may assess, and since when.
//! - **balance** — Per-(asset, holder) quantities. Dumb on purpose.
//! - **token** — One-shot supply specs created at issuance.
//! - **journal** — Append-only transfer log with a global sequence.
//! - **ledger** — The operation layer tying it all together: access
//!   gates, guard ordering, and the only code that writes anything.
//!
//! ## Design Philosophy
//!
//! 1. The host authenticates callers and supplies the logical clock;
//!    every operation takes both as explicit arguments. No ambient
//!    state, so a unit test is a host.
//! 2. Guards first, writes last. An error return means nothing moved.
//! 3. Nothing is ever deleted. Records transition; the audit trail is
//!    the data structure itself.
//! 4. If it counts money, it checks its arithmetic.

pub mod balance;
pub mod config;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod registry;
pub mod review;
pub mod token;

pub use error::LedgerError;
pub use ledger::AssetLedger;
pub use registry::{AssetId, AssetRecord, AssetState, Principal, Timepoint};
