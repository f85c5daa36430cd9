//! Interactive CLI demo of the full VERA asset lifecycle.
//!
//! Plays the execution host: it authenticates the cast of callers,
//! advances the logical clock one tick per operation, and narrates
//! enrollment, review, tokenization, transfers, and decommissioning —
//! including the refusals the ledger is built to hand out.
//!
//! Run with:
//!   cargo run --example demo

use anyhow::Result;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use vera_ledger::{AssetLedger, LedgerError};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[31m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    println!(
        "{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]=============================================================={RESET}"
    );
    println!("{BOLD}{WHITE}  {title}{RESET}");
    println!(
        "{CYAN}------------------------------------------------------------------------{RESET}"
    );
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn refused(err: &LedgerError) {
    println!("{RED}  [REFUSED u{}] {err}{RESET}", err.code());
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn balance_row(name: &str, balance: u64) {
    println!("  {BOLD}{name:<16}{RESET} {WHITE}{balance:>12}{RESET} {DIM}units{RESET}");
}

// ---------------------------------------------------------------------------
// Simulated host
// ---------------------------------------------------------------------------

/// The logical clock a real host would derive from its block height.
struct Clock(u64);

impl Clock {
    fn tick(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let admin = "registry-admin";
    let operator = "mill-operator";
    let auditor = "auditor-a";
    let investor = "investor-x";

    let mut ledger = AssetLedger::new(admin);
    let mut clock = Clock(0);

    // A realistic 36-char asset id and a 64-char integrity digest.
    let asset_id = Uuid::new_v4().to_string();
    let integrity_hash = hex::encode(Sha256::digest(b"warehouse lot 0042, graded 2026-08"));

    section(1, "Enrollment — the operator registers a physical lot");
    let (id, state) = ledger.enroll(
        operator,
        clock.tick(),
        &asset_id,
        "ipfs://bafy.../lot-0042.json",
        &integrity_hash,
    )?;
    info("asset", &id);
    info("state", &state.to_string());
    success("asset enrolled, awaiting review");

    section(2, "Review — the administrator seats an auditor who approves");
    ledger.grant_reviewer(admin, clock.tick(), auditor)?;
    let state = ledger.assess(auditor, clock.tick(), &asset_id, true)?;
    info("state", &state.to_string());
    success("independent review recorded");

    section(3, "Tokenization — the lot becomes 1,000,000 fractional units");
    let state = ledger.issue(
        operator,
        clock.tick(),
        &asset_id,
        1_000_000,
        8,
        "ipfs://bafy.../lot-0042-token.json",
    )?;
    info("state", &state.to_string());
    balance_row(operator, ledger.balance_of(&asset_id, operator));
    success("supply minted to the originator");

    section(4, "Transfers — fractions change hands, the journal keeps score");
    let seq = ledger.transfer(operator, clock.tick(), &asset_id, investor, 100_000)?;
    info("journal sequence", &seq.to_string());
    balance_row(operator, ledger.balance_of(&asset_id, operator));
    balance_row(investor, ledger.balance_of(&asset_id, investor));
    success("transfer settled");

    section(5, "Refusals — the guards earn their keep");
    if let Err(err) = ledger.issue(operator, clock.tick(), &asset_id, 500, 8, "ipfs://again") {
        refused(&err); // AlreadyTokenized — issuance is one-shot.
    }
    if let Err(err) = ledger.transfer(investor, clock.tick(), &asset_id, operator, 9_999_999) {
        refused(&err); // LowBalance.
    }
    if let Err(err) = ledger.assess(operator, clock.tick(), &asset_id, false) {
        refused(&err); // VerifierOnly — originators don't self-review.
    }

    section(6, "Decommission — the lot leaves service, the record stays");
    let state = ledger.decommission(admin, clock.tick(), &asset_id)?;
    info("state", &state.to_string());
    if let Err(err) = ledger.transfer(operator, clock.tick(), &asset_id, investor, 1) {
        refused(&err); // Decommissioned — balances are frozen in place.
    }
    balance_row(operator, ledger.balance_of(&asset_id, operator));
    balance_row(investor, ledger.balance_of(&asset_id, investor));
    success("asset retired; journal and balances remain auditable");

    println!();
    info("assets enrolled", &ledger.asset_count().to_string());
    info("transfers settled", &ledger.transfer_count().to_string());
    println!();

    Ok(())
}
