// Hot-path benchmarks for the VERA ledger.
//
// Covers the transfer settlement path (guards + balance moves + journal
// append) and the read-only compliance probe hosts run before quoting a
// transfer to a client.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use vera_ledger::AssetLedger;

const ADMIN: &str = "registry-admin";
const ORIGINATOR: &str = "mill-operator";
const REVIEWER: &str = "auditor-a";

fn tokenized_ledger() -> AssetLedger {
    let mut ledger = AssetLedger::new(ADMIN);
    ledger.grant_reviewer(ADMIN, 1, REVIEWER).unwrap();
    ledger
        .enroll(ORIGINATOR, 2, "warehouse-lot-0042", "ipfs://meta", "cafebabe")
        .unwrap();
    ledger.assess(REVIEWER, 3, "warehouse-lot-0042", true).unwrap();
    ledger
        .issue(ORIGINATOR, 4, "warehouse-lot-0042", u64::MAX, 8, "ipfs://tok")
        .unwrap();
    ledger
}

fn bench_transfer(c: &mut Criterion) {
    let ledger = tokenized_ledger();

    c.bench_function("ledger/transfer_settle", |b| {
        b.iter_batched(
            || ledger.clone(),
            |mut ledger| {
                ledger
                    .transfer(ORIGINATOR, 5, "warehouse-lot-0042", "investor-x", 1_000)
                    .unwrap()
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_transfer_eligibility(c: &mut Criterion) {
    let ledger = tokenized_ledger();

    c.bench_function("ledger/transfer_eligible_probe", |b| {
        b.iter(|| ledger.transfer_eligible("warehouse-lot-0042", ORIGINATOR, "investor-x", 1_000));
    });
}

fn bench_balance_query(c: &mut Criterion) {
    let mut ledger = tokenized_ledger();
    ledger
        .transfer(ORIGINATOR, 5, "warehouse-lot-0042", "investor-x", 1_000)
        .unwrap();

    c.bench_function("ledger/balance_of", |b| {
        b.iter(|| ledger.balance_of("warehouse-lot-0042", "investor-x"));
    });
}

criterion_group!(
    benches,
    bench_transfer,
    bench_transfer_eligibility,
    bench_balance_query
);
criterion_main!(benches);
