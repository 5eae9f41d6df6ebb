//! Property-Based Tests for Store Module
//!
//! Uses proptest to verify store behavior over generated keys, values,
//! TTLs, and operation sequences. Time is driven by a manual clock so
//! every property is deterministic.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::{Backend, MemoryBackend};
use crate::clock::ManualClock;
use crate::store::{Entry, Lookup, TtlStore};

// == Test Configuration ==
const TEST_DEFAULT_TTL_MS: u64 = 60_000;

fn manual_store(start_ms: u64) -> (TtlStore, Arc<MemoryBackend>, Arc<ManualClock>) {
    let backend = Arc::new(MemoryBackend::new());
    let clock = Arc::new(ManualClock::new(start_ms));
    let store = TtlStore::with_clock(
        backend.clone(),
        Duration::from_millis(TEST_DEFAULT_TTL_MS),
        clock.clone(),
    );
    (store, backend, clock)
}

// == Strategies ==
/// Generates store keys (non-empty, word characters)
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}".prop_map(|s| s)
}

/// Generates string values to store
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,256}".prop_map(|s| s)
}

/// Generates per-write TTLs in milliseconds
fn ttl_ms_strategy() -> impl Strategy<Value = u64> {
    1u64..10_000
}

/// Generates a sequence of store operations for model checking
#[derive(Debug, Clone)]
enum StoreOp {
    Insert { key: String, value: String },
    InsertTtl { key: String, value: String, ttl_ms: u64 },
    Get { key: String },
    Remove { key: String },
    Advance { ms: u64 },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOp::Insert { key, value }),
        (key_strategy(), value_strategy(), ttl_ms_strategy())
            .prop_map(|(key, value, ttl_ms)| StoreOp::InsertTtl { key, value, ttl_ms }),
        key_strategy().prop_map(|key| StoreOp::Get { key }),
        key_strategy().prop_map(|key| StoreOp::Remove { key }),
        (1u64..5_000).prop_map(|ms| StoreOp::Advance { ms }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a value and reading it back before its TTL elapses returns
    // exactly the value that was stored.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let (store, _, _) = manual_store(0);

        store.insert(&key, &value).unwrap();

        let lookup: Lookup<String> = store.lookup(&key).unwrap();
        prop_assert_eq!(lookup, Lookup::Fresh(value), "Round-trip value mismatch");
    }

    // Writing the same key twice leaves only the second value visible.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let (store, _, _) = manual_store(0);

        store.insert(&key, &value1).unwrap();
        store.insert(&key, &value2).unwrap();

        let retrieved = store.get::<String>(&key);
        prop_assert_eq!(retrieved, Some(value2), "Overwrite should return new value");
    }

    // A record is fresh strictly before its expiry instant, stale from
    // that instant on, and the stale read removes it from the backend.
    #[test]
    fn prop_expiry_boundary(
        key in key_strategy(),
        value in value_strategy(),
        ttl_ms in ttl_ms_strategy()
    ) {
        let (store, backend, clock) = manual_store(0);

        store.insert_with_ttl(&key, &value, Duration::from_millis(ttl_ms)).unwrap();

        clock.set(ttl_ms - 1);
        prop_assert!(
            store.lookup::<String>(&key).unwrap().is_fresh(),
            "Record should be fresh one tick before expiry"
        );

        clock.set(ttl_ms);
        prop_assert_eq!(
            store.lookup::<String>(&key).unwrap(),
            Lookup::Expired,
            "Record should be stale at the expiry instant"
        );
        prop_assert_eq!(
            backend.get(&key).unwrap(),
            None,
            "Stale read should evict the record"
        );
    }

    // A record written without an expiry stays fresh however far the
    // clock advances.
    #[test]
    fn prop_never_expiring_survives_any_advance(
        key in key_strategy(),
        value in value_strategy(),
        advance_ms in 0u64..u64::MAX / 2
    ) {
        let (store, _, clock) = manual_store(0);

        store.insert_never_expiring(&key, &value).unwrap();
        clock.set(advance_ms);

        prop_assert!(
            store.lookup::<String>(&key).unwrap().is_fresh(),
            "Record without expiry should never go stale"
        );
    }

    // A raw record that does not decode reads as corrupt and yields no
    // value, but stays physically in the backend.
    #[test]
    fn prop_corrupt_record_reads_as_absent_but_stays(
        key in key_strategy(),
        raw in "[a-zA-Z ]{1,64}"
    ) {
        let (store, backend, _) = manual_store(0);

        backend.set(&key, &raw).unwrap();

        prop_assert_eq!(store.lookup::<String>(&key).unwrap(), Lookup::Corrupt);
        prop_assert_eq!(store.get::<String>(&key), None);
        prop_assert!(
            backend.get(&key).unwrap().is_some(),
            "Corrupt record must be left in place"
        );
    }

    // The entry codec round-trips any value and expiry combination.
    #[test]
    fn prop_entry_codec_roundtrip(
        value in value_strategy(),
        expiry in proptest::option::of(0u64..u64::MAX)
    ) {
        let entry = Entry::new(value, expiry);

        let raw = entry.encode().unwrap();
        let decoded: Entry<String> = Entry::decode(&raw).unwrap();

        prop_assert_eq!(decoded, entry, "Codec round-trip mismatch");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any operation sequence, the statistics counters match a model
    // that replays the same sequence, and every lookup outcome agrees
    // with the model's view of the store.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(store_op_strategy(), 1..50)) {
        let (store, _, clock) = manual_store(0);

        // Model: expiry per live key, plus the expected counters.
        let mut model: HashMap<String, Option<u64>> = HashMap::new();
        let mut now: u64 = 0;
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_expirations: u64 = 0;

        for op in ops {
            match op {
                StoreOp::Insert { key, value } => {
                    store.insert(&key, &value).unwrap();
                    model.insert(key, Some(now + TEST_DEFAULT_TTL_MS));
                }
                StoreOp::InsertTtl { key, value, ttl_ms } => {
                    store.insert_with_ttl(&key, &value, Duration::from_millis(ttl_ms)).unwrap();
                    model.insert(key, Some(now + ttl_ms));
                }
                StoreOp::Get { key } => {
                    let lookup: Lookup<String> = store.lookup(&key).unwrap();
                    match model.get(&key) {
                        None => {
                            expected_misses += 1;
                            prop_assert_eq!(lookup, Lookup::Missing, "Model disagrees on miss");
                        }
                        Some(Some(expiry)) if now >= *expiry => {
                            expected_expirations += 1;
                            model.remove(&key);
                            prop_assert_eq!(lookup, Lookup::Expired, "Model disagrees on expiry");
                        }
                        Some(_) => {
                            expected_hits += 1;
                            prop_assert!(lookup.is_fresh(), "Model disagrees on hit");
                        }
                    }
                }
                StoreOp::Remove { key } => {
                    store.remove(&key).unwrap();
                    model.remove(&key);
                }
                StoreOp::Advance { ms } => {
                    clock.advance(Duration::from_millis(ms));
                    now += ms;
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.expirations, expected_expirations, "Expirations mismatch");
        prop_assert_eq!(stats.decode_failures, 0, "No decode failures expected");
    }
}
