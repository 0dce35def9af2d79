// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the violation store contract

use std::sync::Arc;

use companion_guard::safety::catalog::ProfanityCatalog;
use companion_guard::safety::profanity::{ProfanityAction, ProfanityDetector};
use companion_guard::safety::violations::{MemoryViolationStore, ViolationStore};

mockall::mock! {
    Store {}
    impl ViolationStore for Store {
        fn record(&self, user_id: &str, matches: u32) -> u32;
        fn count(&self, user_id: &str) -> u32;
        fn reset(&self, user_id: &str);
        fn tracked_users(&self) -> usize;
    }
}

#[test]
fn test_detector_records_exact_match_count() {
    let mut store = MockStore::new();
    store
        .expect_record()
        .withf(|user_id, matches| user_id == "kid-1" && *matches == 2)
        .times(1)
        .return_const(2u32);

    let detector = ProfanityDetector::new(
        &ProfanityCatalog::default(),
        Arc::new(store),
        "****".to_string(),
        3,
        6,
    )
    .unwrap();

    let report = detector.scan("shit and more shit", Some("kid-1")).unwrap();
    assert_eq!(report.violation_count, 2);
    assert!(report.allow_message);
}

#[test]
fn test_escalated_count_from_store_blocks() {
    let mut store = MockStore::new();
    // The store already holds violations from earlier sessions
    store.expect_record().return_const(7u32);

    let detector = ProfanityDetector::new(
        &ProfanityCatalog::default(),
        Arc::new(store),
        "****".to_string(),
        3,
        6,
    )
    .unwrap();

    let report = detector.scan("this is shit", Some("kid-2")).unwrap();
    assert_eq!(report.action, ProfanityAction::WarnAndLimit);
    assert!(!report.allow_message);
}

#[test]
fn test_memory_store_timestamps_violations() {
    let store = MemoryViolationStore::new();
    let before = chrono::Utc::now();
    store.record("kid-3", 1);
    let state = store.state("kid-3").unwrap();
    assert_eq!(state.count, 1);
    assert!(state.last_violation >= before);
}

#[test]
fn test_memory_store_counts_are_monotonic() {
    let store = MemoryViolationStore::new();
    let mut last = 0;
    for _ in 0..10 {
        let next = store.record("kid-4", 1);
        assert!(next > last);
        last = next;
    }
    store.reset("kid-4");
    assert_eq!(store.count("kid-4"), 0);
}
