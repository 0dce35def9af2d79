// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the severity scorer and boundary parsing

use std::collections::BTreeMap;

use companion_guard::safety::scorer::{RecommendedAction, SeverityScorer};
use companion_guard::safety::types::{SafetyError, SafetyFlag, Severity};

#[test]
fn test_highest_equals_max_under_total_order() {
    let severities = [
        Severity::Medium,
        Severity::None,
        Severity::High,
        Severity::Low,
    ];
    assert_eq!(SeverityScorer::highest(severities), Severity::High);
    let reversed: Vec<_> = severities.iter().rev().copied().collect();
    assert_eq!(SeverityScorer::highest(reversed), Severity::High);
}

#[test]
fn test_highest_of_empty_is_none() {
    assert_eq!(SeverityScorer::highest(Vec::new()), Severity::None);
}

#[test]
fn test_score_lookup_per_detector_category() {
    assert_eq!(SeverityScorer::score("suicide"), Severity::Critical);
    assert_eq!(SeverityScorer::score("sexual"), Severity::Critical);
    assert_eq!(SeverityScorer::score("illegal"), Severity::High);
    assert_eq!(SeverityScorer::score("profanity_mild"), Severity::Low);
    assert_eq!(SeverityScorer::score("cyberbullying"), Severity::Medium);
    // Unknown names degrade to none rather than failing
    assert_eq!(SeverityScorer::score("weather"), Severity::None);
}

#[test]
fn test_combine_derives_block_and_notify_from_overall() {
    let mut inputs = BTreeMap::new();
    inputs.insert("crisis_detector".to_string(), Severity::Critical);
    inputs.insert("profanity_detector".to_string(), Severity::Low);
    let combined = SeverityScorer::combine(&inputs);
    assert_eq!(combined.overall, Severity::Critical);
    assert!(combined.block);
    assert!(combined.notify_parent);
    assert_eq!(
        SeverityScorer::action_for(combined.overall),
        RecommendedAction::CrisisResponse
    );
}

#[test]
fn test_combine_of_empty_inputs_allows() {
    let combined = SeverityScorer::combine(&BTreeMap::new());
    assert_eq!(combined.overall, Severity::None);
    assert!(!combined.block);
    assert!(!combined.notify_parent);
}

#[test]
fn test_boundary_parsing_rejects_unknown_names() {
    assert!(matches!(
        "urgent".parse::<Severity>(),
        Err(SafetyError::InvalidSeverity(_))
    ));
    assert!(matches!(
        "gossip".parse::<SafetyFlag>(),
        Err(SafetyError::InvalidCategory(_))
    ));
    assert_eq!("high".parse::<Severity>().unwrap(), Severity::High);
    assert_eq!(
        "inappropriate_request".parse::<SafetyFlag>().unwrap(),
        SafetyFlag::InappropriateRequest
    );
}
