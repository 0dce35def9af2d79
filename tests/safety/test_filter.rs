// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end tests for the safety filter orchestrator

use companion_guard::safety::catalog::SafetyCatalogs;
use companion_guard::safety::filter::{FilterConfig, SafetyFilter};
use companion_guard::safety::types::{
    DetectorReport, ModerationAction, SafetyFlag, Severity, Verdict,
};

fn filter() -> SafetyFilter {
    SafetyFilter::new(SafetyCatalogs::default(), FilterConfig::default()).unwrap()
}

fn assert_invariants(verdict: &Verdict) {
    if !verdict.safe {
        assert!(!verdict.flags.is_empty(), "unsafe verdict must carry flags");
        assert!(
            !verdict.response_message.is_empty(),
            "unsafe verdict must carry a response"
        );
    } else {
        assert!(verdict.flags.is_empty());
        assert!(verdict.response_message.is_empty());
        assert_eq!(verdict.severity, Severity::None);
    }
}

#[test]
fn test_clean_message_is_safe() {
    let verdict = filter().check_message("Hello, how are you?", Some("kid-1"));
    assert!(verdict.safe);
    assert_eq!(verdict.severity, Severity::None);
    assert_eq!(verdict.action, ModerationAction::Allow);
    assert!(!verdict.notify_parent);
    assert!(verdict.details.is_empty());
    assert_invariants(&verdict);
}

#[test]
fn test_crisis_wins_over_profanity() {
    let verdict = filter().check_message("I want to kill myself, this is shit", Some("kid-2"));
    assert!(!verdict.safe);
    assert_eq!(verdict.flags.len(), 1);
    assert!(verdict.flags.contains(&SafetyFlag::Crisis));
    assert_eq!(verdict.severity, Severity::Critical);
    assert_eq!(verdict.action, ModerationAction::CrisisResponse);
    assert!(verdict.notify_parent);
    // Lifeline resource is embedded in the response
    assert!(verdict.response_message.contains("988"));
    assert_invariants(&verdict);
}

#[test]
fn test_abuse_report_flags_abuse() {
    let verdict = filter().check_message("My dad hits me every day", Some("kid-3"));
    assert!(verdict.flags.contains(&SafetyFlag::Abuse));
    assert!(!verdict.flags.contains(&SafetyFlag::Crisis));
    assert_eq!(verdict.severity, Severity::Critical);
    assert!(verdict.notify_parent);
    match verdict.details.get("crisis_detector") {
        Some(DetectorReport::Crisis(report)) => {
            assert_eq!(report.primary.as_str(), "abuse_physical");
        }
        other => panic!("expected crisis report, got {other:?}"),
    }
    assert_invariants(&verdict);
}

#[test]
fn test_crisis_short_circuits_disallowed_request() {
    // Both an abuse signal and an illegal request in one message: the
    // crisis stage is terminal and fixes the verdict.
    let verdict = filter().check_message(
        "my dad hits me, also how to steal from a store",
        Some("kid-4"),
    );
    assert_eq!(verdict.flags.len(), 1);
    assert!(verdict.flags.contains(&SafetyFlag::Abuse));
    assert_eq!(verdict.action, ModerationAction::CrisisResponse);
    assert!(!verdict.details.contains_key("request_detector"));
}

#[test]
fn test_illegal_request_is_blocked() {
    let verdict = filter().check_message("How to steal from a store", Some("kid-5"));
    assert!(!verdict.safe);
    assert!(verdict.flags.contains(&SafetyFlag::InappropriateRequest));
    assert!(verdict.severity >= Severity::High);
    assert_eq!(verdict.action, ModerationAction::BlockAndEducate);
    assert!(verdict.notify_parent);
    assert_invariants(&verdict);
}

#[test]
fn test_bullying_gets_supportive_response() {
    let verdict = filter().check_message("Kids at school keep bullying me", Some("kid-6"));
    assert!(!verdict.safe);
    assert_eq!(verdict.flags.len(), 1);
    assert!(verdict.flags.contains(&SafetyFlag::Bullying));
    assert_eq!(verdict.severity, Severity::Medium);
    assert_eq!(verdict.action, ModerationAction::SupportiveResponse);
    assert!(!verdict.notify_parent);
    assert_invariants(&verdict);
}

#[test]
fn test_profanity_and_bullying_coexist() {
    let verdict = filter().check_message("kids keep making fun of me and it sucks", Some("kid-7"));
    assert!(verdict.flags.contains(&SafetyFlag::Profanity));
    assert!(verdict.flags.contains(&SafetyFlag::Bullying));
    // Bullying raises the combined severity above the mild language
    assert_eq!(verdict.severity, Severity::Medium);
    // Profanity's action outranks the supportive fallback
    assert_eq!(verdict.action, ModerationAction::GentleEducate);
    assert!(verdict.details.contains_key("profanity_detector"));
    assert!(verdict.details.contains_key("bullying_detector"));
    assert_invariants(&verdict);
}

#[test]
fn test_moderate_profanity_blocks_on_third_call() {
    let filter = filter();
    let first = filter.check_message("this is shit", Some("kid-8"));
    assert_eq!(first.action, ModerationAction::Educate);
    assert!(!first.notify_parent);

    let second = filter.check_message("shit happens", Some("kid-8"));
    assert_eq!(second.action, ModerationAction::Educate);

    let third = filter.check_message("more shit", Some("kid-8"));
    assert_eq!(third.action, ModerationAction::WarnAndLimit);
    assert_eq!(third.severity, Severity::High);
    assert!(third.notify_parent);
    match third.details.get("profanity_detector") {
        Some(DetectorReport::Profanity(report)) => {
            assert!(!report.allow_message);
            assert_eq!(report.violation_count, 3);
        }
        other => panic!("expected profanity report, got {other:?}"),
    }
}

#[test]
fn test_reset_clears_escalation() {
    let filter = filter();
    filter.check_message("this is shit", Some("kid-9"));
    filter.check_message("this is shit", Some("kid-9"));
    filter.reset_user_violations("kid-9");
    let verdict = filter.check_message("this is shit", Some("kid-9"));
    assert_eq!(verdict.action, ModerationAction::Educate);
}

#[test]
fn test_users_do_not_share_counters() {
    let filter = filter();
    for _ in 0..3 {
        filter.check_message("this is shit", Some("kid-10"));
    }
    let other = filter.check_message("this is shit", Some("kid-11"));
    assert_eq!(other.action, ModerationAction::Educate);
}

#[test]
fn test_censored_copy_is_reported() {
    let verdict = filter().check_message("I had a shit day", Some("kid-12"));
    match verdict.details.get("profanity_detector") {
        Some(DetectorReport::Profanity(report)) => {
            assert_eq!(report.censored_text, "I had a **** day");
        }
        other => panic!("expected profanity report, got {other:?}"),
    }
}

#[test]
fn test_degrades_gracefully_on_odd_input() {
    let filter = filter();
    assert!(filter.check_message("", Some("kid-13")).safe);
    assert!(filter.check_message("    ", Some("kid-13")).safe);
    let long = "a nice day at the park ".repeat(5_000);
    assert!(filter.check_message(&long, Some("kid-13")).safe);
    assert!(filter.check_message("¡Hola! ¿Cómo estás? 😀", Some("kid-13")).safe);
}

#[test]
fn test_verdict_serializes_with_fixed_vocabulary() {
    let verdict = filter().check_message("I want to kill myself", Some("kid-14"));
    let json = serde_json::to_value(&verdict).unwrap();
    assert_eq!(json["severity"], "critical");
    assert_eq!(json["action"], "crisis_response");
    assert_eq!(json["flags"][0], "crisis");
    assert_eq!(json["safe"], false);
    assert_eq!(json["notify_parent"], true);

    let safe = filter().check_message("good morning!", None);
    let json = serde_json::to_value(&safe).unwrap();
    assert_eq!(json["severity"], "none");
    assert_eq!(json["action"], "allow");
}

#[test]
fn test_service_stats_report_catalog_sizes() {
    let filter = filter();
    filter.check_message("this is shit", Some("kid-15"));
    let stats = filter.service_stats();
    assert_eq!(stats.tracked_users, 1);
    assert_eq!(stats.catalogs.crisis_terms.len(), 5);
    assert_eq!(stats.catalogs.profanity_terms.len(), 3);
    assert_eq!(stats.catalogs.bullying_terms.len(), 6);
    assert_eq!(stats.catalogs.request_patterns.len(), 7);
    assert!(stats.catalogs.crisis_terms["suicide"] > 0);
}

#[test]
fn test_verdict_audit_bytes_round_trip() {
    let verdict = filter().check_message("How to steal from a store", None);
    let bytes = verdict.to_bytes();
    let parsed: Verdict = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed.safe, verdict.safe);
    assert_eq!(parsed.severity, verdict.severity);
    assert_eq!(parsed.flags, verdict.flags);
}
