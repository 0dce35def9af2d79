// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Severity scorer: pure mapping and combination layer.
//!
//! Normalizes detector category names onto the unified severity scale and
//! derives block/notify decisions from thresholds on the combined result.
//! Holds no state; category resolution is a declarative lookup table, not
//! control flow.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::safety::types::Severity;

/// Category-name to severity lookup across every detector. Unknown names
/// resolve to `Severity::None` (internal tables, not caller input).
const CATEGORY_SEVERITIES: &[(&str, Severity)] = &[
    // Crisis detector
    ("suicide", Severity::Critical),
    ("self_harm", Severity::Critical),
    ("abuse_physical", Severity::Critical),
    ("abuse_emotional", Severity::Critical),
    ("abuse_sexual", Severity::Critical),
    // Disallowed-request detector
    ("sexual", Severity::Critical),
    ("violence", Severity::High),
    ("illegal", Severity::High),
    ("safety_bypass", Severity::High),
    ("harmful_advice", Severity::High),
    ("manipulation", Severity::Medium),
    ("personal_info", Severity::Medium),
    // Profanity detector
    ("profanity_severe", Severity::High),
    ("profanity_moderate", Severity::Medium),
    ("profanity_mild", Severity::Low),
    // Bullying detector
    ("threats", Severity::Medium),
    ("physical", Severity::Medium),
    ("cyberbullying", Severity::Medium),
    ("verbal", Severity::Medium),
    ("social_exclusion", Severity::Medium),
    ("emotional_impact", Severity::Medium),
];

/// Scorer-layer action vocabulary, derived purely from a severity. The
/// orchestrator's verdict uses `ModerationAction`; this enum describes the
/// scorer's recommendation for combined assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    Allow,
    FilterAndEducate,
    SupportiveResponse,
    BlockWithEducation,
    CrisisResponse,
}

/// Combined assessment over several detectors' severities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedAssessment {
    pub overall: Severity,
    pub notify_parent: bool,
    pub block: bool,
    pub description: String,
}

/// Pure scoring functions; no instance state.
pub struct SeverityScorer;

impl SeverityScorer {
    /// Severity for a detector category name; unknown names score `None`.
    pub fn score(category: &str) -> Severity {
        CATEGORY_SEVERITIES
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, severity)| *severity)
            .unwrap_or(Severity::None)
    }

    /// Total-order maximum; the empty input scores `None`.
    pub fn highest<I>(severities: I) -> Severity
    where
        I: IntoIterator<Item = Severity>,
    {
        severities.into_iter().max().unwrap_or(Severity::None)
    }

    /// Guardian notification threshold.
    pub fn should_notify(severity: Severity) -> bool {
        severity >= Severity::High
    }

    /// Message blocking threshold.
    pub fn should_block(severity: Severity) -> bool {
        severity >= Severity::High
    }

    /// Combine per-detector severities into one assessment.
    pub fn combine(inputs: &BTreeMap<String, Severity>) -> CombinedAssessment {
        let overall = Self::highest(inputs.values().copied());
        CombinedAssessment {
            overall,
            notify_parent: Self::should_notify(overall),
            block: Self::should_block(overall),
            description: Self::describe(overall).to_string(),
        }
    }

    /// Recommended handling for a combined severity.
    pub fn action_for(severity: Severity) -> RecommendedAction {
        match severity {
            Severity::None => RecommendedAction::Allow,
            Severity::Low => RecommendedAction::FilterAndEducate,
            Severity::Medium => RecommendedAction::SupportiveResponse,
            Severity::High => RecommendedAction::BlockWithEducation,
            Severity::Critical => RecommendedAction::CrisisResponse,
        }
    }

    fn describe(severity: Severity) -> &'static str {
        match severity {
            Severity::None => "no safety concerns",
            Severity::Low => "minor language concern, message allowed",
            Severity::Medium => "moderate concern, supportive handling",
            Severity::High => "serious concern, message blocked and guardian notified",
            Severity::Critical => "crisis signal, immediate support response and guardian notified",
        }
    }
}
