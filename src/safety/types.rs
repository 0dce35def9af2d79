// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core vocabulary for the safety filtering pipeline: severity scale,
//! moderation actions, verdict flags, and the verdict itself.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::safety::bullying::BullyingReport;
use crate::safety::crisis::CrisisReport;
use crate::safety::profanity::ProfanityReport;
use crate::safety::requests::RequestReport;

/// Unified severity scale every detector output is normalized onto.
/// Totally ordered: `None < Low < Medium < High < Critical`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = SafetyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Severity::None),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(SafetyError::InvalidSeverity(other.to_string())),
        }
    }
}

/// Action the caller must take for a checked message. This is the verdict
/// vocabulary consumed by existing callers; serialized names are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationAction {
    Allow,
    GentleEducate,
    Educate,
    WarnAndLimit,
    BlockAndEducate,
    SupportiveResponse,
    CrisisResponse,
}

impl ModerationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationAction::Allow => "allow",
            ModerationAction::GentleEducate => "gentle_educate",
            ModerationAction::Educate => "educate",
            ModerationAction::WarnAndLimit => "warn_and_limit",
            ModerationAction::BlockAndEducate => "block_and_educate",
            ModerationAction::SupportiveResponse => "supportive_response",
            ModerationAction::CrisisResponse => "crisis_response",
        }
    }
}

impl fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concern category raised on a verdict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SafetyFlag {
    Crisis,
    Abuse,
    InappropriateRequest,
    Profanity,
    Bullying,
}

impl SafetyFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafetyFlag::Crisis => "crisis",
            SafetyFlag::Abuse => "abuse",
            SafetyFlag::InappropriateRequest => "inappropriate_request",
            SafetyFlag::Profanity => "profanity",
            SafetyFlag::Bullying => "bullying",
        }
    }
}

impl fmt::Display for SafetyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafetyFlag {
    type Err = SafetyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crisis" => Ok(SafetyFlag::Crisis),
            "abuse" => Ok(SafetyFlag::Abuse),
            "inappropriate_request" => Ok(SafetyFlag::InappropriateRequest),
            "profanity" => Ok(SafetyFlag::Profanity),
            "bullying" => Ok(SafetyFlag::Bullying),
            other => Err(SafetyError::InvalidCategory(other.to_string())),
        }
    }
}

/// Normalized output of a single detector for one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionSignal {
    pub category: String,
    pub severity: Severity,
    pub matched_terms: Vec<String>,
    pub detector_name: String,
}

/// Per-detector rich record attached to a verdict's `details` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetectorReport {
    Crisis(CrisisReport),
    Request(RequestReport),
    Profanity(ProfanityReport),
    Bullying(BullyingReport),
}

/// The pipeline's sole output for one checked message. Constructed once per
/// call and never mutated after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub safe: bool,
    pub flags: BTreeSet<SafetyFlag>,
    pub severity: Severity,
    pub action: ModerationAction,
    pub response_message: String,
    pub notify_parent: bool,
    pub details: BTreeMap<String, DetectorReport>,
}

impl Verdict {
    /// Verdict for a message with no matches from any detector.
    pub fn clean() -> Self {
        Self {
            safe: true,
            flags: BTreeSet::new(),
            severity: Severity::None,
            action: ModerationAction::Allow,
            response_message: String::new(),
            notify_parent: false,
            details: BTreeMap::new(),
        }
    }

    /// Serialize the verdict to JSON bytes for caller-side audit logging.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// Boundary validation errors for caller-supplied severity/category names.
#[derive(Debug, Error)]
pub enum SafetyError {
    #[error("Invalid severity: {0}")]
    InvalidSeverity(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
}
