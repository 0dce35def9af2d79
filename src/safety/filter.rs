// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Safety filter orchestrator.
//!
//! Runs the detectors in a fixed priority order over each message and
//! reconciles their signals into a single verdict. The order is a
//! declarative stage table; crisis and disallowed-request hits are
//! terminal, profanity and bullying signals can coexist on one verdict.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::safety::bullying::{BullyingDetector, BULLYING_DETECTOR_NAME};
use crate::safety::catalog::{CatalogError, CatalogStats, SafetyCatalogs};
use crate::safety::crisis::{CrisisDetector, CRISIS_DETECTOR_NAME};
use crate::safety::profanity::{ProfanityDetector, PROFANITY_DETECTOR_NAME};
use crate::safety::requests::{DisallowedRequestDetector, REQUEST_DETECTOR_NAME};
use crate::safety::responses;
use crate::safety::scorer::SeverityScorer;
use crate::safety::types::{DetectorReport, ModerationAction, SafetyFlag, Severity, Verdict};
use crate::safety::violations::{MemoryViolationStore, ViolationStore};

/// Tunables for the safety filter. Defaults match production behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Replacement mask for censored terms.
    pub mask: String,
    /// Moderate-tier violation count at which messages start being blocked.
    pub moderate_warn_threshold: u32,
    /// Mild-tier violation count at which the reminder wording kicks in.
    pub mild_reminder_threshold: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            mask: "****".to_string(),
            moderate_warn_threshold: 3,
            mild_reminder_threshold: 6,
        }
    }
}

/// Diagnostic snapshot: catalog sizes per category plus tracked users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStats {
    pub catalogs: CatalogStats,
    pub tracked_users: usize,
}

/// Working state threaded through the pipeline stages for one message.
struct VerdictDraft {
    flags: BTreeSet<SafetyFlag>,
    severity: Severity,
    action: Option<ModerationAction>,
    response_message: Option<String>,
    notify_parent: bool,
    details: BTreeMap<String, DetectorReport>,
}

impl VerdictDraft {
    fn new() -> Self {
        Self {
            flags: BTreeSet::new(),
            severity: Severity::None,
            action: None,
            response_message: None,
            notify_parent: false,
            details: BTreeMap::new(),
        }
    }

    fn finish(self) -> Verdict {
        let safe = self.flags.is_empty();
        Verdict {
            safe,
            flags: self.flags,
            severity: self.severity,
            action: self.action.unwrap_or(ModerationAction::Allow),
            response_message: self.response_message.unwrap_or_default(),
            notify_parent: self.notify_parent,
            details: self.details,
        }
    }
}

/// Whether a stage fixed the verdict or the pipeline continues.
enum StageControl {
    Continue,
    Halt,
}

type StageFn = fn(&SafetyFilter, &str, Option<&str>, &mut VerdictDraft) -> StageControl;

/// Detector evaluation order. Earlier stages outrank later ones; a `Halt`
/// freezes the verdict against everything downstream.
const PIPELINE: &[(&str, StageFn)] = &[
    ("crisis", SafetyFilter::stage_crisis),
    ("disallowed_request", SafetyFilter::stage_requests),
    ("profanity", SafetyFilter::stage_profanity),
    ("bullying", SafetyFilter::stage_bullying),
];

pub struct SafetyFilter {
    crisis: CrisisDetector,
    requests: DisallowedRequestDetector,
    profanity: ProfanityDetector,
    bullying: BullyingDetector,
    store: Arc<dyn ViolationStore>,
    catalog_stats: CatalogStats,
}

impl fmt::Debug for SafetyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SafetyFilter")
            .field("catalog_stats", &self.catalog_stats)
            .finish_non_exhaustive()
    }
}

impl SafetyFilter {
    /// Build a filter over the given catalogs with a fresh in-memory
    /// violation store.
    pub fn new(catalogs: SafetyCatalogs, config: FilterConfig) -> Result<Self, CatalogError> {
        Self::with_store(catalogs, config, Arc::new(MemoryViolationStore::new()))
    }

    /// Build a filter with an injected violation store.
    pub fn with_store(
        catalogs: SafetyCatalogs,
        config: FilterConfig,
        store: Arc<dyn ViolationStore>,
    ) -> Result<Self, CatalogError> {
        let catalog_stats = catalogs.stats();
        let profanity = ProfanityDetector::new(
            &catalogs.profanity,
            Arc::clone(&store),
            config.mask.clone(),
            config.moderate_warn_threshold,
            config.mild_reminder_threshold,
        )?;
        let requests = DisallowedRequestDetector::new(&catalogs.requests)?;
        Ok(Self {
            crisis: CrisisDetector::new(catalogs.crisis),
            requests,
            profanity,
            bullying: BullyingDetector::new(catalogs.bullying),
            store,
            catalog_stats,
        })
    }

    /// Check one message and return the verdict. Never fails on text input;
    /// text with no catalog matches comes back `safe=true`.
    pub fn check_message(&self, text: &str, user_id: Option<&str>) -> Verdict {
        let mut draft = VerdictDraft::new();
        for (name, stage) in PIPELINE {
            match stage(self, text, user_id, &mut draft) {
                StageControl::Halt => {
                    debug!(stage = name, "safety pipeline short-circuited");
                    break;
                }
                StageControl::Continue => {}
            }
        }
        draft.finish()
    }

    /// Administrative: clear a user's profanity escalation state.
    pub fn reset_user_violations(&self, user_id: &str) {
        debug!(user_id, "resetting violation state");
        self.store.reset(user_id);
    }

    /// Diagnostic catalog sizes and tracked-user count.
    pub fn service_stats(&self) -> ServiceStats {
        ServiceStats {
            catalogs: self.catalog_stats.clone(),
            tracked_users: self.store.tracked_users(),
        }
    }

    fn stage_crisis(
        &self,
        text: &str,
        user_id: Option<&str>,
        draft: &mut VerdictDraft,
    ) -> StageControl {
        let report = match self.crisis.scan(text) {
            Some(r) => r,
            None => return StageControl::Continue,
        };
        warn!(
            user_id = user_id.unwrap_or("anonymous"),
            category = report.primary.as_str(),
            "crisis signal detected"
        );
        let flag = if report.primary.is_abuse() {
            SafetyFlag::Abuse
        } else {
            SafetyFlag::Crisis
        };
        draft.flags.insert(flag);
        draft.severity = report.severity;
        draft.action = Some(ModerationAction::CrisisResponse);
        draft.notify_parent = true;
        draft.response_message = Some(responses::crisis_response(report.primary).to_string());
        draft
            .details
            .insert(CRISIS_DETECTOR_NAME.to_string(), DetectorReport::Crisis(report));
        StageControl::Halt
    }

    fn stage_requests(
        &self,
        text: &str,
        user_id: Option<&str>,
        draft: &mut VerdictDraft,
    ) -> StageControl {
        let report = match self.requests.scan(text) {
            Some(r) => r,
            None => return StageControl::Continue,
        };
        warn!(
            user_id = user_id.unwrap_or("anonymous"),
            categories = ?report.categories,
            severity = report.severity.as_str(),
            "disallowed request detected"
        );
        draft.flags.insert(SafetyFlag::InappropriateRequest);
        draft.severity = report.severity;
        draft.action = Some(report.action);
        draft.notify_parent = report.notify_parent;
        let primary = report.categories[0];
        draft.response_message = Some(responses::request_response(primary).to_string());
        draft
            .details
            .insert(REQUEST_DETECTOR_NAME.to_string(), DetectorReport::Request(report));
        StageControl::Halt
    }

    fn stage_profanity(
        &self,
        text: &str,
        user_id: Option<&str>,
        draft: &mut VerdictDraft,
    ) -> StageControl {
        let report = match self.profanity.scan(text, user_id) {
            Some(r) => r,
            None => return StageControl::Continue,
        };
        debug!(
            user_id = user_id.unwrap_or("anonymous"),
            tier = report.tier.as_str(),
            violations = report.violation_count,
            "profanity detected"
        );
        draft.flags.insert(SafetyFlag::Profanity);
        draft.severity = draft.severity.max(report.severity);
        draft.action = Some(report.action.verdict_action());
        draft.notify_parent = SeverityScorer::should_notify(report.severity);
        draft.response_message = Some(responses::profanity_response(report.action).to_string());
        draft.details.insert(
            PROFANITY_DETECTOR_NAME.to_string(),
            DetectorReport::Profanity(report),
        );
        StageControl::Continue
    }

    fn stage_bullying(
        &self,
        text: &str,
        user_id: Option<&str>,
        draft: &mut VerdictDraft,
    ) -> StageControl {
        let report = match self.bullying.scan(text) {
            Some(r) => r,
            None => return StageControl::Continue,
        };
        debug!(
            user_id = user_id.unwrap_or("anonymous"),
            category = report.primary.as_str(),
            "bullying language detected"
        );
        draft.flags.insert(SafetyFlag::Bullying);
        draft.severity = draft.severity.max(report.severity);
        // Profanity outranks bullying for the verdict action and response;
        // fill them only when nothing upstream set them.
        if draft.action.is_none() {
            draft.action = Some(ModerationAction::SupportiveResponse);
        }
        if draft.response_message.is_none() {
            draft.response_message = Some(responses::bullying_response(report.primary).to_string());
        }
        draft.details.insert(
            BULLYING_DETECTOR_NAME.to_string(),
            DetectorReport::Bullying(report),
        );
        StageControl::Continue
    }
}
