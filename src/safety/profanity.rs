// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Profanity detector: tiered word matching, per-user escalation, and
//! censoring.
//!
//! Catalog entries are plain words; each is expanded into a pattern that
//! tolerates common leetspeak substitutions and, for longer words, short
//! separator padding ("d a m n"). The matched tiers combine with the user's
//! violation counter to pick the recommended action.

use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::safety::catalog::{CatalogError, ProfanityCatalog};
use crate::safety::types::{DetectionSignal, ModerationAction, Severity};
use crate::safety::violations::ViolationStore;

pub const PROFANITY_DETECTOR_NAME: &str = "profanity_detector";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfanityTier {
    Mild,
    Moderate,
    Severe,
}

impl ProfanityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfanityTier::Mild => "mild",
            ProfanityTier::Moderate => "moderate",
            ProfanityTier::Severe => "severe",
        }
    }
}

/// Detector-level action vocabulary. Richer than the verdict vocabulary:
/// `gentle_reminder` (mild language past the reminder threshold) surfaces
/// in the verdict as `gentle_educate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfanityAction {
    Allow,
    GentleEducate,
    GentleReminder,
    Educate,
    WarnAndLimit,
    BlockAndEducate,
}

impl ProfanityAction {
    /// Map onto the fixed verdict vocabulary.
    pub fn verdict_action(&self) -> ModerationAction {
        match self {
            ProfanityAction::Allow => ModerationAction::Allow,
            ProfanityAction::GentleEducate | ProfanityAction::GentleReminder => {
                ModerationAction::GentleEducate
            }
            ProfanityAction::Educate => ModerationAction::Educate,
            ProfanityAction::WarnAndLimit => ModerationAction::WarnAndLimit,
            ProfanityAction::BlockAndEducate => ModerationAction::BlockAndEducate,
        }
    }
}

/// Full profanity scan result for one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfanityReport {
    pub tier: ProfanityTier,
    pub matched_words: Vec<String>,
    pub censored_text: String,
    pub violation_count: u32,
    pub action: ProfanityAction,
    pub allow_message: bool,
    pub severity: Severity,
}

impl ProfanityReport {
    pub fn to_signal(&self) -> DetectionSignal {
        DetectionSignal {
            category: format!("profanity_{}", self.tier.as_str()),
            severity: self.severity,
            matched_terms: self.matched_words.clone(),
            detector_name: PROFANITY_DETECTOR_NAME.to_string(),
        }
    }
}

struct TierMatcher {
    tier: ProfanityTier,
    pattern: Regex,
}

pub struct ProfanityDetector {
    // Ordered severe-first so the governing tier is found first
    tiers: Vec<TierMatcher>,
    store: Arc<dyn ViolationStore>,
    mask: String,
    moderate_warn_threshold: u32,
    mild_reminder_threshold: u32,
}

impl ProfanityDetector {
    pub fn new(
        catalog: &ProfanityCatalog,
        store: Arc<dyn ViolationStore>,
        mask: String,
        moderate_warn_threshold: u32,
        mild_reminder_threshold: u32,
    ) -> Result<Self, CatalogError> {
        let tiers = vec![
            TierMatcher {
                tier: ProfanityTier::Severe,
                pattern: compile_tier("severe", &catalog.severe)?,
            },
            TierMatcher {
                tier: ProfanityTier::Moderate,
                pattern: compile_tier("moderate", &catalog.moderate)?,
            },
            TierMatcher {
                tier: ProfanityTier::Mild,
                pattern: compile_tier("mild", &catalog.mild)?,
            },
        ];
        Ok(Self {
            tiers,
            store,
            mask,
            moderate_warn_threshold,
            mild_reminder_threshold,
        })
    }

    /// Scan a message. Records matches against the user's violation counter
    /// (when a user id is supplied) and returns the matched tier, words, a
    /// censored copy of the input, and the recommended action.
    pub fn scan(&self, text: &str, user_id: Option<&str>) -> Option<ProfanityReport> {
        let mut governing_tier: Option<ProfanityTier> = None;
        let mut matched_words = Vec::new();
        for matcher in &self.tiers {
            let mut hit = false;
            for m in matcher.pattern.find_iter(text) {
                hit = true;
                matched_words.push(m.as_str().to_lowercase());
            }
            if hit && governing_tier.is_none() {
                governing_tier = Some(matcher.tier);
            }
        }
        let tier = governing_tier?;

        let count = match user_id {
            Some(uid) => self.store.record(uid, matched_words.len() as u32),
            None => 0,
        };

        let (action, allow_message, severity) = self.resolve(tier, count);
        let censored_text = self.censor(text);

        Some(ProfanityReport {
            tier,
            matched_words,
            censored_text,
            violation_count: count,
            action,
            allow_message,
            severity,
        })
    }

    /// Replace every matched term with the mask, leaving surrounding text
    /// untouched.
    pub fn censor(&self, text: &str) -> String {
        let mut censored = text.to_string();
        for matcher in &self.tiers {
            censored = matcher
                .pattern
                .replace_all(&censored, regex::NoExpand(self.mask.as_str()))
                .into_owned();
        }
        censored
    }

    /// Action table: tier combined with the post-increment counter.
    fn resolve(&self, tier: ProfanityTier, count: u32) -> (ProfanityAction, bool, Severity) {
        match tier {
            // Severe language blocks unconditionally; the counter is not
            // consulted.
            ProfanityTier::Severe => (ProfanityAction::BlockAndEducate, false, Severity::High),
            ProfanityTier::Moderate => {
                if count >= self.moderate_warn_threshold {
                    (ProfanityAction::WarnAndLimit, false, Severity::High)
                } else {
                    (ProfanityAction::Educate, true, Severity::Medium)
                }
            }
            ProfanityTier::Mild => {
                if count >= self.mild_reminder_threshold {
                    (ProfanityAction::GentleReminder, true, Severity::Low)
                } else {
                    (ProfanityAction::GentleEducate, true, Severity::Low)
                }
            }
        }
    }
}

fn compile_tier(tier_name: &str, entries: &[String]) -> Result<Regex, CatalogError> {
    let alternatives: Vec<String> = entries
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| variant_pattern(w))
        .collect();
    if alternatives.is_empty() {
        // A tier with no entries matches nothing
        return Regex::new(r"[^\s\S]").map_err(|source| CatalogError::Pattern {
            category: format!("profanity_{}", tier_name),
            source,
        });
    }
    let pattern = format!("(?i)({})", alternatives.join("|"));
    Regex::new(&pattern).map_err(|source| CatalogError::Pattern {
        category: format!("profanity_{}", tier_name),
        source,
    })
}

/// Expand a catalog word into an obfuscation-tolerant pattern: leetspeak
/// character classes, plus short separator padding for words of four or
/// more characters. Edge characters only substitute to word characters so
/// the `\b` anchors stay valid.
fn variant_pattern(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let pad = chars.len() >= 4;
    let mut pattern = String::from(r"\b");
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && pad {
            pattern.push_str(r"[\s\.\*\-_]{0,2}");
        }
        let edge = i == 0 || i == chars.len() - 1;
        pattern.push_str(&leet_class(*ch, edge));
    }
    pattern.push_str(r"\b");
    pattern
}

fn leet_class(ch: char, edge: bool) -> String {
    let class = match ch {
        'a' => {
            if edge {
                "[a4]"
            } else {
                r"[a@4\*]"
            }
        }
        'b' => "[b8]",
        'e' => {
            if edge {
                "[e3]"
            } else {
                r"[e3\*]"
            }
        }
        'g' => "[g9]",
        'i' => {
            if edge {
                "[i1]"
            } else {
                r"[i1!\*]"
            }
        }
        'l' => "[l1]",
        'o' => {
            if edge {
                "[o0]"
            } else {
                r"[o0\*]"
            }
        }
        's' => {
            if edge {
                "[s5z]"
            } else {
                r"[s\$5z]"
            }
        }
        't' => "[t7]",
        'u' => {
            if edge {
                "[uv]"
            } else {
                r"[uv\*]"
            }
        }
        c if c.is_ascii_alphanumeric() => return c.to_string(),
        c => return regex::escape(&c.to_string()),
    };
    class.to_string()
}
