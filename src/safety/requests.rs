// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Disallowed-request detector: pattern-categorized matching for requests
//! the companion must refuse (violence, sexual content, illegal activity,
//! manipulation, safety-bypass attempts, harmful advice, personal-info
//! solicitation).

use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};

use crate::safety::catalog::{CatalogError, RequestCatalog};
use crate::safety::types::{DetectionSignal, ModerationAction, Severity};

pub const REQUEST_DETECTOR_NAME: &str = "request_detector";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestCategory {
    Violence,
    Sexual,
    Illegal,
    Manipulation,
    SafetyBypass,
    HarmfulAdvice,
    PersonalInfo,
}

/// Per-category severity weights.
const CATEGORY_WEIGHTS: &[(RequestCategory, Severity)] = &[
    (RequestCategory::Sexual, Severity::Critical),
    (RequestCategory::Violence, Severity::High),
    (RequestCategory::Illegal, Severity::High),
    (RequestCategory::SafetyBypass, Severity::High),
    (RequestCategory::HarmfulAdvice, Severity::High),
    (RequestCategory::Manipulation, Severity::Medium),
    (RequestCategory::PersonalInfo, Severity::Medium),
];

/// Categories that warrant guardian notification even at medium severity.
const ALWAYS_CONCERNING: &[RequestCategory] = &[
    RequestCategory::Violence,
    RequestCategory::Sexual,
    RequestCategory::HarmfulAdvice,
];

impl RequestCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestCategory::Violence => "violence",
            RequestCategory::Sexual => "sexual",
            RequestCategory::Illegal => "illegal",
            RequestCategory::Manipulation => "manipulation",
            RequestCategory::SafetyBypass => "safety_bypass",
            RequestCategory::HarmfulAdvice => "harmful_advice",
            RequestCategory::PersonalInfo => "personal_info",
        }
    }

    pub fn weight(&self) -> Severity {
        CATEGORY_WEIGHTS
            .iter()
            .find(|(c, _)| c == self)
            .map(|(_, s)| *s)
            .unwrap_or(Severity::None)
    }
}

/// Full disallowed-request scan result for one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestReport {
    pub categories: Vec<RequestCategory>,
    pub matched_patterns: Vec<String>,
    pub severity: Severity,
    pub action: ModerationAction,
    pub notify_parent: bool,
}

impl RequestReport {
    pub fn to_signal(&self) -> DetectionSignal {
        DetectionSignal {
            category: self
                .categories
                .first()
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            severity: self.severity,
            matched_terms: self.matched_patterns.clone(),
            detector_name: REQUEST_DETECTOR_NAME.to_string(),
        }
    }
}

struct CategoryRule {
    category: RequestCategory,
    set: RegexSet,
    patterns: Vec<Regex>,
}

pub struct DisallowedRequestDetector {
    rules: Vec<CategoryRule>,
}

impl DisallowedRequestDetector {
    pub fn new(catalog: &RequestCatalog) -> Result<Self, CatalogError> {
        let rules = vec![
            compile_rule(RequestCategory::Violence, &catalog.violence)?,
            compile_rule(RequestCategory::Sexual, &catalog.sexual)?,
            compile_rule(RequestCategory::Illegal, &catalog.illegal)?,
            compile_rule(RequestCategory::Manipulation, &catalog.manipulation)?,
            compile_rule(RequestCategory::SafetyBypass, &catalog.safety_bypass)?,
            compile_rule(RequestCategory::HarmfulAdvice, &catalog.harmful_advice)?,
            compile_rule(RequestCategory::PersonalInfo, &catalog.personal_info)?,
        ];
        Ok(Self { rules })
    }

    /// Scan a message against every category's pattern set. The action and
    /// notification flag derive purely from the maximum matched severity
    /// and the always-concerning category rule.
    pub fn scan(&self, text: &str) -> Option<RequestReport> {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        let mut categories = Vec::new();
        let mut matched_patterns = Vec::new();
        for rule in &self.rules {
            if !rule.set.is_match(&normalized) {
                continue;
            }
            categories.push(rule.category);
            for regex in &rule.patterns {
                if let Some(m) = regex.find(&normalized) {
                    matched_patterns.push(m.as_str().to_string());
                }
            }
        }

        if categories.is_empty() {
            return None;
        }

        let severity = categories
            .iter()
            .map(|c| c.weight())
            .max()
            .unwrap_or(Severity::None);
        let action = if severity >= Severity::High {
            ModerationAction::BlockAndEducate
        } else {
            ModerationAction::Educate
        };
        let notify_parent = Self::should_notify(severity, &categories);

        Some(RequestReport {
            categories,
            matched_patterns,
            severity,
            action,
            notify_parent,
        })
    }

    /// Guardian notification rule: high and critical always notify; medium
    /// notifies only when an always-concerning category matched.
    fn should_notify(severity: Severity, categories: &[RequestCategory]) -> bool {
        if severity >= Severity::High {
            return true;
        }
        severity == Severity::Medium
            && categories.iter().any(|c| ALWAYS_CONCERNING.contains(c))
    }
}

fn compile_rule(
    category: RequestCategory,
    patterns: &[String],
) -> Result<CategoryRule, CatalogError> {
    let set = RegexSet::new(patterns).map_err(|source| CatalogError::Pattern {
        category: category.as_str().to_string(),
        source,
    })?;
    let patterns = patterns
        .iter()
        .map(|p| Regex::new(p))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| CatalogError::Pattern {
            category: category.as_str().to_string(),
            source,
        })?;
    Ok(CategoryRule {
        category,
        set,
        patterns,
    })
}
