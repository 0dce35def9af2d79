// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crisis detector: suicide, self-harm, and abuse phrase matching.
//!
//! Highest-priority detector in the pipeline. Any match is `Critical` and
//! short-circuits everything downstream. Stateless; purely a function of
//! the current message.

use serde::{Deserialize, Serialize};

use crate::safety::catalog::CrisisCatalog;
use crate::safety::types::{DetectionSignal, Severity};

pub const CRISIS_DETECTOR_NAME: &str = "crisis_detector";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisCategory {
    Suicide,
    SelfHarm,
    AbuseSexual,
    AbusePhysical,
    AbuseEmotional,
}

/// Primary-category resolution order. Sexual abuse outranks physical and
/// emotional because it carries distinct resource messaging.
const PRIMARY_PRECEDENCE: &[CrisisCategory] = &[
    CrisisCategory::Suicide,
    CrisisCategory::SelfHarm,
    CrisisCategory::AbuseSexual,
    CrisisCategory::AbusePhysical,
    CrisisCategory::AbuseEmotional,
];

impl CrisisCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisCategory::Suicide => "suicide",
            CrisisCategory::SelfHarm => "self_harm",
            CrisisCategory::AbuseSexual => "abuse_sexual",
            CrisisCategory::AbusePhysical => "abuse_physical",
            CrisisCategory::AbuseEmotional => "abuse_emotional",
        }
    }

    /// Whether this category is one of the abuse categories (as opposed to
    /// suicide/self-harm, which flag as `crisis`).
    pub fn is_abuse(&self) -> bool {
        matches!(
            self,
            CrisisCategory::AbuseSexual
                | CrisisCategory::AbusePhysical
                | CrisisCategory::AbuseEmotional
        )
    }
}

/// Full crisis scan result for one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisReport {
    pub categories: Vec<CrisisCategory>,
    pub primary: CrisisCategory,
    pub matched_terms: Vec<String>,
    pub severity: Severity,
}

impl CrisisReport {
    pub fn to_signal(&self) -> DetectionSignal {
        DetectionSignal {
            category: self.primary.as_str().to_string(),
            severity: self.severity,
            matched_terms: self.matched_terms.clone(),
            detector_name: CRISIS_DETECTOR_NAME.to_string(),
        }
    }
}

pub struct CrisisDetector {
    catalog: CrisisCatalog,
}

impl CrisisDetector {
    pub fn new(catalog: CrisisCatalog) -> Self {
        Self { catalog }
    }

    /// Scan a message for crisis phrases. Returns `None` when nothing
    /// matches; otherwise every matched category, the matched terms, and
    /// the primary category per the fixed precedence order.
    pub fn scan(&self, text: &str) -> Option<CrisisReport> {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        let mut categories = Vec::new();
        let mut matched_terms = Vec::new();
        for (category, phrases) in self.category_lists() {
            let mut hit = false;
            for phrase in phrases {
                if !phrase.is_empty() && normalized.contains(phrase.as_str()) {
                    hit = true;
                    matched_terms.push(phrase.clone());
                }
            }
            if hit {
                categories.push(category);
            }
        }

        if categories.is_empty() {
            return None;
        }

        let primary = PRIMARY_PRECEDENCE
            .iter()
            .copied()
            .find(|c| categories.contains(c))
            .unwrap_or(categories[0]);

        Some(CrisisReport {
            categories,
            primary,
            matched_terms,
            severity: Severity::Critical,
        })
    }

    fn category_lists(&self) -> [(CrisisCategory, &Vec<String>); 5] {
        [
            (CrisisCategory::Suicide, &self.catalog.suicide),
            (CrisisCategory::SelfHarm, &self.catalog.self_harm),
            (CrisisCategory::AbuseSexual, &self.catalog.abuse_sexual),
            (CrisisCategory::AbusePhysical, &self.catalog.abuse_physical),
            (CrisisCategory::AbuseEmotional, &self.catalog.abuse_emotional),
        ]
    }
}
