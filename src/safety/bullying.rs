// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bullying detector: six category phrase lists, handled supportively.
//!
//! Bullying reports are never blocked; the pipeline answers with a
//! supportive response at `Medium` severity. Stateless.

use serde::{Deserialize, Serialize};

use crate::safety::catalog::BullyingCatalog;
use crate::safety::types::{DetectionSignal, Severity};

pub const BULLYING_DETECTOR_NAME: &str = "bullying_detector";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BullyingCategory {
    Threats,
    Physical,
    Cyberbullying,
    Verbal,
    SocialExclusion,
    EmotionalImpact,
}

/// Primary-category resolution order.
const PRIMARY_PRECEDENCE: &[BullyingCategory] = &[
    BullyingCategory::Threats,
    BullyingCategory::Physical,
    BullyingCategory::Cyberbullying,
    BullyingCategory::Verbal,
    BullyingCategory::SocialExclusion,
    BullyingCategory::EmotionalImpact,
];

impl BullyingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BullyingCategory::Threats => "threats",
            BullyingCategory::Physical => "physical",
            BullyingCategory::Cyberbullying => "cyberbullying",
            BullyingCategory::Verbal => "verbal",
            BullyingCategory::SocialExclusion => "social_exclusion",
            BullyingCategory::EmotionalImpact => "emotional_impact",
        }
    }
}

/// Full bullying scan result for one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BullyingReport {
    pub categories: Vec<BullyingCategory>,
    pub primary: BullyingCategory,
    pub matched_terms: Vec<String>,
    pub severity: Severity,
}

impl BullyingReport {
    pub fn to_signal(&self) -> DetectionSignal {
        DetectionSignal {
            category: self.primary.as_str().to_string(),
            severity: self.severity,
            matched_terms: self.matched_terms.clone(),
            detector_name: BULLYING_DETECTOR_NAME.to_string(),
        }
    }
}

pub struct BullyingDetector {
    catalog: BullyingCatalog,
}

impl BullyingDetector {
    pub fn new(catalog: BullyingCatalog) -> Self {
        Self { catalog }
    }

    /// Scan a message for bullying phrases across all six categories.
    pub fn scan(&self, text: &str) -> Option<BullyingReport> {
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

        Some(BullyingReport {
            categories,
            primary,
            matched_terms,
            severity: Severity::Medium,
        })
    }

    fn category_lists(&self) -> [(BullyingCategory, &Vec<String>); 6] {
        [
            (BullyingCategory::Threats, &self.catalog.threats),
            (BullyingCategory::Physical, &self.catalog.physical),
            (BullyingCategory::Cyberbullying, &self.catalog.cyberbullying),
            (BullyingCategory::Verbal, &self.catalog.verbal),
            (BullyingCategory::SocialExclusion, &self.catalog.social_exclusion),
            (BullyingCategory::EmotionalImpact, &self.catalog.emotional_impact),
        ]
    }
}
