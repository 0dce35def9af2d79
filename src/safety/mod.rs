// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Layered message-safety pipeline: keyword catalogs, detectors, severity
//! scoring, and the orchestrating filter.

pub mod bullying;
pub mod catalog;
pub mod crisis;
pub mod filter;
pub mod profanity;
pub mod requests;
pub mod responses;
pub mod scorer;
pub mod types;
pub mod violations;

pub use bullying::{BullyingCategory, BullyingDetector, BullyingReport};
pub use catalog::{CatalogError, CatalogStats, SafetyCatalogs};
pub use crisis::{CrisisCategory, CrisisDetector, CrisisReport};
pub use filter::{FilterConfig, SafetyFilter, ServiceStats};
pub use profanity::{ProfanityAction, ProfanityDetector, ProfanityReport, ProfanityTier};
pub use requests::{DisallowedRequestDetector, RequestCategory, RequestReport};
pub use scorer::{CombinedAssessment, RecommendedAction, SeverityScorer};
pub use types::{
    DetectionSignal, DetectorReport, ModerationAction, SafetyError, SafetyFlag, Severity, Verdict,
};
pub use violations::{MemoryViolationStore, ViolationState, ViolationStore};
