// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod safety;

// Re-export main types for callers
pub use safety::{
    CatalogError, CatalogStats, DetectionSignal, DetectorReport, FilterConfig,
    MemoryViolationStore, ModerationAction, SafetyCatalogs, SafetyError, SafetyFilter, SafetyFlag,
    ServiceStats, Severity, SeverityScorer, Verdict, ViolationStore,
};
