// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for catalog loading and the externalized keyword lists

use std::io::Write;

use companion_guard::safety::catalog::{CatalogError, SafetyCatalogs};
use companion_guard::safety::filter::{FilterConfig, SafetyFilter};
use companion_guard::safety::types::ModerationAction;

#[test]
fn test_load_catalogs_from_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[profanity]
severe = ["broccoli"]

[bullying]
verbal = ["being weird to me"]
"#
    )
    .unwrap();

    let catalogs = SafetyCatalogs::from_toml_path(file.path()).unwrap();
    assert_eq!(catalogs.profanity.severe, vec!["broccoli".to_string()]);
    assert_eq!(catalogs.bullying.verbal, vec!["being weird to me".to_string()]);
    // Sections not present in the file keep built-in defaults
    assert!(!catalogs.crisis.suicide.is_empty());
    assert!(!catalogs.requests.illegal.is_empty());
}

#[test]
fn test_loaded_catalog_drives_detection() {
    let catalogs = SafetyCatalogs::from_toml_str(
        r#"
[profanity]
severe = ["broccoli"]
"#,
    )
    .unwrap();
    let filter = SafetyFilter::new(catalogs, FilterConfig::default()).unwrap();
    let verdict = filter.check_message("I hate broccoli", Some("kid-1"));
    assert!(!verdict.safe);
    assert_eq!(verdict.action, ModerationAction::BlockAndEducate);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = SafetyCatalogs::from_toml_path("/nonexistent/catalogs.toml").unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn test_invalid_request_pattern_is_reported() {
    let catalogs = SafetyCatalogs::from_toml_str(
        r#"
[requests]
violence = ["how to ((("]
"#,
    )
    .unwrap();
    let err = SafetyFilter::new(catalogs, FilterConfig::default()).unwrap_err();
    match err {
        CatalogError::Pattern { category, .. } => assert_eq!(category, "violence"),
        other => panic!("expected pattern error, got {other:?}"),
    }
}

#[test]
fn test_stats_reflect_loaded_lists() {
    let catalogs = SafetyCatalogs::from_toml_str(
        r#"
[profanity]
mild = ["shoot", "dangit"]
"#,
    )
    .unwrap();
    let stats = catalogs.stats();
    assert_eq!(stats.profanity_terms["mild"], 2);
    assert_eq!(stats.crisis_terms.len(), 5);
    assert_eq!(stats.request_patterns.len(), 7);
}
