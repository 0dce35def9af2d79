// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-user profanity violation state.
//!
//! The store is an explicit trait so tests can inject their own and so the
//! escalation state never lives in a module-level singleton. The in-memory
//! implementation serializes read-increment-write per call under one map
//! lock; counters for different users never interact.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Escalation state for one user: a monotonically non-decreasing counter
/// plus the timestamp of the most recent violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationState {
    pub count: u32,
    pub last_violation: DateTime<Utc>,
}

/// Store of per-user violation counters. Owned exclusively by the profanity
/// detector; no other component mutates it.
pub trait ViolationStore: Send + Sync {
    /// Add `matches` violations for the user and return the updated count.
    /// The read-increment-write must be atomic with respect to concurrent
    /// calls for the same user.
    fn record(&self, user_id: &str, matches: u32) -> u32;

    /// Current count for the user; 0 for users never seen.
    fn count(&self, user_id: &str) -> u32;

    /// Clear the user's escalation state.
    fn reset(&self, user_id: &str);

    /// Number of users with recorded state.
    fn tracked_users(&self) -> usize;
}

/// Process-lifetime in-memory store.
pub struct MemoryViolationStore {
    states: RwLock<HashMap<String, ViolationState>>,
}

impl MemoryViolationStore {
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot of one user's state, if any.
    pub fn state(&self, user_id: &str) -> Option<ViolationState> {
        let states = self.states.read().unwrap();
        states.get(user_id).cloned()
    }
}

impl Default for MemoryViolationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViolationStore for MemoryViolationStore {
    fn record(&self, user_id: &str, matches: u32) -> u32 {
        if matches == 0 {
            return self.count(user_id);
        }
        let mut states = self.states.write().unwrap();
        let state = states
            .entry(user_id.to_string())
            .or_insert_with(|| ViolationState {
                count: 0,
                last_violation: Utc::now(),
            });
        state.count += matches;
        state.last_violation = Utc::now();
        state.count
    }

    fn count(&self, user_id: &str) -> u32 {
        let states = self.states.read().unwrap();
        states.get(user_id).map(|s| s.count).unwrap_or(0)
    }

    fn reset(&self, user_id: &str) {
        let mut states = self.states.write().unwrap();
        states.remove(user_id);
    }

    fn tracked_users(&self) -> usize {
        let states = self.states.read().unwrap();
        states.len()
    }
}
