// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-user session state: whether the schema was sent, and token counters.
//!
//! Entries are created lazily on first sight of a user id and live for the
//! lifetime of the process. There is no eviction.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

use crate::prompt::CallKind;

/// Accumulated state for one user identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub schema_sent: bool,
    pub tokens_schema: u64,
    pub tokens_prompt: u64,
}

impl SessionState {
    /// Decide the variant for the next call and mark the schema as sent.
    ///
    /// `schema_sent` only ever goes from false to true.
    pub fn begin_call(&mut self) -> CallKind {
        if self.schema_sent {
            CallKind::FollowUp
        } else {
            self.schema_sent = true;
            CallKind::SchemaPriming
        }
    }

    /// Attribute a call's token count to the matching counter.
    pub fn record(&mut self, kind: CallKind, tokens: u64) {
        match kind {
            CallKind::SchemaPriming => {
                self.tokens_schema = self.tokens_schema.saturating_add(tokens)
            }
            CallKind::FollowUp => self.tokens_prompt = self.tokens_prompt.saturating_add(tokens),
        }
    }
}

/// Lockable handle to one user's state.
///
/// Holding the lock across a generation call serializes requests for the
/// same user, so only one of them can be schema-priming.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Process-wide map from user id to session state.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `user_id`, inserting a fresh one if absent.
    pub async fn get_or_create(&self, user_id: &str) -> SessionHandle {
        if let Some(entry) = self.sessions.read().await.get(user_id) {
            return Arc::clone(entry);
        }
        let mut sessions = self.sessions.write().await;
        let entry = sessions.entry(user_id.to_owned()).or_insert_with(|| {
            tracing::debug!(user_id = %user_id, "session created");
            Arc::new(Mutex::new(SessionState::default()))
        });
        Arc::clone(entry)
    }

    /// Apply `f` to the entry for `user_id` (creating it if absent) and
    /// return the resulting snapshot.
    pub async fn update<F>(&self, user_id: &str, f: F) -> SessionState
    where
        F: FnOnce(&mut SessionState),
    {
        let entry = self.get_or_create(user_id).await;
        let mut state = entry.lock().await;
        f(&mut *state);
        let snapshot = *state;
        snapshot
    }

    /// Snapshot of an existing entry. Never creates one.
    pub async fn get(&self, user_id: &str) -> Option<SessionState> {
        let entry = self.sessions.read().await.get(user_id).map(Arc::clone)?;
        let state = *entry.lock().await;
        Some(state)
    }

    /// Number of user ids seen so far.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
