// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use crate::ask::AskResponse;
use crate::generate::TextGenerator;
use crate::session::SessionStore;

/// Shared server state, injected into every handler.
pub struct AppState {
    pub sessions: SessionStore,
    pub generator: Arc<dyn TextGenerator>,
    /// Schema text injected into each user's first prompt.
    pub schema: String,
}

impl AppState {
    pub fn new(sessions: SessionStore, generator: Arc<dyn TextGenerator>, schema: String) -> Self {
        Self { sessions, generator, schema }
    }

    pub async fn ask(&self, user_id: &str, prompt: &str) -> anyhow::Result<AskResponse> {
        crate::ask::handle(&self.sessions, self.generator.as_ref(), &self.schema, user_id, prompt)
            .await
    }
}
