// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test infrastructure: a scripted generator and state builders.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::generate::{Generation, TextGenerator};
use crate::prompt::SCHEMA;
use crate::session::SessionStore;
use crate::state::AppState;

/// In-process [`TextGenerator`] that records every prompt it receives.
///
/// Token usage is the whitespace-separated word count of the prompt plus the
/// reply, so schema-priming calls always cost more than follow-ups.
pub struct FakeGenerator {
    reply: String,
    failure: Mutex<Option<String>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into(), failure: Mutex::new(None), prompts: Arc::default() }
    }

    /// Make every subsequent call fail with `message`, or succeed again with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock() = message.map(str::to_owned);
    }

    pub fn captured_prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }

    /// Token count this generator reports for `prompt`.
    pub fn tokens_for(&self, prompt: &str) -> u64 {
        (prompt.split_whitespace().count() + self.reply.split_whitespace().count()) as u64
    }
}

impl TextGenerator for FakeGenerator {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Generation>> + Send + 'a>> {
        Box::pin(async move {
            self.prompts.lock().push(prompt.to_owned());
            if let Some(message) = self.failure.lock().clone() {
                anyhow::bail!("{message}");
            }
            let total_tokens = self.tokens_for(prompt);
            Ok(Generation { text: format!("  {}\n", self.reply), total_tokens })
        })
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

/// Build an [`AppState`] around `generator` with the embedded schema.
pub fn app_state(generator: Arc<dyn TextGenerator>) -> Arc<AppState> {
    Arc::new(AppState::new(SessionStore::new(), generator, SCHEMA.to_owned()))
}
