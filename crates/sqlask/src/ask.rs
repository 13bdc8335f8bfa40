// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Natural-language to SQL request handling and per-user token accounting.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::generate::TextGenerator;
use crate::prompt::compose;
use crate::session::SessionStore;

/// Result of one `/ask` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub sql: String,
    pub tokens_schema: u64,
    pub tokens_prompt: u64,
}

/// Generate SQL for `prompt` on behalf of `user_id`.
///
/// The first call for a user embeds `schema` in the outbound prompt and its
/// tokens count toward `tokens_schema`; every later call counts toward
/// `tokens_prompt`. The user's entry stays locked until the generation call
/// returns. A failed call leaves the schema marked as sent and the counters
/// untouched.
pub async fn handle(
    store: &SessionStore,
    generator: &dyn TextGenerator,
    schema: &str,
    user_id: &str,
    prompt: &str,
) -> anyhow::Result<AskResponse> {
    let entry = store.get_or_create(user_id).await;
    let mut state = entry.lock().await;

    let kind = state.begin_call();
    let full_prompt = compose(kind, schema, prompt);

    let generation = match generator.generate(&full_prompt).await {
        Ok(g) => g,
        Err(e) => {
            tracing::warn!(
                user_id = %user_id,
                kind = kind.as_str(),
                model = generator.model(),
                err = %e,
                "generation failed"
            );
            return Err(e).context("generation failed");
        }
    };

    state.record(kind, generation.total_tokens);
    tracing::info!(
        user_id = %user_id,
        kind = kind.as_str(),
        tokens = generation.total_tokens,
        tokens_schema = state.tokens_schema,
        tokens_prompt = state.tokens_prompt,
        "sql generated"
    );

    Ok(AskResponse {
        sql: generation.text.trim().to_owned(),
        tokens_schema: state.tokens_schema,
        tokens_prompt: state.tokens_prompt,
    })
}

#[cfg(test)]
#[path = "ask_tests.rs"]
mod tests;
