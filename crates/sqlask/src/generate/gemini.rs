// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP client for the Gemini `generateContent` API.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use super::{Generation, TextGenerator};

/// Upstream error bodies are cut to this many bytes before being surfaced.
const MAX_ERROR_BODY: usize = 512;

/// Gemini client bound to one model and API key.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        // reqwest is built without a bundled TLS provider; install ring once.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { base_url, model: model.into(), api_key: api_key.into(), client })
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate_content(&self, prompt: &str) -> anyhow::Result<Generation> {
        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        });
        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("generation service returned {status}: {}", truncate(&text));
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        parsed.into_generation()
    }
}

impl TextGenerator for GeminiClient {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Generation>> + Send + 'a>> {
        Box::pin(self.generate_content(prompt))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn truncate(s: &str) -> &str {
    if s.len() <= MAX_ERROR_BODY {
        return s;
    }
    let mut end = MAX_ERROR_BODY;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// -- Wire types ---------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub total_token_count: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate plus the reported total token count.
    ///
    /// A response without candidate text is an error. Missing usage metadata
    /// counts as zero tokens.
    pub fn into_generation(self) -> anyhow::Result<Generation> {
        let total_tokens = self.usage_metadata.map(|u| u.total_token_count).unwrap_or(0);

        let Some(candidate) = self.candidates.into_iter().next() else {
            match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => anyhow::bail!("prompt blocked by generation service: {reason}"),
                None => anyhow::bail!("generation service returned no candidates"),
            }
        };

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
        if texts.is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            anyhow::bail!("generation service returned no text (finish reason: {reason})");
        }

        Ok(Generation { text: texts.concat(), total_tokens })
    }
}

#[cfg(test)]
#[path = "gemini_tests.rs"]
mod tests;
