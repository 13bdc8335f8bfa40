// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text generation capability: prompt in, text and token usage out.

pub mod gemini;

use std::future::Future;
use std::pin::Pin;

/// Output of a single generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    /// Total billing tokens the provider reported for this call.
    pub total_tokens: u64,
}

/// A hosted model that turns a prompt into text.
///
/// Object-safe for use as `Arc<dyn TextGenerator>`. Implementations must not
/// retry; any failure is returned to the caller as-is.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Generation>> + Send + 'a>>;

    /// Model identifier, for logs and the health endpoint.
    fn model(&self) -> &str;
}
