// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Configuration for the sqlask server.
#[derive(Debug, Clone, Parser)]
#[command(name = "sqlask", version, about)]
pub struct Config {
    /// Host to bind on.
    #[arg(long, default_value = "127.0.0.1", env = "SQLASK_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 5000, env = "SQLASK_PORT")]
    pub port: u16,

    /// API key for the generation service.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Model used for SQL generation.
    #[arg(long, default_value = "gemini-2.0-flash", env = "SQLASK_MODEL")]
    pub model: String,

    /// Base URL of the generation API.
    #[arg(
        long,
        default_value = "https://generativelanguage.googleapis.com",
        env = "SQLASK_API_BASE"
    )]
    pub api_base: String,

    /// Timeout for a single generation call in milliseconds. Unset means no timeout.
    #[arg(long, env = "SQLASK_GENERATE_TIMEOUT_MS")]
    pub generate_timeout_ms: Option<u64>,

    /// Replace the embedded database schema with the contents of this file.
    #[arg(long, env = "SQLASK_SCHEMA_FILE")]
    pub schema_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "SQLASK_LOG_LEVEL")]
    pub log_level: String,

    /// Log format (text or json).
    #[arg(long, default_value = "text", env = "SQLASK_LOG_FORMAT")]
    pub log_format: String,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("--api-key must not be empty");
        }
        if self.model.trim().is_empty() {
            anyhow::bail!("--model must not be empty");
        }
        match self.log_format.as_str() {
            "text" | "json" => {}
            other => anyhow::bail!("invalid --log-format: {other} (expected text or json)"),
        }
        Ok(())
    }

    pub fn generate_timeout(&self) -> Option<Duration> {
        self.generate_timeout_ms.map(Duration::from_millis)
    }

    /// Schema text injected into priming prompts.
    ///
    /// Reads `--schema-file` when given, otherwise the embedded schema.
    pub fn load_schema(&self) -> anyhow::Result<String> {
        match self.schema_file {
            Some(ref path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    anyhow::anyhow!("failed to read schema file {}: {e}", path.display())
                })?;
                if text.trim().is_empty() {
                    anyhow::bail!("schema file {} is empty", path.display());
                }
                Ok(text)
            }
            None => Ok(crate::prompt::SCHEMA.to_owned()),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
