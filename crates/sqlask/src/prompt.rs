// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound prompt composition.
//!
//! The first call for a user primes the model with the full database schema;
//! every later call sends only the instruction and the user's request.

use serde::Serialize;

/// Embedded database schema description, injected verbatim into priming prompts.
pub const SCHEMA: &str = include_str!("schema.prisma");

const INSTRUCTION: &str = "You are an expert SQL query generator.";

/// Which prompt variant a call uses, and which counter its tokens land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    SchemaPriming,
    FollowUp,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SchemaPriming => "schema_priming",
            Self::FollowUp => "follow_up",
        }
    }
}

/// Build the text sent to the generation service.
pub fn compose(kind: CallKind, schema: &str, user_prompt: &str) -> String {
    match kind {
        CallKind::SchemaPriming => format!(
            "\n{INSTRUCTION}\n\
             Given the following database schema and user request, return only the SQL query.\n\
             \n\
             Schema:\n\
             {schema}\n\
             \n\
             User request:\n\
             {user_prompt}\n"
        ),
        CallKind::FollowUp => format!(
            "\n{INSTRUCTION}\n\
             Return only the SQL query (no explanation).\n\
             \n\
             User request:\n\
             {user_prompt}\n"
        ),
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
