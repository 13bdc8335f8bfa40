// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use super::*;
use crate::prompt::{CallKind, SCHEMA};
use crate::test_support::FakeGenerator;

const REPLY: &str = "SELECT * FROM assets;";

#[tokio::test]
async fn first_call_primes_with_schema() -> anyhow::Result<()> {
    let store = SessionStore::new();
    let generator = FakeGenerator::new(REPLY);
    let prompts = generator.captured_prompts();

    let resp = handle(&store, &generator, SCHEMA, "u1", "list all assets").await?;

    assert_eq!(resp.sql, REPLY);
    assert!(resp.tokens_schema > 0);
    assert_eq!(resp.tokens_prompt, 0);

    let sent = prompts.lock().clone();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].contains(SCHEMA));
    assert!(sent[0].contains("list all assets"));
    assert_eq!(store.get("u1").await.map(|s| s.schema_sent), Some(true));
    Ok(())
}

#[tokio::test]
async fn later_calls_never_resend_schema() -> anyhow::Result<()> {
    let store = SessionStore::new();
    let generator = FakeGenerator::new(REPLY);
    let prompts = generator.captured_prompts();

    let first = handle(&store, &generator, SCHEMA, "u1", "list all assets").await?;
    let second = handle(&store, &generator, SCHEMA, "u1", "now only district 2").await?;
    let third = handle(&store, &generator, SCHEMA, "u1", "sort by name").await?;

    assert_eq!(second.tokens_schema, first.tokens_schema);
    assert_eq!(third.tokens_schema, first.tokens_schema);
    assert!(second.tokens_prompt > 0);
    assert!(third.tokens_prompt > second.tokens_prompt);

    let sent = prompts.lock().clone();
    assert_eq!(sent.len(), 3);
    for prompt in &sent[1..] {
        assert!(!prompt.contains(SCHEMA));
        assert!(!prompt.contains("Schema:"));
    }
    Ok(())
}

#[tokio::test]
async fn tokens_attributed_by_call_kind() -> anyhow::Result<()> {
    let store = SessionStore::new();
    let generator = FakeGenerator::new(REPLY);

    let first = handle(&store, &generator, SCHEMA, "u1", "list all assets").await?;
    let priming_cost =
        generator.tokens_for(&compose(CallKind::SchemaPriming, SCHEMA, "list all assets"));
    assert_eq!(first.tokens_schema, priming_cost);

    let second = handle(&store, &generator, SCHEMA, "u1", "now only district 2").await?;
    let follow_cost =
        generator.tokens_for(&compose(CallKind::FollowUp, SCHEMA, "now only district 2"));
    assert_eq!(second.tokens_prompt, follow_cost);
    assert!(priming_cost > follow_cost);
    Ok(())
}

#[tokio::test]
async fn users_do_not_share_state() -> anyhow::Result<()> {
    let store = SessionStore::new();
    let generator = FakeGenerator::new(REPLY);
    let prompts = generator.captured_prompts();

    handle(&store, &generator, SCHEMA, "alice", "list all assets").await?;
    handle(&store, &generator, SCHEMA, "alice", "now only district 2").await?;
    let bob = handle(&store, &generator, SCHEMA, "bob", "list users").await?;

    assert!(bob.tokens_schema > 0);
    assert_eq!(bob.tokens_prompt, 0);
    assert!(prompts.lock()[2].contains(SCHEMA));

    let alice = store.get("alice").await.map(|s| s.tokens_prompt).unwrap_or_default();
    assert!(alice > 0);
    Ok(())
}

#[tokio::test]
async fn failure_propagates_and_keeps_schema_sent() -> anyhow::Result<()> {
    let store = SessionStore::new();
    let generator = FakeGenerator::new(REPLY);
    let prompts = generator.captured_prompts();

    generator.set_failure(Some("quota exceeded"));
    let err = handle(&store, &generator, SCHEMA, "u1", "list all assets").await;
    let message = err.err().map(|e| format!("{e:#}")).unwrap_or_default();
    assert!(message.contains("quota exceeded"), "unexpected error: {message}");

    let state = store.get("u1").await.unwrap_or_default();
    assert!(state.schema_sent);
    assert_eq!(state.tokens_schema, 0);
    assert_eq!(state.tokens_prompt, 0);

    generator.set_failure(None);
    let resp = handle(&store, &generator, SCHEMA, "u1", "list all assets").await?;
    assert_eq!(resp.tokens_schema, 0);
    assert!(resp.tokens_prompt > 0);
    assert!(!prompts.lock()[1].contains(SCHEMA));
    Ok(())
}

#[tokio::test]
async fn concurrent_requests_prime_exactly_once() -> anyhow::Result<()> {
    let store = Arc::new(SessionStore::new());
    let generator = Arc::new(FakeGenerator::new(REPLY));
    let prompts = generator.captured_prompts();

    let mut tasks = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        let generator = Arc::clone(&generator);
        tasks.push(tokio::spawn(async move {
            handle(&store, generator.as_ref(), SCHEMA, "shared", &format!("query {i}")).await
        }));
    }
    for task in tasks {
        task.await??;
    }

    let with_schema = prompts.lock().iter().filter(|p| p.contains(SCHEMA)).count();
    assert_eq!(with_schema, 1);
    Ok(())
}

#[tokio::test]
async fn sql_is_trimmed() -> anyhow::Result<()> {
    let store = SessionStore::new();
    let generator = FakeGenerator::new("\n  SELECT 1;  \n");
    let resp = handle(&store, &generator, SCHEMA, "u1", "one").await?;
    assert_eq!(resp.sql, "SELECT 1;");
    Ok(())
}
