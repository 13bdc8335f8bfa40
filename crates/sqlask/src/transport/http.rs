// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers for the sqlask API.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::state::AppState;

// -- Request/Response types ---------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub session_count: usize,
    pub model: String,
}

/// Both fields are required; a missing or non-string value is rejected.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub user_id: String,
    pub prompt: String,
}

// -- Handlers -----------------------------------------------------------------

/// `GET /api/v1/health`
pub async fn health(State(s): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "running".to_owned(),
        session_count: s.sessions.len().await,
        model: s.generator.model().to_owned(),
    })
}

/// `POST /ask`: generate SQL for a natural-language request.
pub async fn ask(
    State(s): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!(err = %rejection, "rejected ask request");
            return ErrorCode::BadRequest.to_http_response(rejection.body_text()).into_response();
        }
    };

    match s.ask(&req.user_id, &req.prompt).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => ErrorCode::UpstreamError.to_http_response(format!("{e:#}")).into_response(),
    }
}

/// `GET /api/v1/sessions/{user_id}`: current state for a user. Never creates one.
pub async fn session_state(
    State(s): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match s.sessions.get(&user_id).await {
        Some(state) => Json(state).into_response(),
        None => ErrorCode::SessionNotFound.to_http_response("session not found").into_response(),
    }
}
