// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    bad_request = { ErrorCode::BadRequest, 400, "BAD_REQUEST" },
    session_not_found = { ErrorCode::SessionNotFound, 404, "SESSION_NOT_FOUND" },
    upstream = { ErrorCode::UpstreamError, 502, "UPSTREAM_ERROR" },
)]
fn code_maps_to_status_and_name(code: ErrorCode, status: u16, name: &str) {
    assert_eq!(code.http_status(), status);
    assert_eq!(code.as_str(), name);
    assert_eq!(code.to_string(), name);
}

#[test]
fn http_response_wraps_body_in_envelope() -> anyhow::Result<()> {
    let (status, Json(body)) = ErrorCode::UpstreamError.to_http_response("quota exceeded");
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body.error.code, "UPSTREAM_ERROR");
    assert_eq!(body.error.message, "quota exceeded");

    let json = serde_json::to_value(&body)?;
    assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
    Ok(())
}
