use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use billsplit_core::DomainError;

pub fn domain_error_to_response(err: &DomainError) -> axum::response::Response {
    let status = match err {
        DomainError::DuplicateParticipant(_) => StatusCode::CONFLICT,
        DomainError::InvariantViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    respond_with(status, err)
}

fn respond_with(status: StatusCode, err: &DomainError) -> axum::response::Response {
    if status.is_server_error() {
        tracing::error!(code = err.code(), detail = ?err, "request failed");
    } else {
        tracing::warn!(code = err.code(), detail = ?err, "request rejected");
    }
    json_error(status, err.code(), err.to_string())
}

pub fn rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    tracing::warn!(detail = %rejection.body_text(), "malformed request body");
    json_error(
        StatusCode::BAD_REQUEST,
        "VALIDATION_FAILED",
        rejection.body_text(),
    )
}

pub fn session_unavailable() -> axum::response::Response {
    tracing::error!("session lock poisoned");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INVARIANT_VIOLATION",
        "invariant violated",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
