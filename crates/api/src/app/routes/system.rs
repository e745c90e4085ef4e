use axum::{Json, http::StatusCode, response::IntoResponse};

pub async fn welcome() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Welcome to Bill Split App" }))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
