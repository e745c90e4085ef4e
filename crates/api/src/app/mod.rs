//! HTTP application wiring (Axum router + shared session).
//!
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and mapping into domain requests
//! - `errors.rs`: consistent error responses

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use billsplit_session::{SessionConfig, SharedSession, SplitSession};

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router around a fresh session (used by `main.rs`).
pub fn build_app(config: &SessionConfig) -> Router {
    router(SplitSession::with_config(config).into_shared())
}

/// Router over an existing session.
pub fn router(session: SharedSession) -> Router {
    Router::new()
        .route("/", get(routes::system::welcome))
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(ServiceBuilder::new().layer(Extension(session)))
}
