use std::sync::MutexGuard;

use axum::{Router, routing::post};

use billsplit_session::{SharedSession, SplitSession};

use crate::app::errors;

pub mod expenses;
pub mod system;
pub mod users;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/user", users::router())
        .route("/expense", post(expenses::create_expense))
}

/// Lock the session for one request's critical section.
pub(crate) fn lock(
    session: &SharedSession,
) -> Result<MutexGuard<'_, SplitSession>, axum::response::Response> {
    session.lock().map_err(|_| errors::session_unavailable())
}
