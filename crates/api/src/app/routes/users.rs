use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use billsplit_core::ParticipantHandle;
use billsplit_session::SharedSession;

use crate::app::routes::lock;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_user))
        .route("/balances", get(group_balances))
        .route("/:email/balance", get(participant_balance))
}

pub async fn create_user(
    Extension(session): Extension<SharedSession>,
    body: Result<Json<dto::CreateUserRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };
    let handle = match ParticipantHandle::parse(body.email) {
        Ok(handle) => handle,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    let mut session = match lock(&session) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    match session.register_participant(body.name, handle) {
        Ok(participant) => (
            StatusCode::CREATED,
            Json(dto::success(
                "User Created Successfully.",
                dto::ParticipantBody {
                    name: participant.name().to_string(),
                    email: participant.handle().to_string(),
                },
            )),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn participant_balance(
    Extension(session): Extension<SharedSession>,
    Path(email): Path<String>,
) -> axum::response::Response {
    let session = match lock(&session) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    match session.balance(&email) {
        Ok(statement) => (
            StatusCode::OK,
            Json(dto::success(
                statement.title(),
                dto::BalanceBody::from(&statement),
            )),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn group_balances(Extension(session): Extension<SharedSession>) -> axum::response::Response {
    let session = match lock(&session) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    let statement = session.balances();
    (
        StatusCode::OK,
        Json(dto::success(
            "Balances for all users.",
            dto::BalancesBody::from(&statement),
        )),
    )
        .into_response()
}
