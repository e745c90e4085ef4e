use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use billsplit_session::SharedSession;

use crate::app::routes::lock;
use crate::app::{dto, errors};

pub async fn create_expense(
    Extension(session): Extension<SharedSession>,
    body: Result<Json<dto::CreateExpenseRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };
    let request = match body.into_new_expense() {
        Ok(request) => request,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    let mut session = match lock(&session) {
        Ok(guard) => guard,
        Err(response) => return response,
    };
    match session.add_expense(request) {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(dto::success(
                "Expense Created Successfully.",
                dto::ExpenseCreatedBody::from(receipt),
            )),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}
