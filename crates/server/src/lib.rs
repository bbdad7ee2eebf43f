use axum::{Json, http::StatusCode, response::IntoResponse};
use tracker::TrackerError;

use serde::Serialize;
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod analytics;
mod budgets;
mod categories;
mod chart;
mod dashboard;
mod expenses;
mod forms;
mod incomes;
mod profile;
mod render;
mod server;
mod user;

pub mod types {
    pub mod user {
        pub use api_types::user::Signup;
    }

    pub mod profile {
        pub use api_types::profile::ProfileUpdate;
    }

    pub mod category {
        pub use api_types::category::{CategoryCreate, CategoryCreated};
    }

    pub mod expense {
        pub use api_types::expense::ExpenseForm;
    }

    pub mod income {
        pub use api_types::income::IncomeForm;
    }

    pub mod budget {
        pub use api_types::budget::BudgetForm;
    }
}

pub enum ServerError {
    Tracker(TrackerError),
    Render(askama::Error),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_tracker_error(err: &TrackerError) -> StatusCode {
    match err {
        TrackerError::Forbidden(_) => StatusCode::FORBIDDEN,
        TrackerError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        TrackerError::ExistingKey(_) | TrackerError::InUse(_) => StatusCode::CONFLICT,
        TrackerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        TrackerError::InvalidAmount(_)
        | TrackerError::InvalidName(_)
        | TrackerError::InvalidDate(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_tracker_error(err: TrackerError) -> String {
    match err {
        TrackerError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Tracker(err) => {
                (status_for_tracker_error(&err), message_for_tracker_error(err))
            }
            ServerError::Render(err) => {
                tracing::error!("template render failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<TrackerError> for ServerError {
    fn from(value: TrackerError) -> Self {
        Self::Tracker(value)
    }
}

impl From<askama::Error> for ServerError {
    fn from(value: askama::Error) -> Self {
        Self::Render(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_forbidden_maps_to_403() {
        let res = ServerError::from(TrackerError::Forbidden("forbidden".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn tracker_not_found_maps_to_404() {
        let res = ServerError::from(TrackerError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn tracker_conflict_maps_to_409() {
        let res = ServerError::from(TrackerError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let res = ServerError::from(TrackerError::InUse("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn tracker_validation_maps_to_422() {
        let res = ServerError::from(TrackerError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let res = ServerError::from(TrackerError::InvalidDate("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
