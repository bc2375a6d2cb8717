use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use store::StoreError;

use api_types::ErrorBody;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod expenses;
mod reports;
mod server;
mod vehicles;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Store(StoreError),
    /// Failure outside the request's control; logged, never shown.
    Internal(String),
    Generic(String),
}

fn status_for_store_error(err: &StoreError) -> StatusCode {
    match err {
        StoreError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::InvalidRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::Io { .. } | StoreError::Json { .. } | StoreError::Poisoned => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_store_error(err: StoreError) -> String {
    match err {
        StoreError::Io { .. } | StoreError::Json { .. } | StoreError::Poisoned => {
            tracing::error!("store error: {err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ServerError::Store(err) => (status_for_store_error(&err), message_for_store_error(err)),
            ServerError::Internal(err) => {
                tracing::error!("internal error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
