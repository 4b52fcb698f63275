use crate::dbs::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::models::ErrorResponse;

pub const BODY_EMPTY: &str = "Body is empty";
pub const CHARACTER_NOT_FOUND: &str = "Character not found";
pub const CHARACTER_DOES_NOT_EXIST: &str = "Character does not exist";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    /// Maps a store error, using `not_found` as the message for a missing id.
    pub fn from_db(err: DbError, not_found: &str) -> Self {
        match err {
            DbError::NotFound(_) => ApiError::NotFound(not_found.to_string()),
            DbError::AlreadyExists | DbError::LevelOutOfRange => {
                ApiError::BadRequest(err.to_string())
            }
            DbError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_client_messages() {
        match ApiError::from_db(DbError::AlreadyExists, CHARACTER_NOT_FOUND) {
            ApiError::BadRequest(msg) => assert_eq!(msg, "ID or name already exists"),
            other => panic!("unexpected {other:?}"),
        }
        match ApiError::from_db(DbError::LevelOutOfRange, CHARACTER_NOT_FOUND) {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Level must be between 1 and 99"),
            other => panic!("unexpected {other:?}"),
        }
        match ApiError::from_db(DbError::NotFound(5), CHARACTER_DOES_NOT_EXIST) {
            ApiError::NotFound(msg) => assert_eq!(msg, CHARACTER_DOES_NOT_EXIST),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn internal_errors_are_500() {
        let response = ApiError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
