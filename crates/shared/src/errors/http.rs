use crate::errors::service::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Errors surfaced to HTTP clients as a status code plus a short text reason.
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),
            ServiceError::Repo(repo_err) => {
                error!("❌ Store failure: {repo_err}");
                HttpError::Internal("Database error".into())
            }
            ServiceError::Queue(msg) => {
                error!("❌ Queue failure: {msg}");
                HttpError::Internal("Queue error".into())
            }
            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, msg).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RepositoryError;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = HttpError::from(ServiceError::Validation(vec![
            "products: must not be empty".into(),
        ]));

        assert!(matches!(err, HttpError::BadRequest(msg) if msg == "products: must not be empty"));
    }

    #[test]
    fn test_store_failure_hides_details() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::Sqlx(
            sqlx::Error::PoolTimedOut,
        )));

        assert!(matches!(err, HttpError::Internal(msg) if msg == "Database error"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HttpError::BadRequest("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HttpError::Internal("boom".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
