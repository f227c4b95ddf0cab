//! HTTP error mapping.
//!
//! # Invariants
//! - Every failure body is `{"errors": [..]}` with at least one message.
//! - Store internals never reach the body; they are logged instead.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use pokereview_core::{DbError, ServiceError};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const INTERNAL_FAILURE: &str = "Something went wrong while processing the request.";

#[derive(Debug)]
pub enum ApiError {
    /// A use-case outcome from the core services.
    Service(ServiceError),
    /// The request could not be parsed (payload, path or query).
    BadRequest(String),
    /// Store bootstrap or worker failure outside any use-case.
    Internal,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    errors: Vec<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::Validation(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Conflict(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Service(ServiceError::Persistence(_)) | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Service(err) => err.messages(),
            Self::BadRequest(message) => vec![message.clone()],
            Self::Internal => vec![INTERNAL_FAILURE.to_string()],
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::BadRequest(message) => write!(f, "bad request: {message}"),
            Self::Internal => f.write_str("internal failure"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::BadRequest(_) | Self::Internal => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            errors: self.messages(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        error!(
            "event=db_unavailable module=api status=error error={}",
            value
        );
        Self::Internal
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(value: tokio::task::JoinError) -> Self {
        error!(
            "event=worker_failed module=api status=error panicked={} error={}",
            value.is_panic(),
            value
        );
        Self::Internal
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use pokereview_core::ServiceError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation(vec!["bad".into()]), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (
                ServiceError::Conflict("Pokemon Already Exists".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ServiceError::Persistence(vec!["boom".into()]),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn internal_failure_hides_details() {
        let messages = ApiError::Internal.messages();
        assert_eq!(messages.len(), 1);
        assert!(!messages[0].contains("sqlite"));
    }
}
