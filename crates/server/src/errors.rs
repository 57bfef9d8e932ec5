use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::{types::ErrorBody, CoreError};
use service::{errors::ServiceError, prices::UnknownCollection};
use thiserror::Error;
use tracing::error;

/// Request-level failure, rendered as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("Invalid id")]
    InvalidId(String),
    #[error("Collection not found")]
    UnknownCollection(#[from] UnknownCollection),
    #[error("Internal Server Error")]
    Upstream(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownCollection(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream(e) = &self {
            error!(error = %e, "Error calling cloud function");
        }
        let status = self.status();
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_message_per_variant() {
        let cases = [
            (ApiError::from(ServiceError::invalid_input()), StatusCode::BAD_REQUEST, "Invalid input"),
            (ApiError::from(ServiceError::invalid_price()), StatusCode::BAD_REQUEST, "Invalid price"),
            (ApiError::from(ServiceError::item_not_found()), StatusCode::NOT_FOUND, "Item not found"),
            (ApiError::InvalidId("abc".into()), StatusCode::BAD_REQUEST, "Invalid id"),
            (
                ApiError::from(UnknownCollection("snacks".into())),
                StatusCode::NOT_FOUND,
                "Collection not found",
            ),
            (
                ApiError::from(CoreError::Network("refused".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        ];
        for (err, status, msg) in cases {
            assert_eq!(err.status(), status);
            assert_eq!(err.to_string(), msg);
        }
    }
}
