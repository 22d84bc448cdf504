use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::catalog::CatalogError;

/// Boundary failure rendered as the fixed JSON envelope
/// `{"success": false, "error": <code>, "message": <string>}`.
#[derive(Debug, Clone, Copy)]
pub enum ApiError {
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Unprocessable,
    Internal,
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // message strings are part of the wire contract, misspelling included
    fn message(self) -> &'static str {
        match self {
            ApiError::BadRequest => "Bad Request",
            ApiError::NotFound => "Not Found",
            ApiError::MethodNotAllowed => "Method not allowed",
            ApiError::Unprocessable => "Unprocessible entity",
            ApiError::Internal => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => ApiError::NotFound,
            CatalogError::Database(error) => {
                tracing::error!("database failure: {error}");
                ApiError::Internal
            }
        }
    }
}
