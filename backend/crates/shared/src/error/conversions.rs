//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from library errors to [`AppError`], and the
//! single translation boundary that turns an [`AppError`] into an HTTP response.

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            std::io::ErrorKind::TimedOut => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::InternalServerError,
        };
        AppError::from_kind(kind).with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request("error.VALIDATION.INVALID_BODY").with_source(err)
        } else {
            AppError::from_kind(ErrorKind::InternalServerError).with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let app_err = match &err {
            sqlx::Error::RowNotFound => AppError::from_kind(ErrorKind::NotFound),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::from_kind(ErrorKind::ServiceUnavailable)
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    Some("23505") => AppError::conflict("error.DB.VALIDATION.UQ_ERROR"),
                    Some("23503") => AppError::internal("error.DB.VALIDATION.FK_ERROR"),
                    Some("53000" | "53100" | "53200" | "53300" | "57P01" | "57P03") => {
                        AppError::from_kind(ErrorKind::ServiceUnavailable)
                    }
                    _ => AppError::from_kind(ErrorKind::InternalServerError),
                }
            }
            _ => AppError::from_kind(ErrorKind::InternalServerError),
        };
        app_err.with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use crate::response::{Envelope, ErrorBody};
        use axum::Json;
        use http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Envelope<()> = Envelope {
            message: self.message().translate(),
            data: None,
            error: Some(ErrorBody {
                kind: self.kind(),
                status: self.status_code(),
                key: self.message().key().to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
