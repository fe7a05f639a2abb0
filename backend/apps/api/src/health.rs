//! Health check

use axum::extract::State;
use kernel::error::app_error::{AppResult, ResultExt};
use kernel::error::kind::ErrorKind;
use kernel::response::ApiResponse;
use sqlx::PgPool;

const HEALTH_OK: &str = "success.HEALTH.OK";

/// GET /health-check
///
/// 503 when the database does not answer.
pub async fn health_check(State(pool): State<PgPool>) -> AppResult<ApiResponse<()>> {
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Health check failed"))
        .map_app_err(ErrorKind::ServiceUnavailable, "error.SERVICE_UNAVAILABLE")?;

    Ok(ApiResponse::message_only(HEALTH_OK))
}
