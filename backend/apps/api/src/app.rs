//! Router composition

use auth::PgUserDirectory;
use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};
use kernel::error::app_error::AppError;
use kernel::i18n;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::health::health_check;
use crate::trace::{RequestSpan, ResponseLog};

pub const API_PREFIX: &str = "/api/v1";

/// Full application router
///
/// Auth routes run under the request-id and trace stack; the health check
/// does not, so load balancer polling stays out of the logs. Every response
/// is rendered in the language negotiated from `Accept-Language`.
pub fn build_app(config: &AppConfig, pool: PgPool) -> Router {
    let traced = auth::auth_router(PgUserDirectory::new(pool.clone()), config.auth.clone()).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(RequestSpan)
                    .on_response(ResponseLog),
            )
            .layer(PropagateRequestIdLayer::x_request_id()),
    );

    let v1 = Router::new()
        .route("/health-check", get(health_check))
        .with_state(pool)
        .merge(traced);

    Router::new()
        .nest(API_PREFIX, v1)
        .fallback(page_not_found)
        .layer(middleware::from_fn(negotiate_language))
        .layer(cors_layer(&config.frontend_origins))
}

async fn negotiate_language(req: Request, next: Next) -> Response {
    let accept = req
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());
    let language = i18n::negotiate(accept);

    i18n::with_language(language, next.run(req)).await
}

async fn page_not_found() -> AppError {
    AppError::not_found("error.SERVER.PAGE_NOT_FOUND")
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ACCEPT_LANGUAGE,
        ]))
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = AppConfig::from_pairs(&[
            ("DATABASE_URL", "postgres://localhost:1/none"),
            ("JWT_ACCESS_SECRET_KEY", "access-secret"),
            ("JWT_REFRESH_SECRET_KEY", "refresh-secret"),
            ("FRONTEND_ORIGINS", "http://localhost:5173"),
        ])
        .unwrap();

        // Nothing listens on port 1, so every acquire fails fast
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy(&config.database_url)
            .unwrap();

        build_app(&config, pool)
    }

    async fn call(app: Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let req = Request::builder()
            .uri("/nowhere")
            .body(Body::empty())
            .unwrap();

        let (status, _, body) = call(test_app(), req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Page not found");
        assert_eq!(body["error"]["key"], "error.SERVER.PAGE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_health_check_without_database_is_503() {
        let req = Request::builder()
            .uri("/api/v1/health-check")
            .body(Body::empty())
            .unwrap();

        let (status, headers, _) = call(test_app(), req).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(headers.get("x-request-id").is_none());
    }

    #[tokio::test]
    async fn test_auth_routes_echo_request_id() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/auth/logout")
            .body(Body::empty())
            .unwrap();

        let (status, headers, body) = call(test_app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Logout successful");
        assert!(headers.get("x-request-id").is_some());
    }

    #[tokio::test]
    async fn test_protected_route_without_cookie() {
        let req = Request::builder()
            .uri("/api/v1/user/profile")
            .body(Body::empty())
            .unwrap();

        let (status, _, body) = call(test_app(), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["key"], "error.UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_unsupported_language_falls_back_to_english() {
        let req = Request::builder()
            .uri("/api/v1/user/profile")
            .header(header::ACCEPT_LANGUAGE, "ja-JP,ja;q=0.9")
            .body(Body::empty())
            .unwrap();

        let (status, _, body) = call(test_app(), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/api/v1/auth/login")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let (_, headers, _) = call(test_app(), req).await;
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }
}
