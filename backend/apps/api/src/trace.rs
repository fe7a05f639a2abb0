//! Request tracing
//!
//! One span per request carrying the request id and caller details, plus a
//! completion event with status and latency.

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ConnectInfo;
use axum::http::{Request, Response};
use platform::client::ClientInfo;
use tower_http::request_id::RequestId;
use tower_http::trace::{MakeSpan, OnResponse};
use tracing::Span;

/// Span builder for [`tower_http::trace::TraceLayer`]
///
/// Must run inside `SetRequestIdLayer` so the id is already on the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .unwrap_or("-");

        let direct_ip = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        let client = ClientInfo::from_headers(request.headers(), direct_ip);

        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = %request_id,
            client_ip = %client.ip_display(),
            user_agent = %client.user_agent_display(),
        )
    }
}

/// Logs status and latency when the response is produced
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseLog;

impl<B> OnResponse<B> for ResponseLog {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status();
        let latency_ms = latency.as_secs_f64() * 1_000.0;

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), latency_ms, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), latency_ms, "Request completed");
        }
    }
}
