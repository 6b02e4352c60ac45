//! Request logging middleware.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderMap, Request, Response},
    middleware::Next,
};
use std::net::SocketAddr;
use std::time::Instant;

/// Middleware that logs every completed request.
///
/// Emits one structured log line per request after the handler has produced
/// its response: method, path, query string, client address, status, and
/// latency.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware};
/// use axum_helpers::middleware::log_requests;
///
/// let app = Router::new().layer(middleware::from_fn(log_requests));
/// ```
pub async fn log_requests(request: Request<Body>, next: Next) -> Response<Body> {
    // Peer address comes from request extensions, populated when the server
    // is started with `into_make_service_with_connect_info`.
    let connect_info = request.extensions().get::<ConnectInfo<SocketAddr>>().copied();

    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().unwrap_or_default().to_string();
    let client = client_addr(request.headers(), connect_info);

    let response = next.run(request).await;

    let latency = start.elapsed();
    tracing::info!(
        status = response.status().as_u16(),
        latency_ms = latency.as_millis() as u64,
        client = %client,
        method = %method,
        path = %path,
        query = %query,
        "http request"
    );

    response
}

/// Best-effort client address: proxy headers first, then the socket peer.
fn client_addr(headers: &HeaderMap, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }

    match connect_info {
        Some(ConnectInfo(addr)) => addr.to_string(),
        None => "unknown".to_string(),
    }
}
