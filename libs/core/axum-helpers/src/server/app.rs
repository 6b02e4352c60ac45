use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use crate::middleware::{log_requests, panic_recovery_layer};
use axum::{Json, Router, ServiceExt, extract::Request, middleware, routing::get};
use core_config::server::ServerConfig;
use std::io;
use std::net::SocketAddr;
use tower_http::normalize_path::NormalizePath;
use tracing::info;
use utoipa::OpenApi;

/// Creates the application router with the shared middleware chain.
///
/// Sets up, inside-out:
/// - the OpenAPI document at `/api-docs/openapi.json`
/// - the caller's API routes (state already applied per domain router)
/// - a JSON 404 fallback for unmatched paths
/// - request logging
/// - panic recovery (outermost, so a panic below still yields a 500)
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` describing the API
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .route("/api-docs/openapi.json", get(|| async { Json(T::openapi()) }))
        .merge(apis)
        .fallback(not_found)
        .layer(middleware::from_fn(log_requests))
        .layer(panic_recovery_layer())
}

/// Starts the HTTP server with graceful shutdown.
///
/// Trailing slashes are normalized before routing, so `/tasks/` and `/tasks`
/// dispatch identically. Peer addresses are propagated via `ConnectInfo` for
/// the request log.
///
/// # Errors
/// Returns an error if the TCP listener fails to bind or the server errors
/// during operation.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);

    let app = NormalizePath::trim_trailing_slash(router);
    let make_service =
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app);

    axum::serve(listener, make_service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}
