//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the HTTP surface.
//!
//! ## Modules
//!
//! - **[`errors`]**: the application error type and its JSON response mapping
//! - **[`extractors`]**: custom extractors (integer path id, validated JSON)
//! - **[`middleware`]**: request logging and panic recovery
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let api_routes = Router::new(); // routes with state already applied
//! let router = create_router::<ApiDoc>(api_routes).merge(health_router(app_info!()));
//! create_app(router, &ServerConfig::default()).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod server;

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};

// Re-export middleware
pub use middleware::{log_requests, panic_recovery_layer};

// Re-export server helpers
pub use server::{create_app, create_router, health_router, shutdown_signal};
