//! Cross-cutting request middleware.

mod logging;
mod panic;

pub use logging::log_requests;
pub use panic::panic_recovery_layer;
