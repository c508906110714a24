//! HTTP task service.
//!
//! Exposes the task store over a small JSON REST API built on axum.

mod routes;
mod serve;

pub use routes::{AppState, build_router};
pub use serve::{ServerHandle, start_server};
