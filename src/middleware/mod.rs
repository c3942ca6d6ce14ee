//! Middleware layer.
//!
//! Cross-cutting steps the router runs around every handler:
//!
//! - [`json`]: body parsing for JSON payloads, switched on process-wide with
//!   [`Router::json_bodies`](crate::Router::json_bodies).
//! - [`trace`]: per-request span with method, path, status and latency.

pub mod json;
pub mod trace;
