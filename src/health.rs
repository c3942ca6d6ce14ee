//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can it serve the customers API? |

use serde_json::json;

use crate::customers::Customers;
use crate::{Json, Request, Response};

/// Liveness probe. Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe.
///
/// Answers `200 OK` with the number of stored customers, which also proves
/// the collection lock can be taken.
pub async fn readiness(store: Customers, _req: Request) -> Json<serde_json::Value> {
    Json(json!({ "status": "ready", "customers": store.len() }))
}
