//! Application wiring.

use crate::customers::{self, Customers};
use crate::health;
use crate::request::Request;
use crate::router::Router;

/// Builds the application router over `store`.
///
/// JSON body parsing is switched on before any route is registered.
pub fn app(store: &Customers) -> Router {
    let router = Router::new()
        .json_bodies()
        .get("/", index)
        .get("/healthz", health::liveness)
        .get("/readyz", customers::with(store, health::readiness));

    customers::routes(router, store)
}

async fn index(_req: Request) -> &'static str {
    "Hello There"
}
