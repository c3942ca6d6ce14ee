//! Per-request tracing.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::response::Response;

/// Runs `fut` inside a `request` span and logs its outcome.
///
/// The completion event carries the response status and the latency in
/// milliseconds.
pub async fn traced<F>(method: &str, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", %method, %path);
    async move {
        let started = Instant::now();
        let res = fut.await;
        info!(
            status = res.status_code(),
            latency_ms = started.elapsed().as_secs_f64() * 1000.0,
            "request completed"
        );
        res
    }
    .instrument(span)
    .await
}
