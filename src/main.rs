//! customers-api binary.
//!
//! Run with:
//!   RUST_LOG=info PORT=5000 cargo run
//!
//! Try:
//!   curl http://localhost:5000/api/customers
//!   curl -X POST http://localhost:5000/api/customers \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"Alice"}'
//!   curl http://localhost:5000/api/customers/1

use std::process::ExitCode;

use customers_api::{Config, Server, app, customers::Customers};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<(), customers_api::Error> {
    let config = Config::from_env()?;
    let store = Customers::new();

    Server::bind(config.addr()).await?.serve(app(&store)).await
}
