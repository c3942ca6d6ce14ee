//! # customers-api
//!
//! A small REST service over an in-memory customer collection, on a minimal
//! hyper + matchit router.
//!
//! | Method | Path | Body | Response |
//! |---|---|---|---|
//! | GET | `/api/customers` | | 200, every customer |
//! | GET | `/api/customers/:id` | | 200 customer, or 404 |
//! | POST | `/api/customers` | `{"name"}` | 200 new customer, or 400 |
//! | PUT | `/api/customers/:id` | `{"name"}` | 200 updated customer, 404 or 400 |
//! | DELETE | `/api/customers/:id` | | 200 removed customer, or 404 |
//!
//! `name` is required and at least 3 characters long.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use customers_api::{Config, Server, app, customers::Customers};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), customers_api::Error> {
//!     let config = Config::from_env()?;
//!     let store = Customers::new();
//!
//!     Server::bind(config.addr()).await?.serve(app(&store)).await
//! }
//! ```

mod app;
mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod customers;
pub mod health;
pub mod middleware;
pub mod validation;

pub use app::app;
pub use config::{Config, DEFAULT_PORT};
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
