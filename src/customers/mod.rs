//! The customers resource: records, the in-memory collection, and the
//! REST handlers over `/api/customers`.

mod error;
mod handlers;
mod model;
mod store;

pub use error::ApiError;
pub use handlers::{create, delete, get, list, routes, update};
pub(crate) use handlers::with;
pub use model::{Customer, CustomerInput};
pub use store::Customers;
