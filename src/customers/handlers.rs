//! REST handlers for `/api/customers`.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/customers` | 200, every record |
//! | GET | `/api/customers/:id` | 200, the record |
//! | POST | `/api/customers` | 200, the new record |
//! | PUT | `/api/customers/:id` | 200, the updated record |
//! | DELETE | `/api/customers/:id` | 200, the removed record |
//!
//! The `:id` segment is read like JavaScript's `parseInt`: leading whitespace,
//! an optional sign, then the leading run of digits (`"1abc"` and `"1.0"`
//! both mean 1). No leading digits, a negative value, or an overflowing one
//! can never match a record and is answered like any other unknown id: `404`.

use std::future::Future;

use serde_json::{Map, Value};

use super::error::ApiError;
use super::model::{Customer, CustomerInput};
use super::store::Customers;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::{IntoResponse, Json};
use crate::router::Router;
use crate::validation;

/// Registers the customers routes on `router`, all sharing `store`.
pub fn routes(router: Router, store: &Customers) -> Router {
    router
        .get("/api/customers", with(store, list))
        .post("/api/customers", with(store, create))
        .get("/api/customers/:id", with(store, get))
        .put("/api/customers/:id", with(store, update))
        .delete("/api/customers/:id", with(store, delete))
}

/// Binds a store-taking handler to `store`.
pub(crate) fn with<F, Fut, R>(store: &Customers, f: F) -> impl Handler + use<F, Fut, R>
where
    F: Fn(Customers, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    let store = store.clone();
    move |req: Request| f(store.clone(), req)
}

pub async fn list(store: Customers, _req: Request) -> Json<Vec<Customer>> {
    Json(store.list())
}

pub async fn get(store: Customers, req: Request) -> Result<Json<Customer>, ApiError> {
    let id = id(&req)?;
    store.get(id).map(Json).ok_or(ApiError::NotFound)
}

pub async fn create(store: Customers, req: Request) -> Result<Json<Customer>, ApiError> {
    let name = name(&req)?;
    Ok(Json(store.create(name)))
}

pub async fn update(store: Customers, req: Request) -> Result<Json<Customer>, ApiError> {
    let id = id(&req)?;
    if store.get(id).is_none() {
        return Err(ApiError::NotFound);
    }
    let name = name(&req)?;
    store.update(id, name).map(Json).ok_or(ApiError::NotFound)
}

pub async fn delete(store: Customers, req: Request) -> Result<Json<Customer>, ApiError> {
    let id = id(&req)?;
    store.remove(id).map(Json).ok_or(ApiError::NotFound)
}

fn id(req: &Request) -> Result<u64, ApiError> {
    req.param("id").and_then(leading_id).ok_or(ApiError::NotFound)
}

/// Parses the leading integer of `raw`, the way `parseInt` does.
fn leading_id(raw: &str) -> Option<u64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let value = rest[..end].parse::<u64>().ok()?;
    (!negative || value == 0).then_some(value)
}

/// Validates the body against [`CustomerInput`] and returns the name.
///
/// A request without a parsed JSON body is validated as `{}`.
fn name(req: &Request) -> Result<String, ApiError> {
    let body = req.json().cloned().unwrap_or_else(|| Value::Object(Map::new()));
    let input: CustomerInput = validation::validate(body)?;
    // `required` has already rejected a missing name.
    Ok(input.name.unwrap_or_default())
}
