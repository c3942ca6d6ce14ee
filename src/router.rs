//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. A method + pattern pair
//! can be registered once; a second registration is an error at setup time,
//! never a silent shadow.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use matchit::Router as MatchitRouter;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Registration methods return `self` so they chain.
///
/// ```rust
/// use customers_api::{Request, Response, Router};
///
/// async fn list(_: Request) -> Response { Response::json(b"[]".to_vec()) }
/// async fn show(req: Request) -> Response {
///     Response::text(req.param("id").unwrap_or_default().to_owned())
/// }
///
/// let app = Router::new()
///     .json_bodies()
///     .get("/api/customers", list)
///     .get("/api/customers/:id", show);
/// ```
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    json_bodies: bool,
}

/// Outcome of matching a method + path against the route table.
pub(crate) enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    /// The path exists under other methods.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), json_bodies: false }
    }

    /// Parse JSON request bodies before any handler runs.
    ///
    /// Without this, [`Request::json`] is always `None`.
    pub fn json_bodies(mut self) -> Self {
        self.json_bodies = true;
        self
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters may be written `:name` or `{name}`.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is invalid or already registered for `method`.
    /// Use [`Router::try_on`] to handle that as an error instead.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.try_on(method, path, handler).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible form of [`Router::on`].
    pub fn try_on(mut self, method: Method, path: &str, handler: impl Handler) -> Result<Self, Error> {
        self.routes
            .entry(method)
            .or_default()
            .insert(normalize_pattern(path), handler.into_boxed_handler())
            .map_err(|source| Error::Route { method, path: path.to_owned(), source })?;
        Ok(self)
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Lookup {
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(handler, params);
        }

        let allowed = self.allowed(path);
        if allowed.is_empty() { Lookup::NotFound } else { Lookup::MethodNotAllowed(allowed) }
    }

    fn allowed(&self, path: &str) -> Vec<Method> {
        Method::ALL.into_iter()
            .filter(|m| self.routes.get(m).is_some_and(|tree| tree.at(path).is_ok()))
            .collect()
    }

    /// Routes one buffered request and produces its response.
    ///
    /// Never fails: unmatched paths become `404`, wrong methods `405`, and
    /// malformed JSON bodies `400` before any handler sees them.
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();
        let path = parts.uri.path().to_owned();
        let method = parts.method.clone();

        middleware::trace::traced(method.as_str(), &path, self.route(parts, body)).await
    }

    async fn route(&self, parts: http::request::Parts, body: Bytes) -> Response {
        // HEAD is answered by the GET route, without the body.
        if parts.method == http::Method::HEAD {
            let mut res = self.dispatch(Method::Get, parts, body).await;
            res.body.clear();
            return res;
        }

        match Method::try_from(&parts.method) {
            Ok(method) => self.dispatch(method, parts, body).await,
            Err(()) => {
                let path = parts.uri.path();
                let allowed = self.allowed(path);
                if allowed.is_empty() {
                    not_found(parts.method.as_str(), path)
                } else {
                    method_not_allowed(&allowed)
                }
            }
        }
    }

    async fn dispatch(&self, method: Method, parts: http::request::Parts, body: Bytes) -> Response {
        let path = parts.uri.path().to_owned();
        let (handler, params) = match self.lookup(method, &path) {
            Lookup::Found(handler, params) => (handler, params),
            Lookup::MethodNotAllowed(allowed) => return method_not_allowed(&allowed),
            Lookup::NotFound => return not_found(parts.method.as_str(), &path),
        };

        let json = if self.json_bodies {
            match middleware::json::parse(&parts.headers, &body) {
                Ok(json) => json,
                Err(rejection) => return rejection,
            }
        } else {
            None
        };

        let mut req = Request::new(method, path, parts.headers, body, params);
        req.json = json;
        handler.call(req).await
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

fn not_found(method: &str, path: &str) -> Response {
    Response::builder()
        .status(Status::NotFound)
        .text(format!("Cannot {method} {path}"))
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
    Response::builder()
        .status(Status::MethodNotAllowed)
        .header("allow", &allow)
        .no_body()
}

/// Rewrites Express-style `:name` segments into matchit's `{name}` syntax.
fn normalize_pattern(path: &str) -> String {
    path.split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => format!("{{{name}}}"),
            _ => segment.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("/")
}
