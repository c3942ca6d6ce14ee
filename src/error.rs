//! Unified error type.

use thiserror::Error;

use crate::method::Method;

/// The error type returned by the crate's fallible infrastructure operations.
///
/// Application-level errors (404, 400, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// setup and infrastructure failures: a rejected route, a bad `PORT`, or
/// binding to a port.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("route `{method} {path}` rejected: {source}")]
    Route {
        method: Method,
        path: String,
        #[source]
        source: matchit::InsertError,
    },

    #[error("config: {0}")]
    Config(String),
}
