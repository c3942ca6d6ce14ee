//! JSON body parsing.
//!
//! Runs only for requests whose `content-type` is `application/json` or a
//! `+json` suffix type. Other requests reach the handler with
//! [`Request::json`](crate::Request::json) returning `None`.

use bytes::Bytes;
use http::HeaderMap;
use http::header::CONTENT_TYPE;
use serde_json::{Map, Value};
use tracing::debug;

use crate::response::Response;
use crate::status::Status;

/// Whether the request declares a JSON payload.
pub fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Parses the body of a JSON request.
///
/// `Ok(None)` for non-JSON requests, `Ok(Some({}))` for an empty JSON body,
/// and a ready-made `400 Bad Request` for malformed input.
pub fn parse(headers: &HeaderMap, body: &Bytes) -> Result<Option<Value>, Response> {
    if !is_json(headers) {
        return Ok(None);
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Some(Value::Object(Map::new())));
    }
    serde_json::from_slice(body).map(Some).map_err(|e| {
        debug!("rejecting malformed JSON body: {e}");
        Response::builder()
            .status(Status::BadRequest)
            .json_value(&serde_json::json!({
                "error": "malformed JSON body",
                "details": e.to_string(),
            }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(content_type: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        h
    }

    #[test]
    fn recognises_json_content_types() {
        assert!(is_json(&headers("application/json")));
        assert!(is_json(&headers("Application/JSON; charset=utf-8")));
        assert!(is_json(&headers("application/merge-patch+json")));
        assert!(!is_json(&headers("text/plain")));
        assert!(!is_json(&HeaderMap::new()));
    }

    #[test]
    fn skips_non_json_requests() {
        let body = Bytes::from_static(b"{\"name\":\"Alice\"}");
        assert_eq!(parse(&headers("text/plain"), &body).ok(), Some(None));
    }

    #[test]
    fn empty_json_body_is_an_empty_object() {
        let parsed = parse(&headers("application/json"), &Bytes::new()).ok().flatten();
        assert_eq!(parsed, Some(serde_json::json!({})));
    }

    #[test]
    fn malformed_json_is_a_bad_request() {
        let body = Bytes::from_static(b"{\"name\":");
        match parse(&headers("application/json"), &body) {
            Err(res) => assert_eq!(res.status_code(), 400),
            Ok(v) => panic!("expected rejection, got {v:?}"),
        }
    }
}
