//! Schema validation of JSON payloads.
//!
//! A schema is a `Deserialize + Validate` type: serde enforces the shape
//! (object, field types, no unknown fields when the type denies them) and
//! `validator` enforces the rules declared on its fields.
//!
//! ```rust
//! use customers_api::validation::validate;
//! use serde::Deserialize;
//! use validator::Validate;
//!
//! #[derive(Deserialize, Validate)]
//! struct NewCustomer {
//!     #[validate(required, length(min = 3))]
//!     name: Option<String>,
//! }
//!
//! assert!(validate::<NewCustomer>(serde_json::json!({ "name": "Alice" })).is_ok());
//! assert!(validate::<NewCustomer>(serde_json::json!({ "name": "Al" })).is_err());
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Why a payload failed its schema.
#[derive(Debug, Error)]
pub enum ValidationFailure {
    /// The payload does not have the schema's shape.
    #[error("invalid payload: {0}")]
    Shape(#[from] serde_json::Error),

    /// The payload has the right shape but breaks a field rule.
    #[error("validation failed: {0}")]
    Rules(#[from] ValidationErrors),
}

impl ValidationFailure {
    /// Machine-readable detail for the response body.
    ///
    /// Rule failures are reported per field, shape failures as the
    /// deserialiser's message.
    pub fn details(&self) -> Value {
        match self {
            Self::Shape(e) => Value::String(e.to_string()),
            Self::Rules(errors) => serde_json::to_value(errors)
                .unwrap_or_else(|_| Value::String(errors.to_string())),
        }
    }
}

/// Deserialises `value` into `T` and checks `T`'s validation rules.
///
/// Only JSON objects are accepted; serde would otherwise read a struct
/// from an array.
pub fn validate<T>(value: Value) -> Result<T, ValidationFailure>
where
    T: DeserializeOwned + Validate,
{
    if !value.is_object() {
        return Err(ValidationFailure::Shape(serde::de::Error::custom(
            "expected a JSON object",
        )));
    }
    let parsed: T = serde_json::from_value(value)?;
    parsed.validate()?;
    Ok(parsed)
}
