use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub name: String,
}

/// Payload schema for creating or replacing a customer.
///
/// `name` is required and at least 3 characters long. Fields other than
/// `name` are rejected.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CustomerInput {
    #[validate(
        required(message = "name is required"),
        length(min = 3, message = "name must be at least 3 characters long")
    )]
    pub name: Option<String>,
}
