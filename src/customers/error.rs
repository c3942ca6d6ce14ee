use thiserror::Error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::validation::ValidationFailure;

/// Errors a customers handler answers with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("The customer with the given ID was not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => Response::builder()
                .status(Status::NotFound)
                .text(ApiError::NotFound.to_string()),
            Self::Validation(failure) => Response::builder()
                .status(Status::BadRequest)
                .json_value(&serde_json::json!({
                    "error": failure.to_string(),
                    "details": failure.details(),
                })),
        }
    }
}
