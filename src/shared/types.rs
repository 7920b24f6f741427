use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned for every non-2xx API response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            errors,
        }
    }
}
