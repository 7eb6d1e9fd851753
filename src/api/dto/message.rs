//! Success response body shared by write endpoints.

use serde::Serialize;

/// `{"message": "..."}` returned on successful create/update.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
