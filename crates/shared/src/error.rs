use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CONTACT_REJECTED_FALLBACK;

/// Failure body of the contact endpoint. The `error` field is optional by
/// contract; a missing field falls back to a fixed message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactErrorBody {
    pub fn into_message(self) -> String {
        self.error
            .unwrap_or_else(|| CONTACT_REJECTED_FALLBACK.to_string())
    }
}

/// A non-OK response from the contact endpoint, with the message extracted
/// from its body (or the fallback when the body carried none).
#[derive(Debug, Error)]
#[error("contact endpoint rejected submission ({status}): {message}")]
pub struct ContactRejection {
    pub status: u16,
    pub message: String,
}

impl ContactRejection {
    pub fn new(status: u16, body: ContactErrorBody) -> Self {
        Self {
            status,
            message: body.into_message(),
        }
    }
}
