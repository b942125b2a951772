use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(ClassId);

/// One class as served by `GET /api/classes`. Entries are opaque to the
/// client: they are rendered as received and never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSummary {
    pub id: ClassId,
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub age_group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

/// JSON body for `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Success body of the contact endpoint: a human-readable confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSuccess {
    pub message: String,
}

/// Outcome of the most recent submission attempt. Overwritten, never
/// accumulated: at most one of these is visible at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum SubmissionStatus {
    Success(String),
    Error(String),
}

impl SubmissionStatus {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Shown when the contact endpoint rejects a submission without an `error`
/// field in its body.
pub const CONTACT_REJECTED_FALLBACK: &str = "Failed to submit contact form";

/// Shown when a submission fails before any response is received and the
/// transport gives no usable description.
pub const CONTACT_FAILURE_FALLBACK: &str = "An unexpected error occurred.";
