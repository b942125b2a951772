//! Events flowing from the backend worker to the UI thread, and the error
//! categorization used for operator-facing status text.

use shared::domain::{ClassId, ClassSummary, SubmissionStatus};

use crate::ui::app::PhotoImage;

pub enum UiEvent {
    Info(String),
    Error(UiError),
    ClassesLoaded(Vec<ClassSummary>),
    SubmissionStatusChanged(Option<SubmissionStatus>),
    ContactDraftReset,
    ClassPhotoLoaded { class_id: ClassId, image: PhotoImage },
    ClassPhotoFailed { class_id: ClassId, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("unreachable")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn label(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Transport => "Transport",
            UiErrorCategory::Validation => "Validation",
            UiErrorCategory::Unknown => "Unexpected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_connection_failures_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "connection refused while reaching collaborator",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.label(), "Transport");
    }

    #[test]
    fn classifies_malformed_payloads_as_validation() {
        let err = UiError::from_message(UiErrorContext::General, "malformed classes body");
        assert_eq!(err.category(), UiErrorCategory::Validation);
    }

    #[test]
    fn startup_failures_keep_their_context() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: failed to build runtime",
        );
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
        assert_eq!(err.category(), UiErrorCategory::Unknown);
    }
}
