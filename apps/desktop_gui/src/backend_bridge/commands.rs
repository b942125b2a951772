//! Backend commands queued from UI to backend worker.

use shared::domain::{ClassId, ContactField};

pub enum BackendCommand {
    LoadClasses,
    UpdateContactField { field: ContactField, value: String },
    SubmitContact,
    FetchClassPhoto { class_id: ClassId, url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadClasses => "load_classes",
            Self::UpdateContactField { .. } => "update_contact_field",
            Self::SubmitContact => "submit_contact",
            Self::FetchClassPhoto { .. } => "fetch_class_photo",
        }
    }
}
