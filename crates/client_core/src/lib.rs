use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use shared::{
    domain::{
        ClassSummary, ContactField, ContactRequest, ContactSuccess, SubmissionStatus,
        CONTACT_FAILURE_FALLBACK,
    },
    error::{ContactErrorBody, ContactRejection},
};
use thiserror::Error;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

/// The in-progress contact form. Owned by the client; the UI keeps its own
/// edit buffers and forwards changes field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactDraft {
    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.message.is_empty()
    }

    fn to_request(&self) -> ContactRequest {
        ContactRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        }
    }
}

/// Change notifications for UI layers. Sent best-effort; a subscriber that
/// lags simply resynchronizes from the snapshot getters.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    ClassesLoaded { classes: Vec<ClassSummary> },
    SubmissionStatusChanged { status: Option<SubmissionStatus> },
    ContactDraftReset,
}

#[derive(Debug, Error)]
enum SubmitFailure {
    #[error(transparent)]
    Rejected(#[from] ContactRejection),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

struct StudioState {
    classes: Vec<ClassSummary>,
    classes_load_started: bool,
    draft: ContactDraft,
    submission_status: Option<SubmissionStatus>,
    // Monotonic per-submission counter backing the latest-attempt guard.
    latest_attempt: u64,
}

/// Client for the studio's two collaborator endpoints: the classes listing
/// and the contact form.
///
/// The classes collection, the draft, and the submission status live behind
/// one lock and are mutated only by this client's operations and completion
/// handlers. Overlapping submissions are allowed; each attempt carries a
/// number and a completion reconciles state only while its attempt is still
/// the latest, so a slow early response can never overwrite a newer result.
pub struct StudioClient {
    http: Client,
    base_url: String,
    inner: Mutex<StudioState>,
    latest_submission: Mutex<Option<JoinHandle<()>>>,
    events: broadcast::Sender<ClientEvent>,
}

impl StudioClient {
    pub fn new(base_url: impl Into<String>) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            http: Client::new(),
            base_url: base_url.into(),
            inner: Mutex::new(StudioState {
                classes: Vec::new(),
                classes_load_started: false,
                draft: ContactDraft::default(),
                submission_status: None,
                latest_attempt: 0,
            }),
            latest_submission: Mutex::new(None),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub async fn classes(&self) -> Vec<ClassSummary> {
        self.inner.lock().await.classes.clone()
    }

    pub async fn draft(&self) -> ContactDraft {
        self.inner.lock().await.draft.clone()
    }

    pub async fn submission_status(&self) -> Option<SubmissionStatus> {
        self.inner.lock().await.submission_status.clone()
    }

    /// Fetches the class listing from the collaborator, exactly once. The
    /// collection goes from empty to populated in server order, or stays
    /// empty on any failure; failures are logged for operators and never
    /// surfaced to the caller. Repeat calls are no-ops.
    pub async fn load_classes(&self) {
        {
            let mut guard = self.inner.lock().await;
            if guard.classes_load_started {
                debug!("classes already requested once; ignoring repeat load");
                return;
            }
            guard.classes_load_started = true;
        }

        match self.fetch_classes().await {
            Ok(classes) => {
                info!(count = classes.len(), "classes loaded");
                {
                    let mut guard = self.inner.lock().await;
                    guard.classes = classes.clone();
                }
                let _ = self.events.send(ClientEvent::ClassesLoaded { classes });
            }
            Err(err) => {
                warn!("failed to load classes: {err:#}");
            }
        }
    }

    async fn fetch_classes(&self) -> Result<Vec<ClassSummary>> {
        let classes = self
            .http
            .get(format!("{}/api/classes", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("classes body did not match the expected shape")?;
        Ok(classes)
    }

    /// Local draft mutation only; no network activity and no validation.
    pub async fn update_field(&self, field: ContactField, value: impl Into<String>) {
        let mut guard = self.inner.lock().await;
        guard.draft.set(field, value.into());
    }

    /// Submits the current draft to the contact endpoint.
    ///
    /// Any prior status is cleared before the request is issued, so a second
    /// attempt never shows stale results while in flight. The request runs on
    /// a spawned task; on success the draft resets and the confirmation
    /// message becomes the status, on rejection or transport failure the
    /// draft is left intact for retry and an error message becomes the
    /// status. A superseded attempt is never aborted; its result is dropped
    /// by the latest-attempt guard when it resolves.
    pub async fn submit_contact(self: &Arc<Self>) {
        let (attempt, request) = {
            let mut guard = self.inner.lock().await;
            guard.latest_attempt += 1;
            guard.submission_status = None;
            (guard.latest_attempt, guard.draft.to_request())
        };
        let _ = self
            .events
            .send(ClientEvent::SubmissionStatusChanged { status: None });

        let client = Arc::clone(self);
        let task = tokio::spawn(async move {
            let status = match client.post_contact(&request).await {
                Ok(confirmation) => SubmissionStatus::Success(confirmation),
                Err(SubmitFailure::Rejected(rejection)) => {
                    SubmissionStatus::Error(rejection.message)
                }
                Err(SubmitFailure::Transport(err)) => {
                    SubmissionStatus::Error(describe_transport_failure(&err))
                }
            };
            client.reconcile_submission(attempt, status).await;
        });

        // Dropping the previous handle detaches it; the task still runs to
        // completion and the attempt guard discards its result.
        let _ = self.latest_submission.lock().await.replace(task);
    }

    async fn post_contact(&self, request: &ContactRequest) -> Result<String, SubmitFailure> {
        let response = self
            .http
            .post(format!("{}/api/contact", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .json::<ContactErrorBody>()
                .await
                .unwrap_or_default();
            return Err(ContactRejection::new(status.as_u16(), body).into());
        }

        let body: ContactSuccess = response.json().await?;
        Ok(body.message)
    }

    async fn reconcile_submission(&self, attempt: u64, status: SubmissionStatus) {
        let draft_reset = {
            let mut guard = self.inner.lock().await;
            if attempt != guard.latest_attempt {
                debug!(
                    attempt,
                    latest = guard.latest_attempt,
                    "discarding stale submission result"
                );
                return;
            }
            let draft_reset = status.is_success();
            if draft_reset {
                guard.draft = ContactDraft::default();
            }
            guard.submission_status = Some(status.clone());
            draft_reset
        };

        if draft_reset {
            let _ = self.events.send(ClientEvent::ContactDraftReset);
        }
        let _ = self.events.send(ClientEvent::SubmissionStatusChanged {
            status: Some(status),
        });
    }
}

fn describe_transport_failure(err: &reqwest::Error) -> String {
    let description = err.to_string();
    if description.trim().is_empty() {
        CONTACT_FAILURE_FALLBACK.to_string()
    } else {
        description
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
