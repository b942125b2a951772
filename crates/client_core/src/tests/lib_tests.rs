use super::*;
use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use shared::domain::{ClassId, CONTACT_REJECTED_FALLBACK};
use tokio::{net::TcpListener, sync::oneshot, time::timeout};

#[derive(Clone)]
enum ClassesResponse {
    Listing(Vec<ClassSummary>),
    ServerError,
    MalformedBody,
}

#[derive(Clone)]
struct ClassesServerState {
    response: ClassesResponse,
    hits: Arc<Mutex<u32>>,
}

async fn handle_list_classes(State(state): State<ClassesServerState>) -> axum::response::Response {
    *state.hits.lock().await += 1;
    match &state.response {
        ClassesResponse::Listing(classes) => Json(classes.clone()).into_response(),
        ClassesResponse::ServerError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "database offline" })),
        )
            .into_response(),
        ClassesResponse::MalformedBody => (StatusCode::OK, "this is not json").into_response(),
    }
}

async fn spawn_classes_server(response: ClassesResponse) -> Result<(String, Arc<Mutex<u32>>)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let hits = Arc::new(Mutex::new(0));
    let state = ClassesServerState {
        response,
        hits: Arc::clone(&hits),
    };
    let app = Router::new()
        .route("/api/classes", get(handle_list_classes))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), hits))
}

#[derive(Clone)]
enum ContactResponse {
    // Confirmation message echoes the submitted name so overlapping
    // submissions produce distinguishable results.
    Success,
    RejectedWith(String),
    RejectedEmptyBody,
}

#[derive(Clone)]
struct ContactServerState {
    response: ContactResponse,
    received: Arc<Mutex<Vec<ContactRequest>>>,
    // Gate keyed by submitted name: the handler holds its response until the
    // matching sender fires, letting tests control completion order.
    gates: Arc<Mutex<HashMap<String, oneshot::Receiver<()>>>>,
}

async fn handle_contact(
    State(state): State<ContactServerState>,
    Json(payload): Json<ContactRequest>,
) -> axum::response::Response {
    let gate = state.gates.lock().await.remove(&payload.name);
    state.received.lock().await.push(payload.clone());
    if let Some(gate) = gate {
        let _ = gate.await;
    }
    match &state.response {
        ContactResponse::Success => Json(serde_json::json!({
            "message": format!("Thanks, {}! We'll be in touch.", payload.name)
        }))
        .into_response(),
        ContactResponse::RejectedWith(error) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": error })),
        )
            .into_response(),
        ContactResponse::RejectedEmptyBody => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({})),
        )
            .into_response(),
    }
}

async fn spawn_contact_server(response: ContactResponse) -> Result<(String, ContactServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ContactServerState {
        response,
        received: Arc::new(Mutex::new(Vec::new())),
        gates: Arc::new(Mutex::new(HashMap::new())),
    };
    let app = Router::new()
        .route("/api/contact", post(handle_contact))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

/// Binds and immediately drops a listener so the address refuses connections.
async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

fn sample_classes() -> Vec<ClassSummary> {
    vec![
        ClassSummary {
            id: ClassId(1),
            name: "Beginner Karate".to_string(),
            description: "Fundamentals of stance, blocks, and strikes.".to_string(),
            schedule: "Mon-Fri 6pm".to_string(),
            age_group: "All ages".to_string(),
            image_url: None,
        },
        ClassSummary {
            id: ClassId(2),
            name: "Intermediate Karate".to_string(),
            description: "Sparring drills and kata refinement.".to_string(),
            schedule: "Mon-Fri 7:30pm".to_string(),
            age_group: "12+".to_string(),
            image_url: Some("https://cdn.example.com/intermediate.jpg".to_string()),
        },
        ClassSummary {
            id: ClassId(3),
            name: "Kids Class".to_string(),
            description: "Coordination and discipline for young students.".to_string(),
            schedule: "Sat 1pm".to_string(),
            age_group: "5-11".to_string(),
            image_url: None,
        },
    ]
}

async fn fill_draft(client: &Arc<StudioClient>, name: &str) {
    client.update_field(ContactField::Name, name).await;
    client
        .update_field(ContactField::Email, "student@example.com")
        .await;
    client
        .update_field(ContactField::Message, "Interested in joining a class.")
        .await;
}

/// Waits for the next resolved (non-cleared) submission status event.
async fn wait_for_resolved_status(
    events: &mut broadcast::Receiver<ClientEvent>,
) -> SubmissionStatus {
    loop {
        let event = timeout(Duration::from_secs(5), events.recv())
            .await
            .expect("timed out waiting for event")
            .expect("event channel closed");
        if let ClientEvent::SubmissionStatusChanged {
            status: Some(status),
        } = event
        {
            return status;
        }
    }
}

async fn wait_for_received(state: &ContactServerState, count: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if state.received.lock().await.len() >= count {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "server never received {count} submissions"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn load_classes_replaces_collection_in_server_order() {
    let listing = sample_classes();
    let (base_url, _hits) = spawn_classes_server(ClassesResponse::Listing(listing.clone()))
        .await
        .expect("spawn server");
    let client = StudioClient::new(base_url);

    client.load_classes().await;

    assert_eq!(client.classes().await, listing);
}

#[tokio::test]
async fn load_classes_issues_a_single_request() {
    let (base_url, hits) = spawn_classes_server(ClassesResponse::Listing(sample_classes()))
        .await
        .expect("spawn server");
    let client = StudioClient::new(base_url);

    client.load_classes().await;
    client.load_classes().await;

    assert_eq!(*hits.lock().await, 1);
    assert_eq!(client.classes().await.len(), 3);
}

#[tokio::test]
async fn load_classes_leaves_collection_empty_on_server_error() {
    let (base_url, hits) = spawn_classes_server(ClassesResponse::ServerError)
        .await
        .expect("spawn server");
    let client = StudioClient::new(base_url);

    client.load_classes().await;

    assert_eq!(*hits.lock().await, 1);
    assert!(client.classes().await.is_empty());
}

#[tokio::test]
async fn load_classes_leaves_collection_empty_on_malformed_body() {
    let (base_url, _hits) = spawn_classes_server(ClassesResponse::MalformedBody)
        .await
        .expect("spawn server");
    let client = StudioClient::new(base_url);

    client.load_classes().await;

    assert!(client.classes().await.is_empty());
}

#[tokio::test]
async fn load_classes_survives_unreachable_collaborator() {
    let client = StudioClient::new(unreachable_base_url().await);

    client.load_classes().await;

    assert!(client.classes().await.is_empty());
}

#[tokio::test]
async fn successful_submission_resets_draft_and_reports_confirmation() {
    let (base_url, server) = spawn_contact_server(ContactResponse::Success)
        .await
        .expect("spawn server");
    let client = StudioClient::new(base_url);
    let mut events = client.subscribe_events();

    fill_draft(&client, "Aiko").await;
    client.submit_contact().await;

    let status = wait_for_resolved_status(&mut events).await;
    assert_eq!(
        status,
        SubmissionStatus::Success("Thanks, Aiko! We'll be in touch.".to_string())
    );
    assert_eq!(client.draft().await, ContactDraft::default());

    let received = server.received.lock().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].name, "Aiko");
    assert_eq!(received[0].email, "student@example.com");
    assert_eq!(received[0].message, "Interested in joining a class.");
}

#[tokio::test]
async fn rejected_submission_keeps_draft_and_uses_server_error() {
    let (base_url, _server) =
        spawn_contact_server(ContactResponse::RejectedWith("Email is invalid".to_string()))
            .await
            .expect("spawn server");
    let client = StudioClient::new(base_url);
    let mut events = client.subscribe_events();

    fill_draft(&client, "Aiko").await;
    client.submit_contact().await;

    let status = wait_for_resolved_status(&mut events).await;
    assert_eq!(
        status,
        SubmissionStatus::Error("Email is invalid".to_string())
    );

    let draft = client.draft().await;
    assert_eq!(draft.name, "Aiko");
    assert_eq!(draft.email, "student@example.com");
    assert_eq!(draft.message, "Interested in joining a class.");
}

#[tokio::test]
async fn rejection_without_error_field_uses_generic_fallback() {
    let (base_url, _server) = spawn_contact_server(ContactResponse::RejectedEmptyBody)
        .await
        .expect("spawn server");
    let client = StudioClient::new(base_url);
    let mut events = client.subscribe_events();

    fill_draft(&client, "Aiko").await;
    client.submit_contact().await;

    let status = wait_for_resolved_status(&mut events).await;
    assert_eq!(
        status,
        SubmissionStatus::Error(CONTACT_REJECTED_FALLBACK.to_string())
    );
}

#[tokio::test]
async fn transport_failure_surfaces_description_and_keeps_draft() {
    let client = StudioClient::new(unreachable_base_url().await);
    let mut events = client.subscribe_events();

    fill_draft(&client, "Aiko").await;
    client.submit_contact().await;

    let status = wait_for_resolved_status(&mut events).await;
    match status {
        SubmissionStatus::Error(message) => assert!(!message.is_empty()),
        other => panic!("expected error status, got {other:?}"),
    }

    let draft = client.draft().await;
    assert_eq!(draft.name, "Aiko");
}

#[tokio::test]
async fn submission_clears_previous_status_while_in_flight() {
    let (base_url, server) = spawn_contact_server(ContactResponse::Success)
        .await
        .expect("spawn server");
    let client = StudioClient::new(base_url);
    let mut events = client.subscribe_events();

    fill_draft(&client, "first").await;
    client.submit_contact().await;
    let first = wait_for_resolved_status(&mut events).await;
    assert!(first.is_success());

    let (release, gate) = oneshot::channel();
    server
        .gates
        .lock()
        .await
        .insert("second".to_string(), gate);

    fill_draft(&client, "second").await;
    client.submit_contact().await;
    wait_for_received(&server, 2).await;

    // The prior success must not linger while the new attempt is pending.
    assert_eq!(client.submission_status().await, None);

    release.send(()).expect("release gate");
    let second = wait_for_resolved_status(&mut events).await;
    assert_eq!(
        second,
        SubmissionStatus::Success("Thanks, second! We'll be in touch.".to_string())
    );
}

#[tokio::test]
async fn stale_submission_result_is_discarded() {
    let (base_url, server) = spawn_contact_server(ContactResponse::Success)
        .await
        .expect("spawn server");
    let client = StudioClient::new(base_url);
    let mut events = client.subscribe_events();

    let (release_first, first_gate) = oneshot::channel();
    let (release_second, second_gate) = oneshot::channel();
    {
        let mut gates = server.gates.lock().await;
        gates.insert("first".to_string(), first_gate);
        gates.insert("second".to_string(), second_gate);
    }

    fill_draft(&client, "first").await;
    client.submit_contact().await;
    wait_for_received(&server, 1).await;

    fill_draft(&client, "second").await;
    client.submit_contact().await;
    wait_for_received(&server, 2).await;

    // Resolve the newer attempt first, then let the older one finish late.
    release_second.send(()).expect("release second gate");
    let resolved = wait_for_resolved_status(&mut events).await;
    assert_eq!(
        resolved,
        SubmissionStatus::Success("Thanks, second! We'll be in touch.".to_string())
    );
    release_first.send(()).expect("release first gate");

    // The stale completion must emit nothing and leave state untouched.
    let late = timeout(Duration::from_millis(300), async {
        wait_for_resolved_status(&mut events).await
    })
    .await;
    assert!(late.is_err(), "stale submission result leaked: {late:?}");
    assert_eq!(
        client.submission_status().await,
        Some(SubmissionStatus::Success(
            "Thanks, second! We'll be in touch.".to_string()
        ))
    );
    assert_eq!(client.draft().await, ContactDraft::default());
}

#[tokio::test]
async fn update_field_is_last_write_wins_per_field() {
    let client = StudioClient::new("http://127.0.0.1:1".to_string());

    client.update_field(ContactField::Name, "A").await;
    client.update_field(ContactField::Name, "Ai").await;
    client.update_field(ContactField::Name, "Aiko").await;
    client.update_field(ContactField::Email, "a@example.com").await;

    let draft = client.draft().await;
    assert_eq!(draft.name, "Aiko");
    assert_eq!(draft.email, "a@example.com");
    assert_eq!(draft.message, "");
    assert!(!draft.is_complete());

    // Draft edits never touch the classes collection.
    assert!(client.classes().await.is_empty());
}

#[test]
fn draft_completeness_requires_all_three_fields() {
    let mut draft = ContactDraft::default();
    assert!(!draft.is_complete());
    draft.set(ContactField::Name, "Aiko".to_string());
    draft.set(ContactField::Email, "aiko@example.com".to_string());
    assert!(!draft.is_complete());
    draft.set(ContactField::Message, "Hello".to_string());
    assert!(draft.is_complete());
}
