//! Backend worker thread: owns the tokio runtime that executes network
//! commands on behalf of the UI thread.

use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use client_core::{ClientEvent, StudioClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::app::PhotoImage;

const CLASS_PHOTO_MAX_EDGE: u32 = 640;

pub fn spawn_backend_thread(
    base_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = StudioClient::new(base_url);
            let photo_http = reqwest::Client::new();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            let mut events = client.subscribe_events();
            let ui_tx_events = ui_tx.clone();
            tokio::spawn(async move {
                while let Ok(event) = events.recv().await {
                    let evt = match event {
                        ClientEvent::ClassesLoaded { classes } => UiEvent::ClassesLoaded(classes),
                        ClientEvent::SubmissionStatusChanged { status } => {
                            UiEvent::SubmissionStatusChanged(status)
                        }
                        ClientEvent::ContactDraftReset => UiEvent::ContactDraftReset,
                    };
                    let _ = ui_tx_events.try_send(evt);
                }
            });

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    // The load runs on its own task: the endpoint has no
                    // timeout, and a stalled fetch must not hold up later
                    // field updates or submissions.
                    BackendCommand::LoadClasses => {
                        let client = Arc::clone(&client);
                        tokio::spawn(async move {
                            client.load_classes().await;
                        });
                    }
                    BackendCommand::UpdateContactField { field, value } => {
                        client.update_field(field, value).await;
                    }
                    BackendCommand::SubmitContact => {
                        client.submit_contact().await;
                    }
                    BackendCommand::FetchClassPhoto { class_id, url } => {
                        let http = photo_http.clone();
                        let ui_tx_photo = ui_tx.clone();
                        tokio::spawn(async move {
                            match fetch_class_photo(&http, &url).await {
                                Ok(image) => {
                                    let _ = ui_tx_photo
                                        .try_send(UiEvent::ClassPhotoLoaded { class_id, image });
                                }
                                Err(err) => {
                                    tracing::warn!(
                                        class_id = class_id.0,
                                        "class photo fetch failed: {err:#}"
                                    );
                                    let _ = ui_tx_photo.try_send(UiEvent::ClassPhotoFailed {
                                        class_id,
                                        reason: format!("{err:#}"),
                                    });
                                }
                            }
                        });
                    }
                }
            }
        });
    });
}

async fn fetch_class_photo(http: &reqwest::Client, url: &str) -> Result<PhotoImage> {
    let bytes = http
        .get(url)
        .send()
        .await
        .context("photo request failed")?
        .error_for_status()
        .context("photo endpoint returned an error status")?
        .bytes()
        .await
        .context("failed to read photo body")?;
    decode_class_photo(&bytes)
}

/// Decodes and bounds a fetched photo so the UI thread only ever uploads a
/// modest RGBA buffer as a texture.
fn decode_class_photo(bytes: &[u8]) -> Result<PhotoImage> {
    let decoded = image::load_from_memory(bytes).context("failed to decode photo")?;
    let resized = decoded
        .thumbnail(CLASS_PHOTO_MAX_EDGE, CLASS_PHOTO_MAX_EDGE)
        .to_rgba8();
    Ok(PhotoImage {
        width: resized.width() as usize,
        height: resized.height() as usize,
        rgba: resized.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use axum::{routing::get, routing::post, Json, Router};
    use shared::domain::ContactField;
    use tokio::net::TcpListener;

    /// Collaborator whose classes endpoint never answers while the contact
    /// endpoint responds normally.
    async fn spawn_stalling_collaborator() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let app = Router::new()
            .route(
                "/api/classes",
                get(|| async {
                    std::future::pending::<()>().await;
                    "unreachable"
                }),
            )
            .route(
                "/api/contact",
                post(|| async { Json(serde_json::json!({ "message": "Thanks! We'll be in touch." })) }),
            );
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    #[test]
    fn stalled_classes_load_does_not_block_submissions() {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let server_runtime = tokio::runtime::Runtime::new().expect("runtime");
        let base_url = server_runtime.block_on(spawn_stalling_collaborator());

        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(16);
        let (ui_tx, ui_rx) = crossbeam_channel::bounded(64);
        spawn_backend_thread(base_url, cmd_rx, ui_tx);

        cmd_tx.send(BackendCommand::LoadClasses).expect("queue load");
        for (field, value) in [
            (ContactField::Name, "Aiko"),
            (ContactField::Email, "aiko@example.com"),
            (ContactField::Message, "Interested in joining a class."),
        ] {
            cmd_tx
                .send(BackendCommand::UpdateContactField {
                    field,
                    value: value.to_string(),
                })
                .expect("queue field update");
        }
        cmd_tx
            .send(BackendCommand::SubmitContact)
            .expect("queue submit");

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            assert!(
                !remaining.is_zero(),
                "submission never resolved behind the stalled classes load"
            );
            match ui_rx.recv_timeout(remaining) {
                Ok(UiEvent::SubmissionStatusChanged(Some(status))) => {
                    assert!(status.is_success(), "unexpected status: {status:?}");
                    break;
                }
                Ok(_) => continue,
                Err(err) => panic!("ui event channel closed early: {err}"),
            }
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let pixels = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(pixels)
            .write_to(&mut out, image::ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decodes_photo_and_preserves_small_dimensions() {
        let photo = decode_class_photo(&png_bytes(12, 8)).expect("decode");
        assert_eq!((photo.width, photo.height), (12, 8));
        assert_eq!(photo.rgba.len(), 12 * 8 * 4);
    }

    #[test]
    fn bounds_oversized_photos_to_texture_budget() {
        let photo = decode_class_photo(&png_bytes(1600, 800)).expect("decode");
        assert!(photo.width <= CLASS_PHOTO_MAX_EDGE as usize);
        assert!(photo.height <= CLASS_PHOTO_MAX_EDGE as usize);
    }

    #[test]
    fn rejects_bodies_that_are_not_images() {
        assert!(decode_class_photo(b"<html>not a photo</html>").is_err());
    }
}
