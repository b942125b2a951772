mod backend_bridge;
mod controller;
mod ui;

use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::{commands::BackendCommand, runtime};
use controller::events::UiEvent;
use ui::{DojoApp, StartupConfig};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = StartupConfig::default();
    let window_title = config.window_title.clone();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::spawn_backend_thread(config.collaborator_base_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(window_title.clone())
            .with_inner_size(config.initial_window_size)
            .with_min_inner_size([560.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        &window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(DojoApp::new(cmd_tx, ui_rx)))),
    )
}
