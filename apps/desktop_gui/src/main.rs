mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::{
    commands::BackendCommand,
    runtime::{self, BridgeSettings},
    sources,
};
use config::{apply_env_overrides, load_startup_config, CliArgs};
use controller::events::UiEvent;
use ui::{GaminatorApp, PersistedUiState, APP_TITLE, UI_STATE_STORAGE_KEY};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_startup_config(args.config.as_deref())?;
    let mut startup = loaded.config;
    let rejected = apply_env_overrides(&mut startup, |key| std::env::var(key).ok());
    args.apply_to(&mut startup);

    // The filter itself comes from config, so config diagnostics are logged here.
    tracing_subscriber::fmt()
        .with_env_filter(startup.log_filter.as_str())
        .init();
    match &loaded.path {
        Some(path) => tracing::info!(path = %path.display(), "loaded config file"),
        None => tracing::debug!("no config file, using defaults"),
    }
    for entry in &rejected {
        tracing::warn!(
            var = entry.var,
            value = %entry.value,
            "ignoring environment override: {}",
            entry.reason
        );
    }
    tracing::info!(
        command_log = ?startup.command_log,
        policy = ?startup.ingest_policy,
        "starting dashboard"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let source = sources::source_for(startup.command_log.as_deref());
    runtime::launch(
        cmd_rx,
        ui_tx,
        source,
        BridgeSettings {
            policy: startup.ingest_policy,
            refresh_interval: startup.refresh_interval(),
        },
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([startup.window_width, startup.window_height])
            .with_min_inner_size([760.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(UI_STATE_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedUiState>(&text).ok())
            });
            Ok(Box::new(GaminatorApp::new(cmd_tx, ui_rx, persisted)))
        }),
    )
    .map_err(|err| anyhow!("dashboard window failed: {err}"))
}
