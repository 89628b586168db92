//! ETL Monitor - Main Entry Point
//!
//! Interactive DAG view of ETL process flows.

use etl_monitor::{
    config::{self, MonitorConfig},
    Fixture, MonitorApp, NodeStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = init_logging();

    tracing::info!("Starting ETL Monitor");

    let config = MonitorConfig::load_or_default();

    // Configured fixture, falling back to the built-in flow map
    let (store, source) = match config.fixture.path.clone() {
        Some(path) => match Fixture::load(&path).and_then(NodeStore::from_fixture) {
            Ok(store) => (store, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load fixture, using built-in flow map: {}", e);
                (NodeStore::from_fixture(Fixture::builtin())?, None)
            }
        },
        None => (NodeStore::from_fixture(Fixture::builtin())?, None),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("ETL Monitor"),
        ..Default::default()
    };

    eframe::run_native(
        "ETL Monitor",
        native_options,
        Box::new(move |cc| Ok(Box::new(MonitorApp::new(cc, config, store, source)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    tracing::info!("Shutting down...");
    Ok(())
}

/// Console output plus a daily log file in the app data directory
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,etl_monitor=debug"));

    let (file_layer, guard) = match config::ensure_app_data_dir() {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir.join(config::LOG_DIR), "etl-monitor.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("File logging disabled: {}", e);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}
