//! Star Pusher level editor
//!
//! Paint puzzle levels on a fixed board and keep them in a shared plain-text
//! catalog, one blank-line separated block per level.
//!
//! Controls: left click places the selected tile, right click clears it,
//! mouse wheel cycles the tile, arrow keys pan, Escape quits. File commands
//! are listed at the bottom of the window.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod catalog;
mod config;
mod editor;
mod level;
mod storage;
mod ui;

use app::AppState;
use config::EditorConfig;
use editor::{EditSession, TileTextures};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use macroquad::prelude::*;
use storage::LocalStorage;

fn window_conf(config: &EditorConfig) -> Conf {
    Conf {
        window_title: format!("Star Pusher Editor v{}", VERSION),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Start file logging (rotated, warnings echoed to stderr), or stderr only
/// when no log directory is available
fn init_logging() -> Option<LoggerHandle> {
    let logger = match Logger::try_with_env_or_str("info") {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Invalid log specification: {}", e);
            return None;
        }
    };

    let started = match config::log_dir() {
        Some(log_dir) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(&log_dir)
                    .basename("star-pusher-editor")
                    .suffix("log")
                    .suppress_timestamp(),
            )
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .duplicate_to_stderr(Duplicate::Warn)
            .start(),
        None => logger.log_to_stderr().start(),
    };

    match started {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to start logger: {}", e);
            None
        }
    }
}

/// Open the configured catalog, creating an empty one first if allowed
fn open_session(config: &EditorConfig) -> Option<EditSession> {
    let storage = LocalStorage::new();

    if config.create_catalog_if_missing {
        match storage.create_empty(&config.catalog_path) {
            Ok(true) => log::info!("Created empty catalog {}", config.catalog_path),
            Ok(false) => {}
            Err(e) => log::warn!("Could not create catalog {}: {}", config.catalog_path, e),
        }
    }

    match EditSession::open(storage, &config.catalog_path) {
        Ok(session) => Some(session),
        Err(e) => {
            log::error!("Cannot open level catalog: {}", e);
            None
        }
    }
}

async fn run(config: EditorConfig, session: EditSession) {
    let textures = TileTextures::load(&config.tile_images).await;
    let mut app = AppState::new(config, session, textures);

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        app.update();
        app.draw();

        next_frame().await;
    }

    if app.session.is_dirty() {
        match app.session.current_index() {
            0 => log::warn!("Exiting with an unsaved new level"),
            i => log::warn!("Exiting with unsaved edits to level {}", i),
        }
    }
    log::info!("Exiting");
}

fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let _logger = init_logging();
    log::info!("Starting Star Pusher Editor {}", VERSION);

    let config = EditorConfig::discover();
    let Some(session) = open_session(&config) else {
        return;
    };

    macroquad::Window::from_config(window_conf(&config), run(config, session));
}
