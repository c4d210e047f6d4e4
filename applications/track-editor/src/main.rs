#![allow(missing_docs, reason = "binary crate")]

use std::{fs, path::Path};

use anyhow::Context;
use engine_track_editor::{EditorConfig, ScreenManager};
use log::{debug, info};
use track_framework::{application::Application, logging::init_logger, register_ctrlc};
use winit::event_loop::{ControlFlow, EventLoop};

const CONFIG_PATH: &str = "applications/track-editor/config/track-editor.json";

fn main() -> anyhow::Result<()> {
    init_logger();

    let config = read_config(Path::new(CONFIG_PATH))?;

    let window_event_loop = EventLoop::with_user_event()
        .build()
        .context("cannot create the window event loop")?;
    window_event_loop.set_control_flow(ControlFlow::Poll);
    register_ctrlc(window_event_loop.create_proxy()).context("cannot install Ctrl-C handler")?;

    let title = config.window.title.clone();
    let mut application = Application::new(title, ScreenManager::new(config));

    info!("main: Entering event loop...");
    window_event_loop
        .run_app(&mut application)
        .context("window event loop failed")?;
    debug!("main: window event loop exited");
    Ok(())
}

/// Reads the configuration file, falling back to the defaults if there is none.
fn read_config(path: &Path) -> anyhow::Result<EditorConfig> {
    if !path.exists() {
        info!("no configuration at {}, using defaults", path.display());
        return Ok(EditorConfig::default());
    }
    let json = fs::read_to_string(path)
        .with_context(|| format!("cannot read configuration {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid configuration {}", path.display()))
}
