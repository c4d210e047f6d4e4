#![allow(missing_docs, reason = "TODO document the remaining public items")]

pub mod application;
pub mod headless;
pub mod input;
pub mod logging;

use log::{info, warn};
use track_framework_common::event::ApplicationEvent;
use winit::event_loop::EventLoopProxy;

/// Forwards Ctrl-C to the window event loop as an exit request.
///
/// # Errors
///
/// Fails if a Ctrl-C handler has already been installed by this process.
pub fn register_ctrlc(proxy: EventLoopProxy<ApplicationEvent>) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        info!("Ctrl-C received, requesting exit");
        if proxy.send_event(ApplicationEvent::Exit).is_err() {
            warn!("event loop already closed");
        }
    })
}
