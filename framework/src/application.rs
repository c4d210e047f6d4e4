use std::time::{Duration, Instant};

use log::{debug, error, info, trace};
use track_framework_common::{event::ApplicationEvent, frame::FrameHandler};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::{
    headless::{FrameStatistics, HeadlessRenderer},
    input::InputCollector,
};

/// Longest time step handed to the frame handler. Prevents huge jumps after the window
/// was dragged or the process got suspended.
const MAX_FRAME_TIME: Duration = Duration::from_millis(250);

/// The window shell: owns the window, collects input and steps the frame handler once per
/// redraw.
pub struct Application<Handler: FrameHandler> {
    handler: Handler,
    renderer: HeadlessRenderer,
    input: InputCollector,
    window: Option<Window>,
    title: String,
    last_frame: Instant,
    frame_counter: u32,
    frame_time: Instant,
    frame_statistics: FrameStatistics,
}

impl<Handler: FrameHandler> Application<Handler> {
    pub fn new(title: String, handler: Handler) -> Self {
        Self {
            handler,
            renderer: HeadlessRenderer::new((0, 0)),
            input: InputCollector::default(),
            window: None,
            title,
            last_frame: Instant::now(),
            frame_counter: 0,
            frame_time: Instant::now(),
            frame_statistics: FrameStatistics::default(),
        }
    }

    fn update_fps(&mut self) {
        self.frame_counter += 1;
        let span = self.frame_time.elapsed();
        if span >= Duration::from_secs(1) {
            #[expect(
                clippy::cast_precision_loss,
                reason = "frame counts stay far below 2^24"
            )]
            let fps = (self.frame_counter as f32 / span.as_secs_f32()).round();
            debug!(
                "{fps} fps, last frame: {} opaque / {} blended draws",
                self.frame_statistics.opaque_draws, self.frame_statistics.blended_draws
            );
            self.frame_counter = 0;
            self.frame_time += span;
        }
    }

    fn step_frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta_time = now.duration_since(self.last_frame).min(MAX_FRAME_TIME);
        self.last_frame = now;

        let input = self.input.snapshot();
        if let Some(ApplicationEvent::Exit) =
            self.handler.update(delta_time.as_secs_f32(), input)
        {
            info!("Frame handler requested exit. Shutting down event loop.");
            event_loop.exit();
            return;
        }
        self.handler.render(input, &mut self.renderer);
        self.frame_statistics = self.renderer.finish_frame();
        self.input.end_frame();
        self.update_fps();
    }
}

impl<Handler: FrameHandler> ApplicationHandler<ApplicationEvent> for Application<Handler> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes().with_title(&self.title);
        match event_loop.create_window(attributes) {
            Ok(window) => {
                let size = window.inner_size();
                self.renderer.resize((size.width, size.height));
                self.handler.resize((size.width, size.height));
                window.request_redraw();
                self.window = Some(window);
                self.last_frame = Instant::now();
            }
            Err(error) => {
                error!("cannot create window: {error}");
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: ApplicationEvent) {
        match event {
            ApplicationEvent::Exit => {
                info!("Window event loop received an ExitEvent. Shutting down event loop.");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.input.handle_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                trace!("WindowEvent::Resized({size:?})");
                self.renderer.resize((size.width, size.height));
                self.handler.resize((size.width, size.height));
            }
            WindowEvent::CloseRequested => {
                trace!("WindowEvent::CloseRequested()");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.step_frame(event_loop);
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        trace!("window event loop is exiting");
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        trace!("window event loop was suspended");
    }
}
