use crate::{event::ApplicationEvent, input::InputState, render::RenderBackend};

/// Something that is stepped once per frame by the application shell.
pub trait FrameHandler {
    /// Advances the state by `delta_time` seconds.
    ///
    /// Returning an event asks the shell to act on it (e.g. shut down).
    fn update(&mut self, delta_time: f32, input: &dyn InputState) -> Option<ApplicationEvent>;

    fn render(&mut self, input: &dyn InputState, backend: &mut dyn RenderBackend);

    /// The drawable surface changed its size.
    fn resize(&mut self, _dimensions: (u32, u32)) {}
}
