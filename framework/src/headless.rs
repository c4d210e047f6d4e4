use std::mem;

use glam::Mat4;
use log::trace;
use track_framework_common::render::{BlendState, ModelHandle, RenderBackend};

/// Render backend without a GPU: it tracks what would have been drawn.
///
/// Used by the application shell until a graphics backend is plugged in, and handy for
/// checking what a frame submits.
#[derive(Debug)]
pub struct HeadlessRenderer {
    dimensions: (u32, u32),
    blend_state: BlendState,
    view_projection: Mat4,
    frame: FrameStatistics,
}

/// Draw calls submitted during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStatistics {
    pub opaque_draws: u32,
    pub blended_draws: u32,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new(dimensions: (u32, u32)) -> Self {
        Self {
            dimensions,
            blend_state: BlendState::default(),
            view_projection: Mat4::IDENTITY,
            frame: FrameStatistics::default(),
        }
    }

    pub fn resize(&mut self, dimensions: (u32, u32)) {
        self.dimensions = dimensions;
    }

    #[must_use]
    pub fn blend_state(&self) -> BlendState {
        self.blend_state
    }

    /// Returns the statistics of the finished frame and starts a new one.
    pub fn finish_frame(&mut self) -> FrameStatistics {
        mem::take(&mut self.frame)
    }
}

impl RenderBackend for HeadlessRenderer {
    fn set_view_projection(&mut self, view: Mat4, projection: Mat4) {
        self.view_projection = projection * view;
    }

    fn render_model_at(&mut self, model: ModelHandle, transform: Mat4) {
        let clip_position = self.view_projection * transform.w_axis;
        trace!(
            "draw {model:?} at {} (clip {clip_position}, {:?})",
            transform.w_axis.truncate(),
            self.blend_state
        );
        match self.blend_state {
            BlendState::Opaque => self.frame.opaque_draws += 1,
            BlendState::AlphaBlend => self.frame.blended_draws += 1,
        }
    }

    fn bind_blend_state(&mut self, state: BlendState) {
        self.blend_state = state;
    }

    fn restore_default_blend_state(&mut self) {
        self.blend_state = BlendState::default();
    }

    fn screen_dimensions(&self) -> (u32, u32) {
        self.dimensions
    }
}
