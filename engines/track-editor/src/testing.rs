use glam::Mat4;
use track_framework_common::render::{BlendState, ModelHandle, RenderBackend};

/// Render backend remembering every draw call.
#[derive(Debug)]
pub(crate) struct RecordingBackend {
    pub(crate) dimensions: (u32, u32),
    pub(crate) blend_state: BlendState,
    pub(crate) draws: Vec<Draw>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Draw {
    pub(crate) model: ModelHandle,
    pub(crate) transform: Mat4,
    pub(crate) blend_state: BlendState,
}

impl RecordingBackend {
    pub(crate) fn new(dimensions: (u32, u32)) -> Self {
        Self {
            dimensions,
            blend_state: BlendState::default(),
            draws: Vec::new(),
        }
    }

    pub(crate) fn blended_draws(&self) -> impl Iterator<Item = &Draw> {
        self.draws
            .iter()
            .filter(|draw| draw.blend_state == BlendState::AlphaBlend)
    }
}

impl RenderBackend for RecordingBackend {
    fn set_view_projection(&mut self, _view: Mat4, _projection: Mat4) {}

    fn render_model_at(&mut self, model: ModelHandle, transform: Mat4) {
        self.draws.push(Draw {
            model,
            transform,
            blend_state: self.blend_state,
        });
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
