use std::ops::{Deref, DerefMut};

use glam::Mat4;

/// Non-owning reference to a model kept by a model cache. Cheap to copy and share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelHandle(pub u32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendState {
    /// regular opaque rendering
    #[default]
    Opaque,
    /// translucent rendering (e.g. preview objects)
    AlphaBlend,
}

/// The drawing primitives the engine needs from a graphics backend.
pub trait RenderBackend {
    /// Sets the camera matrices used by the following draws.
    fn set_view_projection(&mut self, view: Mat4, projection: Mat4);

    fn render_model_at(&mut self, model: ModelHandle, transform: Mat4);

    fn bind_blend_state(&mut self, state: BlendState);

    fn restore_default_blend_state(&mut self);

    /// Width and height of the drawable surface in pixels.
    fn screen_dimensions(&self) -> (u32, u32);
}

/// Binds a blend state for as long as the guard lives.
///
/// The default blend state is restored when the guard is dropped, on every exit path.
/// The backend stays accessible through the guard.
pub struct ScopedBlendState<'backend, Backend: RenderBackend + ?Sized> {
    backend: &'backend mut Backend,
}

impl<'backend, Backend: RenderBackend + ?Sized> ScopedBlendState<'backend, Backend> {
    pub fn bind(backend: &'backend mut Backend, state: BlendState) -> Self {
        backend.bind_blend_state(state);
        Self { backend }
    }
}

impl<Backend: RenderBackend + ?Sized> Deref for ScopedBlendState<'_, Backend> {
    type Target = Backend;

    fn deref(&self) -> &Self::Target {
        self.backend
    }
}

impl<Backend: RenderBackend + ?Sized> DerefMut for ScopedBlendState<'_, Backend> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.backend
    }
}

impl<Backend: RenderBackend + ?Sized> Drop for ScopedBlendState<'_, Backend> {
    fn drop(&mut self) {
        self.backend.restore_default_blend_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        blend_state: BlendState,
        draws: Vec<(ModelHandle, BlendState)>,
    }

    impl RenderBackend for Recorder {
        fn set_view_projection(&mut self, _view: Mat4, _projection: Mat4) {}

        fn render_model_at(&mut self, model: ModelHandle, _transform: Mat4) {
            self.draws.push((model, self.blend_state));
        }

        fn bind_blend_state(&mut self, state: BlendState) {
            self.blend_state = state;
        }

        fn restore_default_blend_state(&mut self) {
            self.blend_state = BlendState::default();
        }

        fn screen_dimensions(&self) -> (u32, u32) {
            (640, 480)
        }
    }

    #[test]
    fn guard_restores_default_blend_state() {
        let mut recorder = Recorder::default();
        {
            let mut scoped = ScopedBlendState::bind(&mut recorder, BlendState::AlphaBlend);
            scoped.render_model_at(ModelHandle(3), Mat4::IDENTITY);
        }
        recorder.render_model_at(ModelHandle(4), Mat4::IDENTITY);

        assert_eq!(
            recorder.draws,
            vec![
                (ModelHandle(3), BlendState::AlphaBlend),
                (ModelHandle(4), BlendState::Opaque),
            ]
        );
    }

    #[test]
    fn guard_restores_even_without_draws() {
        let mut recorder = Recorder::default();
        let backend: &mut dyn RenderBackend = &mut recorder;
        drop(ScopedBlendState::bind(backend, BlendState::AlphaBlend));
        assert_eq!(recorder.blend_state, BlendState::Opaque);
    }
}
