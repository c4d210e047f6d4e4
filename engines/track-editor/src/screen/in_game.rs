use glam::Vec3;
use log::info;
use track_framework_common::{
    input::{InputState, Key},
    render::RenderBackend,
};

use super::{editor::EditorScreen, Transition};
use crate::{
    camera::{Camera, Orbit},
    config::EditorConfig,
    track_piece::{TrackPiece, TrackPieceType},
};

/// Test drive of the track being edited: an orbiting camera around the start piece and a
/// lap timer. Enter finishes a lap, Escape or Tab return to the editor.
#[derive(Debug)]
pub struct InGameScreen {
    editor: EditorScreen,
    camera: Camera,
    lap_time: f32,
}

impl InGameScreen {
    /// Takes over the editor's track until [`InGameScreen::into_editor`].
    pub fn new(editor: EditorScreen, config: &EditorConfig, dimensions: (u32, u32)) -> Self {
        let focal_point = editor
            .track()
            .grid()
            .find_first(TrackPieceType::Start)
            .map_or(Vec3::ZERO, TrackPiece::world_position);
        let mut camera = Camera::third_person(
            Orbit::new(focal_point, config.camera.orbit_distance),
            config.camera.lens(1.0),
            config.camera.speeds(),
        );
        camera.set_aspect_ratio(dimensions);
        info!("race starts at {focal_point}");
        Self {
            editor,
            camera,
            lap_time: 0.0,
        }
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn editor(&self) -> &EditorScreen {
        &self.editor
    }

    /// Seconds since the current lap started.
    #[must_use]
    pub fn lap_time(&self) -> f32 {
        self.lap_time
    }

    /// Hands the track back.
    #[must_use]
    pub fn into_editor(self) -> EditorScreen {
        self.editor
    }

    pub fn resize(&mut self, dimensions: (u32, u32)) {
        self.camera.set_aspect_ratio(dimensions);
        self.editor.resize(dimensions);
    }

    pub fn update(&mut self, delta_time: f32, input: &dyn InputState) -> Transition {
        if input.is_key_just_pressed(Key::Escape) || input.is_key_just_pressed(Key::Tab) {
            return Transition::ToEditor;
        }

        self.lap_time += delta_time;
        if input.is_key_just_pressed(Key::Enter) {
            let lap_time = self.lap_time;
            self.lap_time = 0.0;
            if self.editor.track_mut().record_time(lap_time).is_none() {
                info!("lap time {lap_time:.2}s");
            }
        }

        self.camera.update(delta_time, Some(input));
        self.editor.track_mut().update(delta_time);
        Transition::Stay
    }

    pub fn render(&self, backend: &mut dyn RenderBackend) {
        backend.set_view_projection(self.camera.view_matrix(), self.camera.projection_matrix());
        self.editor.track().render(backend);
    }
}

#[cfg(test)]
mod tests {
    use glam::UVec2;
    use track_framework_common::input::InputSnapshot;

    use crate::{grid::GridError, screen::Assets, testing::RecordingBackend};

    use super::*;

    fn race_with_start_at(cell: UVec2) -> Result<InGameScreen, GridError> {
        let config = EditorConfig::default();
        let mut assets = Assets::load();
        let mut editor = EditorScreen::new(&config, &mut assets, (800, 600));
        editor
            .track_mut()
            .grid_mut()
            .set_piece(TrackPieceType::Start, cell, &assets.factory)?;
        Ok(InGameScreen::new(editor, &config, (800, 600)))
    }

    #[test]
    fn camera_orbits_the_start_piece() -> Result<(), GridError> {
        let mut race = race_with_start_at(UVec2::new(3, 12))?;
        let start = Vec3::new(-36.0, 0.0, 36.0);

        let input = InputSnapshot::empty().with_key(Key::Left).with_key(Key::Up);
        for _ in 0..5 {
            race.update(0.1, &input);
            let camera = race.camera();
            let expected = start - camera.facing_direction() * 30.0;
            assert!(
                camera.position().abs_diff_eq(expected, 1e-3),
                "{} != {expected}",
                camera.position()
            );
        }
        Ok(())
    }

    #[test]
    fn finished_laps_become_best_times() -> Result<(), GridError> {
        let mut race = race_with_start_at(UVec2::ZERO)?;
        for _ in 0..10 {
            race.update(0.5, &InputSnapshot::empty());
        }
        race.update(0.5, &InputSnapshot::empty().with_key(Key::Enter));

        assert!(race.lap_time().abs() < f32::EPSILON);
        let editor = race.into_editor();
        let best: Vec<_> = editor.track().best_times().iter().collect();
        assert_eq!(best, vec![5.5]);
        Ok(())
    }

    #[test]
    fn escape_returns_to_the_editor() -> Result<(), GridError> {
        let mut race = race_with_start_at(UVec2::ZERO)?;
        let transition = race.update(0.1, &InputSnapshot::empty().with_key(Key::Escape));
        assert_eq!(transition, Transition::ToEditor);
        assert_eq!(race.into_editor().track().grid().occupied_count(), 1);
        Ok(())
    }

    #[test]
    fn render_draws_the_whole_track() -> Result<(), GridError> {
        let race = race_with_start_at(UVec2::ZERO)?;
        let mut backend = RecordingBackend::new((800, 600));
        race.render(&mut backend);
        // ground and the start piece
        assert_eq!(backend.draws.len(), 2);
        assert_eq!(backend.blended_draws().count(), 0);
        Ok(())
    }
}
