use std::path::{Path, PathBuf};

use glam::Vec3;
use lib_geometry::CameraPose;
use log::{debug, info, warn};
use thiserror::Error;
use track_framework_common::{
    input::{InputState, Key, MouseButton},
    render::RenderBackend,
};

use super::{Assets, Transition};
use crate::{
    camera::Camera,
    config::EditorConfig,
    grid::GridError,
    piece_factory::TrackPieceFactory,
    placement::Placement,
    race_track::RaceTrack,
    track_file::{load_track, save_track, LoadError, SaveError},
    track_piece::TrackPieceType,
};

/// Number keys selecting the placeable pieces, in order.
const PIECE_KEYS: [Key; 7] = [
    Key::Digit1,
    Key::Digit2,
    Key::Digit3,
    Key::Digit4,
    Key::Digit5,
    Key::Digit6,
    Key::Digit7,
];

/// Where the editor camera starts, looking at the centre of the grid.
const CAMERA_START: Vec3 = Vec3::new(0.0, 80.0, 80.0);

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("cannot load track: {0}")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Building a track: a top-down camera over the grid and a ghost piece following the
/// cursor.
#[derive(Debug)]
pub struct EditorScreen {
    track: RaceTrack,
    camera: Camera,
    placement: Placement,
    save_path: PathBuf,
    dimensions: (u32, u32),
}

impl EditorScreen {
    pub fn new(config: &EditorConfig, assets: &mut Assets, dimensions: (u32, u32)) -> Self {
        let camera_config = &config.camera;
        let mut camera = Camera::static_first_person(
            CameraPose::looking_at(CAMERA_START, Vec3::ZERO),
            camera_config.lens(1.0),
            camera_config.speeds(),
            camera_config.dolly(),
        );
        camera.set_aspect_ratio(dimensions);
        Self {
            track: RaceTrack::new(&mut assets.models),
            camera,
            placement: Placement::new(&assets.factory),
            save_path: config.tracks.track_path(),
            dimensions,
        }
    }

    #[must_use]
    pub fn track(&self) -> &RaceTrack {
        &self.track
    }

    pub(super) fn track_mut(&mut self) -> &mut RaceTrack {
        &mut self.track
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[must_use]
    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn resize(&mut self, dimensions: (u32, u32)) {
        self.dimensions = dimensions;
        self.camera.set_aspect_ratio(dimensions);
    }

    pub fn update(
        &mut self,
        delta_time: f32,
        input: &dyn InputState,
        factory: &TrackPieceFactory,
    ) -> Transition {
        if input.is_key_just_pressed(Key::Escape) {
            return Transition::ToMenu;
        }
        if input.is_key_just_pressed(Key::Tab) {
            return Transition::ToRace;
        }

        for (key, piece_type) in PIECE_KEYS.into_iter().zip(TrackPieceType::PLACEABLE) {
            if input.is_key_just_pressed(key) {
                self.placement.select(piece_type, factory);
            }
        }
        if input.is_key_just_pressed(Key::R) {
            self.placement.rotate();
        }
        if input.is_key_just_pressed(Key::C) {
            info!("clearing the track");
            self.track.grid_mut().clear_grid();
        }
        if input.is_key_just_pressed(Key::F5) {
            if let Err(error) = self.save() {
                warn!("{error}");
            }
        }
        if input.is_key_just_pressed(Key::F9) {
            if let Err(error) = self.load(factory) {
                warn!("{error}");
            }
        }

        self.camera.update(delta_time, Some(input));
        self.track.update(delta_time);

        self.placement
            .retarget(&self.camera, input.mouse_position(), self.dimensions);
        if input.is_mouse_button_just_pressed(MouseButton::Left) {
            if let Err(error) = self.placement.place(self.track.grid_mut(), factory) {
                warn!("cannot place piece: {error}");
            }
        }
        if input.is_mouse_button_just_pressed(MouseButton::Right) {
            match self.placement.remove(self.track.grid_mut()) {
                Ok(removed) => debug!("removed {:?}", removed.map(|piece| piece.piece_type())),
                Err(error) => warn!("cannot remove piece: {error}"),
            }
        }
        Transition::Stay
    }

    pub fn render(&mut self, input: &dyn InputState, backend: &mut dyn RenderBackend) {
        backend.set_view_projection(self.camera.view_matrix(), self.camera.projection_matrix());
        self.track.ground().render(backend);
        self.placement
            .render(self.track.grid(), &self.camera, input, backend);
    }

    /// Writes the track to the configured file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn save(&self) -> Result<(), EditorError> {
        save_track(&self.save_path, &self.track.snapshot())?;
        Ok(())
    }

    /// Replaces the track with the content of the configured file. The track stays as it
    /// was if anything goes wrong.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is malformed.
    pub fn load(&mut self, factory: &TrackPieceFactory) -> Result<(), EditorError> {
        let snapshot = load_track(&self.save_path)?;
        self.track.apply_snapshot(&snapshot, factory)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use glam::{UVec2, Vec2};
    use track_framework_common::input::InputSnapshot;

    use crate::{testing::RecordingBackend, track_file::LoadErrorKind, track_piece::Rotation};

    use super::*;

    const SCREEN: (u32, u32) = (800, 600);

    fn editor(name: &str) -> (EditorScreen, Assets) {
        let mut config = EditorConfig::default();
        config.tracks.save_directory =
            env::temp_dir().join(format!("editor-screen-test-{}", process::id()));
        config.tracks.file_name = name.to_owned();
        let mut assets = Assets::load();
        let editor = EditorScreen::new(&config, &mut assets, SCREEN);
        (editor, assets)
    }

    /// Cursor just right of and below the screen centre, over the cell at (8, 8).
    fn centre() -> InputSnapshot {
        InputSnapshot::empty().with_mouse_position(Vec2::new(410.0, 310.0))
    }

    #[test]
    fn clicks_place_and_remove_pieces() -> Result<(), GridError> {
        let (mut editor, assets) = editor("clicks");
        let centre_cell = UVec2::new(8, 8);

        editor.update(0.016, &centre().with_key(Key::Digit3), &assets.factory);
        editor.update(0.016, &centre().with_key(Key::R), &assets.factory);
        editor.update(0.016, &centre().with_button(MouseButton::Left), &assets.factory);

        let cell = editor.track().grid().get_piece(centre_cell)?;
        assert_eq!(cell.piece_type(), TrackPieceType::Ramp);
        assert_eq!(
            cell.piece().map(|piece| piece.rotation()),
            Some(Rotation::Deg90)
        );

        editor.update(0.016, &centre().with_button(MouseButton::Right), &assets.factory);
        assert!(editor.track().grid().get_piece(centre_cell)?.is_empty());
        Ok(())
    }

    #[test]
    fn keys_switch_screens() {
        let (mut editor, assets) = editor("keys");
        let input = InputSnapshot::empty().with_key(Key::Tab);
        assert_eq!(editor.update(0.016, &input, &assets.factory), Transition::ToRace);
        let input = InputSnapshot::empty().with_key(Key::Escape);
        assert_eq!(editor.update(0.016, &input, &assets.factory), Transition::ToMenu);
    }

    #[test]
    fn saved_tracks_come_back_after_clearing() -> Result<(), EditorError> {
        let (mut editor, assets) = editor("save-load");
        editor.update(0.016, &centre().with_button(MouseButton::Left), &assets.factory);
        assert_eq!(editor.track().grid().occupied_count(), 1);

        editor.update(0.016, &InputSnapshot::empty().with_key(Key::F5), &assets.factory);
        editor.update(0.016, &InputSnapshot::empty().with_key(Key::C), &assets.factory);
        assert_eq!(editor.track().grid().occupied_count(), 0);

        editor.load(&assets.factory)?;
        let loaded = editor.track().grid().occupied_count();
        if let Some(directory) = editor.save_path().parent() {
            fs::remove_file(editor.save_path()).ok();
            fs::remove_dir(directory).ok();
        }
        assert_eq!(loaded, 1);
        Ok(())
    }

    #[test]
    fn failed_load_keeps_the_track() {
        let (mut editor, assets) = editor("does-not-exist");
        editor.update(0.016, &centre().with_button(MouseButton::Left), &assets.factory);

        assert!(matches!(
            editor.load(&assets.factory),
            Err(EditorError::Load(_))
        ));
        assert_eq!(editor.track().grid().occupied_count(), 1);
    }

    #[test]
    fn newer_file_version_keeps_the_track() -> Result<(), EditorError> {
        let (mut editor, assets) = editor("newer-version");
        editor.update(0.016, &centre().with_button(MouseButton::Left), &assets.factory);
        editor.track_mut().record_time(31.5);
        editor.save()?;

        let saved = fs::read_to_string(editor.save_path()).unwrap_or_default();
        let newer = saved.replacen(r#"version="1""#, r#"version="2""#, 1);
        fs::write(editor.save_path(), newer).ok();
        editor.update(0.016, &InputSnapshot::empty().with_key(Key::C), &assets.factory);
        editor.update(0.016, &centre().with_button(MouseButton::Left), &assets.factory);
        let best_before = *editor.track().best_times();

        let result = editor.load(&assets.factory);
        fs::remove_file(editor.save_path()).ok();
        assert!(
            matches!(
                result,
                Err(EditorError::Load(LoadError {
                    line: 1,
                    kind: LoadErrorKind::VersionMismatch { .. }
                }))
            ),
            "{result:?}"
        );
        assert_eq!(editor.track().grid().occupied_count(), 1);
        assert_eq!(*editor.track().best_times(), best_before);
        Ok(())
    }

    #[test]
    fn render_draws_ground_pieces_and_ghost() {
        let (mut editor, assets) = editor("render");
        editor.update(0.016, &centre().with_button(MouseButton::Left), &assets.factory);

        let mut backend = RecordingBackend::new(SCREEN);
        editor.render(&centre(), &mut backend);

        // ground, the placed piece, the ghost
        assert_eq!(backend.draws.len(), 3);
        assert_eq!(backend.blended_draws().count(), 1);
    }
}
