use glam::{UVec2, Vec2};
use log::{debug, trace};
use track_framework_common::{
    input::InputState,
    render::{BlendState, RenderBackend, ScopedBlendState},
};

use crate::{
    camera::Camera,
    grid::{world_to_grid, EditorGrid, GridError},
    piece_factory::TrackPieceFactory,
    track_piece::{Rotation, TrackPiece, TrackPieceType},
};

/// The piece about to be placed.
///
/// A translucent ghost of the selected piece follows the cursor over the grid. The ghost
/// is never part of the grid; placing it puts a fresh piece of the same type and rotation
/// into the targeted cell.
#[derive(Debug)]
pub struct Placement {
    selected: TrackPieceType,
    rotation: Rotation,
    ghost: Option<TrackPiece>,
    target: Option<UVec2>,
}

impl Placement {
    /// Starts out with a straight piece selected.
    #[must_use]
    pub fn new(factory: &TrackPieceFactory) -> Self {
        let selected = TrackPieceType::Straight;
        Self {
            selected,
            rotation: Rotation::default(),
            ghost: factory.create_piece(selected, UVec2::ZERO).ok(),
            target: None,
        }
    }

    #[must_use]
    pub fn selected(&self) -> TrackPieceType {
        self.selected
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// The cell under the cursor, as of the last [`Placement::retarget`].
    #[must_use]
    pub fn target(&self) -> Option<UVec2> {
        self.target
    }

    #[must_use]
    pub fn ghost(&self) -> Option<&TrackPiece> {
        self.ghost.as_ref()
    }

    /// Switches the ghost to another piece type, keeping its rotation. Selecting
    /// [`TrackPieceType::Empty`] is ignored.
    pub fn select(&mut self, piece_type: TrackPieceType, factory: &TrackPieceFactory) {
        if piece_type == TrackPieceType::Empty || piece_type == self.selected {
            return;
        }
        debug!("selected {piece_type:?}");
        self.selected = piece_type;
        self.ghost = factory
            .create_piece(piece_type, self.target.unwrap_or_default())
            .ok()
            .map(|mut ghost| {
                ghost.set_rotation(self.rotation);
                ghost
            });
    }

    /// Turns the ghost by a quarter turn.
    pub fn rotate(&mut self) -> Rotation {
        self.rotation = self.rotation.next();
        if let Some(ghost) = self.ghost.as_mut() {
            ghost.set_rotation(self.rotation);
        }
        self.rotation
    }

    /// Casts a ray through the cursor and moves the ghost to the cell it hits. The target
    /// is cleared if the ray misses the ground.
    pub fn retarget(
        &mut self,
        camera: &Camera,
        cursor: Vec2,
        screen_dimensions: (u32, u32),
    ) -> Option<UVec2> {
        self.target = camera
            .ground_point_under_cursor(cursor, screen_dimensions)
            .map(world_to_grid);
        if let (Some(target), Some(ghost)) = (self.target, self.ghost.as_mut()) {
            ghost.set_position(target);
        }
        self.target
    }

    /// Draws every piece of the grid, then the ghost at the cell under the cursor.
    ///
    /// The ghost is drawn with alpha blending; the default blend state is restored
    /// afterwards, also when there is no ghost to draw.
    pub fn render(
        &mut self,
        grid: &EditorGrid,
        camera: &Camera,
        input: &dyn InputState,
        backend: &mut dyn RenderBackend,
    ) {
        for piece in grid.iter_pieces() {
            backend.render_model_at(piece.model(), piece.world_transform());
        }

        self.retarget(camera, input.mouse_position(), backend.screen_dimensions());

        let mut blended = ScopedBlendState::bind(backend, BlendState::AlphaBlend);
        let (Some(_), Some(ghost)) = (self.target, self.ghost.as_ref()) else {
            trace!("no ghost to draw");
            return;
        };
        blended.render_model_at(ghost.model(), ghost.world_transform());
    }

    /// Puts a piece like the ghost into the targeted cell. Returns the cell, or `None`
    /// without a target.
    ///
    /// # Errors
    ///
    /// Fails if the factory cannot build the selected piece.
    pub fn place(
        &self,
        grid: &mut EditorGrid,
        factory: &TrackPieceFactory,
    ) -> Result<Option<UVec2>, GridError> {
        let Some(target) = self.target else {
            return Ok(None);
        };
        grid.set_piece_rotated(self.selected, self.rotation, target, factory)?;
        Ok(Some(target))
    }

    /// Removes the piece in the targeted cell.
    ///
    /// # Errors
    ///
    /// Cannot fail for targets found by [`Placement::retarget`]; see
    /// [`EditorGrid::remove_piece`].
    pub fn remove(&self, grid: &mut EditorGrid) -> Result<Option<TrackPiece>, GridError> {
        match self.target {
            Some(target) => grid.remove_piece(target),
            None => Ok(None),
        }
    }
}
