//! The editable grid of track pieces.

pub mod coordinates;
pub mod layout;

use glam::UVec2;
use log::{debug, trace};
use thiserror::Error;

use crate::{
    piece_factory::{FactoryError, TrackPieceFactory},
    track_piece::{Rotation, TrackPiece, TrackPieceType},
};

pub use coordinates::{grid_to_world, world_to_grid};
pub use layout::{GridLayout, LayoutCell};

/// Number of cells along each side of the grid.
pub const GRID_SIZE: u32 = 16;

/// Edge length of a cell in world units.
pub const CELL_SIZE: f32 = 8.0;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {position} lies outside of the {size} grid")]
    OutOfRange { position: UVec2, size: UVec2 },
    #[error(transparent)]
    Factory(#[from] FactoryError),
}

pub(crate) fn cell_index(size: UVec2, position: UVec2) -> Result<usize, GridError> {
    let out_of_range = || GridError::OutOfRange { position, size };
    if position.x >= size.x || position.y >= size.y {
        return Err(out_of_range());
    }
    let x = usize::try_from(position.x).map_err(|_err| out_of_range())?;
    let y = usize::try_from(position.y).map_err(|_err| out_of_range())?;
    let width = usize::try_from(size.x).map_err(|_err| out_of_range())?;
    Ok(x + width * y)
}

/// A single cell; it is empty exactly if it holds no piece.
#[derive(Debug, Default, PartialEq)]
pub struct GridCell {
    piece: Option<TrackPiece>,
}

impl GridCell {
    #[must_use]
    pub fn piece(&self) -> Option<&TrackPiece> {
        self.piece.as_ref()
    }

    #[must_use]
    pub fn piece_type(&self) -> TrackPieceType {
        self.piece
            .as_ref()
            .map_or(TrackPieceType::Empty, TrackPiece::piece_type)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }
}

/// The track under construction: [`GRID_SIZE`] × [`GRID_SIZE`] cells, each owning at most
/// one piece.
#[derive(Debug, PartialEq)]
pub struct EditorGrid {
    cells: Vec<GridCell>,
    size: UVec2,
}

impl Default for EditorGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(UVec2::splat(GRID_SIZE))
    }

    fn with_size(size: UVec2) -> Self {
        let cell_count = usize::try_from(size.element_product()).unwrap_or_default();
        let mut cells = Vec::with_capacity(cell_count);
        cells.resize_with(cell_count, GridCell::default);
        Self { cells, size }
    }

    #[must_use]
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] for positions outside of the grid.
    pub fn get_piece(&self, position: UVec2) -> Result<&GridCell, GridError> {
        let index = cell_index(self.size, position)?;
        self.cells.get(index).ok_or(GridError::OutOfRange {
            position,
            size: self.size,
        })
    }

    fn cell_mut(&mut self, position: UVec2) -> Result<&mut GridCell, GridError> {
        let index = cell_index(self.size, position)?;
        let size = self.size;
        self.cells
            .get_mut(index)
            .ok_or(GridError::OutOfRange { position, size })
    }

    /// Puts a new piece of the given type into a cell, dropping the previous one.
    ///
    /// Setting the type a cell already holds leaves the existing piece alone (including its
    /// rotation). [`TrackPieceType::Empty`] clears the cell.
    ///
    /// # Errors
    ///
    /// Fails for positions outside of the grid and for types the factory cannot build. The
    /// cell is unchanged in both cases.
    pub fn set_piece(
        &mut self,
        piece_type: TrackPieceType,
        position: UVec2,
        factory: &TrackPieceFactory,
    ) -> Result<(), GridError> {
        let cell = self.cell_mut(position)?;
        if cell.piece_type() == piece_type {
            return Ok(());
        }
        if piece_type == TrackPieceType::Empty {
            debug!("clearing cell {position}");
            cell.piece = None;
            return Ok(());
        }
        let piece = factory.create_piece(piece_type, position)?;
        debug!("placing {piece_type:?} at {position}");
        cell.piece = Some(piece);
        Ok(())
    }

    /// Like [`EditorGrid::set_piece`], then turns the piece into the given rotation.
    ///
    /// # Errors
    ///
    /// See [`EditorGrid::set_piece`].
    pub fn set_piece_rotated(
        &mut self,
        piece_type: TrackPieceType,
        rotation: Rotation,
        position: UVec2,
        factory: &TrackPieceFactory,
    ) -> Result<(), GridError> {
        self.set_piece(piece_type, position, factory)?;
        if let Some(piece) = self.cell_mut(position)?.piece.as_mut() {
            piece.set_rotation(rotation);
        }
        Ok(())
    }

    /// Turns the piece in a cell by a quarter turn. Returns the new rotation or `None` for an
    /// empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] for positions outside of the grid.
    pub fn rotate_piece(&mut self, position: UVec2) -> Result<Option<Rotation>, GridError> {
        Ok(self.cell_mut(position)?.piece.as_mut().map(TrackPiece::rotate))
    }

    /// Takes the piece out of a cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] for positions outside of the grid.
    pub fn remove_piece(&mut self, position: UVec2) -> Result<Option<TrackPiece>, GridError> {
        let removed = self.cell_mut(position)?.piece.take();
        if let Some(piece) = &removed {
            debug!("removed {:?} from {position}", piece.piece_type());
        }
        Ok(removed)
    }

    /// Drops every piece.
    pub fn clear_grid(&mut self) {
        trace!("clearing {} pieces", self.occupied_count());
        for cell in &mut self.cells {
            cell.piece = None;
        }
    }

    /// All placed pieces, row by row.
    pub fn iter_pieces(&self) -> impl Iterator<Item = &TrackPiece> {
        self.cells.iter().filter_map(GridCell::piece)
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.iter_pieces().count()
    }

    /// The first piece of the given type, row by row.
    #[must_use]
    pub fn find_first(&self, piece_type: TrackPieceType) -> Option<&TrackPiece> {
        self.iter_pieces()
            .find(|piece| piece.piece_type() == piece_type)
    }

    /// Copies type and rotation of every cell.
    #[must_use]
    pub fn layout(&self) -> GridLayout {
        let mut layout = GridLayout::new(self.size);
        for piece in self.iter_pieces() {
            let cell = LayoutCell {
                piece_type: piece.piece_type(),
                rotation: piece.rotation(),
            };
            if let Err(error) = layout.set(piece.position(), cell) {
                // pieces always sit inside the grid they were placed on
                debug!("skipping piece: {error}");
            }
        }
        layout
    }

    /// Builds a new grid populated with fresh pieces from `layout`.
    ///
    /// # Errors
    ///
    /// Fails if the factory cannot build one of the piece types.
    pub fn from_layout(
        layout: &GridLayout,
        factory: &TrackPieceFactory,
    ) -> Result<Self, GridError> {
        let mut grid = Self::with_size(layout.size());
        for (position, cell) in layout.occupied() {
            grid.set_piece_rotated(cell.piece_type, cell.rotation, position, factory)?;
        }
        Ok(grid)
    }
}
