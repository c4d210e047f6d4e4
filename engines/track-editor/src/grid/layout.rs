use glam::UVec2;

use super::{cell_index, GridError};
use crate::track_piece::{Rotation, TrackPieceType};

/// What a single cell holds, without any of the runtime data of a placed piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutCell {
    pub piece_type: TrackPieceType,
    pub rotation: Rotation,
}

/// The plain content of a grid: piece type and rotation per cell, row by row.
///
/// This is what track files store. A layout is turned into real pieces by
/// [`super::EditorGrid::from_layout`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    size: UVec2,
    cells: Vec<LayoutCell>,
}

impl GridLayout {
    /// Creates a layout with every cell empty.
    #[must_use]
    pub fn new(size: UVec2) -> Self {
        let cell_count = usize::try_from(size.element_product()).unwrap_or_default();
        Self {
            size,
            cells: vec![LayoutCell::default(); cell_count],
        }
    }

    #[must_use]
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] for positions outside of the layout.
    pub fn get(&self, position: UVec2) -> Result<LayoutCell, GridError> {
        let index = cell_index(self.size, position)?;
        self.cells
            .get(index)
            .copied()
            .ok_or(GridError::OutOfRange {
                position,
                size: self.size,
            })
    }

    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] for positions outside of the layout.
    pub fn set(&mut self, position: UVec2, cell: LayoutCell) -> Result<(), GridError> {
        let index = cell_index(self.size, position)?;
        let size = self.size;
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(GridError::OutOfRange { position, size })?;
        *slot = cell;
        Ok(())
    }

    /// The cells row by row, starting with grid row 0.
    pub fn rows(&self) -> impl Iterator<Item = &[LayoutCell]> {
        let width = usize::try_from(self.size.x).unwrap_or_default().max(1);
        self.cells.chunks(width)
    }

    /// Non-empty cells with their position.
    pub fn occupied(&self) -> impl Iterator<Item = (UVec2, LayoutCell)> + '_ {
        self.rows().zip(0..).flat_map(|(row, y)| {
            row.iter()
                .zip(0..)
                .filter(|(cell, _)| cell.piece_type != TrackPieceType::Empty)
                .map(move |(cell, x)| (UVec2::new(x, y), *cell))
        })
    }
}
