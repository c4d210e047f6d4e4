use std::{f32::consts::FRAC_PI_2, ops::AddAssign};

use glam::{Mat4, UVec2, Vec3};
use lib_geometry::rotation_y;
use thiserror::Error;
use track_framework_common::render::ModelHandle;

use crate::grid::coordinates::grid_to_world;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("unknown track piece id {0}")]
pub struct UnknownPieceId(pub u32);

/// Category of a track segment. The discriminant is the id used in track files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TrackPieceType {
    #[default]
    Empty = 0,
    Straight = 1,
    Corner = 2,
    Ramp = 3,
    Start = 4,
    Finish = 5,
    Checkpoint = 6,
    Bridge = 7,
}

impl TrackPieceType {
    /// Every type that results in an actual piece, i.e. all but [`TrackPieceType::Empty`].
    pub const PLACEABLE: [Self; 7] = [
        Self::Straight,
        Self::Corner,
        Self::Ramp,
        Self::Start,
        Self::Finish,
        Self::Checkpoint,
        Self::Bridge,
    ];

    #[must_use]
    pub fn id(self) -> u32 {
        u32::from(self as u8)
    }

    /// Name of the model representing this piece.
    #[must_use]
    pub fn model_name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Straight => "track/straight",
            Self::Corner => "track/corner",
            Self::Ramp => "track/ramp",
            Self::Start => "track/start",
            Self::Finish => "track/finish",
            Self::Checkpoint => "track/checkpoint",
            Self::Bridge => "track/bridge",
        }
    }
}

impl TryFrom<u32> for TrackPieceType {
    type Error = UnknownPieceId;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Straight),
            2 => Ok(Self::Corner),
            3 => Ok(Self::Ramp),
            4 => Ok(Self::Start),
            5 => Ok(Self::Finish),
            6 => Ok(Self::Checkpoint),
            7 => Ok(Self::Bridge),
            other => Err(UnknownPieceId(other)),
        }
    }
}

/// Rotation of a piece around the world's y-axis in quarter turns (counter-clockwise seen
/// from above).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rotation {
    #[default]
    Deg0 = 0,
    Deg90 = 1,
    Deg180 = 2,
    Deg270 = 3,
}

impl Rotation {
    #[must_use]
    pub fn degrees(self) -> u32 {
        u32::from(self as u8) * 90
    }

    #[must_use]
    pub fn radians(self) -> f32 {
        f32::from(self as u8) * FRAC_PI_2
    }

    /// Accepts exactly 0, 90, 180 and 270.
    #[must_use]
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// The rotation one quarter turn further.
    #[must_use]
    pub fn next(self) -> Self {
        let mut next = self;
        next += 1;
        next
    }
}

impl From<u8> for Rotation {
    fn from(value: u8) -> Self {
        match value & 0x03 {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }
}

impl AddAssign<u8> for Rotation {
    fn add_assign(&mut self, rhs: u8) {
        *self = (*self as u8).wrapping_add(rhs).into();
    }
}

/// Simplified physical shape of a piece in its local space, centred on the cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollisionShape {
    Box { half_extents: Vec3 },
    /// a box whose top face slopes from zero height at -z to full height at +z
    Wedge { half_extents: Vec3 },
}

impl CollisionShape {
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            Self::Box { half_extents } | Self::Wedge { half_extents } => half_extents,
        }
    }
}

/// A piece placed on the grid.
///
/// The world transform is derived from grid position and rotation and kept up to date by
/// the setters.
#[derive(Debug, PartialEq)]
pub struct TrackPiece {
    piece_type: TrackPieceType,
    position: UVec2,
    rotation: Rotation,
    model: ModelHandle,
    collision: CollisionShape,
    world_transform: Mat4,
}

impl TrackPiece {
    pub(crate) fn new(
        piece_type: TrackPieceType,
        model: ModelHandle,
        collision: CollisionShape,
        position: UVec2,
    ) -> Self {
        let mut piece = Self {
            piece_type,
            position,
            rotation: Rotation::default(),
            model,
            collision,
            world_transform: Mat4::IDENTITY,
        };
        piece.update_transform();
        piece
    }

    #[must_use]
    pub fn piece_type(&self) -> TrackPieceType {
        self.piece_type
    }

    #[must_use]
    pub fn position(&self) -> UVec2 {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn model(&self) -> ModelHandle {
        self.model
    }

    #[must_use]
    pub fn collision(&self) -> CollisionShape {
        self.collision
    }

    #[must_use]
    pub fn world_transform(&self) -> Mat4 {
        self.world_transform
    }

    /// Centre of the piece's cell in world space.
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        grid_to_world(self.position)
    }

    pub fn set_position(&mut self, position: UVec2) {
        if self.position != position {
            self.position = position;
            self.update_transform();
        }
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        if self.rotation != rotation {
            self.rotation = rotation;
            self.update_transform();
        }
    }

    /// Turns the piece by a quarter turn and returns the new rotation.
    pub fn rotate(&mut self) -> Rotation {
        self.set_rotation(self.rotation.next());
        self.rotation
    }

    fn update_transform(&mut self) {
        self.world_transform =
            Mat4::from_translation(grid_to_world(self.position)) * rotation_y(self.rotation.radians());
    }
}
