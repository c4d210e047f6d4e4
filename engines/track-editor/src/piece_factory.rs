use std::collections::HashMap;

use glam::{UVec2, Vec3};
use log::{debug, warn};
use thiserror::Error;
use track_framework_common::render::ModelHandle;

use crate::{
    model::ModelCache,
    track_piece::{CollisionShape, TrackPiece, TrackPieceType},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("no track piece registered for {0:?}")]
    UnknownPieceType(TrackPieceType),
}

/// What every piece of a type is made of.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieceTemplate {
    pub model: ModelHandle,
    pub collision: CollisionShape,
}

/// Registry building track pieces by type.
///
/// Owned by whoever edits tracks and passed down explicitly; every call to
/// [`TrackPieceFactory::create_piece`] returns a new piece owned by the caller.
#[derive(Debug, Default)]
pub struct TrackPieceFactory {
    templates: HashMap<TrackPieceType, PieceTemplate>,
}

impl TrackPieceFactory {
    /// Creates a factory without any registered pieces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory knowing every placeable piece type.
    #[must_use]
    pub fn with_default_pieces(models: &mut ModelCache) -> Self {
        let mut factory = Self::new();
        for piece_type in TrackPieceType::PLACEABLE {
            let template = PieceTemplate {
                model: models.load(piece_type.model_name()),
                collision: default_collision(piece_type),
            };
            factory.register(piece_type, template);
        }
        factory
    }

    /// Registers (or replaces) the template of a piece type. [`TrackPieceType::Empty`]
    /// cannot be registered.
    pub fn register(&mut self, piece_type: TrackPieceType, template: PieceTemplate) {
        if piece_type == TrackPieceType::Empty {
            warn!("refusing to register a template for empty cells");
            return;
        }
        debug!("registering track piece {piece_type:?}");
        self.templates.insert(piece_type, template);
    }

    #[must_use]
    pub fn template(&self, piece_type: TrackPieceType) -> Option<&PieceTemplate> {
        self.templates.get(&piece_type)
    }

    /// Builds a new piece of the given type at a grid position.
    ///
    /// # Errors
    ///
    /// Fails for [`TrackPieceType::Empty`] and for types without a registered template.
    pub fn create_piece(
        &self,
        piece_type: TrackPieceType,
        position: UVec2,
    ) -> Result<TrackPiece, FactoryError> {
        let template = self
            .template(piece_type)
            .ok_or(FactoryError::UnknownPieceType(piece_type))?;
        Ok(TrackPiece::new(
            piece_type,
            template.model,
            template.collision,
            position,
        ))
    }
}

fn default_collision(piece_type: TrackPieceType) -> CollisionShape {
    match piece_type {
        TrackPieceType::Ramp => CollisionShape::Wedge {
            half_extents: Vec3::new(4.0, 2.0, 4.0),
        },
        TrackPieceType::Bridge => CollisionShape::Box {
            half_extents: Vec3::new(4.0, 3.0, 4.0),
        },
        // gates spanning the road
        TrackPieceType::Start | TrackPieceType::Finish | TrackPieceType::Checkpoint => {
            CollisionShape::Box {
                half_extents: Vec3::new(4.0, 2.5, 4.0),
            }
        }
        TrackPieceType::Empty | TrackPieceType::Straight | TrackPieceType::Corner => {
            CollisionShape::Box {
                half_extents: Vec3::new(4.0, 0.25, 4.0),
            }
        }
    }
}
