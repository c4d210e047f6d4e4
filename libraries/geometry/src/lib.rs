//! Math shared by the cameras, the grid and the render backends.
//!
//! Vector and matrix types are the ones from [`glam`]; this crate adds what glam lacks.

#![allow(missing_docs, reason = "TODO add later")]

mod camera;
mod projection;
mod ray;
mod rotation;
mod vector;

pub use camera::CameraPose;
pub use projection::Projection;
pub use ray::{screen_to_ndc, Ray};
pub use rotation::{rotate_vector, rotation_axis, rotation_x, rotation_y, rotation_z};
pub use vector::{DegenerateVector, VectorExt};
