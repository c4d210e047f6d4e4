use glam::{Vec2, Vec3, Vec4};
use thiserror::Error;

/// Returned by [`VectorExt::try_normalized`] for vectors without a direction.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("cannot normalize a vector of length {length}")]
pub struct DegenerateVector {
    pub length: f32,
}

/// Normalization helpers on top of glam's vector types.
///
/// The unchecked `normalize` of glam is kept as-is: a zero-length vector turns into NaN
/// components which then propagate through every following computation. Code that may
/// receive such vectors should call [`VectorExt::try_normalized`] instead.
pub trait VectorExt: Sized {
    /// Normalizes `self` in place (NaN for zero-length vectors).
    fn normalize_mut(&mut self);

    /// Returns the unit vector pointing in the same direction.
    ///
    /// # Errors
    ///
    /// Fails if the length is zero or not finite.
    fn try_normalized(self) -> Result<Self, DegenerateVector>;
}

macro_rules! impl_vector_ext {
    ($($vector:ty),+) => {
        $(
            impl VectorExt for $vector {
                fn normalize_mut(&mut self) {
                    *self = self.normalize();
                }

                fn try_normalized(self) -> Result<Self, DegenerateVector> {
                    self.try_normalize().ok_or(DegenerateVector {
                        length: self.length(),
                    })
                }
            }
        )+
    };
}

impl_vector_ext!(Vec2, Vec3, Vec4);
