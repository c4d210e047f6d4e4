use std::ops::Range;

use glam::Mat4;

/// Lens of a camera. Only perspective projections exist so far.
#[derive(Clone, Debug, PartialEq)]
pub enum Projection {
    Perspective {
        /// ratio of the surface's width to its height
        aspect_ratio: f32,
        /// vertical field of view in radians
        fov: f32,
        z_range: Range<f32>,
    },
}

impl Projection {
    #[must_use]
    pub fn new_perspective(aspect_ratio: f32, fov: f32, z_range: Range<f32>) -> Self {
        Self::Perspective {
            aspect_ratio,
            fov,
            z_range,
        }
    }

    /// Derives the aspect ratio from surface dimensions. A surface with a height of zero
    /// (minimized window) falls back to a square aspect ratio.
    #[must_use]
    pub fn from_surface(
        (surface_width, surface_height): (u32, u32),
        fov: f32,
        z_range: Range<f32>,
    ) -> Self {
        Self::new_perspective(
            aspect_ratio(surface_width, surface_height),
            fov,
            z_range,
        )
    }

    #[must_use]
    pub fn near(&self) -> f32 {
        match *self {
            Projection::Perspective { ref z_range, .. } => z_range.start,
        }
    }

    #[must_use]
    pub fn far(&self) -> f32 {
        match *self {
            Projection::Perspective { ref z_range, .. } => z_range.end,
        }
    }

    #[must_use]
    pub fn fov(&self) -> f32 {
        match *self {
            Projection::Perspective { fov, .. } => fov,
        }
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        match *self {
            Projection::Perspective { aspect_ratio, .. } => aspect_ratio,
        }
    }

    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov(), self.aspect_ratio(), self.near(), self.far())
    }

    pub fn set_surface_dimensions(&mut self, (surface_width, surface_height): (u32, u32)) {
        self.set_aspect_ratio(aspect_ratio(surface_width, surface_height));
    }

    pub fn set_aspect_ratio(&mut self, new_aspect_ratio: f32) {
        match *self {
            Projection::Perspective {
                ref mut aspect_ratio,
                ..
            } => *aspect_ratio = new_aspect_ratio,
        }
    }

    pub fn set_fov(&mut self, new_fov: f32) {
        match *self {
            Projection::Perspective { ref mut fov, .. } => *fov = new_fov,
        }
    }

    pub fn set_z_range(&mut self, new_z_range: Range<f32>) {
        match *self {
            Projection::Perspective {
                ref mut z_range, ..
            } => *z_range = new_z_range,
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "surface dimensions are far below 2^24"
)]
fn aspect_ratio(surface_width: u32, surface_height: u32) -> f32 {
    if surface_height == 0 {
        return 1.0;
    }
    surface_width as f32 / surface_height as f32
}
