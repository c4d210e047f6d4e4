//! Cameras: a shared pose and lens plus one of three ways of being steered by input.

mod first_person;
mod static_first_person;
mod third_person;

use std::mem;

use glam::{Mat4, Vec2, Vec3};
use lib_geometry::{screen_to_ndc, CameraPose, Projection, Ray};
use log::trace;
use track_framework_common::input::{InputState, Key};

pub use static_first_person::ScrollDolly;
pub use third_person::Orbit;

/// Optical parameters of a camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lens {
    /// vertical field of view
    pub fov_degrees: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            aspect_ratio: 4.0 / 3.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Lens {
    fn projection(&self) -> Projection {
        Projection::new_perspective(
            self.aspect_ratio,
            self.fov_degrees.to_radians(),
            self.near..self.far,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Speeds {
    /// world units per second
    pub movement: f32,
    /// radians per second
    pub rotation: f32,
}

impl Default for Speeds {
    fn default() -> Self {
        Self {
            movement: 20.0,
            rotation: 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraKind {
    /// flies freely, steered by keyboard
    FirstPerson,
    /// keeps its orientation, pans over the ground and dollies with the scroll wheel
    StaticFirstPerson(ScrollDolly),
    /// circles a focal point at a fixed distance
    ThirdPerson(Orbit),
}

/// A camera with cached view and projection matrices and their inverses.
///
/// The view matrices are recomputed when the pose changes during [`Camera::update`], the
/// projection matrices when the lens changes.
#[derive(Clone, Debug)]
pub struct Camera {
    pose: CameraPose,
    projection: Projection,
    speeds: Speeds,
    kind: CameraKind,
    view: Mat4,
    inverse_view: Mat4,
    projection_matrix: Mat4,
    inverse_projection: Mat4,
    moved: bool,
}

impl Camera {
    fn new(pose: CameraPose, lens: Lens, speeds: Speeds, kind: CameraKind) -> Self {
        let mut camera = Self {
            pose,
            projection: lens.projection(),
            speeds,
            kind,
            view: Mat4::IDENTITY,
            inverse_view: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            inverse_projection: Mat4::IDENTITY,
            moved: false,
        };
        camera.recompute_view();
        camera.recompute_projection();
        camera
    }

    #[must_use]
    pub fn first_person(pose: CameraPose, lens: Lens, speeds: Speeds) -> Self {
        Self::new(pose, lens, speeds, CameraKind::FirstPerson)
    }

    /// A pose below the floor height of the scroll dolly is raised onto it.
    #[must_use]
    pub fn static_first_person(
        mut pose: CameraPose,
        lens: Lens,
        speeds: Speeds,
        dolly: ScrollDolly,
    ) -> Self {
        ScrollDolly::lift(&mut pose);
        Self::new(pose, lens, speeds, CameraKind::StaticFirstPerson(dolly))
    }

    /// Creates a camera behind and above the orbit's focal point, looking at it.
    #[must_use]
    pub fn third_person(orbit: Orbit, lens: Lens, speeds: Speeds) -> Self {
        let eye = orbit.focal_point + Vec3::new(0.0, 1.0, 2.0).normalize() * orbit.distance;
        let mut pose = CameraPose::looking_at(eye, orbit.focal_point);
        orbit.follow(&mut pose);
        Self::new(pose, lens, speeds, CameraKind::ThirdPerson(orbit))
    }

    #[must_use]
    pub fn kind(&self) -> &CameraKind {
        &self.kind
    }

    #[must_use]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Moves the camera according to the held keys and the scroll wheel.
    ///
    /// Without an input provider nothing is polled and the camera stays where it is.
    pub fn update(&mut self, delta_time: f32, input: Option<&dyn InputState>) {
        let Some(input) = input else {
            return;
        };
        let changed = match &mut self.kind {
            CameraKind::FirstPerson => {
                first_person::update(&mut self.pose, self.speeds, delta_time, input)
            }
            CameraKind::StaticFirstPerson(dolly) => {
                dolly.update(&mut self.pose, self.speeds, delta_time, input)
            }
            CameraKind::ThirdPerson(orbit) => {
                orbit.update(&mut self.pose, self.speeds, delta_time, input)
            }
        };
        if changed {
            self.recompute_view();
            self.moved = true;
        }
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    #[must_use]
    pub fn inverse_view_matrix(&self) -> Mat4 {
        self.inverse_view
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    #[must_use]
    pub fn inverse_projection_matrix(&self) -> Mat4 {
        self.inverse_projection
    }

    /// Unit vector the camera looks along.
    #[must_use]
    pub fn facing_direction(&self) -> Vec3 {
        self.pose.facing()
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Whether the camera moved since the last call.
    pub fn take_moved(&mut self) -> bool {
        mem::take(&mut self.moved)
    }

    #[must_use]
    pub fn lens(&self) -> Lens {
        Lens {
            fov_degrees: self.projection.fov().to_degrees(),
            aspect_ratio: self.projection.aspect_ratio(),
            near: self.projection.near(),
            far: self.projection.far(),
        }
    }

    pub fn set_lens(&mut self, lens: Lens) {
        self.projection = lens.projection();
        self.recompute_projection();
    }

    /// Adapts the aspect ratio to a resized surface.
    pub fn set_aspect_ratio(&mut self, surface_dimensions: (u32, u32)) {
        self.projection.set_surface_dimensions(surface_dimensions);
        self.recompute_projection();
    }

    /// Moves the point a third person camera circles around. Other cameras ignore this.
    pub fn set_focal_point(&mut self, focal_point: Vec3) {
        if let CameraKind::ThirdPerson(orbit) = &mut self.kind {
            orbit.focal_point = focal_point;
            orbit.follow(&mut self.pose);
            self.recompute_view();
            self.moved = true;
        }
    }

    /// The picking ray through a cursor position in pixels. `None` for an empty screen.
    #[must_use]
    pub fn ray_through_cursor(&self, cursor: Vec2, screen_dimensions: (u32, u32)) -> Option<Ray> {
        let ndc = screen_to_ndc(cursor, screen_dimensions)?;
        Some(Ray::from_ndc(ndc, self.inverse_projection, self.inverse_view))
    }

    /// The point on the ground plane below the cursor, if the picking ray hits it.
    #[must_use]
    pub fn ground_point_under_cursor(
        &self,
        cursor: Vec2,
        screen_dimensions: (u32, u32),
    ) -> Option<Vec3> {
        self.ray_through_cursor(cursor, screen_dimensions)?
            .intersect_ground()
    }

    fn recompute_view(&mut self) {
        self.view = self.pose.view_matrix();
        self.inverse_view = self.view.inverse();
        trace!(
            "camera at {} facing {}",
            self.pose.position,
            self.pose.facing()
        );
    }

    fn recompute_projection(&mut self) {
        self.projection_matrix = self.projection.matrix();
        self.inverse_projection = self.projection_matrix.inverse();
    }
}

/// `1.0` while only `positive` is held, `-1.0` while only `negative` is held, `0.0`
/// otherwise.
fn axis(input: &dyn InputState, positive: Key, negative: Key) -> f32 {
    match (input.is_key_pressed(positive), input.is_key_pressed(negative)) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}
