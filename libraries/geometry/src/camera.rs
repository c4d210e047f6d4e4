use glam::{Mat4, Vec3};

use crate::rotation::rotate_vector;

/// Position and orientation of a camera.
///
/// The orientation is stored as the `right` and `up` basis vectors. The viewing direction
/// follows from them as `normalize(up × right)` (right-handed, looking down -z by default).
/// Both vectors are kept at unit length by the mutating methods, but this is not enforced
/// for values assigned directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

impl CameraPose {
    #[must_use]
    pub fn new(position: Vec3, right: Vec3, up: Vec3) -> Self {
        Self {
            position,
            right,
            up,
        }
    }

    /// Creates a pose at `eye` looking at `center` with the world's y-axis pointing up.
    ///
    /// Looking straight up or down leaves the horizontal orientation undefined (NaN basis).
    #[must_use]
    pub fn looking_at(eye: Vec3, center: Vec3) -> Self {
        let forward = (center - eye).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        Self::new(eye, right, up)
    }

    #[must_use]
    pub fn facing(&self) -> Vec3 {
        self.up.cross(self.right).normalize()
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.facing(), self.up)
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Turns left (positive angle) or right around the world's y-axis.
    pub fn yaw(&mut self, angle: f32) {
        self.right = rotate_vector(self.right, Vec3::Y, angle);
        self.up = rotate_vector(self.up, Vec3::Y, angle);
        self.orthonormalize();
    }

    /// Tilts up (positive angle) or down around the pose's right axis.
    pub fn pitch(&mut self, angle: f32) {
        self.up = rotate_vector(self.up, self.right, angle);
        self.orthonormalize();
    }

    /// Removes numerical drift accumulated by repeated rotations (Gram-Schmidt).
    fn orthonormalize(&mut self) {
        self.right = self.right.normalize();
        self.up = (self.up - self.right * self.up.dot(self.right)).normalize();
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-5),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn default_pose_faces_negative_z() {
        assert_close(CameraPose::default().facing(), Vec3::NEG_Z);
    }

    #[test]
    fn looking_at_builds_orthonormal_basis() {
        let pose = CameraPose::looking_at(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO);
        assert_close(pose.facing(), Vec3::new(0.0, -1.0, -1.0).normalize());
        assert!(pose.right.dot(pose.up).abs() < 1e-6, "basis not orthogonal");
        assert!((pose.up.length() - 1.0).abs() < 1e-6, "up not normalized");
        assert_close(pose.right, Vec3::X);
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let pose = CameraPose::looking_at(Vec3::new(3.0, 4.0, 5.0), Vec3::ZERO);
        assert_close(
            pose.view_matrix().transform_point3(pose.position),
            Vec3::ZERO,
        );
        // the target lies straight ahead, on the view space's -z axis
        let target = pose.view_matrix().transform_point3(Vec3::ZERO);
        assert_close(target, Vec3::new(0.0, 0.0, -Vec3::new(3.0, 4.0, 5.0).length()));
    }

    #[test]
    fn yaw_and_pitch_rotate_facing_direction() {
        let mut pose = CameraPose::default();
        pose.yaw(FRAC_PI_2);
        assert_close(pose.facing(), Vec3::NEG_X);

        let mut pose = CameraPose::default();
        pose.pitch(FRAC_PI_2);
        assert_close(pose.facing(), Vec3::Y);
    }
}
