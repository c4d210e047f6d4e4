//! Rotation matrix builders. All angles are in radians, rotations are counter-clockwise
//! when looking down the axis towards the origin (right-handed).

use glam::{Mat3, Mat4, Vec3};

#[must_use]
pub fn rotation_x(angle: f32) -> Mat4 {
    Mat4::from_rotation_x(angle)
}

#[must_use]
pub fn rotation_y(angle: f32) -> Mat4 {
    Mat4::from_rotation_y(angle)
}

#[must_use]
pub fn rotation_z(angle: f32) -> Mat4 {
    Mat4::from_rotation_z(angle)
}

/// Rotation around an arbitrary axis using Rodrigues' formula
/// `R = I + sin(a) K + (1 - cos(a)) K²` where `K` is the cross product matrix of the axis.
///
/// The axis does not need to be normalized. A zero-length axis yields NaN entries.
#[must_use]
pub fn rotation_axis(axis: Vec3, angle: f32) -> Mat4 {
    let axis = axis.normalize();
    let (sin, cos) = angle.sin_cos();

    let cross = Mat3::from_cols(
        Vec3::new(0.0, axis.z, -axis.y),
        Vec3::new(-axis.z, 0.0, axis.x),
        Vec3::new(axis.y, -axis.x, 0.0),
    );

    let rotation = Mat3::IDENTITY + cross * sin + cross * cross * (1.0 - cos);
    Mat4::from_mat3(rotation)
}

/// Rotates `vector` around `axis` (Rodrigues' rotation formula in vector form).
#[must_use]
pub fn rotate_vector(vector: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let axis = axis.normalize();
    let (sin, cos) = angle.sin_cos();
    vector * cos + axis.cross(vector) * sin + axis * axis.dot(vector) * (1.0 - cos)
}
