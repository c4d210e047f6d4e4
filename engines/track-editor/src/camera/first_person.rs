use glam::Vec3;
use lib_geometry::CameraPose;
use track_framework_common::input::{InputState, Key};

use super::{axis, Speeds};

/// Free flight: A/D strafe, W/S move along the viewing direction, E/Q rise and sink, the
/// arrow keys turn and tilt. Returns whether the pose changed.
pub(super) fn update(
    pose: &mut CameraPose,
    speeds: Speeds,
    delta_time: f32,
    input: &dyn InputState,
) -> bool {
    let direction = pose.right * axis(input, Key::D, Key::A)
        + pose.facing() * axis(input, Key::W, Key::S)
        + pose.up * axis(input, Key::E, Key::Q);
    let yaw = axis(input, Key::Left, Key::Right);
    let pitch = axis(input, Key::Up, Key::Down);

    let mut changed = false;
    if direction != Vec3::ZERO {
        pose.translate(direction * speeds.movement * delta_time);
        changed = true;
    }
    if yaw != 0.0 {
        pose.yaw(yaw * speeds.rotation * delta_time);
        changed = true;
    }
    if pitch != 0.0 {
        pose.pitch(pitch * speeds.rotation * delta_time);
        changed = true;
    }
    changed
}
