use glam::Vec3;
use lib_geometry::{CameraPose, VectorExt};
use track_framework_common::input::{InputState, Key};

use super::{axis, Speeds};

/// The camera never sinks below this height.
pub const MIN_HEIGHT: f32 = 1.0;

/// Shorter dolly moves are dropped.
const MIN_DOLLY_DISTANCE: f32 = 1e-4;

/// Scroll wheel zoom along the viewing direction, limited to a range around the starting
/// point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollDolly {
    /// distance per scroll wheel notch
    pub step: f32,
    pub forward_cap: f32,
    pub backward_cap: f32,
    /// net distance moved by scrolling, always within `-backward_cap..=forward_cap`
    scroll_applied: f32,
}

impl ScrollDolly {
    /// Negative caps are treated as zero.
    #[must_use]
    pub fn new(step: f32, forward_cap: f32, backward_cap: f32) -> Self {
        Self {
            step,
            forward_cap: forward_cap.max(0.0),
            backward_cap: backward_cap.max(0.0),
            scroll_applied: 0.0,
        }
    }

    #[must_use]
    pub fn scroll_applied(&self) -> f32 {
        self.scroll_applied
    }

    /// W/A/S/D pan over the ground without changing the height, the scroll wheel moves
    /// along the viewing direction. Returns whether the pose changed.
    pub(super) fn update(
        &mut self,
        pose: &mut CameraPose,
        speeds: Speeds,
        delta_time: f32,
        input: &dyn InputState,
    ) -> bool {
        let facing = pose.facing();
        let forward = Vec3::new(facing.x, 0.0, facing.z)
            .try_normalized()
            .unwrap_or(Vec3::NEG_Z);
        let right = Vec3::new(pose.right.x, 0.0, pose.right.z)
            .try_normalized()
            .unwrap_or(Vec3::X);

        let mut changed = false;
        let pan = right * axis(input, Key::D, Key::A) + forward * axis(input, Key::W, Key::S);
        if pan != Vec3::ZERO {
            pose.translate(pan * speeds.movement * delta_time);
            changed = true;
        }

        let notches = input.scroll_wheel_delta();
        if notches != 0 {
            let distance = self.dolly_distance(pose, facing, notches);
            if distance.abs() >= MIN_DOLLY_DISTANCE {
                pose.translate(facing * distance);
                self.scroll_applied += distance;
                changed = true;
            }
        }
        changed
    }

    fn dolly_distance(&self, pose: &CameraPose, facing: Vec3, notches: i32) -> f32 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "scroll notches per frame are tiny"
        )]
        let requested = notches as f32 * self.step;
        let target =
            (self.scroll_applied + requested).clamp(-self.backward_cap, self.forward_cap);
        let distance = target - self.scroll_applied;

        let height = pose.position.y + facing.y * distance;
        if height >= MIN_HEIGHT || facing.y == 0.0 {
            return distance;
        }
        // stop at the floor, but never turn the move around
        let to_floor = (MIN_HEIGHT - pose.position.y) / facing.y;
        if to_floor * distance > 0.0 {
            to_floor.clamp(distance.min(0.0), distance.max(0.0))
        } else {
            0.0
        }
    }

    /// Puts the camera onto the floor if it starts below it.
    pub(super) fn lift(pose: &mut CameraPose) {
        pose.position.y = pose.position.y.max(MIN_HEIGHT);
    }
}
