use glam::Vec3;
use lib_geometry::CameraPose;
use track_framework_common::input::{InputState, Key};

use super::{axis, Speeds};

/// Tilting stops this close to looking straight up or down (sine of the angle to the
/// horizon).
const MAX_ELEVATION: f32 = 0.98;

/// Keeps the camera on a sphere around `focal_point`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub focal_point: Vec3,
    pub distance: f32,
}

impl Orbit {
    #[must_use]
    pub fn new(focal_point: Vec3, distance: f32) -> Self {
        Self {
            focal_point,
            distance,
        }
    }

    /// Places the camera so that it looks at the focal point from the orbit's distance.
    pub(super) fn follow(&self, pose: &mut CameraPose) {
        pose.position = self.focal_point - pose.facing() * self.distance;
    }

    /// The arrow keys swing the camera around the focal point. Returns whether the pose
    /// changed.
    pub(super) fn update(
        &mut self,
        pose: &mut CameraPose,
        speeds: Speeds,
        delta_time: f32,
        input: &dyn InputState,
    ) -> bool {
        let before = *pose;
        let yaw = axis(input, Key::Left, Key::Right);
        let pitch = axis(input, Key::Up, Key::Down);

        if yaw != 0.0 {
            pose.yaw(yaw * speeds.rotation * delta_time);
        }
        if pitch != 0.0 {
            let unpitched = *pose;
            pose.pitch(pitch * speeds.rotation * delta_time);
            if pose.facing().y.abs() > MAX_ELEVATION {
                *pose = unpitched;
            }
        }
        self.follow(pose);
        *pose != before
    }
}

#[cfg(test)]
mod tests {
    use track_framework_common::input::InputSnapshot;

    use super::*;

    fn orbit_invariant_holds(orbit: &Orbit, pose: &CameraPose) -> bool {
        let expected = orbit.focal_point - pose.facing() * orbit.distance;
        pose.position.abs_diff_eq(expected, 1e-4)
    }

    #[test]
    fn camera_stays_on_the_orbit() {
        let mut orbit = Orbit::new(Vec3::new(12.0, 0.0, -20.0), 30.0);
        let mut pose = CameraPose::looking_at(Vec3::new(12.0, 15.0, 10.0), orbit.focal_point);
        orbit.follow(&mut pose);

        let inputs = [
            InputSnapshot::empty().with_key(Key::Left),
            InputSnapshot::empty().with_key(Key::Up),
            InputSnapshot::empty().with_key(Key::Right).with_key(Key::Down),
            InputSnapshot::empty(),
        ];
        for input in inputs.iter().cycle().take(40) {
            orbit.update(&mut pose, Speeds::default(), 0.1, input);
            assert!(orbit_invariant_holds(&orbit, &pose), "{pose:?}");
            assert!(
                (pose.position.distance(orbit.focal_point) - 30.0).abs() < 1e-3,
                "{pose:?}"
            );
        }
    }

    #[test]
    fn tilting_stops_before_the_pole() {
        let mut orbit = Orbit::new(Vec3::ZERO, 10.0);
        let mut pose = CameraPose::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
        orbit.follow(&mut pose);

        let input = InputSnapshot::empty().with_key(Key::Down);
        for _ in 0..100 {
            orbit.update(&mut pose, Speeds::default(), 0.1, &input);
        }
        assert!(pose.facing().y.abs() <= MAX_ELEVATION, "{pose:?}");
        assert!(orbit_invariant_holds(&orbit, &pose));
    }

    #[test]
    fn idle_orbit_reports_no_change() {
        let mut orbit = Orbit::new(Vec3::ZERO, 10.0);
        let mut pose = CameraPose::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
        orbit.follow(&mut pose);
        assert!(!orbit.update(&mut pose, Speeds::default(), 0.1, &InputSnapshot::empty()));
    }
}
