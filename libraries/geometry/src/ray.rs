use glam::{Mat4, Vec2, Vec3};

/// Rays closer to parallel than this are treated as missing the ground plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A half-line in world space. `direction` is normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Unprojects a point in normalized device coordinates into a world space picking ray.
    ///
    /// The points on the near (depth 0) and far (depth 1) plane are transformed into view
    /// space by the inverse projection, then into world space by the inverse view matrix.
    /// The ray starts on the near plane.
    #[must_use]
    pub fn from_ndc(ndc: Vec2, inverse_projection: Mat4, inverse_view: Mat4) -> Self {
        let near_view = inverse_projection.project_point3(ndc.extend(0.0));
        let far_view = inverse_projection.project_point3(ndc.extend(1.0));

        let origin = inverse_view.transform_point3(near_view);
        let far = inverse_view.transform_point3(far_view);

        Self {
            origin,
            direction: (far - origin).normalize(),
        }
    }

    #[must_use]
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Intersects the ray with the ground plane `y = 0`.
    ///
    /// Returns `None` if the ray runs parallel to the plane or if the plane lies behind the
    /// ray's origin.
    #[must_use]
    pub fn intersect_ground(&self) -> Option<Vec3> {
        if self.direction.y.abs() < PARALLEL_EPSILON {
            return None;
        }
        let distance = -self.origin.y / self.direction.y;
        if distance < 0.0 || !distance.is_finite() {
            return None;
        }
        let mut hit = self.at(distance);
        // remove the rounding error so the hit lies exactly on the plane
        hit.y = 0.0;
        Some(hit)
    }
}

/// Maps a cursor position in pixels (origin top-left) to normalized device coordinates.
///
/// Returns `None` for an empty screen.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "screen dimensions are far below 2^24"
)]
pub fn screen_to_ndc(cursor: Vec2, (width, height): (u32, u32)) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }
    let size = Vec2::new(width as f32, height as f32);
    let relative = cursor / size;
    Some(Vec2::new(relative.x * 2.0 - 1.0, 1.0 - relative.y * 2.0))
}

#[cfg(test)]
mod tests {
    use crate::{CameraPose, Projection};

    use super::*;

    #[test]
    fn downward_ray_hits_ground_below_origin() {
        let ray = Ray {
            origin: Vec3::new(4.0, 10.0, -3.0),
            direction: Vec3::NEG_Y,
        };
        assert_eq!(ray.intersect_ground(), Some(Vec3::new(4.0, 0.0, -3.0)));
    }

    #[test]
    fn parallel_ray_misses_ground() {
        let ray = Ray {
            origin: Vec3::new(0.0, 5.0, 0.0),
            direction: Vec3::X,
        };
        assert_eq!(ray.intersect_ground(), None);
    }

    #[test]
    fn ground_behind_ray_is_ignored() {
        let ray = Ray {
            origin: Vec3::new(0.0, 5.0, 0.0),
            direction: Vec3::new(0.0, 1.0, -1.0).normalize(),
        };
        assert_eq!(ray.intersect_ground(), None);
    }

    #[test]
    fn screen_centre_is_ndc_origin() {
        assert_eq!(
            screen_to_ndc(Vec2::new(400.0, 300.0), (800, 600)),
            Some(Vec2::ZERO)
        );
        assert_eq!(
            screen_to_ndc(Vec2::ZERO, (800, 600)),
            Some(Vec2::new(-1.0, 1.0))
        );
        assert_eq!(screen_to_ndc(Vec2::ZERO, (0, 600)), None);
    }

    #[test]
    fn centre_ray_follows_camera_facing() {
        let pose = CameraPose::looking_at(Vec3::new(0.0, 20.0, 20.0), Vec3::new(8.0, 0.0, 0.0));
        let projection = Projection::new_perspective(1.5, 1.0, 0.1..500.0);

        let ray = Ray::from_ndc(
            Vec2::ZERO,
            projection.matrix().inverse(),
            pose.view_matrix().inverse(),
        );
        assert!(
            ray.direction.abs_diff_eq(pose.facing(), 1e-4),
            "{ray:?} vs {}",
            pose.facing()
        );

        let hit = ray.intersect_ground();
        assert!(
            hit.is_some_and(|hit| hit.abs_diff_eq(Vec3::new(8.0, 0.0, 0.0), 1e-2)),
            "{hit:?}"
        );
    }
}
