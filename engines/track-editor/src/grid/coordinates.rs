use glam::{UVec2, Vec2, Vec3};

use super::{CELL_SIZE, GRID_SIZE};

/// Distance from the world origin to the edge of the grid, on both x and z.
pub const HALF_EXTENT: f32 = 64.0;

/// World positions are pulled back this far from the edge before they are mapped to a cell.
pub const PLACEMENT_LIMIT: f32 = 60.0;

/// Maps a world position to the cell containing it. World x/z become grid x/y, the height is
/// ignored. Positions outside of the grid end up in the nearest border cell.
#[must_use]
pub fn world_to_grid(world: Vec3) -> UVec2 {
    let clamped = Vec2::new(world.x, world.z).clamp(
        Vec2::splat(-PLACEMENT_LIMIT),
        Vec2::splat(PLACEMENT_LIMIT),
    );
    let cell = ((clamped + HALF_EXTENT) / CELL_SIZE).floor();
    cell.as_uvec2().min(UVec2::splat(GRID_SIZE - 1))
}

/// Centre of a cell on the ground plane.
#[must_use]
pub fn grid_to_world(cell: UVec2) -> Vec3 {
    let centre = cell.as_vec2() * CELL_SIZE + (CELL_SIZE / 2.0 - HALF_EXTENT);
    Vec3::new(centre.x, 0.0, centre.y)
}
