//! Placement constraints: room-boundary clamping, grid snapping, and
//! wall distances.
//!
//! All functions are pure and total. Out-of-room inputs saturate onto the
//! valid interior; nothing here returns an error.

use crate::model::RoomDimensions;

/// Default distance kept between an item's origin and every wall.
pub const DEFAULT_WALL_MARGIN: f64 = 0.5;

/// Default snapping grid cell size.
pub const DEFAULT_GRID_SIZE: f64 = 1.0;

/// Floor extent of a room, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomBounds {
    pub width: f64,
    pub length: f64,
}

impl From<RoomDimensions> for RoomBounds {
    fn from(d: RoomDimensions) -> Self {
        Self {
            width: d.width,
            length: d.length,
        }
    }
}

impl RoomBounds {
    /// Valid x interval `[min, max]` for the given margin.
    ///
    /// Collapses to `[0, 0]` when the margin exceeds the half-width.
    pub fn x_range(&self, margin: f64) -> (f64, f64) {
        half_interval(self.width, margin)
    }

    /// Valid z interval `[min, max]` for the given margin.
    pub fn z_range(&self, margin: f64) -> (f64, f64) {
        half_interval(self.length, margin)
    }
}

fn half_interval(extent: f64, margin: f64) -> (f64, f64) {
    let half = (extent / 2.0 - margin).max(0.0);
    (-half, half)
}

fn saturate(v: f64, (lo, hi): (f64, f64)) -> f64 {
    if v.is_nan() {
        return 0.0_f64.clamp(lo, hi);
    }
    v.clamp(lo, hi)
}

/// Clamp `(x, z)` so the point stays `margin` inside every wall.
pub fn clamp_to_room(x: f64, z: f64, bounds: RoomBounds, margin: f64) -> (f64, f64) {
    (
        saturate(x, bounds.x_range(margin)),
        saturate(z, bounds.z_range(margin)),
    )
}

/// Round `value` to the nearest multiple of `grid_size`.
///
/// A non-positive or non-finite grid leaves the value unchanged.
pub fn snap(value: f64, grid_size: f64) -> f64 {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Clamp, then optionally snap, a raw drag position.
///
/// Snapping can push a point one half-cell past a non-grid-aligned bound
/// (e.g. `5.5` snapping to `6`), so the snapped point is clamped again.
/// When the interval holds no grid line, the clamped point wins.
pub fn constrain_position(
    x: f64,
    z: f64,
    bounds: RoomBounds,
    margin: f64,
    snap_grid: Option<f64>,
) -> (f64, f64) {
    let (cx, cz) = clamp_to_room(x, z, bounds, margin);
    let Some(grid) = snap_grid else {
        return (cx, cz);
    };
    (
        snap_within(cx, grid, bounds.x_range(margin)),
        snap_within(cz, grid, bounds.z_range(margin)),
    )
}

fn snap_within(v: f64, grid: f64, (lo, hi): (f64, f64)) -> f64 {
    let snapped = snap(v, grid);
    if (lo..=hi).contains(&snapped) {
        return snapped;
    }
    // Nearest grid line still inside the interval.
    let inward = if snapped > hi {
        snapped - grid
    } else {
        snapped + grid
    };
    if (lo..=hi).contains(&inward) {
        inward
    } else {
        v
    }
}

/// Distance from an item to each of the four walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallDistances {
    /// To the `x = -width/2` wall.
    pub left: f64,
    /// To the `x = +width/2` wall.
    pub right: f64,
    /// To the `z = -length/2` wall.
    pub back: f64,
    /// To the `z = +length/2` wall.
    pub front: f64,
}

/// Non-negative per-axis distances from `position` to each wall.
///
/// A position beyond a wall (an item left behind by a room shrink) reports
/// 0 for that wall rather than a negative overlap.
pub fn distances_to_walls(position: [f64; 3], bounds: RoomBounds) -> WallDistances {
    let [x, _, z] = position;
    let hw = bounds.width / 2.0;
    let hl = bounds.length / 2.0;
    WallDistances {
        left: (hw + x).max(0.0),
        right: (hw - x).max(0.0),
        back: (hl + z).max(0.0),
        front: (hl - z).max(0.0),
    }
}
