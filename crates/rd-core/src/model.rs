//! Core data model for room layouts.
//!
//! A scene is a rectangular room (dimensions + appearance) holding an ordered
//! list of furniture items. The room is centered on the origin: the floor
//! spans `[-width/2, width/2]` on x and `[-length/2, length/2]` on z, with y
//! pointing up. Rotation is in radians about the y axis.
//!
//! Every numeric invariant here is enforced by clamping, never by rejecting.

use crate::id::FurnitureId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

// ─── Furniture kinds ─────────────────────────────────────────────────────

/// The closed set of furniture types a room can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FurnitureKind {
    Bed,
    Chair,
    Table,
    Sofa,
    Bookshelf,
    Desk,
    Armchair,
}

impl FurnitureKind {
    pub const ALL: [FurnitureKind; 7] = [
        FurnitureKind::Bed,
        FurnitureKind::Chair,
        FurnitureKind::Table,
        FurnitureKind::Sofa,
        FurnitureKind::Bookshelf,
        FurnitureKind::Desk,
        FurnitureKind::Armchair,
    ];

    /// The lowercase wire token (`"bed"`, `"armchair"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            FurnitureKind::Bed => "bed",
            FurnitureKind::Chair => "chair",
            FurnitureKind::Table => "table",
            FurnitureKind::Sofa => "sofa",
            FurnitureKind::Bookshelf => "bookshelf",
            FurnitureKind::Desk => "desk",
            FurnitureKind::Armchair => "armchair",
        }
    }
}

impl fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown furniture type: {0:?}")]
pub struct UnknownFurnitureKind(pub String);

impl FromStr for FurnitureKind {
    type Err = UnknownFurnitureKind;

    /// Exact, lowercase match on the wire token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FurnitureKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownFurnitureKind(s.to_string()))
    }
}

// ─── Furniture items ─────────────────────────────────────────────────────

/// Allowed furniture scale factors. Out-of-range values saturate.
pub const SCALE_RANGE: RangeInclusive<f64> = 0.5..=2.0;

/// Rotation applied by one "rotate" action (45°).
pub const ROTATION_STEP: f64 = std::f64::consts::FRAC_PI_4;

/// A single piece of furniture placed in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    pub id: FurnitureId,
    #[serde(rename = "type")]
    pub kind: FurnitureKind,
    /// `[x, y, z]` in room coordinates.
    pub position: [f64; 3],
    pub rotation: f64,
    pub scale: f64,
}

impl FurnitureItem {
    pub fn new(id: FurnitureId, kind: FurnitureKind, position: [f64; 3]) -> Self {
        Self {
            id,
            kind,
            position,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Partial update for a furniture item. `None` fields are left untouched.
///
/// The id and kind are immutable once created and therefore absent here.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FurniturePatch {
    pub position: Option<[f64; 3]>,
    pub rotation: Option<f64>,
    pub scale: Option<f64>,
}

impl FurniturePatch {
    pub fn position(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Some([x, y, z]),
            ..Self::default()
        }
    }

    pub fn rotation(rotation: f64) -> Self {
        Self {
            rotation: Some(rotation),
            ..Self::default()
        }
    }

    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    /// Merge the provided fields into `item`.
    ///
    /// Non-finite numbers are dropped and scale saturates into
    /// [`SCALE_RANGE`]. Returns `true` if any field actually changed.
    pub fn apply_to(&self, item: &mut FurnitureItem) -> bool {
        let before = (item.position, item.rotation, item.scale);

        if let Some(p) = self.position
            && p.iter().all(|v| v.is_finite())
        {
            item.position = p;
        }
        if let Some(r) = self.rotation
            && r.is_finite()
        {
            item.rotation = r;
        }
        if let Some(s) = self.scale
            && s.is_finite()
        {
            item.scale = s.clamp(*SCALE_RANGE.start(), *SCALE_RANGE.end());
        }

        before != (item.position, item.rotation, item.scale)
    }
}

// ─── Room ────────────────────────────────────────────────────────────────

/// Valid range for room width and length.
pub const FLOOR_RANGE: RangeInclusive<f64> = 4.0..=40.0;
/// Valid range for room height.
pub const HEIGHT_RANGE: RangeInclusive<f64> = 8.0..=20.0;

pub const DEFAULT_FLOOR_TEXTURE: &str = "/textures/wood_floor.jpg";
pub const DEFAULT_WALL_COLOR: &str = "#f0f0f0";

/// Saturate `value` into `range`. NaN falls back to the lower bound.
pub fn clamp_to_range(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl Default for RoomDimensions {
    fn default() -> Self {
        Self {
            width: 12.0,
            length: 14.0,
            height: 10.0,
        }
    }
}

impl RoomDimensions {
    /// Return a copy with every axis saturated into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            width: clamp_to_range(self.width, &FLOOR_RANGE),
            length: clamp_to_range(self.length, &FLOOR_RANGE),
            height: clamp_to_range(self.height, &HEIGHT_RANGE),
        }
    }
}

/// Partial update for room dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionsPatch {
    pub width: Option<f64>,
    pub length: Option<f64>,
    pub height: Option<f64>,
}

impl DimensionsPatch {
    pub fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn length(length: f64) -> Self {
        Self {
            length: Some(length),
            ..Self::default()
        }
    }

    pub fn height(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }
}

/// Cosmetic room settings. Both fields are opaque strings to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomAppearance {
    pub floor_texture: String,
    pub wall_color: String,
}

impl Default for RoomAppearance {
    fn default() -> Self {
        Self {
            floor_texture: DEFAULT_FLOOR_TEXTURE.to_string(),
            wall_color: DEFAULT_WALL_COLOR.to_string(),
        }
    }
}

// ─── Snapshots ───────────────────────────────────────────────────────────

/// A full, independent copy of furniture + room + appearance at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    pub furniture: Vec<FurnitureItem>,
    pub dimensions: RoomDimensions,
    pub appearance: RoomAppearance,
}
