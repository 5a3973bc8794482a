//! Versioned JSON interchange format for saved room layouts.
//!
//! ```json
//! { "roomDimensions": {"width":12,"length":14,"height":10},
//!   "furniture": [{"id":"bed_0","type":"bed","position":[1,0,-2],"rotation":0,"scale":1}],
//!   "floorTexture": "/textures/wood_floor.jpg", "wallColor": "#f0f0f0",
//!   "version": "1.1" }
//! ```
//!
//! Saving always stamps [`LAYOUT_VERSION`]. Loading accepts any version that
//! shares its major component ([`ACCEPTED_MAJOR_PREFIX`]) and rejects the
//! rest without touching live state.

use crate::geometry::{DEFAULT_WALL_MARGIN, RoomBounds, clamp_to_room};
use crate::id::FurnitureId;
use crate::model::{
    DEFAULT_FLOOR_TEXTURE, DEFAULT_WALL_COLOR, FurnitureItem, RoomAppearance, RoomDimensions,
    SCALE_RANGE, SceneSnapshot, clamp_to_range,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const LAYOUT_VERSION: &str = "1.1";
pub const ACCEPTED_MAJOR_PREFIX: &str = "1.";

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid layout file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported layout version {found:?} (expected {expected}x)")]
    UnsupportedVersion {
        found: String,
        expected: &'static str,
    },
    #[error("duplicate furniture id in layout: {0}")]
    DuplicateId(FurnitureId),
    #[error("layout file i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The persisted form of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomLayout {
    pub room_dimensions: RoomDimensions,
    pub furniture: Vec<FurnitureItem>,
    #[serde(default = "default_floor_texture")]
    pub floor_texture: String,
    #[serde(default = "default_wall_color")]
    pub wall_color: String,
    pub version: String,
}

fn default_floor_texture() -> String {
    DEFAULT_FLOOR_TEXTURE.to_string()
}

fn default_wall_color() -> String {
    DEFAULT_WALL_COLOR.to_string()
}

fn non_empty(s: String, fallback: fn() -> String) -> String {
    if s.is_empty() { fallback() } else { s }
}

/// Wrap a snapshot in the persisted form, stamped with the current version.
pub fn serialize(snapshot: &SceneSnapshot) -> RoomLayout {
    RoomLayout {
        room_dimensions: snapshot.dimensions,
        furniture: snapshot.furniture.clone(),
        floor_texture: snapshot.appearance.floor_texture.clone(),
        wall_color: snapshot.appearance.wall_color.clone(),
        version: LAYOUT_VERSION.to_string(),
    }
}

/// Validate a persisted layout and turn it back into a snapshot.
///
/// Dimensions are clamped into range, then every item's scale is clamped
/// into [`SCALE_RANGE`] and its floor position pulled inside the walls.
/// Empty appearance strings fall back to the defaults.
///
/// # Errors
/// `UnsupportedVersion` when the major version differs, `DuplicateId` when
/// two items share an id.
pub fn deserialize(layout: RoomLayout) -> Result<SceneSnapshot, LayoutError> {
    if !layout.version.starts_with(ACCEPTED_MAJOR_PREFIX) {
        return Err(LayoutError::UnsupportedVersion {
            found: layout.version,
            expected: ACCEPTED_MAJOR_PREFIX,
        });
    }

    let mut seen = HashSet::with_capacity(layout.furniture.len());
    for item in &layout.furniture {
        if !seen.insert(item.id) {
            return Err(LayoutError::DuplicateId(item.id));
        }
    }

    let dimensions = layout.room_dimensions.clamped();
    let bounds = RoomBounds::from(dimensions);
    let furniture = layout
        .furniture
        .into_iter()
        .map(|item| clamp_item(item, bounds))
        .collect();

    Ok(SceneSnapshot {
        furniture,
        dimensions,
        appearance: RoomAppearance {
            floor_texture: non_empty(layout.floor_texture, default_floor_texture),
            wall_color: non_empty(layout.wall_color, default_wall_color),
        },
    })
}

fn clamp_item(mut item: FurnitureItem, bounds: RoomBounds) -> FurnitureItem {
    let [x, y, z] = item.position;
    let (x, z) = clamp_to_room(x, z, bounds, DEFAULT_WALL_MARGIN);
    item.position = [x, y, z];
    item.scale = clamp_to_range(item.scale, &SCALE_RANGE);
    item
}

/// Serialize a snapshot to pretty-printed layout JSON.
///
/// # Errors
/// Only if serde_json fails to encode (non-finite numbers are written as `null`).
pub fn to_json(snapshot: &SceneSnapshot) -> Result<String, LayoutError> {
    Ok(serde_json::to_string_pretty(&serialize(snapshot))?)
}

/// Parse layout JSON and validate it.
///
/// # Errors
/// `Parse` for malformed JSON or unknown furniture types, plus everything
/// [`deserialize`] rejects.
pub fn from_json(text: &str) -> Result<SceneSnapshot, LayoutError> {
    let layout: RoomLayout = serde_json::from_str(text)?;
    deserialize(layout)
}

/// Write a snapshot to a layout file.
///
/// # Errors
/// `Io` when the file cannot be written.
pub fn save_file(snapshot: &SceneSnapshot, path: impl AsRef<Path>) -> Result<(), LayoutError> {
    let json = to_json(snapshot)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read and validate a layout file.
///
/// # Errors
/// `Io` when the file cannot be read, otherwise as [`from_json`].
pub fn load_file(path: impl AsRef<Path>) -> Result<SceneSnapshot, LayoutError> {
    let text = std::fs::read_to_string(path)?;
    from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FurnitureKind;
    use pretty_assertions::assert_eq;

    fn sample() -> SceneSnapshot {
        let mut bed = FurnitureItem::new(
            FurnitureId::intern("bed_a"),
            FurnitureKind::Bed,
            [1.5, 0.0, -2.25],
        );
        bed.rotation = std::f64::consts::FRAC_PI_4;
        bed.scale = 1.2;
        SceneSnapshot {
            furniture: vec![
                bed,
                FurnitureItem::new(
                    FurnitureId::intern("desk_b"),
                    FurnitureKind::Desk,
                    [-3.0, 0.0, 4.0],
                ),
            ],
            dimensions: RoomDimensions {
                width: 20.0,
                length: 16.0,
                height: 9.0,
            },
            appearance: RoomAppearance {
                floor_texture: "/textures/grass.png".into(),
                wall_color: "#aabbcc".into(),
            },
        }
    }

    #[test]
    fn json_roundtrip_preserves_snapshot() {
        let original = sample();
        let json = to_json(&original).unwrap();
        assert_eq!(from_json(&json).unwrap(), original);
    }

    #[test]
    fn save_stamps_current_version() {
        let layout = serialize(&sample());
        assert_eq!(layout.version, LAYOUT_VERSION);
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["version"], "1.1");
        assert_eq!(json["furniture"][0]["type"], "bed");
        assert_eq!(json["furniture"][0]["position"][2], -2.25);
        assert_eq!(json["roomDimensions"]["width"], 20.0);
        assert_eq!(json["wallColor"], "#aabbcc");
    }

    #[test]
    fn older_minor_version_is_accepted() {
        let mut layout = serialize(&sample());
        layout.version = "1.0".into();
        assert!(deserialize(layout).is_ok());
    }

    #[test]
    fn other_major_version_is_rejected() {
        for version in ["2.0", "0.9", "1", "10.1", ""] {
            let mut layout = serialize(&sample());
            layout.version = version.into();
            let err = deserialize(layout).unwrap_err();
            assert!(
                matches!(err, LayoutError::UnsupportedVersion { .. }),
                "version {version:?} should be rejected, got {err}"
            );
        }
    }

    #[test]
    fn unknown_furniture_type_is_a_parse_error() {
        let text = r#"{"roomDimensions":{"width":12,"length":14,"height":10},
            "furniture":[{"id":"x","type":"lamp","position":[0,0,0],"rotation":0,"scale":1}],
            "version":"1.1"}"#;
        assert!(matches!(from_json(text), Err(LayoutError::Parse(_))));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut snapshot = sample();
        let first = snapshot.furniture[0].clone();
        snapshot.furniture.push(first);
        let err = deserialize(serialize(&snapshot)).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateId(id) if id.as_str() == "bed_a"));
    }

    #[test]
    fn missing_appearance_uses_defaults_and_dimensions_clamp() {
        let text = r#"{"roomDimensions":{"width":100,"length":14,"height":10},
            "furniture":[],"version":"1.0"}"#;
        let snapshot = from_json(text).unwrap();
        assert_eq!(snapshot.dimensions.width, 40.0);
        assert_eq!(snapshot.appearance, RoomAppearance::default());
    }
}
