//! Room configuration: dimensions and appearance.

use crate::model::{DimensionsPatch, RoomAppearance, RoomDimensions};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomConfig {
    dimensions: RoomDimensions,
    appearance: RoomAppearance,
}

impl RoomConfig {
    pub fn new(dimensions: RoomDimensions, appearance: RoomAppearance) -> Self {
        Self {
            dimensions: dimensions.clamped(),
            appearance,
        }
    }

    pub fn dimensions(&self) -> RoomDimensions {
        self.dimensions
    }

    pub fn appearance(&self) -> &RoomAppearance {
        &self.appearance
    }

    /// Apply the provided axes, each saturated into its valid range.
    /// Returns `true` if any stored value changed.
    pub fn set_dimensions(&mut self, patch: DimensionsPatch) -> bool {
        let before = self.dimensions;
        let mut next = before;
        if let Some(w) = patch.width {
            next.width = w;
        }
        if let Some(l) = patch.length {
            next.length = l;
        }
        if let Some(h) = patch.height {
            next.height = h;
        }
        self.dimensions = next.clamped();
        self.dimensions != before
    }

    /// Empty strings are ignored; anything else is stored verbatim.
    pub fn set_floor_texture(&mut self, texture: &str) -> bool {
        assign_non_empty(&mut self.appearance.floor_texture, texture)
    }

    /// Empty strings are ignored; anything else is stored verbatim.
    pub fn set_wall_color(&mut self, color: &str) -> bool {
        assign_non_empty(&mut self.appearance.wall_color, color)
    }
}

fn assign_non_empty(slot: &mut String, value: &str) -> bool {
    if value.is_empty() || slot == value {
        return false;
    }
    value.clone_into(slot);
    true
}
