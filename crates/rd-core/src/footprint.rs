//! Per-type physical footprints.
//!
//! A renderer-facing lookup: how wide, deep, and tall each furniture type
//! is at scale 1, and how far its model must be lifted to rest on the floor.
//! The scene state never consults this table; placement clamps on the item
//! origin with a fixed wall margin.

use crate::model::FurnitureKind;

/// Unscaled bounding box of a furniture model, in room units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    /// Extent along local x.
    pub width: f64,
    /// Extent along local z.
    pub depth: f64,
    pub height: f64,
    /// Vertical lift applied to the model origin so it sits on `y = 0`.
    pub base_offset: f64,
}

impl Footprint {
    const fn new(width: f64, depth: f64, height: f64, base_offset: f64) -> Self {
        Self {
            width,
            depth,
            height,
            base_offset,
        }
    }

    /// Axis-aligned half extents `(x, z)` after rotating about y and scaling.
    pub fn half_extents(&self, rotation: f64, scale: f64) -> (f64, f64) {
        let (sin, cos) = rotation.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let hw = self.width / 2.0;
        let hd = self.depth / 2.0;
        (scale * (cos * hw + sin * hd), scale * (sin * hw + cos * hd))
    }
}

/// Footprint for a furniture type.
pub fn footprint(kind: FurnitureKind) -> Footprint {
    match kind {
        FurnitureKind::Bed => Footprint::new(2.2, 1.5, 1.7, 0.0),
        FurnitureKind::Chair => Footprint::new(0.6, 0.6, 1.5, 0.0),
        FurnitureKind::Table => Footprint::new(1.5, 1.0, 0.8, 0.0),
        FurnitureKind::Sofa => Footprint::new(2.5, 1.0, 1.4, 0.0),
        // Placeholder unit cube, modelled around its center.
        FurnitureKind::Bookshelf | FurnitureKind::Desk | FurnitureKind::Armchair => {
            Footprint::new(1.0, 1.0, 1.0, 0.5)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn unrotated_extents_are_half_size() {
        let (hx, hz) = footprint(FurnitureKind::Sofa).half_extents(0.0, 1.0);
        assert!(close(hx, 1.25));
        assert!(close(hz, 0.5));
    }

    #[test]
    fn quarter_turn_swaps_axes() {
        let (hx, hz) = footprint(FurnitureKind::Bed).half_extents(FRAC_PI_2, 2.0);
        assert!(close(hx, 1.5));
        assert!(close(hz, 2.2));
    }

    #[test]
    fn every_kind_has_a_positive_footprint() {
        for kind in FurnitureKind::ALL {
            let fp = footprint(kind);
            assert!(fp.width > 0.0 && fp.depth > 0.0 && fp.height > 0.0, "{kind}");
        }
    }
}
