//! The furniture catalogue shown in the "add furniture" panel.

use crate::model::FurnitureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub kind: FurnitureKind,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCategory {
    pub name: &'static str,
    pub items: &'static [CatalogEntry],
}

const fn entry(kind: FurnitureKind, name: &'static str, description: &'static str) -> CatalogEntry {
    CatalogEntry {
        kind,
        name,
        description,
    }
}

pub static CATALOG: &[CatalogCategory] = &[
    CatalogCategory {
        name: "Living Room",
        items: &[
            entry(FurnitureKind::Chair, "Dining Chair", "Simple wooden chair"),
            entry(FurnitureKind::Sofa, "Sofa", "Comfortable 2-seater"),
            entry(FurnitureKind::Table, "Coffee Table", "Low table for the lounge"),
            entry(FurnitureKind::Armchair, "Armchair", "Cozy single seat"),
        ],
    },
    CatalogCategory {
        name: "Study Room",
        items: &[
            entry(FurnitureKind::Table, "Dining Table", "Rectangular table"),
            entry(FurnitureKind::Desk, "Desk", "Office desk with drawers"),
            entry(FurnitureKind::Bookshelf, "Bookshelf", "Tall open shelving"),
        ],
    },
    CatalogCategory {
        name: "Bedroom",
        items: &[entry(FurnitureKind::Bed, "Bed", "Standard double bed")],
    },
];

/// First catalogue entry for a kind, used for display labels.
pub fn entry_for(kind: FurnitureKind) -> Option<&'static CatalogEntry> {
    CATALOG
        .iter()
        .flat_map(|c| c.items.iter())
        .find(|e| e.kind == kind)
}

/// Human-readable label for a kind, falling back to the wire token.
pub fn display_name(kind: FurnitureKind) -> &'static str {
    entry_for(kind).map_or(kind.as_str(), |e| e.name)
}
