//! Furniture registry: id → item, in insertion order.

use crate::id::FurnitureId;
use crate::model::{FurnitureItem, FurnitureKind, FurniturePatch, RoomDimensions};
use rand::Rng;

/// Side length subtracted from the room before picking a spawn point.
pub const DEFAULT_SPAWN_INSET: f64 = 4.0;

/// Owns every furniture item in the scene.
///
/// Iteration order is insertion order and is stable across updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FurnitureRegistry {
    items: Vec<FurnitureItem>,
}

impl FurnitureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from an ordered list, dropping later duplicates of an id.
    pub fn from_items(items: impl IntoIterator<Item = FurnitureItem>) -> Self {
        let mut registry = Self::new();
        for item in items {
            registry.insert(item);
        }
        registry
    }

    /// Create a new item of `kind` at a random point of the room interior.
    ///
    /// The spawn point is uniform over a `(width - inset) × (length - inset)`
    /// rectangle centered on the origin, with `y = 0`, rotation 0, scale 1.
    pub fn add(
        &mut self,
        kind: FurnitureKind,
        room: RoomDimensions,
        inset: f64,
        rng: &mut impl Rng,
    ) -> FurnitureItem {
        let span_x = (room.width - inset).max(0.0);
        let span_z = (room.length - inset).max(0.0);
        let x = (rng.random::<f64>() - 0.5) * span_x;
        let z = (rng.random::<f64>() - 0.5) * span_z;

        let id = self.fresh_id(kind);
        let item = FurnitureItem::new(id, kind, [x, 0.0, z]);
        self.items.push(item.clone());
        item
    }

    fn fresh_id(&self, kind: FurnitureKind) -> FurnitureId {
        loop {
            let id = FurnitureId::with_prefix(kind.as_str());
            if !self.contains(id) {
                return id;
            }
        }
    }

    /// Append an existing item. Returns `false` (and changes nothing) if
    /// the id is already present.
    pub fn insert(&mut self, item: FurnitureItem) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove an item. Removing an unknown id is a no-op returning `None`.
    pub fn remove(&mut self, id: FurnitureId) -> Option<FurnitureItem> {
        let pos = self.position(id)?;
        Some(self.items.remove(pos))
    }

    /// Merge `patch` into the item. Returns `true` if the item exists and
    /// at least one field changed.
    pub fn update(&mut self, id: FurnitureId, patch: &FurniturePatch) -> bool {
        match self.get_mut(id) {
            Some(item) => patch.apply_to(item),
            None => false,
        }
    }

    pub fn get(&self, id: FurnitureId) -> Option<&FurnitureItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn get_mut(&mut self, id: FurnitureId) -> Option<&mut FurnitureItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    fn position(&self, id: FurnitureId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn contains(&self, id: FurnitureId) -> bool {
        self.position(id).is_some()
    }

    /// Current items in insertion order.
    pub fn list(&self) -> &[FurnitureItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
