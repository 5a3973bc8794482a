pub mod catalog;
pub mod footprint;
pub mod geometry;
pub mod history;
pub mod id;
pub mod layout;
pub mod model;
pub mod registry;
pub mod room;

pub use footprint::{Footprint, footprint};
pub use geometry::{
    RoomBounds, WallDistances, clamp_to_room, constrain_position, distances_to_walls, snap,
};
pub use history::History;
pub use id::FurnitureId;
pub use layout::{LAYOUT_VERSION, LayoutError, RoomLayout};
pub use model::*;
pub use registry::FurnitureRegistry;
pub use room::RoomConfig;
