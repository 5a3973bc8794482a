//! Scene-state engine: the single source of truth for a room layout.
//!
//! The engine owns the furniture registry, the room configuration, the
//! selection, and the undo/redo history. Renderers and UI panels call its
//! mutators and re-read state through its queries when notified.
//!
//! - **Edits** apply immediately and (re)arm a debounce timer. When the
//!   timer fires (via [`SceneEngine::tick`]) the whole scene is committed as
//!   one history entry, so a drag of many frames becomes one undo step.
//!
//! - **Undo/redo/load** first flush a pending commit, then replace the scene
//!   wholesale. The restore itself never re-arms the timer, so a restored
//!   entry is never re-recorded.

use crate::config::EngineConfig;
use crate::intake::{CommandIntake, ExternalCommand};
use crate::scheduler::{Clock, Debouncer, SystemClock};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rd_core::geometry::{RoomBounds, WallDistances, constrain_position, distances_to_walls};
use rd_core::history::History;
use rd_core::id::FurnitureId;
use rd_core::layout::{self, LayoutError};
use rd_core::model::*;
use rd_core::registry::FurnitureRegistry;
use rd_core::room::RoomConfig;
use std::path::Path;

type Observer = Box<dyn FnMut()>;

pub struct SceneEngine<C: Clock = SystemClock> {
    registry: FurnitureRegistry,
    room: RoomConfig,
    history: History,
    /// Weak reference by id; always resolved against the registry.
    selection: Option<FurnitureId>,
    snap_to_grid: bool,
    debouncer: Debouncer,
    clock: C,
    rng: StdRng,
    config: EngineConfig,
    intake: Option<Box<dyn CommandIntake>>,
    observers: Vec<Observer>,
}

impl Default for SceneEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneEngine<SystemClock> {
    /// Default room, empty scene, wall-clock debouncing.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> SceneEngine<C> {
    pub fn with_clock(config: EngineConfig, clock: C) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let room = RoomConfig::default();
        let registry = FurnitureRegistry::new();
        let history = History::new(
            SceneSnapshot {
                furniture: Vec::new(),
                dimensions: room.dimensions(),
                appearance: room.appearance().clone(),
            },
            config.max_history,
        );

        Self {
            registry,
            room,
            history,
            selection: None,
            snap_to_grid: config.snap_to_grid,
            debouncer: Debouncer::new(config.debounce()),
            clock,
            rng,
            config,
            intake: None,
            observers: Vec::new(),
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// All items in insertion order.
    pub fn furniture(&self) -> &[FurnitureItem] {
        self.registry.list()
    }

    pub fn get(&self, id: FurnitureId) -> Option<&FurnitureItem> {
        self.registry.get(id)
    }

    pub fn dimensions(&self) -> RoomDimensions {
        self.room.dimensions()
    }

    pub fn appearance(&self) -> &RoomAppearance {
        self.room.appearance()
    }

    pub fn room_bounds(&self) -> RoomBounds {
        self.room.dimensions().into()
    }

    pub fn selected_id(&self) -> Option<FurnitureId> {
        self.selection
    }

    /// The selected item with its current field values.
    pub fn selected(&self) -> Option<&FurnitureItem> {
        self.selection.and_then(|id| self.registry.get(id))
    }

    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    /// Whether edits are waiting for the debounce window to close.
    pub fn has_pending_commit(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// A deep copy of the live scene.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            furniture: self.registry.list().to_vec(),
            dimensions: self.room.dimensions(),
            appearance: self.room.appearance().clone(),
        }
    }

    /// Distances from an item to each wall, for on-canvas measurements.
    ///
    /// Resizing the room does not move existing items, so after a shrink an
    /// item can sit past a wall; the distance to that wall then reads 0 until
    /// the item is moved again.
    pub fn wall_distances(&self, id: FurnitureId) -> Option<WallDistances> {
        let item = self.registry.get(id)?;
        Some(distances_to_walls(item.position, self.room_bounds()))
    }

    // ─── Furniture ───────────────────────────────────────────────────────

    /// Spawn a new item at a random interior point.
    ///
    /// The spawn inset never drops below twice the wall margin, so a fresh
    /// item always starts inside the clamp range.
    pub fn add_furniture(&mut self, kind: FurnitureKind) -> FurnitureId {
        let inset = self.config.spawn_inset.max(2.0 * self.config.wall_margin);
        let item = self
            .registry
            .add(kind, self.room.dimensions(), inset, &mut self.rng);
        log::debug!("added {} {} at {:?}", kind, item.id, item.position);
        self.edited();
        item.id
    }

    /// Add by wire token. Unrecognised tokens are dropped without error.
    pub fn add_furniture_by_name(&mut self, token: &str) -> Option<FurnitureId> {
        match token.parse::<FurnitureKind>() {
            Ok(kind) => Some(self.add_furniture(kind)),
            Err(err) => {
                log::debug!("ignoring add request: {err}");
                None
            }
        }
    }

    /// Remove an item; clears the selection if it pointed at it.
    /// Unknown ids are a no-op.
    pub fn delete_furniture(&mut self, id: FurnitureId) -> bool {
        if self.registry.remove(id).is_none() {
            return false;
        }
        if self.selection == Some(id) {
            self.selection = None;
        }
        self.edited();
        true
    }

    /// Merge `patch` into an item. A provided position is constrained to the
    /// room (and snapped when snap-to-grid is on); `y` passes through.
    /// A position with any non-finite component is dropped whole.
    pub fn update_furniture(&mut self, id: FurnitureId, mut patch: FurniturePatch) -> bool {
        patch.position = patch
            .position
            .filter(|p| p.iter().all(|v| v.is_finite()));
        if let Some([x, y, z]) = patch.position {
            let (cx, cz) = self.constrain(x, z);
            patch.position = Some([cx, y, cz]);
        }
        if !self.registry.update(id, &patch) {
            return false;
        }
        log::trace!("updated {id}: {patch:?}");
        self.edited();
        true
    }

    /// Drag an item to a raw floor position, keeping its height.
    pub fn move_furniture(&mut self, id: FurnitureId, x: f64, z: f64) -> bool {
        let Some(y) = self.registry.get(id).map(|i| i.position[1]) else {
            return false;
        };
        self.update_furniture(id, FurniturePatch::position(x, y, z))
    }

    /// Rotate an item by one 45° step.
    pub fn rotate_furniture(&mut self, id: FurnitureId) -> bool {
        let Some(rotation) = self.registry.get(id).map(|i| i.rotation) else {
            return false;
        };
        self.update_furniture(id, FurniturePatch::rotation(rotation + ROTATION_STEP))
    }

    fn constrain(&self, x: f64, z: f64) -> (f64, f64) {
        let grid = self.snap_to_grid.then_some(self.config.grid_size);
        constrain_position(x, z, self.room_bounds(), self.config.wall_margin, grid)
    }

    // ─── Room ────────────────────────────────────────────────────────────

    pub fn set_room_dimensions(&mut self, patch: DimensionsPatch) -> bool {
        if !self.room.set_dimensions(patch) {
            return false;
        }
        self.edited();
        true
    }

    pub fn set_floor_texture(&mut self, texture: &str) -> bool {
        if !self.room.set_floor_texture(texture) {
            return false;
        }
        self.edited();
        true
    }

    pub fn set_wall_color(&mut self, color: &str) -> bool {
        if !self.room.set_wall_color(color) {
            return false;
        }
        self.edited();
        true
    }

    // ─── Selection & modes ───────────────────────────────────────────────

    /// Select an item, or clear with `None`. Selecting an unknown id is
    /// rejected and leaves the selection unchanged.
    pub fn select_furniture(&mut self, id: Option<FurnitureId>) -> bool {
        if let Some(id) = id
            && !self.registry.contains(id)
        {
            return false;
        }
        if self.selection != id {
            self.selection = id;
            self.notify();
        }
        true
    }

    /// Toggle grid snapping for subsequent moves. Not recorded in history.
    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        if self.snap_to_grid != enabled {
            self.snap_to_grid = enabled;
            self.notify();
        }
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.flush();
        let Some(entry) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(entry);
        true
    }

    pub fn redo(&mut self) -> bool {
        self.flush();
        let Some(entry) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(entry);
        true
    }

    /// Replace everything with defaults and drop all history. Irreversible.
    pub fn reset_scene(&mut self) {
        self.debouncer.cancel();
        self.registry.clear();
        self.room = RoomConfig::default();
        self.selection = None;
        let seed = self.snapshot();
        self.history.reset(seed);
        log::info!("scene reset");
        self.notify();
    }

    /// Fire the debounced commit if its window has closed, after draining
    /// any queued external commands. Call from the host event loop.
    /// Returns `true` if a history entry was written.
    pub fn tick(&mut self) -> bool {
        self.process_commands();
        if self.debouncer.fire_if_due(self.clock.now()) {
            return self.commit();
        }
        false
    }

    /// Commit pending edits now instead of waiting for the window.
    pub fn flush(&mut self) -> bool {
        if self.debouncer.cancel() {
            return self.commit();
        }
        false
    }

    fn edited(&mut self) {
        self.debouncer.schedule(self.clock.now());
        self.notify();
    }

    /// Record the live scene, unless it equals the entry at the cursor.
    fn commit(&mut self) -> bool {
        let snapshot = self.snapshot();
        if &snapshot == self.history.current() {
            return false;
        }
        self.history.push(snapshot);
        true
    }

    fn restore(&mut self, entry: SceneSnapshot) {
        let SceneSnapshot {
            furniture,
            dimensions,
            appearance,
        } = entry;
        self.registry = FurnitureRegistry::from_items(furniture);
        self.room = RoomConfig::new(dimensions, appearance);
        self.selection = None;
        self.notify();
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// The live scene as layout JSON.
    ///
    /// # Errors
    /// Propagates serialization failures.
    pub fn save_layout(&self) -> Result<String, LayoutError> {
        layout::to_json(&self.snapshot())
    }

    /// Replace the scene with a saved layout and record it as a new history
    /// entry, so undo returns to the pre-load scene.
    ///
    /// # Errors
    /// Any [`LayoutError`]; the live scene and history are left untouched.
    pub fn load_layout(&mut self, text: &str) -> Result<(), LayoutError> {
        let snapshot = layout::from_json(text).inspect_err(|err| {
            log::warn!("layout rejected: {err}");
        })?;
        self.apply_loaded(snapshot);
        Ok(())
    }

    /// # Errors
    /// See [`layout::save_file`].
    pub fn save_layout_file(&self, path: impl AsRef<Path>) -> Result<(), LayoutError> {
        layout::save_file(&self.snapshot(), path)
    }

    /// # Errors
    /// See [`Self::load_layout`]; also `Io` when the file cannot be read.
    pub fn load_layout_file(&mut self, path: impl AsRef<Path>) -> Result<(), LayoutError> {
        let snapshot = layout::load_file(path).inspect_err(|err| {
            log::warn!("layout rejected: {err}");
        })?;
        self.apply_loaded(snapshot);
        Ok(())
    }

    fn apply_loaded(&mut self, snapshot: SceneSnapshot) {
        self.flush();
        log::info!("loaded layout with {} items", snapshot.furniture.len());
        self.history.push(snapshot.clone());
        self.restore(snapshot);
    }

    // ─── External commands & observers ───────────────────────────────────

    /// Install the port external command sources feed.
    pub fn set_intake(&mut self, intake: impl CommandIntake + 'static) {
        self.intake = Some(Box::new(intake));
    }

    /// Apply one external command. Returns the id of any created item.
    pub fn handle_command(&mut self, command: &ExternalCommand) -> Option<FurnitureId> {
        match command {
            ExternalCommand::AddFurniture { kind } => self.add_furniture_by_name(kind),
        }
    }

    /// Drain the intake port. Returns the number of commands consumed.
    pub fn process_commands(&mut self) -> usize {
        let Some(mut intake) = self.intake.take() else {
            return 0;
        };
        let mut count = 0;
        while let Some(command) = intake.poll() {
            self.handle_command(&command);
            count += 1;
        }
        self.intake = Some(intake);
        count
    }

    /// Register a "state changed" listener. It carries no payload; listeners
    /// re-read through the query API.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::CommandQueue;
    use crate::scheduler::ManualClock;
    use std::cell::Cell;
    use std::rc::Rc;

    fn engine() -> (SceneEngine<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let config = EngineConfig {
            seed: Some(42),
            ..EngineConfig::default()
        };
        (SceneEngine::with_clock(config, clock.clone()), clock)
    }

    /// Let the debounce window close and fire it.
    fn settle(engine: &mut SceneEngine<ManualClock>, clock: &ManualClock) -> bool {
        clock.advance_ms(300);
        engine.tick()
    }

    #[test]
    fn starts_with_single_seed_entry() {
        let (engine, _) = engine();
        assert_eq!(engine.history_len(), 1);
        assert!(!engine.can_undo());
        assert!(!engine.can_redo());
        assert!(engine.furniture().is_empty());
        assert_eq!(engine.dimensions(), RoomDimensions::default());
    }

    #[test]
    fn edits_commit_only_after_window() {
        let (mut engine, clock) = engine();
        engine.add_furniture(FurnitureKind::Bed);
        assert!(engine.has_pending_commit());

        clock.advance_ms(299);
        assert!(!engine.tick());
        assert_eq!(engine.history_len(), 1);

        clock.advance_ms(1);
        assert!(engine.tick());
        assert_eq!(engine.history_len(), 2);
        assert!(!engine.has_pending_commit());
    }

    #[test]
    fn update_clamps_position_into_room() {
        let (mut engine, _) = engine();
        let id = engine.add_furniture(FurnitureKind::Sofa);
        assert!(engine.update_furniture(id, FurniturePatch::position(50.0, 0.0, -50.0)));
        assert_eq!(engine.get(id).unwrap().position, [5.5, 0.0, -6.5]);
    }

    #[test]
    fn non_finite_position_is_ignored() {
        let (mut engine, _) = engine();
        let id = engine.add_furniture(FurnitureKind::Sofa);
        engine.move_furniture(id, 2.0, 3.0);

        assert!(!engine.update_furniture(id, FurniturePatch::position(f64::NAN, 0.0, 3.0)));
        assert!(!engine.update_furniture(id, FurniturePatch::position(2.0, 0.0, f64::INFINITY)));
        assert_eq!(engine.get(id).unwrap().position, [2.0, 0.0, 3.0]);
    }

    #[test]
    fn zero_spawn_inset_still_spawns_inside_walls() {
        let clock = ManualClock::new();
        let config = EngineConfig {
            seed: Some(42),
            spawn_inset: 0.0,
            ..EngineConfig::default()
        };
        let mut engine = SceneEngine::with_clock(config, clock);
        for _ in 0..200 {
            engine.add_furniture(FurnitureKind::Bed);
        }
        for item in engine.furniture() {
            let [x, _, z] = item.position;
            assert!((-5.5..=5.5).contains(&x), "x out of range: {x}");
            assert!((-6.5..=6.5).contains(&z), "z out of range: {z}");
        }
    }

    #[test]
    fn move_snaps_when_enabled() {
        let (mut engine, _) = engine();
        let id = engine.add_furniture(FurnitureKind::Desk);
        engine.set_snap_to_grid(true);
        engine.move_furniture(id, 2.3, -1.7);
        assert_eq!(engine.get(id).unwrap().position, [2.0, 0.0, -2.0]);

        engine.set_snap_to_grid(false);
        engine.move_furniture(id, 2.3, -1.7);
        assert_eq!(engine.get(id).unwrap().position, [2.3, 0.0, -1.7]);
    }

    #[test]
    fn rotate_steps_by_45_degrees() {
        let (mut engine, _) = engine();
        let id = engine.add_furniture(FurnitureKind::Chair);
        engine.rotate_furniture(id);
        engine.rotate_furniture(id);
        let r = engine.get(id).unwrap().rotation;
        assert!((r - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn select_unknown_id_is_rejected() {
        let (mut engine, _) = engine();
        let id = engine.add_furniture(FurnitureKind::Table);
        assert!(engine.select_furniture(Some(id)));
        assert!(!engine.select_furniture(Some(FurnitureId::intern("missing"))));
        assert_eq!(engine.selected_id(), Some(id));
    }

    #[test]
    fn selection_sees_refreshed_fields() {
        let (mut engine, _) = engine();
        let id = engine.add_furniture(FurnitureKind::Armchair);
        engine.select_furniture(Some(id));
        engine.update_furniture(id, FurniturePatch::scale(1.5));
        assert_eq!(engine.selected().map(|i| i.scale), Some(1.5));
    }

    #[test]
    fn selection_alone_does_not_touch_history() {
        let (mut engine, clock) = engine();
        let id = engine.add_furniture(FurnitureKind::Bed);
        settle(&mut engine, &clock);
        engine.select_furniture(Some(id));
        assert!(!engine.has_pending_commit());
        assert!(!settle(&mut engine, &clock));
        assert_eq!(engine.history_len(), 2);
    }

    #[test]
    fn undo_flushes_pending_edit_first() {
        let (mut engine, clock) = engine();
        let id = engine.add_furniture(FurnitureKind::Bed);
        settle(&mut engine, &clock);

        engine.move_furniture(id, 1.0, 1.0);
        assert!(engine.has_pending_commit());
        // The pending move is committed, then undone.
        assert!(engine.undo());
        assert!(!engine.has_pending_commit());
        assert_eq!(engine.history_len(), 3);
        assert_ne!(engine.get(id).unwrap().position, [1.0, 0.0, 1.0]);

        // Nothing stale fires afterwards.
        assert!(!settle(&mut engine, &clock));
        assert!(engine.can_redo());
    }

    #[test]
    fn undo_clears_selection() {
        let (mut engine, clock) = engine();
        let id = engine.add_furniture(FurnitureKind::Bed);
        settle(&mut engine, &clock);
        engine.rotate_furniture(id);
        settle(&mut engine, &clock);
        engine.select_furniture(Some(id));

        assert!(engine.undo());
        assert_eq!(engine.selected_id(), None);
    }

    #[test]
    fn reverting_by_hand_does_not_add_duplicate_entry() {
        let (mut engine, clock) = engine();
        engine.set_wall_color("#123456");
        engine.set_wall_color(DEFAULT_WALL_COLOR);
        assert!(!settle(&mut engine, &clock));
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn unknown_token_is_ignored() {
        let (mut engine, _) = engine();
        assert_eq!(engine.add_furniture_by_name("lamp"), None);
        assert!(engine.add_furniture_by_name("bookshelf").is_some());
        assert_eq!(engine.furniture().len(), 1);
    }

    #[test]
    fn tick_drains_intake() {
        let (mut engine, _) = engine();
        let queue = CommandQueue::new();
        engine.set_intake(queue.clone());

        queue.push(ExternalCommand::add_furniture("sofa"));
        queue.push(ExternalCommand::add_furniture("hammock"));
        queue.push(ExternalCommand::add_furniture("desk"));
        engine.tick();

        assert!(queue.is_empty());
        let kinds: Vec<_> = engine.furniture().iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![FurnitureKind::Sofa, FurnitureKind::Desk]);
    }

    #[test]
    fn observers_fire_on_every_applied_change() {
        let (mut engine, _) = engine();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        engine.subscribe(move || counter.set(counter.get() + 1));

        let id = engine.add_furniture(FurnitureKind::Bed);
        engine.select_furniture(Some(id));
        engine.update_furniture(FurnitureId::intern("nobody"), FurniturePatch::scale(1.0));
        engine.delete_furniture(id);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn wall_distances_for_item() {
        let (mut engine, _) = engine();
        let id = engine.add_furniture(FurnitureKind::Table);
        engine.move_furniture(id, 2.0, -3.0);
        let d = engine.wall_distances(id).unwrap();
        assert_eq!((d.left, d.right, d.back, d.front), (8.0, 4.0, 4.0, 10.0));
        assert!(engine.wall_distances(FurnitureId::intern("none")).is_none());
    }

    #[test]
    fn shrinking_room_leaves_item_until_moved() {
        let (mut engine, _) = engine();
        let id = engine.add_furniture(FurnitureKind::Table);
        engine.move_furniture(id, 5.5, 0.0);
        engine.set_room_dimensions(DimensionsPatch::width(4.0));

        assert_eq!(engine.get(id).unwrap().position, [5.5, 0.0, 0.0]);
        assert_eq!(engine.wall_distances(id).unwrap().right, 0.0);

        engine.move_furniture(id, 5.5, 0.0);
        assert_eq!(engine.get(id).unwrap().position, [1.5, 0.0, 0.0]);
        assert_eq!(engine.wall_distances(id).unwrap().right, 0.5);
    }
}
