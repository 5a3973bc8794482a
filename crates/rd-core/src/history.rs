//! Linear undo/redo history over full scene snapshots.
//!
//! The history is a non-empty sequence of snapshots plus a cursor pointing
//! at the entry that matches the live scene. Entries after the cursor are
//! the redo future; committing a new entry discards them.
//!
//! Restoring is a whole-scene replace, so there is no per-mutation inverse
//! chain to keep consistent: any past state is reproduced exactly.

use crate::model::SceneSnapshot;

/// Default bound on stored entries.
pub const DEFAULT_MAX_HISTORY: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<SceneSnapshot>,
    /// Invariant: `cursor < entries.len()`.
    cursor: usize,
    /// Maximum number of stored entries; `0` = unbounded.
    max_depth: usize,
}

impl History {
    /// Seed a history with a single entry at cursor 0.
    pub fn new(initial: SceneSnapshot, max_depth: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_depth,
        }
    }

    /// Commit `entry` after the cursor, dropping any redo future.
    ///
    /// When the bound is exceeded the oldest entry is discarded and the
    /// cursor shifts with it.
    pub fn push(&mut self, entry: SceneSnapshot) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;

        if self.max_depth > 0 && self.entries.len() > self.max_depth.max(1) {
            let excess = self.entries.len() - self.max_depth.max(1);
            self.entries.drain(..excess);
            self.cursor -= excess;
        }
        log::debug!(
            "history: committed entry {} of {}",
            self.cursor,
            self.entries.len()
        );
    }

    /// Step back one entry and return it. `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&SceneSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        log::debug!("history: undo to entry {}", self.cursor);
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry and return it. `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&SceneSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        log::debug!("history: redo to entry {}", self.cursor);
        Some(&self.entries[self.cursor])
    }

    /// Discard everything and re-seed with a single entry.
    pub fn reset(&mut self, initial: SceneSnapshot) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }

    /// The entry matching the live scene.
    pub fn current(&self) -> &SceneSnapshot {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a history holds at least its seed entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
