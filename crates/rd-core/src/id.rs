use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Process-wide table behind every [`FurnitureId`].
///
/// Entries are never freed. Each id comes either from a loaded layout file or
/// from [`FurnitureId::with_prefix`] when an item is added, so the table grows
/// with the number of distinct ids a session has seen, not with edits.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Identifier of a furniture item, stable across undo, redo and save/load.
///
/// Layout files carry ids as plain strings (often millisecond timestamps);
/// here they are interned, so snapshots copy and compare them as integers.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FurnitureId(Spur);

impl FurnitureId {
    /// Id for `s`, reusing the existing entry if `s` was seen before.
    pub fn intern(s: &str) -> Self {
        FurnitureId(INTERNER.get_or_intern(s))
    }

    /// The id as written to layout files.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a process-unique ID with a type prefix (e.g. `bed_1`, `sofa_2`).
    ///
    /// Unique among generated IDs only; IDs loaded from a layout file may
    /// collide, so the registry re-rolls until it finds a free one.
    pub fn with_prefix(prefix: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }
}

impl fmt::Debug for FurnitureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for FurnitureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FurnitureId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FurnitureId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(FurnitureId::intern(&s))
    }
}
