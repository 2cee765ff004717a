//! Persisted selection state.
//!
//! The badge remembers which profile was showing across power cycles. The
//! record is tiny (one integer) and lives under a namespaced key so other
//! device state can share the same store.

extern crate alloc;

use alloc::string::String;

/// Namespace for the badge selection record.
pub const STATE_NAMESPACE: &str = "badges";

/// The persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub current_badge: u32,
}

/// Load/save of the selection record.
///
/// The namespace is fixed at construction time. Implementations:
/// - `NvsStateStore` in the firmware (ESP-IDF NVS)
/// - [`FileStateStore`] for hosted runs
/// - [`MemoryStateStore`] for the simulator and tests
pub trait StateStore {
    /// Load the stored record. `None` when nothing was stored yet or the
    /// stored data is unreadable; the caller falls back to a default and
    /// clamps, so corruption never propagates.
    fn load(&mut self) -> Option<SelectionState>;

    /// Save the record. Failures are logged and swallowed; the in-process
    /// copy stays authoritative until the next successful save.
    fn save(&mut self, state: &SelectionState);
}

/// In-memory store for the simulator and tests.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    stored: Option<SelectionState>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store, as if a previous run had saved `state`.
    pub fn with_stored(state: SelectionState) -> Self {
        Self {
            stored: Some(state),
        }
    }
}

impl StateStore for MemoryStateStore {
    fn load(&mut self) -> Option<SelectionState> {
        self.stored
    }

    fn save(&mut self, state: &SelectionState) {
        self.stored = Some(*state);
    }
}

/// File-backed store for hosted runs: a two-line text file with a version
/// header, one file per namespace.
#[cfg(feature = "std")]
pub struct FileStateStore {
    path: String,
}

#[cfg(feature = "std")]
impl FileStateStore {
    pub fn new(namespace: &str) -> Self {
        let root = if cfg!(target_os = "espidf") {
            "/flash/.inkbadge"
        } else {
            "target/.inkbadge-state"
        };
        Self {
            path: alloc::format!("{}/{}.tsv", root, namespace),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(feature = "std")]
impl StateStore for FileStateStore {
    fn load(&mut self) -> Option<SelectionState> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let mut lines = raw.lines();
        if lines.next()? != "v1" {
            return None;
        }
        let current_badge = lines.next()?.trim().parse::<u32>().ok()?;
        Some(SelectionState { current_badge })
    }

    fn save(&mut self, state: &SelectionState) {
        if let Some(parent) = std::path::Path::new(&self.path).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let out = alloc::format!("v1\n{}\n", state.current_badge);
        if std::fs::write(&self.path, out).is_err() {
            log::warn!("failed to persist selection state to {}", self.path);
        }
    }
}
