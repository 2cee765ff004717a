//! Badge catalog: discovery, bounded selection, and persistence.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use crate::badge::{BADGE_DIR, DEFAULT_BADGE_FILE, DEFAULT_BADGE_TEXT};
use crate::filesystem::{join_path, FileSystem};
use crate::state_store::{SelectionState, StateStore};

/// Navigation direction for [`Catalog::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Clamp a possibly-stale selection index into `[0, count - 1]`.
///
/// A persisted index can point past the end after a badge file was deleted,
/// and the two-step repair mirrors that failure mode: pull overruns back to
/// the last entry first, then floor anything still negative at zero.
pub fn clamp_index(index: i64, count: usize) -> usize {
    let mut index = index;
    if index >= count as i64 {
        index = count as i64 - 1;
    }
    if index < 0 {
        index = 0;
    }
    index as usize
}

/// The ordered set of discovered badges plus the current selection.
///
/// Non-empty by construction: discovery falls back to writing one default
/// record, so every operation below may assume at least one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<String>,
    selected: usize,
}

impl Catalog {
    /// Discover badge definition files in [`BADGE_DIR`].
    ///
    /// The directory is created if missing. A listing failure is treated as
    /// an empty directory. An empty result bootstraps the default record:
    /// `badge.txt` is written with [`DEFAULT_BADGE_TEXT`] (unless a file of
    /// that name already exists) and becomes the single entry.
    pub fn discover(fs: &mut impl FileSystem) -> Self {
        let _ = fs.create_dir(BADGE_DIR);

        let mut entries: Vec<String> = match fs.list_files(BADGE_DIR) {
            Ok(files) => files
                .into_iter()
                .filter(|file| !file.is_directory && file.name.ends_with(".txt"))
                .map(|file| file.name)
                .collect(),
            Err(err) => {
                log::warn!("badge directory unreadable: {}", err);
                Vec::new()
            }
        };

        if entries.is_empty() {
            let path = join_path(BADGE_DIR, DEFAULT_BADGE_FILE);
            if !fs.exists(&path) {
                log::info!("no badges found, writing default record to {}", path);
                if let Err(err) = fs.write_file(&path, DEFAULT_BADGE_TEXT) {
                    log::warn!("failed to write default badge: {}", err);
                }
            }
            entries = vec![DEFAULT_BADGE_FILE.to_string()];
        }

        Self {
            entries,
            selected: 0,
        }
    }

    /// Build a catalog from known entries. Used by tests; `entries` must be
    /// non-empty.
    pub fn from_entries(entries: Vec<String>) -> Self {
        debug_assert!(!entries.is_empty());
        Self {
            entries,
            selected: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept so callers don't have to know the invariant.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Filename of the currently selected badge.
    pub fn selected_entry(&self) -> &str {
        &self.entries[self.clamped(self.selected as i64)]
    }

    fn clamped(&self, index: i64) -> usize {
        clamp_index(index, self.entries.len())
    }

    /// Re-apply the selection invariant. Runs before every draw in case the
    /// entry list and a stale index ever disagree.
    pub fn clamp_selected(&mut self) {
        self.selected = self.clamped(self.selected as i64);
    }

    /// Move the selection one step, saturating at both ends.
    /// Returns whether the selection actually moved.
    pub fn advance(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Previous if self.selected > 0 => {
                self.selected -= 1;
                true
            }
            Direction::Next if self.selected + 1 < self.entries.len() => {
                self.selected += 1;
                true
            }
            _ => false,
        }
    }

    /// Restore the persisted selection, clamped against the current entry
    /// list, then save the repaired value back so stale state heals on disk
    /// too.
    pub fn restore_selection(&mut self, store: &mut impl StateStore) {
        let loaded = store
            .load()
            .map(|state| state.current_badge as i64)
            .unwrap_or(0);
        self.selected = self.clamped(loaded);
        self.persist_selection(store);
    }

    /// Save the current selection.
    pub fn persist_selection(&self, store: &mut impl StateStore) {
        store.save(&SelectionState {
            current_badge: self.selected as u32,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_store::MemoryStateStore;

    fn catalog_of(count: usize) -> Catalog {
        Catalog::from_entries((0..count).map(|i| alloc::format!("badge{}.txt", i)).collect())
    }

    #[test]
    fn clamp_returns_in_range_for_any_index() {
        for count in 1..=5usize {
            for index in -1000i64..1000 {
                let clamped = clamp_index(index, count);
                assert!(clamped < count, "index {} count {}", index, count);
            }
        }
    }

    #[test]
    fn clamp_repairs_overrun_and_negative() {
        assert_eq!(clamp_index(5, 3), 2);
        assert_eq!(clamp_index(3, 3), 2);
        assert_eq!(clamp_index(2, 3), 2);
        assert_eq!(clamp_index(0, 3), 0);
        assert_eq!(clamp_index(-1, 3), 0);
        assert_eq!(clamp_index(i64::MIN, 1), 0);
        assert_eq!(clamp_index(i64::MAX, 1), 0);
    }

    #[test]
    fn advance_saturates_at_both_ends() {
        let mut catalog = catalog_of(3);

        assert!(!catalog.advance(Direction::Previous));
        assert_eq!(catalog.selected(), 0);

        assert!(catalog.advance(Direction::Next));
        assert!(catalog.advance(Direction::Next));
        assert_eq!(catalog.selected(), 2);

        assert!(!catalog.advance(Direction::Next));
        assert_eq!(catalog.selected(), 2);

        assert!(catalog.advance(Direction::Previous));
        assert_eq!(catalog.selected(), 1);
    }

    #[test]
    fn single_entry_catalog_never_moves() {
        let mut catalog = catalog_of(1);
        assert!(!catalog.advance(Direction::Next));
        assert!(!catalog.advance(Direction::Previous));
        assert_eq!(catalog.selected(), 0);
    }

    #[test]
    fn restore_clamps_stale_index_and_saves_back() {
        let mut catalog = catalog_of(2);
        let mut store = MemoryStateStore::with_stored(SelectionState { current_badge: 9 });

        catalog.restore_selection(&mut store);

        assert_eq!(catalog.selected(), 1);
        assert_eq!(store.load(), Some(SelectionState { current_badge: 1 }));
    }

    #[test]
    fn restore_with_no_stored_state_selects_first() {
        let mut catalog = catalog_of(3);
        let mut store = MemoryStateStore::new();

        catalog.restore_selection(&mut store);

        assert_eq!(catalog.selected(), 0);
        assert_eq!(store.load(), Some(SelectionState { current_badge: 0 }));
    }

    #[cfg(feature = "std")]
    mod discovery {
        use super::*;
        use crate::badge::{DEFAULT_BADGE_FILE, DEFAULT_BADGE_TEXT};
        use crate::mock_filesystem::MockFileSystem;

        #[test]
        fn discover_lists_text_files_only() {
            let mut fs = MockFileSystem::new();
            fs.add_directory("/badges");
            fs.add_file("/badges/one.txt", "a\nb\nc\nd\ne\nf\n");
            fs.add_file("/badges/two.txt", "a\nb\nc\nd\ne\nf\n");
            fs.add_binary_file("/badges/one.jpg", &[0xFF, 0xD8]);
            fs.add_directory("/badges/nested.txt");

            let catalog = Catalog::discover(&mut fs);
            assert_eq!(catalog.entries(), ["one.txt", "two.txt"]);
        }

        #[test]
        fn discover_bootstraps_default_when_empty() {
            let mut fs = MockFileSystem::new();

            let catalog = Catalog::discover(&mut fs);

            assert_eq!(catalog.len(), 1);
            assert_eq!(catalog.entries(), [DEFAULT_BADGE_FILE]);
            assert_eq!(
                fs.read_file("/badges/badge.txt").unwrap(),
                DEFAULT_BADGE_TEXT
            );
        }

        #[test]
        fn discover_never_yields_empty_catalog() {
            // Directory listing failure: /badges exists as a file, so the
            // mock refuses to list it and creation fails too.
            let mut fs = MockFileSystem::new();
            fs.add_file("/badges", "not a directory");

            let catalog = Catalog::discover(&mut fs);
            assert!(!catalog.is_empty());
        }

        #[test]
        fn discover_keeps_existing_default_file_content() {
            // Listing fails (the directory path is occupied by a file) but a
            // badge.txt already exists: the bootstrap must not clobber it.
            let mut fs = MockFileSystem::new();
            fs.add_file("/badges", "not a directory");
            fs.add_file("/badges/badge.txt", "custom\ncontent\n\n\n\n\n");

            let catalog = Catalog::discover(&mut fs);

            assert_eq!(catalog.entries(), ["badge.txt"]);
            assert_eq!(
                fs.read_file("/badges/badge.txt").unwrap(),
                "custom\ncontent\n\n\n\n\n"
            );
        }
    }
}
