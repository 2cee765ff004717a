//! Application state and the selection loop core.
//!
//! The loop is a single-state machine: idle awaiting input, with the
//! hardware halt as its only suspension point. Each wake runs one
//! [`BadgeApp::run_cycle`]: keep-alive first, then input, then, only when
//! something marked the frame dirty, a fresh record read, render, and
//! selection persist. The caller commits the rendered frame to the panel
//! and issues the halt; the next button press wakes the loop and the cycle
//! repeats.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::badge::{BadgeRecord, BADGE_DIR};
use crate::badge_activity::BadgeActivity;
use crate::catalog::{Catalog, Direction};
use crate::filesystem::{file_stem, join_path, FileSystem};
use crate::image_panel::PanelImage;
use crate::input::{Button, ButtonSnapshot, InputEvent};
use crate::layout;
use crate::power::PowerControl;
use crate::state_store::StateStore;
use crate::warning_activity::WarningActivity;

/// What a draw cycle put on the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The badge frame was composited and committed.
    Badge,
    /// The record was unreadable; a warning frame was drawn instead and the
    /// badge draw was skipped entirely. Carries the warning message.
    Warning(String),
}

/// Process-lifetime application state: the catalog plus a dirty flag.
///
/// Built once at startup from an explicit filesystem and state store, then
/// passed around by reference. No module-level globals, so every component
/// can be driven with a fabricated context in tests.
pub struct BadgeApp {
    catalog: Catalog,
    dirty: bool,
}

impl BadgeApp {
    /// Discover badges and restore the persisted selection. The first cycle
    /// after construction always draws.
    pub fn new(fs: &mut impl FileSystem, store: &mut impl StateStore) -> Self {
        let mut catalog = Catalog::discover(fs);
        catalog.restore_selection(store);
        log::info!(
            "catalog ready: {} badge(s), starting at {}",
            catalog.len(),
            catalog.selected()
        );
        Self {
            catalog,
            dirty: true,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Handle one button event. Returns whether the event changed anything
    /// (and therefore marked the frame dirty).
    ///
    /// UP/DOWN only mean something when there is more than one badge, and
    /// they saturate at the ends rather than wrapping. REFRESH always
    /// forces a redraw; it exists to clear transient panel artifacts.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let InputEvent::Press(button) = event;
        let changed = match button {
            Button::Up if self.catalog.len() > 1 => self.catalog.advance(Direction::Previous),
            Button::Down if self.catalog.len() > 1 => self.catalog.advance(Direction::Next),
            Button::Refresh => true,
            Button::Up | Button::Down => false,
        };
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Draw the currently selected badge.
    ///
    /// The record is re-read from its file on every call, never cached, so
    /// edits to the file show up on the next refresh. If the read fails the
    /// badge draw is aborted before anything touches the display, and the
    /// warning frame is rendered instead.
    pub fn render_current<FS, D>(
        &mut self,
        fs: &mut FS,
        display: &mut D,
    ) -> Result<RenderOutcome, D::Error>
    where
        FS: FileSystem,
        D: DrawTarget<Color = BinaryColor>,
    {
        self.catalog.clamp_selected();
        let file = self.catalog.selected_entry().to_string();
        let path = join_path(BADGE_DIR, &file);

        let text = match fs.read_file(&path) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("unable to read badge record {}: {}", path, err);
                let warning =
                    WarningActivity::new(format!("Unable to open / read badge text file\n{}", path));
                warning.render(display)?;
                return Ok(RenderOutcome::Warning(warning.into_message()));
            }
        };

        let record = BadgeRecord::parse(&text);
        let plan = layout::compute(&record, self.catalog.selected(), self.catalog.len());
        let image = Self::load_panel_image(fs, &file);
        BadgeActivity::new(plan, image).render(display)?;
        Ok(RenderOutcome::Badge)
    }

    /// Run one wake-to-halt iteration minus the platform pieces: keep-alive,
    /// input, and the conditional render + persist. Returns what was drawn,
    /// or `None` when the frame was clean and the display untouched.
    ///
    /// The caller commits the frame, holds a warning for
    /// [`crate::warning_activity::WARNING_HOLD_MS`], and then halts; the
    /// halt's hardware wake re-enters this function with the next snapshot.
    pub fn run_cycle<FS, ST, D, P>(
        &mut self,
        snapshot: ButtonSnapshot,
        fs: &mut FS,
        store: &mut ST,
        display: &mut D,
        power: &mut P,
    ) -> Result<Option<RenderOutcome>, D::Error>
    where
        FS: FileSystem,
        ST: StateStore,
        D: DrawTarget<Color = BinaryColor>,
        P: PowerControl,
    {
        // Keep-alive runs whether or not anything is dirty; a held button
        // can power the system straight through a halt.
        power.keep_alive();

        for event in snapshot.events() {
            self.handle_input(event);
        }

        if !self.dirty {
            return Ok(None);
        }

        let outcome = self.render_current(fs, display)?;
        self.catalog.persist_selection(store);
        self.dirty = false;
        Ok(Some(outcome))
    }

    #[cfg(feature = "std")]
    fn load_panel_image(fs: &mut impl FileSystem, file: &str) -> Option<PanelImage> {
        use crate::image_panel::{load_badge_image, ImageLoadError};

        match load_badge_image(fs, file_stem(file)) {
            Ok(image) => Some(image),
            Err(ImageLoadError::NotFound) => None,
            Err(err) => {
                // Deliberately silent on screen: the panel fill stands in.
                log::debug!("badge image for {} unusable: {}", file, err);
                None
            }
        }
    }

    #[cfg(not(feature = "std"))]
    fn load_panel_image(fs: &mut impl FileSystem, file: &str) -> Option<PanelImage> {
        let _ = (fs, file_stem(file));
        None
    }
}
