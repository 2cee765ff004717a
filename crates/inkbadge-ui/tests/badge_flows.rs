//! End-to-end badge flows against a fabricated context: mock filesystem,
//! in-memory state store, framebuffer display, counting power control.

use embedded_graphics::pixelcolor::BinaryColor;

use inkbadge_ui::{
    BadgeApp, BadgeRecord, ButtonSnapshot, Catalog, FileSystem, MemoryStateStore, MockFileSystem,
    NoopPower, RenderOutcome, SelectionState, StateStore, TestDisplay, WarningActivity,
    DEFAULT_BADGE_TEXT,
};

fn press_down() -> ButtonSnapshot {
    ButtonSnapshot {
        down: true,
        ..ButtonSnapshot::released()
    }
}

fn press_up() -> ButtonSnapshot {
    ButtonSnapshot {
        up: true,
        ..ButtonSnapshot::released()
    }
}

#[test]
fn empty_directory_bootstraps_default_badge() {
    let mut fs = MockFileSystem::new();
    let mut store = MemoryStateStore::new();

    let mut app = BadgeApp::new(&mut fs, &mut store);

    // One synthesized entry backed by a real file with the canonical text.
    assert_eq!(app.catalog().len(), 1);
    assert_eq!(app.catalog().entries(), ["badge.txt"]);
    assert_eq!(
        fs.read_file("/badges/badge.txt").unwrap(),
        "mustelid inc\nH. Badger\nRP2040\n2MB Flash\nE ink\n296x128px"
    );

    let record = BadgeRecord::parse(DEFAULT_BADGE_TEXT);
    assert_eq!(record.company, "mustelid inc");
    assert_eq!(record.name, "H. Badger");
    assert_eq!(
        (record.detail1_title.as_str(), record.detail1_text.as_str()),
        ("RP2040", "2MB Flash")
    );
    assert_eq!(
        (record.detail2_title.as_str(), record.detail2_text.as_str()),
        ("E ink", "296x128px")
    );

    let mut display = TestDisplay::default_size();
    let mut power = NoopPower::new();
    let outcome = app
        .run_cycle(
            ButtonSnapshot::released(),
            &mut fs,
            &mut store,
            &mut display,
            &mut power,
        )
        .unwrap();
    assert_eq!(outcome, Some(RenderOutcome::Badge));

    // Single badge: no selection indicator in the panel's bottom-right
    // corner region.
    for i in 0..8 {
        assert_eq!(display.pixel(292, 126 - i), BinaryColor::Off);
    }
}

#[test]
fn discovery_is_never_empty() {
    // Fresh filesystem, listing failure, pre-existing files: every path
    // ends with at least one entry.
    let mut fs = MockFileSystem::new();
    assert!(!Catalog::discover(&mut fs).is_empty());

    let mut broken = MockFileSystem::new();
    broken.add_file("/badges", "not a directory");
    assert!(!Catalog::discover(&mut broken).is_empty());

    let mut populated = MockFileSystem::with_sample_badges();
    let catalog = Catalog::discover(&mut populated);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn unreadable_record_shows_warning_and_nothing_else() {
    let mut fs = MockFileSystem::new();
    fs.add_directory("/badges");
    fs.add_file("/badges/badge.txt", "a\nb\nc\nd\ne\nf\n");
    fs.poison("/badges/badge.txt");
    let mut store = MemoryStateStore::new();

    let mut app = BadgeApp::new(&mut fs, &mut store);
    let mut display = TestDisplay::default_size();
    let mut power = NoopPower::new();

    let outcome = app
        .run_cycle(
            ButtonSnapshot::released(),
            &mut fs,
            &mut store,
            &mut display,
            &mut power,
        )
        .unwrap();

    let message = match outcome {
        Some(RenderOutcome::Warning(message)) => message,
        other => panic!("expected warning outcome, got {:?}", other),
    };
    assert!(message.contains("/badges/badge.txt"));

    // The committed frame is the warning screen alone; the badge border,
    // bands, and image panel were never drawn.
    let mut warning_only = TestDisplay::default_size();
    WarningActivity::new(message)
        .render(&mut warning_only)
        .unwrap();
    assert_eq!(display.pixels(), warning_only.pixels());

    // The cycle still completed: dirty cleared, selection persisted.
    assert!(!app.is_dirty());
    assert_eq!(store.load(), Some(SelectionState { current_badge: 0 }));
}

#[test]
fn button_navigation_round_trip_with_persistence() {
    let mut fs = MockFileSystem::with_sample_badges();
    let mut store = MemoryStateStore::new();
    let mut app = BadgeApp::new(&mut fs, &mut store);
    let mut display = TestDisplay::default_size();
    let mut power = NoopPower::new();

    // Initial draw.
    app.run_cycle(
        ButtonSnapshot::released(),
        &mut fs,
        &mut store,
        &mut display,
        &mut power,
    )
    .unwrap();

    // DOWN moves to the second badge and persists it.
    let outcome = app
        .run_cycle(press_down(), &mut fs, &mut store, &mut display, &mut power)
        .unwrap();
    assert_eq!(outcome, Some(RenderOutcome::Badge));
    assert_eq!(app.catalog().selected(), 1);
    assert_eq!(store.load(), Some(SelectionState { current_badge: 1 }));

    // DOWN at the end saturates: no redraw happens at all.
    let outcome = app
        .run_cycle(press_down(), &mut fs, &mut store, &mut display, &mut power)
        .unwrap();
    assert_eq!(outcome, None);
    assert_eq!(app.catalog().selected(), 1);

    // UP walks back, UP again saturates at zero.
    app.run_cycle(press_up(), &mut fs, &mut store, &mut display, &mut power)
        .unwrap();
    assert_eq!(app.catalog().selected(), 0);
    let outcome = app
        .run_cycle(press_up(), &mut fs, &mut store, &mut display, &mut power)
        .unwrap();
    assert_eq!(outcome, None);
    assert_eq!(app.catalog().selected(), 0);
    assert_eq!(store.load(), Some(SelectionState { current_badge: 0 }));

    // Keep-alive ran on every one of the five cycles.
    assert_eq!(power.keep_alive_calls, 5);
}

#[test]
fn stale_persisted_selection_recovers_on_startup() {
    let mut fs = MockFileSystem::with_sample_badges();
    // A previous run saved an index that no longer exists.
    let mut store = MemoryStateStore::with_stored(SelectionState { current_badge: 17 });

    let app = BadgeApp::new(&mut fs, &mut store);

    assert_eq!(app.catalog().selected(), 1); // clamped to last of 2
    assert_eq!(store.load(), Some(SelectionState { current_badge: 1 }));
}

#[test]
fn selection_survives_a_restart() {
    let mut fs = MockFileSystem::with_sample_badges();
    let mut store = MemoryStateStore::new();

    {
        let mut app = BadgeApp::new(&mut fs, &mut store);
        let mut display = TestDisplay::default_size();
        let mut power = NoopPower::new();
        app.run_cycle(press_down(), &mut fs, &mut store, &mut display, &mut power)
            .unwrap();
        assert_eq!(app.catalog().selected(), 1);
    }

    // "Power cycle": a fresh app against the same store resumes at 1.
    let app = BadgeApp::new(&mut fs, &mut store);
    assert_eq!(app.catalog().selected(), 1);
}
