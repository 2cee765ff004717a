//! Desktop SDL simulator for the badge.
//!
//! Drives the same app core as the firmware with keyboard input and an
//! in-memory filesystem, for previewing badge layouts without hardware.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use inkbadge_ui::{
    BadgeApp, ButtonSnapshot, MemoryStateStore, MockFileSystem, NoopPower, DISPLAY_HEIGHT,
    DISPLAY_WIDTH,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut display: SimulatorDisplay<BinaryColor> =
        SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let mut window = Window::new("Inkbadge", &output_settings);

    let mut fs = MockFileSystem::with_sample_badges();
    let mut store = MemoryStateStore::new();
    let mut power = NoopPower::new();
    let mut app = BadgeApp::new(&mut fs, &mut store);

    // Initial render
    app.run_cycle(
        ButtonSnapshot::released(),
        &mut fs,
        &mut store,
        &mut display,
        &mut power,
    )?;
    window.update(&display);

    println!("Inkbadge Simulator");
    println!("Controls:");
    println!("  Up / W      - Previous badge");
    println!("  Down / S    - Next badge");
    println!("  R / Space   - Redraw");
    println!("  Escape      - Quit");

    loop {
        let events = window.events().collect::<Vec<_>>();

        for event in events {
            match event {
                SimulatorEvent::Quit => {
                    return Ok(());
                }
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Escape {
                        return Ok(());
                    }
                    if let Some(snapshot) = keycode_to_snapshot(keycode) {
                        let drawn = app
                            .run_cycle(snapshot, &mut fs, &mut store, &mut display, &mut power)?;
                        if drawn.is_some() {
                            window.update(&display);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

fn keycode_to_snapshot(keycode: Keycode) -> Option<ButtonSnapshot> {
    match keycode {
        Keycode::Up | Keycode::W => Some(ButtonSnapshot {
            up: true,
            ..ButtonSnapshot::released()
        }),
        Keycode::Down | Keycode::S => Some(ButtonSnapshot {
            down: true,
            ..ButtonSnapshot::released()
        }),
        Keycode::R | Keycode::Space => Some(ButtonSnapshot {
            refresh: true,
            ..ButtonSnapshot::released()
        }),
        _ => None,
    }
}
