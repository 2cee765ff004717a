//! Logical button input for the badge.
//!
//! Buttons are sampled as instantaneous pressed state once per loop wake,
//! not queued as edges. A press that happens while the device is halted
//! wakes the loop and is observed on the next iteration.

/// The three front buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Select the previous badge.
    Up,
    /// Select the next badge.
    Down,
    /// Force a redraw of the current badge.
    Refresh,
}

/// A single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Button),
}

/// Pressed state of every button at one sampling instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSnapshot {
    pub up: bool,
    pub down: bool,
    pub refresh: bool,
}

impl ButtonSnapshot {
    /// Snapshot with nothing pressed.
    pub const fn released() -> Self {
        Self {
            up: false,
            down: false,
            refresh: false,
        }
    }

    /// Press events for every held button, in UP, DOWN, REFRESH order.
    pub fn events(self) -> impl Iterator<Item = InputEvent> {
        [
            (self.up, Button::Up),
            (self.down, Button::Down),
            (self.refresh, Button::Refresh),
        ]
        .into_iter()
        .filter(|(pressed, _)| *pressed)
        .map(|(_, button)| InputEvent::Press(button))
    }
}
