//! Front button sampling.
//!
//! Three GPIOs with pull-ups, active low. The loop reads an instantaneous
//! snapshot once per wake; nothing is queued or debounced beyond the halt
//! itself gating how often the loop runs.

use esp_idf_svc::hal::gpio::{Gpio0, Gpio1, Gpio2, Input, PinDriver, Pull};
use esp_idf_svc::sys::EspError;
use inkbadge_ui::ButtonSnapshot;

pub const BUTTON_UP_GPIO: i32 = 0;
pub const BUTTON_DOWN_GPIO: i32 = 1;
pub const BUTTON_REFRESH_GPIO: i32 = 2;

pub struct ButtonPins<'d> {
    up: PinDriver<'d, Gpio0, Input>,
    down: PinDriver<'d, Gpio1, Input>,
    refresh: PinDriver<'d, Gpio2, Input>,
}

impl<'d> ButtonPins<'d> {
    pub fn new(up: Gpio0, down: Gpio1, refresh: Gpio2) -> Result<Self, EspError> {
        let mut up = PinDriver::input(up)?;
        up.set_pull(Pull::Up)?;
        let mut down = PinDriver::input(down)?;
        down.set_pull(Pull::Up)?;
        let mut refresh = PinDriver::input(refresh)?;
        refresh.set_pull(Pull::Up)?;
        Ok(Self { up, down, refresh })
    }

    pub fn snapshot(&self) -> ButtonSnapshot {
        ButtonSnapshot {
            up: self.up.is_low(),
            down: self.down.is_low(),
            refresh: self.refresh.is_low(),
        }
    }
}
