//! Power latch and halt for battery operation.

use esp_idf_svc::hal::gpio::{Gpio18, Output, PinDriver};
use esp_idf_svc::sys;
use esp_idf_svc::sys::EspError;
use inkbadge_ui::PowerControl;

use crate::buttons::{BUTTON_DOWN_GPIO, BUTTON_REFRESH_GPIO, BUTTON_UP_GPIO};

/// GPIO holding the soft power latch closed while we run.
pub struct BadgePower<'d> {
    latch: PinDriver<'d, Gpio18, Output>,
}

impl<'d> BadgePower<'d> {
    pub fn new(latch: Gpio18) -> Result<Self, EspError> {
        let mut latch = PinDriver::output(latch)?;
        latch.set_high()?;
        Ok(Self { latch })
    }
}

impl PowerControl for BadgePower<'_> {
    fn keep_alive(&mut self) {
        // A button held through a halt can keep VSYS up with the latch in
        // an unknown state; re-assert it on every pass.
        if self.latch.set_high().is_err() {
            log::warn!("power latch write failed");
        }
    }

    fn halt(&mut self) {
        log::info!("halting until button wake");
        unsafe {
            for gpio in [BUTTON_UP_GPIO, BUTTON_DOWN_GPIO, BUTTON_REFRESH_GPIO] {
                sys::gpio_wakeup_enable(
                    gpio as sys::gpio_num_t,
                    sys::gpio_int_type_t_GPIO_INTR_LOW_LEVEL,
                );
            }
            sys::esp_sleep_enable_gpio_wakeup();
            // Light sleep resumes in place, so the loop continues with the
            // wake button still pressed and observes it on the next pass.
            sys::esp_light_sleep_start();
        }
    }
}
