//! Inkbadge firmware: e-ink identity badge with button-cycled profiles.
//!
//! Bring-up order: logger, peripherals, panel driver, badge storage, NVS
//! selection store, catalog. After the first draw the loop is driven
//! entirely by hardware wakes: sample buttons, run one app cycle, commit
//! the frame if anything changed, halt.

mod buttons;
mod display;
mod nvs;
mod power;
mod storage;

use esp_idf_svc::hal::{
    delay::FreeRtos,
    gpio::{AnyIOPin, PinDriver},
    peripherals::Peripherals,
    spi::{config::Config, SpiDeviceDriver, SpiDriver, SpiDriverConfig},
    units::Hertz,
};
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use epd_waveshare::epd2in9::Epd2in9;
use epd_waveshare::prelude::*;

use inkbadge_ui::warning_activity::WARNING_HOLD_MS;
use inkbadge_ui::{BadgeApp, PowerControl, RenderOutcome, STATE_NAMESPACE};

use buttons::ButtonPins;
use display::BufferedDisplay;
use nvs::NvsStateStore;
use power::BadgePower;
use storage::FlashFs;

fn main() {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("inkbadge starting");

    let peripherals = Peripherals::take().unwrap();

    let spi = SpiDriver::new(
        peripherals.spi2,
        peripherals.pins.gpio8,
        peripherals.pins.gpio10,
        Option::<AnyIOPin>::None,
        &SpiDriverConfig::default(),
    )
    .unwrap();

    let spi_config = Config::default()
        .baudrate(Hertz(8_000_000))
        .data_mode(epd_waveshare::SPI_MODE);
    let mut spi_device =
        SpiDeviceDriver::new(&spi, Some(peripherals.pins.gpio21), &spi_config).unwrap();

    let dc = PinDriver::output(peripherals.pins.gpio4).unwrap();
    let rst = PinDriver::output(peripherals.pins.gpio5).unwrap();
    let busy = PinDriver::input(peripherals.pins.gpio6).unwrap();

    let mut delay = FreeRtos;
    let mut epd = Epd2in9::new(&mut spi_device, busy, dc, rst, &mut delay, None).unwrap();
    // Update policy is fixed at startup: normal full-refresh waveform.
    epd.set_lut(&mut spi_device, &mut delay, Some(RefreshLut::Full))
        .ok();

    // Badge storage must not take the boot down with it; an unavailable
    // filesystem sends the catalog to its default-bootstrap path.
    let mut fs = match FlashFs::mount() {
        Ok(fs) => fs,
        Err(err) => {
            log::warn!("badge storage mount failed: {}", err);
            FlashFs::unavailable(err.to_string())
        }
    };

    let nvs_partition = EspDefaultNvsPartition::take().unwrap();
    let mut store = NvsStateStore::new(nvs_partition, STATE_NAMESPACE).unwrap();

    let buttons = ButtonPins::new(
        peripherals.pins.gpio0,
        peripherals.pins.gpio1,
        peripherals.pins.gpio2,
    )
    .unwrap();
    let mut badge_power = BadgePower::new(peripherals.pins.gpio18).unwrap();

    let mut buffered = BufferedDisplay::new();
    let mut app = BadgeApp::new(&mut fs, &mut store);

    log::info!("entering selection loop");

    loop {
        let snapshot = buttons.snapshot();

        let outcome = app
            .run_cycle(snapshot, &mut fs, &mut store, &mut buffered, &mut badge_power)
            .unwrap_or(None);

        if let Some(outcome) = outcome {
            if epd.wake_up(&mut spi_device, &mut delay).is_err() {
                log::warn!("display wake failed");
            }
            epd.update_frame(&mut spi_device, buffered.buffer(), &mut delay)
                .ok();
            epd.display_frame(&mut spi_device, &mut delay).ok();
            epd.sleep(&mut spi_device, &mut delay).ok();

            if let RenderOutcome::Warning(_) = outcome {
                // Hold the warning on screen, then fall through to the
                // halt; the next press redraws the previous badge.
                FreeRtos::delay_ms(WARNING_HOLD_MS);
            }
        }

        // Suspend until a button wake. A press during the halt resumes
        // here and is sampled at the top of the next iteration.
        badge_power.halt();
        FreeRtos::delay_ms(50);
    }
}
