//! E-bike display firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! # Architecture
//!
//! - Main task: samples the buttons, feeds the UI and renders, once per
//!   20 ms tick. The UI draws straight to the panel and only what changed.
//! - Demo task: stands in for the motor controller link and updates the
//!   shared bike state every 100 ms.
//!
//! The two tasks share nothing but [`BikeState`], whose fields are atomics.
//!
//! # Features
//!
//! - `sw102`: the small SW102 layout and bindings, centred on an ST7789.
//!   Without it the firmware runs the 850C layout on a 320x480 ILI9486.

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]

mod display;

use defmt::{info, unwrap};
use ebike_display_common::app::{App, BikeState, DemoFeed};
use ebike_display_common::colors::BLACK;
use ebike_display_common::config::{STATE_REFRESH_MS, UPDATE_INTERVAL_MS};
use ebike_display_common::{ButtonDecoder, DisplayProfile, Ui};
use ebike_display_pico2::input::ButtonPins;
use ebike_display_pico2::panel::ui_area;
use ebike_display_pico2::stats::FrameStats;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::Spi;
use embassy_time::{Duration, Ticker};
use embedded_graphics::draw_target::DrawTargetExt;
use embedded_graphics::prelude::*;
use {defmt_rtt as _, panic_probe as _};

use crate::display::{SPI_BUFFER_LEN, display_spi_config, init_panel};

#[cfg(feature = "sw102")]
const PROFILE: &DisplayProfile = &ebike_display_common::SW102;
#[cfg(not(feature = "sw102"))]
const PROFILE: &DisplayProfile = &ebike_display_common::C850;

/// Shared between the UI and the state producer.
static STATE: BikeState = BikeState::new();

/// Fake motor controller, until the UART link exists.
#[embassy_executor::task]
async fn demo_state_task() {
    info!("Demo state task started");

    let mut feed = DemoFeed::new();
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(STATE_REFRESH_MS)));
    loop {
        feed.step(&STATE);
        ticker.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("E-bike display starting, {} layout", PROFILE.name);

    let p = embassy_rp::init(Default::default());

    // Initialize display pins
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let mut backlight = Output::new(p.PIN_20, Level::High);

    // TX-only, the panel has no MISO
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());
    let mut spi_buffer = [0u8; SPI_BUFFER_LEN];
    let mut panel = init_panel(spi, cs, dc, &mut spi_buffer);
    panel.clear(BLACK).ok();
    info!("Panel initialized");

    let area = ui_area(panel.bounding_box().size, PROFILE.size());
    let mut canvas = panel.cropped(&area);

    // Initialize buttons (active-low with internal pull-up)
    let btn_up = Input::new(p.PIN_12, Pull::Up);
    let btn_down = Input::new(p.PIN_13, Pull::Up);
    let btn_onoff = Input::new(p.PIN_14, Pull::Up);
    let btn_m = Input::new(p.PIN_15, Pull::Up);

    let app = App::new(&STATE);
    let mut ui = Ui::new(PROFILE);
    let screens = match app.install(&mut ui) {
        Ok(screens) => screens,
        Err(e) => defmt::panic!("screen setup failed: {}", e),
    };
    ui.show(screens.boot, &mut canvas);

    unwrap!(spawner.spawn(demo_state_task()));
    info!("Demo state task spawned");

    let mut decoder = ButtonDecoder::new();
    let mut stats = FrameStats::new();
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(UPDATE_INTERVAL_MS)));

    info!("Main loop starting");

    loop {
        let levels = ButtonPins {
            up_low: btn_up.is_low(),
            down_low: btn_down.is_low(),
            onoff_low: btn_onoff.is_low(),
            m_low: btn_m.is_low(),
        }
        .levels();

        let events = decoder.tick(levels);
        ui.set_held(levels);
        ui.on_press(events);

        let drew = ui.update(&mut canvas);
        if let Some(report) = stats.record(drew) {
            info!("Drew {} of {} ticks ({}%)", report.drawn, report.ticks, report.drawn_percent());
        }

        // TODO: persist to flash once the settings layout is fixed
        if STATE.take_save_request() {
            info!("Settings save requested");
        }

        if STATE.take_power_off_request() {
            info!("Powering off");
            backlight.set_low();
            loop {
                cortex_m::asm::wfi();
            }
        }

        ticker.next().await;
    }
}
