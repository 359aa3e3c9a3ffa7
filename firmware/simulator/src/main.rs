//! E-bike display simulator for desktop platforms.
//!
//! Runs the shared UI and application screens in an SDL window through the
//! embedded-graphics-simulator crate, with a fake motor controller feeding
//! the bike state.
//!
//! # Keys
//!
//! | Key | Button |
//! |---|---|
//! | Up / Down | up / down |
//! | O | on/off |
//! | M | menu |
//!
//! Pass `--sw102` to simulate the small 64x128 panel instead of the 850C.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

mod timing;

use std::thread;
use std::time::Instant;

use ebike_display_common::app::{App, BikeState, DemoFeed};
use ebike_display_common::colors::BLACK;
use ebike_display_common::{ButtonDecoder, Buttons, C850, DisplayProfile, SW102, Ui};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use crate::timing::{FRAME_TIME, STATE_REFRESH};

static STATE: BikeState = BikeState::new();

fn key_button(keycode: Keycode) -> Option<Buttons> {
    match keycode {
        Keycode::Up => Some(Buttons::UP),
        Keycode::Down => Some(Buttons::DOWN),
        Keycode::O => Some(Buttons::ONOFF),
        Keycode::M => Some(Buttons::M),
        _ => None,
    }
}

fn main() {
    let sw102 = std::env::args().skip(1).any(|arg| arg == "--sw102");
    let profile: &'static DisplayProfile = if sw102 { &SW102 } else { &C850 };

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(profile.size());
    let scale = if sw102 { 4 } else { 2 };
    let output_settings = OutputSettingsBuilder::new().scale(scale).build();
    let mut window = Window::new(&format!("E-Bike Display Sim ({})", profile.name), &output_settings);

    display.clear(BLACK).ok();

    let app = App::new(&STATE);
    let mut ui = Ui::new(profile);
    let screens = match app.install(&mut ui) {
        Ok(screens) => screens,
        Err(e) => {
            eprintln!("failed to build screens: {e}");
            return;
        }
    };
    ui.show(screens.boot, &mut display);
    window.update(&display);

    let mut feed = DemoFeed::new();
    let mut last_feed = Instant::now();
    let mut decoder = ButtonDecoder::new();
    let mut held = Buttons::empty();
    let mut frames_drawn = 0u32;

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    if let Some(button) = key_button(keycode) {
                        held.insert(button);
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => {
                    if let Some(button) = key_button(keycode) {
                        held.remove(button);
                    }
                }
                _ => {}
            }
        }

        if last_feed.elapsed() >= STATE_REFRESH {
            feed.step(&STATE);
            last_feed = Instant::now();
        }

        let events = decoder.tick(held);
        ui.set_held(held);
        ui.on_press(events);

        if ui.update(&mut display) {
            window.update(&display);
            frames_drawn = frames_drawn.wrapping_add(1);
        }

        if STATE.take_save_request() {
            println!("settings saved (frame {frames_drawn})");
        }
        if STATE.take_power_off_request() {
            println!("power off");
            return;
        }

        let elapsed = frame_start.elapsed();
        if let Some(rest) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(rest);
        }
    }
}
