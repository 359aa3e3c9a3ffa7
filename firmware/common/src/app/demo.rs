//! Fake motor controller for the simulator and boards without a motor link.
//!
//! Call [`DemoFeed::step`] every `STATE_REFRESH_MS`. Values follow slow
//! triangle waves so every screen, warning band and graph gets exercised.

use core::sync::atomic::Ordering;

use super::state::BikeState;
use crate::config::STATE_REFRESH_MS;

/// Steps until the fake controller answers.
const BOOT_STEPS: u32 = 20;

/// Steps per second.
const STEPS_PER_S: u32 = 1000 / STATE_REFRESH_MS;

/// Wall clock at start, 08:00.
const START_MINUTES: u16 = 8 * 60;

/// Triangle wave between `lo` and `hi` with a period of `period` steps.
fn triangle(
    t: u32,
    period: u32,
    lo: u32,
    hi: u32,
) -> u32 {
    let half = period / 2;
    let phase = t % period;
    let ramp = if phase < half { phase } else { period - phase };
    lo + (hi - lo) * ramp / half
}

pub struct DemoFeed {
    t: u32,
    /// Wheel travel not yet turned into a full tick.
    travel_mm: u32,
}

impl DemoFeed {
    pub const fn new() -> Self {
        Self { t: 0, travel_mm: 0 }
    }

    pub fn step(
        &mut self,
        state: &BikeState,
    ) {
        let t = self.t;
        self.t = self.t.wrapping_add(1);

        if t == BOOT_STEPS {
            state.motor_seen.store(true, Ordering::Relaxed);
            crate::logging::info!("demo controller online");
        }

        let speed_x10 = triangle(t, 600, 0, 320);
        state.speed_x10.store(speed_x10 as u16, Ordering::Relaxed);
        state.motor_power.store(triangle(t, 400, 0, 500) as u16, Ordering::Relaxed);
        state.human_power.store(triangle(t, 300, 40, 220) as u16, Ordering::Relaxed);
        state.cadence.store(triangle(t, 250, 40, 95) as u8, Ordering::Relaxed);
        state.motor_temp.store(triangle(t, 3000, 30, 90) as u8, Ordering::Relaxed);
        state.braking.store((400..420).contains(&(t % 450)), Ordering::Relaxed);

        let voltage_x10 = triangle(t, 6000, 480, 540);
        state.battery_voltage_x10.store(voltage_x10 as u16, Ordering::Relaxed);
        // 42.0 V empty, 54.6 V full
        let soc = (voltage_x10.saturating_sub(420) * 100 / 126).min(100);
        state.battery_soc.store(soc as u8, Ordering::Relaxed);

        // kph x10 to millimetres per step
        self.travel_mm += speed_x10 * 250 / (9 * STEPS_PER_S);
        let perimeter = u32::from(state.wheel_perimeter_mm.load(Ordering::Relaxed)).max(1);
        let turns = self.travel_mm / perimeter;
        self.travel_mm %= perimeter;
        state.wheel_ticks.fetch_add(turns, Ordering::Relaxed);

        if t % STEPS_PER_S == 0 {
            if speed_x10 > 0 {
                state.trip_time_s.fetch_add(1, Ordering::Relaxed);
            }
            let minutes = START_MINUTES + (t / (60 * STEPS_PER_S)) as u16;
            state.clock_minutes.store(minutes % (24 * 60), Ordering::Relaxed);
        }
    }
}

impl Default for DemoFeed {
    fn default() -> Self {
        Self::new()
    }
}
