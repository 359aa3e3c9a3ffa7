//! Trip and odometer accounting from the wheel sensor.
//!
//! The controller reports a free-running wheel tick counter. Distance is
//! counted in whole 100 m steps: once the ticks since the last step cover
//! 100 m, every distance counter gains 0.1 km and the tick offset jumps to
//! the current counter. Whatever the wheel travelled past the 100 m mark is
//! not carried into the next step.

use core::sync::atomic::Ordering;

use super::state::BikeState;

/// One distance step in millimetres.
const STEP_MM: u32 = 100_000;

/// Whether `ticks - offset` wheel turns of `perimeter_mm` cover a step.
///
/// The counter may wrap, the difference is taken modulo 2^32.
pub fn step_due(
    ticks: u32,
    offset: u32,
    perimeter_mm: u16,
) -> bool {
    let turns = ticks.wrapping_sub(offset);
    turns.saturating_mul(u32::from(perimeter_mm)) >= STEP_MM
}

/// Account distance travelled since the last call.
///
/// Returns whether the counters moved.
pub fn update(state: &BikeState) -> bool {
    let ticks = state.wheel_ticks.load(Ordering::Relaxed);
    let offset = state.wheel_tick_offset.load(Ordering::Relaxed);
    let perimeter = state.wheel_perimeter_mm.load(Ordering::Relaxed);
    if !step_due(ticks, offset, perimeter) {
        return false;
    }

    for counter in [&state.trip_x10, &state.odometer_x10, &state.distance_since_power_on_x10] {
        counter.fetch_add(1, Ordering::Relaxed);
    }
    state.wheel_tick_offset.store(ticks, Ordering::Relaxed);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_needs_full_100m() {
        // 48 turns of 2050 mm is 98.4 m
        assert!(!step_due(48, 0, 2050));
        assert!(step_due(49, 0, 2050));
    }

    #[test]
    fn test_counter_wrap() {
        assert!(step_due(10, u32::MAX - 40, 2050));
        assert!(!step_due(5, u32::MAX - 10, 2050));
    }

    #[test]
    fn test_update_drops_the_remainder() {
        let state = BikeState::new();
        state.wheel_perimeter_mm.store(2000, Ordering::Relaxed);
        state.odometer_x10.store(1000, Ordering::Relaxed);

        // 60 turns is 120 m, one step
        state.wheel_ticks.store(60, Ordering::Relaxed);
        assert!(update(&state));
        assert_eq!(state.trip_x10.load(Ordering::Relaxed), 1);
        assert_eq!(state.odometer_x10.load(Ordering::Relaxed), 1001);
        assert_eq!(state.distance_since_power_on_x10.load(Ordering::Relaxed), 1);

        // the extra 20 m are gone, 40 more turns is only 80 m
        state.wheel_ticks.store(100, Ordering::Relaxed);
        assert!(!update(&state));
        assert_eq!(state.trip_x10.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_zero_perimeter_never_counts() {
        let state = BikeState::new();
        state.wheel_perimeter_mm.store(0, Ordering::Relaxed);
        state.wheel_ticks.store(10_000, Ordering::Relaxed);
        assert!(!update(&state));
    }
}
