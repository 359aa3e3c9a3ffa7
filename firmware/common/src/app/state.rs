//! Shared bike state.
//!
//! Written by the motor link (or the demo producer) and read by the UI every
//! tick. Every value is a single atomic, so readers may see a stale value but
//! never a torn one. Editable fields point straight at these atomics.
//!
//! Fixed-point values carry their scale in the name: `speed_x10` holds
//! 25.3 kph as 253.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU16, AtomicU32, Ordering};

use crate::units::Units;

/// Customizable selectors, one per slot. Index 0 is the info screen graph.
pub const SELECTORS: usize = 4;

pub struct BikeState {
    // =========================================================================
    // Motor and sensors
    // =========================================================================
    pub assist_level: AtomicU8,
    pub speed_x10: AtomicU16,
    pub max_speed_x10: AtomicU16,
    /// Battery power in watts.
    pub motor_power: AtomicU16,
    /// Pedal power in watts.
    pub human_power: AtomicU16,
    pub battery_voltage_x10: AtomicU16,
    /// State of charge in percent.
    pub battery_soc: AtomicU8,
    /// Motor temperature in °C.
    pub motor_temp: AtomicU8,
    pub cadence: AtomicU8,
    /// Free-running wheel sensor tick counter from the controller.
    pub wheel_ticks: AtomicU32,
    /// Controller error code, 0 when healthy.
    pub error_code: AtomicU8,
    pub braking: AtomicBool,
    /// The controller answered at least once.
    pub motor_seen: AtomicBool,

    // =========================================================================
    // Display-side state
    // =========================================================================
    pub lights: AtomicBool,
    pub walk_assist: AtomicBool,
    /// Tick counter value distance was last accounted at.
    pub wheel_tick_offset: AtomicU32,
    pub trip_x10: AtomicU32,
    pub odometer_x10: AtomicU32,
    pub distance_since_power_on_x10: AtomicU32,
    pub trip_time_s: AtomicU32,
    /// Wall clock, minutes since midnight.
    pub clock_minutes: AtomicU16,
    pub selectors: [AtomicU8; SELECTORS],

    // =========================================================================
    // Configuration
    // =========================================================================
    pub assist_levels: AtomicU8,
    pub wheel_perimeter_mm: AtomicU16,
    /// 0 metric, 1 imperial.
    pub units_type: AtomicU8,
    pub walk_assist_enabled: AtomicU8,
    pub battery_max_current: AtomicU8,
    pub battery_cutoff_x10: AtomicU16,
    /// Motor temperature where the warning starts.
    pub temp_warn: AtomicU8,
    /// Motor temperature where the controller shuts down.
    pub temp_max: AtomicU8,

    save_requested: AtomicBool,
    power_off_requested: AtomicBool,
}

impl BikeState {
    pub const fn new() -> Self {
        Self {
            assist_level: AtomicU8::new(1),
            speed_x10: AtomicU16::new(0),
            max_speed_x10: AtomicU16::new(0),
            motor_power: AtomicU16::new(0),
            human_power: AtomicU16::new(0),
            battery_voltage_x10: AtomicU16::new(0),
            battery_soc: AtomicU8::new(0),
            motor_temp: AtomicU8::new(0),
            cadence: AtomicU8::new(0),
            wheel_ticks: AtomicU32::new(0),
            error_code: AtomicU8::new(0),
            braking: AtomicBool::new(false),
            motor_seen: AtomicBool::new(false),
            lights: AtomicBool::new(false),
            walk_assist: AtomicBool::new(false),
            wheel_tick_offset: AtomicU32::new(0),
            trip_x10: AtomicU32::new(0),
            odometer_x10: AtomicU32::new(0),
            distance_since_power_on_x10: AtomicU32::new(0),
            trip_time_s: AtomicU32::new(0),
            clock_minutes: AtomicU16::new(0),
            // speed graph, motor temperature, battery voltage, motor power
            selectors: [
                AtomicU8::new(0),
                AtomicU8::new(3),
                AtomicU8::new(4),
                AtomicU8::new(0),
            ],
            assist_levels: AtomicU8::new(5),
            wheel_perimeter_mm: AtomicU16::new(2050),
            units_type: AtomicU8::new(0),
            walk_assist_enabled: AtomicU8::new(1),
            battery_max_current: AtomicU8::new(16),
            battery_cutoff_x10: AtomicU16::new(390),
            temp_warn: AtomicU8::new(75),
            temp_max: AtomicU8::new(85),
            save_requested: AtomicBool::new(false),
            power_off_requested: AtomicBool::new(false),
        }
    }

    /// Display units picked in the configuration.
    pub fn units(&self) -> Units {
        if self.units_type.load(Ordering::Relaxed) == 0 {
            Units::METRIC
        } else {
            Units::IMPERIAL
        }
    }

    /// Ask the board to persist the configuration.
    pub fn request_save(&self) {
        self.save_requested.store(true, Ordering::Relaxed);
        crate::logging::info!("settings save requested");
    }

    /// Consume a pending save request.
    pub fn take_save_request(&self) -> bool {
        self.save_requested.swap(false, Ordering::Relaxed)
    }

    pub fn request_power_off(&self) {
        self.power_off_requested.store(true, Ordering::Relaxed);
        crate::logging::info!("power off requested");
    }

    pub fn take_power_off_request(&self) -> bool {
        self.power_off_requested.swap(false, Ordering::Relaxed)
    }

    pub fn toggle_lights(&self) {
        self.lights.fetch_xor(true, Ordering::Relaxed);
    }

    /// Step the assist level, clamped to the configured level count.
    pub fn step_assist(
        &self,
        up: bool,
    ) {
        let levels = self.assist_levels.load(Ordering::Relaxed);
        let level = self.assist_level.load(Ordering::Relaxed);
        let level = if up { level.saturating_add(1).min(levels) } else { level.saturating_sub(1) };
        self.assist_level.store(level, Ordering::Relaxed);
    }

    /// Zero the trip counters.
    pub fn clear_trip(&self) {
        self.trip_x10.store(0, Ordering::Relaxed);
        self.trip_time_s.store(0, Ordering::Relaxed);
        self.max_speed_x10.store(0, Ordering::Relaxed);
        crate::logging::info!("trip cleared");
    }
}

impl Default for BikeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assist_clamps_to_levels() {
        let state = BikeState::new();
        state.assist_levels.store(3, Ordering::Relaxed);
        for _ in 0..5 {
            state.step_assist(true);
        }
        assert_eq!(state.assist_level.load(Ordering::Relaxed), 3);
        for _ in 0..5 {
            state.step_assist(false);
        }
        assert_eq!(state.assist_level.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_save_request_is_consumed_once() {
        let state = BikeState::new();
        assert!(!state.take_save_request());
        state.request_save();
        assert!(state.take_save_request());
        assert!(!state.take_save_request());
    }

    #[test]
    fn test_units_follow_configuration() {
        let state = BikeState::new();
        assert_eq!(state.units(), Units::METRIC);
        state.units_type.store(1, Ordering::Relaxed);
        assert_eq!(state.units(), Units::IMPERIAL);
    }

    #[test]
    fn test_clear_trip_keeps_odometer() {
        let state = BikeState::new();
        state.trip_x10.store(123, Ordering::Relaxed);
        state.odometer_x10.store(4567, Ordering::Relaxed);
        state.max_speed_x10.store(300, Ordering::Relaxed);
        state.clear_trip();
        assert_eq!(state.trip_x10.load(Ordering::Relaxed), 0);
        assert_eq!(state.max_speed_x10.load(Ordering::Relaxed), 0);
        assert_eq!(state.odometer_x10.load(Ordering::Relaxed), 4567);
    }
}
