//! The status line: the most urgent condition on the bike, in its color.
//!
//! # Priority
//!
//! | Condition | Text | Color |
//! |---|---|---|
//! | controller error code | code name or "Unknown Motor" | error |
//! | motor at shutdown temperature | "Temp Shutdown" | error |
//! | motor at warning temperature | "Temp Warning" | warning |
//! | braking | "BRAKE" | normal |
//! | walk assist engaged | "WALK" | normal |
//! | battery at or below 10% | "Low Batt" | warning |
//! | lights on | "LIGHT" | normal |
//!
//! Error warnings blink.

use core::cell::Cell;
use core::sync::atomic::Ordering;

use super::state::BikeState;
use crate::layout::ColorOp;
use crate::render::{CustomCx, CustomRender};

/// Controller error names, indexed by error code.
const MOTOR_ERRORS: [&str; 7] = [
    "None",
    "Motor Blocked",
    "Torque Fault",
    "Brake Fault",
    "Throttle Fault",
    "Speed Fault",
    "Low Volt",
];

/// State of charge that raises the low battery warning.
const LOW_BATTERY_SOC: u8 = 10;

/// Shown for error codes past the table.
pub const UNKNOWN_MOTOR_ERROR: &str = "Unknown Motor";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Warning {
    pub text: &'static str,
    pub color: ColorOp,
}

impl Warning {
    const fn new(
        text: &'static str,
        color: ColorOp,
    ) -> Self {
        Self { text, color }
    }

    pub const NONE: Self = Self::new("", ColorOp::Normal);

    /// Errors blink to draw the eye.
    pub fn blinks(&self) -> bool {
        self.color == ColorOp::Error
    }
}

/// The highest-priority warning for `state`.
pub fn evaluate(state: &BikeState) -> Warning {
    let code = state.error_code.load(Ordering::Relaxed);
    if code != 0 {
        let text = MOTOR_ERRORS.get(usize::from(code)).copied().unwrap_or(UNKNOWN_MOTOR_ERROR);
        return Warning::new(text, ColorOp::Error);
    }

    let temp = state.motor_temp.load(Ordering::Relaxed);
    if temp >= state.temp_max.load(Ordering::Relaxed) {
        return Warning::new("Temp Shutdown", ColorOp::Error);
    }
    if temp >= state.temp_warn.load(Ordering::Relaxed) {
        return Warning::new("Temp Warning", ColorOp::Warning);
    }

    if state.braking.load(Ordering::Relaxed) {
        return Warning::new("BRAKE", ColorOp::Normal);
    }
    if state.walk_assist.load(Ordering::Relaxed) {
        return Warning::new("WALK", ColorOp::Normal);
    }
    // no reading before the controller answers
    if state.motor_seen.load(Ordering::Relaxed) && state.battery_soc.load(Ordering::Relaxed) <= LOW_BATTERY_SOC {
        return Warning::new("Low Batt", ColorOp::Warning);
    }
    if state.lights.load(Ordering::Relaxed) {
        return Warning::new("LIGHT", ColorOp::Normal);
    }
    Warning::NONE
}

/// Custom-rendered field drawing the current [`Warning`].
pub struct WarningField {
    current: Cell<Warning>,
}

impl WarningField {
    pub const fn new() -> Self {
        Self {
            current: Cell::new(Warning::NONE),
        }
    }

    pub fn current(&self) -> Warning {
        self.current.get()
    }

    /// Replace the warning. Returns whether the field needs a redraw.
    pub fn set(
        &self,
        warning: Warning,
    ) -> bool {
        let changed = self.current.replace(warning) != warning;
        if changed {
            crate::logging::debug!("warning now {}", warning.text);
        }
        changed
    }
}

impl Default for WarningField {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomRender for WarningField {
    fn render(
        &self,
        cx: &mut CustomCx<'_>,
    ) -> bool {
        let warning = self.current.get();
        cx.layout.color = warning.color;
        cx.draw_text(warning.text)
    }
}
