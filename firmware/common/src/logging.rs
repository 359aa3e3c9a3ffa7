//! Log macros for the UI core.
//!
//! With the `defmt` feature the macros forward to `defmt`, so firmware
//! builds get RTT logging. Without it they expand to nothing and the host
//! simulator and tests carry no logging runtime.
//!
//! Arguments must implement `defmt::Format` when the feature is on, so stick
//! to integers, `bool` and `&str` in log calls.

#[cfg(feature = "defmt")]
pub(crate) use defmt::{debug, info};

#[cfg(not(feature = "defmt"))]
mod noop {
    macro_rules! debug {
        ($($arg:tt)*) => {{}};
    }

    macro_rules! info {
        ($($arg:tt)*) => {{}};
    }

    pub(crate) use {debug, info};
}

#[cfg(not(feature = "defmt"))]
pub(crate) use noop::{debug, info};
