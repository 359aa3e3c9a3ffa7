//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

use ebike_display_common::config::{STATE_REFRESH_MS, UPDATE_INTERVAL_MS};

/// Target frame time, one UI tick. The main loop sleeps if the frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(UPDATE_INTERVAL_MS as u64);

/// How often the fake controller updates the bike state.
pub const STATE_REFRESH: Duration = Duration::from_millis(STATE_REFRESH_MS as u64);
