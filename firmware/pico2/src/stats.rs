//! Frame statistics.
//!
//! The panel is drawn directly, so there is no flush to skip. Instead the
//! main loop counts how many ticks actually drew and logs it periodically,
//! which shows whether the dirty tracking keeps the panel quiet.

use ebike_display_common::config::UPDATE_INTERVAL_MS;

/// Ticks between two reports, 5 seconds.
pub const REPORT_TICKS: u32 = 5000 / UPDATE_INTERVAL_MS;

/// Counters of one reporting period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    pub ticks: u32,
    pub drawn: u32,
}

impl FrameReport {
    /// Share of ticks that drew, in percent.
    pub const fn drawn_percent(&self) -> u32 {
        if self.ticks == 0 { 0 } else { self.drawn * 100 / self.ticks }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    ticks: u32,
    drawn: u32,
}

impl FrameStats {
    pub const fn new() -> Self {
        Self { ticks: 0, drawn: 0 }
    }

    /// Count one tick. Returns the report when a period completes.
    pub fn record(
        &mut self,
        drew: bool,
    ) -> Option<FrameReport> {
        self.ticks += 1;
        self.drawn += u32::from(drew);
        if self.ticks < REPORT_TICKS {
            return None;
        }
        let report = FrameReport {
            ticks: self.ticks,
            drawn: self.drawn,
        };
        *self = Self::new();
        Some(report)
    }
}
