//! Display and timing configuration constants.
//!
//! # Sections
//!
//! - Timing: tick period and the derived blink/graph/button tick counts
//! - Capacities: sizes of the fixed tables behind fields, menus and screens
//! - `profile`: per-panel fonts, geometry and button bindings

mod profile;

pub use profile::{ButtonBindings, C850, DisplayProfile, Font, ProfileFonts, SW102};

// =============================================================================
// Timing
// =============================================================================

/// Period of the UI tick in milliseconds. Buttons are sampled and the
/// screen updated once per tick.
pub const UPDATE_INTERVAL_MS: u32 = 20;

/// Blinking elements toggle this often.
pub const BLINK_INTERVAL_MS: u32 = 300;

/// Graph fields sample their source this often.
pub const GRAPH_INTERVAL_MS: u32 = 3500;

/// Ticks between blink phase flips.
pub const BLINK_TICKS: u32 = BLINK_INTERVAL_MS / UPDATE_INTERVAL_MS;

/// Ticks between graph samples.
pub const GRAPH_TICKS: u32 = GRAPH_INTERVAL_MS / UPDATE_INTERVAL_MS;

/// Holding a button this long produces a long click.
pub const LONG_CLICK_TICKS: u16 = (800 / UPDATE_INTERVAL_MS) as u16;

/// A long click that starts this soon after a click is a click-then-long-click.
pub const CLICK_LONG_CLICK_WINDOW_TICKS: u16 = (400 / UPDATE_INTERVAL_MS) as u16;

/// External state producers refresh at this cadence.
pub const STATE_REFRESH_MS: u32 = 100;

// =============================================================================
// Capacities
// =============================================================================

/// Longest text a field can hold, in bytes.
pub const MAX_FIELD_LEN: usize = 32;

/// Fields in one arena (application fields plus a few internal ones).
pub const MAX_FIELDS: usize = 96;

/// Layouts on one screen.
pub const MAX_LAYOUTS: usize = 24;

/// Screens registered with the screen manager.
pub const MAX_SCREENS: usize = 8;

/// Entries in one scrollable menu.
pub const MAX_SCROLLABLE_ENTRIES: usize = 16;

/// Nesting depth of scrollable menus.
pub const MAX_SCROLLABLE_DEPTH: usize = 3;

/// Visible scrollable rows including the heading.
pub const MAX_SCROLLABLE_ROWS: usize = 24;

/// Choices in one customizable slot.
pub const MAX_CUSTOM_CHOICES: usize = 20;

/// Samples kept by a graph, one per pixel column at most.
pub const GRAPH_MAX_POINTS: usize = 256;

/// Extra vertical space in every scrollable row.
pub const SCROLLABLE_VPAD: i32 = 4;

/// Digits reserved left of a graph for its min/max labels.
pub const GRAPH_AXIS_DIGITS: i32 = 5;
