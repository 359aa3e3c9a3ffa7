//! Color constants for the e-bike display.
//!
//! Standard colors come from the `RgbColor` trait constants, the rest are
//! hand-picked RGB565 values. Every widget resolves its colors through
//! [`ColorOp`](crate::layout::ColorOp) so a layout never names a raw color.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Screen background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Default foreground for text and borders.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0).
pub const RED: Rgb565 = Rgb565::RED;

/// Pure yellow (31, 63, 0).
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Pure blue (0, 0, 31).
pub const BLUE: Rgb565 = Rgb565::BLUE;

// =============================================================================
// UI Roles
// =============================================================================

/// Background of scrollable menu headings.
/// RGB565: (4, 8, 12) - dark slate so the heading stands out from rows.
pub const HEADING_BACKGROUND: Rgb565 = Rgb565::new(4, 8, 12);

/// Editable labels and graph titles.
/// RGB565: (24, 48, 24) - light gray, dimmer than values.
pub const LABEL_COLOR: Rgb565 = Rgb565::new(24, 48, 24);

/// Selection triangle and editing underline.
pub const CURSOR_COLOR: Rgb565 = WHITE;

/// Foreground for `ColorOp::Error` fields.
pub const ERROR_COLOR: Rgb565 = RED;

/// Foreground for `ColorOp::Warning` fields.
/// RGB565: (31, 32, 0) - orange, distinct from the graph warning band.
pub const WARNING_COLOR: Rgb565 = Rgb565::new(31, 32, 0);

// =============================================================================
// Graph Colors
// =============================================================================

/// Samples below the warning threshold.
pub const GRAPH_NORMAL: Rgb565 = BLUE;

/// Sample segments between the warning and error thresholds.
pub const GRAPH_WARN: Rgb565 = YELLOW;

/// Sample segments above the error threshold.
pub const GRAPH_ERROR: Rgb565 = RED;

/// Min/max value labels.
pub const GRAPH_ACCENT: Rgb565 = WHITE;

/// Graph area background (erases the column above each sample).
pub const GRAPH_BACKGROUND: Rgb565 = BLACK;

/// Axis lines.
/// RGB565: (14, 31, 18) - slate gray.
pub const GRAPH_AXIS: Rgb565 = Rgb565::new(14, 31, 18);
