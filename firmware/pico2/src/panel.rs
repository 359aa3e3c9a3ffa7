//! Where the UI lands on the panel.
//!
//! The 850C layout fills its 320x480 panel. The SW102 layout is only 64x128,
//! so on the bigger ST7789 it is centred and the rest stays black.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Rectangle of `ui` size centred on a `panel` sized display.
///
/// A UI larger than the panel is anchored at the top-left corner and clipped.
pub fn ui_area(
    panel: Size,
    ui: Size,
) -> Rectangle {
    let x = panel.width.saturating_sub(ui.width) / 2;
    let y = panel.height.saturating_sub(ui.height) / 2;
    Rectangle::new(Point::new(x as i32, y as i32), ui)
}
