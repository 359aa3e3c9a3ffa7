//! Per-panel display profiles.
//!
//! The same screens run on a tiny 64x128 panel driven by four buttons and
//! on a 320x480 colour panel driven by three. A [`DisplayProfile`] holds
//! everything that differs between them: fonts, row counts, borders and
//! which button event drives which interaction.

use embedded_graphics::geometry::Size;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10, FONT_8X13, FONT_10X20};
use profont::{PROFONT_12_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use super::SCROLLABLE_VPAD;
use crate::buttons::{ButtonEvents, Buttons};
use crate::layout::Border;

/// Font used for a role. Always `'static`, fonts live in flash.
pub type Font = &'static MonoFont<'static>;

/// Fonts for every text role the UI core draws.
#[derive(Clone, Copy)]
pub struct ProfileFonts {
    /// Scrollable menu headings.
    pub heading: Font,
    /// Non-expanded scrollable labels.
    pub scrollable: Font,
    /// Editable labels.
    pub label: Font,
    /// Editable values when the layout names no font.
    pub value: Font,
    /// Editable units.
    pub units: Font,
    /// Small free text (boot screen details, clock).
    pub small: Font,
    /// Regular free text.
    pub regular: Font,
    /// Large numbers (speed, assist level).
    pub big: Font,
    /// Graph titles.
    pub graph_label: Font,
    /// Graph min/max values.
    pub graph_value: Font,
}

/// Which button event triggers which interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonBindings {
    pub start_edit: ButtonEvents,
    pub stop_edit: ButtonEvents,
    pub exit_scrollable: ButtonEvents,
    pub next_screen: ButtonEvents,
    pub start_customizing: ButtonEvents,
    pub stop_customizing: ButtonEvents,
}

/// Geometry, fonts and bindings for one panel class.
#[derive(Clone, Copy)]
pub struct DisplayProfile {
    pub name: &'static str,
    /// Panel width in pixels.
    pub width: i32,
    /// Panel height in pixels.
    pub height: i32,
    pub fonts: ProfileFonts,
    /// Size of the selection triangle drawn at the right edge of a row.
    pub cursor: Size,
    /// Editables with a visible label use this many text rows (1 or 2).
    pub editable_rows: i32,
    /// Clear the whole editable box on every value change.
    pub blank_all_editables: bool,
    pub heading_border: Border,
    /// Thickness of a `Border::FAT` bottom border.
    pub fat_border: i32,
    pub bindings: ButtonBindings,
    /// Holding these buttons shows every editable's label instead of its value.
    /// Empty when the panel has no such combo.
    pub show_labels: Buttons,
}

impl DisplayProfile {
    /// Panel size for `embedded-graphics` targets.
    pub const fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }

    /// Height of one scrollable data row.
    pub const fn scrollable_row_height(&self) -> i32 {
        self.editable_rows * self.fonts.scrollable.character_size.height as i32 + SCROLLABLE_VPAD
    }

    /// Rows a full-height scrollable shows, heading included.
    pub const fn scrollable_rows(&self) -> usize {
        (self.height / self.scrollable_row_height()) as usize
    }

    /// `n` eighths of the panel height, for placing rows proportionally.
    pub const fn y_by_eighths(
        &self,
        n: i32,
    ) -> i32 {
        self.height * n / 8
    }

    /// `n` sixty-fourths of the panel height.
    pub const fn y_by_64(
        &self,
        n: i32,
    ) -> i32 {
        self.height * n / 64
    }
}

/// 64x128 panel with up/down/on-off/M buttons.
pub const SW102: DisplayProfile = DisplayProfile {
    name: "SW102",
    width: 64,
    height: 128,
    fonts: ProfileFonts {
        heading: &FONT_6X10,
        scrollable: &FONT_5X8,
        label: &FONT_5X8,
        value: &FONT_6X10,
        units: &FONT_5X8,
        small: &FONT_5X8,
        regular: &FONT_6X10,
        big: &PROFONT_18_POINT,
        graph_label: &FONT_5X8,
        graph_value: &FONT_5X8,
    },
    cursor: Size::new(4, 7),
    editable_rows: 2,
    blank_all_editables: true,
    heading_border: Border::BOTTOM,
    fat_border: 2,
    bindings: ButtonBindings {
        start_edit: ButtonEvents::M_CLICK,
        stop_edit: ButtonEvents::M_CLICK,
        exit_scrollable: ButtonEvents::ONOFF_CLICK,
        next_screen: ButtonEvents::ONOFF_CLICK,
        start_customizing: ButtonEvents::M_CLICK,
        stop_customizing: ButtonEvents::M_CLICK,
    },
    show_labels: Buttons::M,
};

/// 320x480 colour panel with up/down/on-off buttons.
pub const C850: DisplayProfile = DisplayProfile {
    name: "850C",
    width: 320,
    height: 480,
    fonts: ProfileFonts {
        heading: &FONT_10X20,
        scrollable: &FONT_10X20,
        label: &FONT_8X13,
        value: &PROFONT_24_POINT,
        units: &FONT_8X13,
        small: &FONT_8X13,
        regular: &FONT_10X20,
        big: &PROFONT_24_POINT,
        graph_label: &FONT_8X13,
        graph_value: &PROFONT_12_POINT,
    },
    cursor: Size::new(8, 14),
    editable_rows: 1,
    blank_all_editables: false,
    heading_border: Border::BOTTOM.union(Border::FAT),
    fat_border: 7,
    bindings: ButtonBindings {
        start_edit: ButtonEvents::ONOFF_CLICK,
        stop_edit: ButtonEvents::ONOFF_CLICK,
        exit_scrollable: ButtonEvents::ONOFF_CLICK,
        next_screen: ButtonEvents::UPDOWN_CLICK,
        start_customizing: ButtonEvents::ONOFF_CLICK,
        stop_customizing: ButtonEvents::ONOFF_CLICK,
    },
    show_labels: Buttons::empty(),
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_SCROLLABLE_ROWS;

    #[test]
    fn test_scrollable_rows_fit_row_table() {
        for profile in [SW102, C850] {
            assert!(profile.scrollable_rows() >= 2, "{} needs a heading and a data row", profile.name);
            assert!(profile.scrollable_rows() <= MAX_SCROLLABLE_ROWS);
        }
    }

    #[test]
    fn test_sw102_row_geometry() {
        // two 8px text rows plus padding
        assert_eq!(SW102.scrollable_row_height(), 20);
        assert_eq!(SW102.scrollable_rows(), 6);
    }

    #[test]
    fn test_c850_row_geometry() {
        assert_eq!(C850.scrollable_row_height(), 24);
        assert_eq!(C850.scrollable_rows(), 20);
    }

    #[test]
    fn test_bindings_differ_per_panel() {
        assert_eq!(SW102.bindings.next_screen, ButtonEvents::ONOFF_CLICK);
        assert_eq!(C850.bindings.next_screen, ButtonEvents::UPDOWN_CLICK);
        assert!(C850.show_labels.is_empty());
    }
}
