//! Placement of one field on one screen.
//!
//! A [`FieldLayout`] owns no content, only where and how its field is
//! drawn. Deferred geometry (`0`, negative or `-1` sizes) is resolved by
//! the renderer the first time the layout is drawn and written back, so the
//! arithmetic runs once.
//!
//! # Deferred geometry
//!
//! | Value | Meaning |
//! |---|---|
//! | `width == 0` | rest of the panel right of `x` |
//! | `height == 0` | rest of the panel below `y` |
//! | `width < 0` | `-width` character cells of the layout font |
//! | `y < 0` | `-y - 1` pixels below the lowest layout drawn so far |
//! | `height == -1` | derived from the font (text and editables) |

use bitflags::bitflags;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::prelude::*;

use crate::colors::{BLACK, ERROR_COLOR, HEADING_BACKGROUND, WARNING_COLOR, WHITE};
use crate::field::FieldId;

bitflags! {
    /// Lines drawn around a layout after its field renders.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Border: u8 {
        const BOTTOM = 1 << 0;
        const TOP = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        /// Draw the bottom border as a thick strip.
        const FAT = 1 << 4;
        const BOX = Self::BOTTOM.bits() | Self::TOP.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// Color scheme of a layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOp {
    #[default]
    Normal,
    Invert,
    Heading,
    Error,
    Warning,
}

impl ColorOp {
    /// Background fill.
    pub const fn back(self) -> Rgb565 {
        match self {
            Self::Invert => WHITE,
            Self::Heading => HEADING_BACKGROUND,
            Self::Normal | Self::Error | Self::Warning => BLACK,
        }
    }

    /// Text, fill and border color.
    pub const fn fore(self) -> Rgb565 {
        match self {
            Self::Invert => BLACK,
            Self::Error => ERROR_COLOR,
            Self::Warning => WARNING_COLOR,
            Self::Normal | Self::Heading => WHITE,
        }
    }
}

/// Horizontal alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlignX {
    #[default]
    Center,
    Left,
    Right,
    /// Do not draw this element at all.
    Hidden,
}

/// Vertical alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlignY {
    #[default]
    Center,
    Top,
    Bottom,
}

/// Binds one field to one rectangle of one screen.
#[derive(Clone, Copy)]
pub struct FieldLayout {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub border: Border,
    pub color: ColorOp,
    /// Primary content (text or value).
    pub align_x: AlignX,
    pub align_y: AlignY,
    /// Editable label. `Hidden` shows value and units only.
    pub label_align_x: AlignX,
    pub label_align_y: AlignY,
    /// Editable units (bottom right unless overridden).
    pub unit_align_x: AlignX,
    pub unit_align_y: AlignY,
    pub inset_x: i32,
    pub inset_y: i32,
    pub field: FieldId,
    pub font: Option<&'static MonoFont<'static>>,
    /// Last numeric value an editable drew here.
    pub(crate) old_editable: Option<u32>,
}

impl FieldLayout {
    /// A layout at the origin filling the rest of the panel.
    pub const fn new(field: FieldId) -> Self {
        Self {
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            border: Border::empty(),
            color: ColorOp::Normal,
            align_x: AlignX::Center,
            align_y: AlignY::Center,
            label_align_x: AlignX::Center,
            label_align_y: AlignY::Center,
            unit_align_x: AlignX::Right,
            unit_align_y: AlignY::Bottom,
            inset_x: 0,
            inset_y: 0,
            field,
            font: None,
            old_editable: None,
        }
    }

    pub const fn at(
        mut self,
        x: i32,
        y: i32,
    ) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub const fn size(
        mut self,
        width: i32,
        height: i32,
    ) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub const fn font(
        mut self,
        font: &'static MonoFont<'static>,
    ) -> Self {
        self.font = Some(font);
        self
    }

    pub const fn border(
        mut self,
        border: Border,
    ) -> Self {
        self.border = border;
        self
    }

    pub const fn color(
        mut self,
        color: ColorOp,
    ) -> Self {
        self.color = color;
        self
    }

    pub const fn align(
        mut self,
        x: AlignX,
        y: AlignY,
    ) -> Self {
        self.align_x = x;
        self.align_y = y;
        self
    }

    pub const fn label_align(
        mut self,
        x: AlignX,
        y: AlignY,
    ) -> Self {
        self.label_align_x = x;
        self.label_align_y = y;
        self
    }

    pub const fn unit_align(
        mut self,
        x: AlignX,
        y: AlignY,
    ) -> Self {
        self.unit_align_x = x;
        self.unit_align_y = y;
        self
    }

    pub const fn inset(
        mut self,
        x: i32,
        y: i32,
    ) -> Self {
        self.inset_x = x;
        self.inset_y = y;
        self
    }

    /// Show only value and units.
    pub const fn hide_label(self) -> Self {
        self.label_align(AlignX::Hidden, self.label_align_y)
    }

    /// The resolved bounding box.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x, self.y),
            Size::new(self.width.max(0) as u32, self.height.max(0) as u32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let layout = FieldLayout::new(FieldId(7));
        assert_eq!(layout.width, 0);
        assert_eq!(layout.height, 0);
        assert_eq!(layout.align_x, AlignX::Center);
        assert_eq!(layout.unit_align_x, AlignX::Right);
        assert_eq!(layout.unit_align_y, AlignY::Bottom);
        assert!(layout.font.is_none());
        assert!(layout.old_editable.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let layout = FieldLayout::new(FieldId(1))
            .at(4, -2)
            .size(-5, -1)
            .border(Border::BOTTOM | Border::FAT)
            .hide_label();
        assert_eq!((layout.x, layout.y, layout.width, layout.height), (4, -2, -5, -1));
        assert!(layout.border.contains(Border::FAT));
        assert_eq!(layout.label_align_x, AlignX::Hidden);
    }

    #[test]
    fn test_color_ops() {
        assert_eq!(ColorOp::Normal.back(), BLACK);
        assert_eq!(ColorOp::Invert.back(), WHITE);
        assert_eq!(ColorOp::Invert.fore(), BLACK);
        assert_eq!(ColorOp::Heading.back(), HEADING_BACKGROUND);
        assert_eq!(ColorOp::Error.fore(), ERROR_COLOR);
        assert_eq!(ColorOp::Warning.fore(), WARNING_COLOR);
    }

    #[test]
    fn test_bounds_clamps_unresolved_sizes() {
        let layout = FieldLayout::new(FieldId(0)).at(2, 3).size(10, -1);
        assert_eq!(layout.bounds(), Rectangle::new(Point::new(2, 3), Size::new(10, 0)));
    }
}
