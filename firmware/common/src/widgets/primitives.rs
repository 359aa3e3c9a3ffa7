//! Low-level text placement shared across widgets.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::canvas::Canvas;
use crate::layout::{AlignX, AlignY, FieldLayout};

/// Font and colors for one string.
#[derive(Clone, Copy)]
pub(crate) struct Pen {
    pub font: &'static MonoFont<'static>,
    pub color: Rgb565,
    /// Opaque glyph background, `None` draws transparently.
    pub background: Option<Rgb565>,
}

impl Pen {
    pub const fn new(
        font: &'static MonoFont<'static>,
        color: Rgb565,
    ) -> Self {
        Self {
            font,
            color,
            background: None,
        }
    }

    pub const fn background(
        mut self,
        background: Option<Rgb565>,
    ) -> Self {
        self.background = background;
        self
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.font.character_size.height as i32
    }
}

/// Horizontal advance of one character.
#[inline]
pub(crate) const fn char_step(font: &MonoFont<'_>) -> i32 {
    (font.character_size.width + font.character_spacing) as i32
}

/// Center `text` within `width` pixels starting at `x`, cutting what does not fit.
///
/// Returns where the string was drawn.
///
/// # Panics
///
/// Panics if `width` cannot hold a single character.
pub(crate) fn put_centered(
    canvas: &mut dyn Canvas,
    x: i32,
    y: i32,
    width: i32,
    pen: Pen,
    text: &str,
) -> Point {
    let step = char_step(pen.font);
    let spacing = pen.font.character_spacing as i32;
    let chars = text.chars().count() as i32;

    // the last glyph carries no trailing spacing
    let str_width = step * chars - spacing;

    let mut shown = text;
    if str_width > width {
        let max_chars = width / step;
        assert!(max_chars > 0, "field too narrow for its font");
        shown = text.char_indices().nth(max_chars as usize).map_or(text, |(i, _)| &text[..i]);
    }

    let mut x = x;
    if str_width < width {
        x += (width - str_width) / 2;
    }

    let pos = Point::new(x, y);
    canvas.put_str(pos, shown, pen.font, pen.color, pen.background);
    pos
}

/// Draw `text` ending at `x`.
pub(crate) fn put_right(
    canvas: &mut dyn Canvas,
    x: i32,
    y: i32,
    pen: Pen,
    text: &str,
) -> Point {
    let pos = Point::new(x - char_step(pen.font) * text.chars().count() as i32, y);
    canvas.put_str(pos, text, pen.font, pen.color, pen.background);
    pos
}

/// Place `text` inside `layout`.
///
/// Insets count from the left or top edge, and from the right edge for right
/// alignment. Returns where the string was drawn, `None` when hidden.
pub(crate) fn put_aligned(
    canvas: &mut dyn Canvas,
    layout: &FieldLayout,
    (align_x, align_y): (AlignX, AlignY),
    inset: Point,
    pen: Pen,
    text: &str,
) -> Option<Point> {
    let y = layout.y
        + match align_y {
            AlignY::Top => inset.y,
            AlignY::Bottom => layout.height - (inset.y + pen.height()),
            AlignY::Center => inset.y + layout.height / 2 - pen.height() / 2,
        };

    match align_x {
        AlignX::Hidden => None,
        AlignX::Left => {
            let pos = Point::new(layout.x + inset.x, y);
            canvas.put_str(pos, text, pen.font, pen.color, pen.background);
            Some(pos)
        }
        AlignX::Right => Some(put_right(canvas, layout.x + layout.width - inset.x, y, pen, text)),
        AlignX::Center => Some(put_centered(canvas, layout.x + inset.x, y, layout.width, pen, text)),
    }
}

/// Clear `layout` and draw `text` top aligned, the common text field look.
///
/// `hidden` leaves the box blank (the off phase of a blinking field).
pub(crate) fn draw_text_common(
    canvas: &mut dyn Canvas,
    layout: &FieldLayout,
    text: &str,
    hidden: bool,
) -> bool {
    let Some(font) = layout.font else {
        panic!("text fields need a layout font");
    };
    canvas.fill_rect(layout.bounds(), layout.color.back());
    if !hidden {
        put_aligned(
            canvas,
            layout,
            (layout.align_x, AlignY::Top),
            Point::new(layout.inset_x, layout.inset_y),
            Pen::new(font, layout.color.fore()),
            text,
        );
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};
    use crate::field::FieldId;
    use crate::testing::RecordingCanvas;
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    fn pen() -> Pen {
        Pen::new(&FONT_6X10, WHITE)
    }

    #[test]
    fn test_centered_adds_half_the_slack() {
        let mut canvas = RecordingCanvas::new(Size::new(64, 32));
        // "ab" is 12px wide in a 6px font with no spacing
        let pos = put_centered(&mut canvas, 0, 0, 20, pen(), "ab");
        assert_eq!(pos, Point::new(4, 0));
    }

    #[test]
    fn test_centered_truncates_long_text() {
        let mut canvas = RecordingCanvas::new(Size::new(64, 32));
        let pos = put_centered(&mut canvas, 0, 0, 13, pen(), "abcdef");
        assert_eq!(pos, Point::new(0, 0));
        // only two glyphs fit, nothing past x = 12
        assert!(!canvas.any_in(12, 0, 52, 10, WHITE));
    }

    #[test]
    fn test_right_alignment_ends_at_edge() {
        let mut canvas = RecordingCanvas::new(Size::new(64, 32));
        let layout = FieldLayout::new(FieldId(5)).at(0, 0).size(60, 10);
        let pos = put_aligned(
            &mut canvas,
            &layout,
            (AlignX::Right, AlignY::Top),
            Point::new(4, 0),
            pen(),
            "123",
        );
        assert_eq!(pos, Some(Point::new(38, 0)));
    }

    #[test]
    fn test_hidden_draws_nothing() {
        let mut canvas = RecordingCanvas::new(Size::new(64, 32));
        let layout = FieldLayout::new(FieldId(5)).at(0, 0).size(60, 10);
        let pos = put_aligned(&mut canvas, &layout, (AlignX::Hidden, AlignY::Top), Point::zero(), pen(), "x");
        assert_eq!(pos, None);
        assert_eq!(canvas.take_writes(), 0);
    }

    #[test]
    fn test_bottom_alignment() {
        let mut canvas = RecordingCanvas::new(Size::new(64, 32));
        let layout = FieldLayout::new(FieldId(5)).at(0, 4).size(60, 20);
        let pos = put_aligned(&mut canvas, &layout, (AlignX::Left, AlignY::Bottom), Point::new(2, 0), pen(), "x");
        assert_eq!(pos, Some(Point::new(2, 14)));
        assert_eq!(canvas.pixel(0, 0), BLACK);
    }
}
