//! The drawing surface the renderer paints on.
//!
//! [`Canvas`] is object safe so the renderer and custom fields can take a
//! `&mut dyn Canvas` without being generic over the panel type. Every
//! `DrawTarget<Color = Rgb565>` is a canvas: the simulator window, the
//! SPI panel on the Pico 2, and the recording canvas used by tests.
//!
//! Draw errors are dropped. A panel that fails a transfer shows stale
//! pixels until the field is redrawn, there is nothing better to do.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::{Baseline, Text};

pub trait Canvas {
    /// Panel size in pixels.
    fn canvas_size(&self) -> Size;

    fn fill_rect(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    );

    /// One pixel wide line, both ends inclusive.
    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb565,
    );

    /// Checkerboard of `color` over `area`, background pixels untouched.
    fn draw_mesh(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    );

    fn fill_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Rgb565,
    );

    /// Draw `text` with its top-left corner at `pos`.
    ///
    /// With `background` set the glyph cells are painted opaque.
    fn put_str(
        &mut self,
        pos: Point,
        text: &str,
        font: &'static MonoFont<'static>,
        color: Rgb565,
        background: Option<Rgb565>,
    );

    fn fill_screen(
        &mut self,
        color: Rgb565,
    ) {
        let area = Rectangle::new(Point::zero(), self.canvas_size());
        self.fill_rect(area, color);
    }
}

impl<D> Canvas for D
where
    D: DrawTarget<Color = Rgb565>,
{
    fn canvas_size(&self) -> Size {
        self.bounding_box().size
    }

    fn fill_rect(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    ) {
        self.fill_solid(&area, color).ok();
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb565,
    ) {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(self)
            .ok();
    }

    fn draw_mesh(
        &mut self,
        area: Rectangle,
        color: Rgb565,
    ) {
        let pixels = area
            .points()
            .filter(|p| (p.x + p.y).rem_euclid(2) == 0)
            .map(|p| Pixel(p, color));
        self.draw_iter(pixels).ok();
    }

    fn fill_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Rgb565,
    ) {
        Triangle::new(a, b, c)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self)
            .ok();
    }

    fn put_str(
        &mut self,
        pos: Point,
        text: &str,
        font: &'static MonoFont<'static>,
        color: Rgb565,
        background: Option<Rgb565>,
    ) {
        let builder = MonoTextStyleBuilder::new().font(font).text_color(color);
        let style = match background {
            Some(bg) => builder.background_color(bg).build(),
            None => builder.build(),
        };
        Text::with_baseline(text, pos, style, Baseline::Top).draw(self).ok();
    }
}
