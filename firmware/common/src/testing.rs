//! Host-side helpers shared by the unit tests.

use core::convert::Infallible;
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::BLACK;

/// In-memory framebuffer that also counts draw calls.
pub struct RecordingCanvas {
    size: Size,
    pixels: Vec<Rgb565>,
    /// Pixels written since the last [`RecordingCanvas::take_writes`].
    writes: usize,
}

impl RecordingCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![BLACK; (size.width * size.height) as usize],
            writes: 0,
        }
    }

    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Rgb565 {
        self.pixels[(y as u32 * self.size.width + x as u32) as usize]
    }

    /// True if any pixel inside the rectangle has `color`.
    pub fn any_in(
        &self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Rgb565,
    ) -> bool {
        (y..y + h).any(|py| (x..x + w).any(|px| self.pixel(px, py) == color))
    }

    /// Number of pixel writes since the previous call.
    pub fn take_writes(&mut self) -> usize {
        core::mem::take(&mut self.writes)
    }
}

impl OriginDimensions for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for RecordingCanvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < self.size.width && (p.y as u32) < self.size.height {
                let i = (p.y as u32 * self.size.width + p.x as u32) as usize;
                self.pixels[i] = color;
                self.writes += 1;
            }
        }
        Ok(())
    }
}
