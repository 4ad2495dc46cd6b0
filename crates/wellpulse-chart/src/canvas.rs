//! Clipped raster drawing on an owned RGB buffer

use crate::error::RenderError;
use crate::font::{self, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::theme;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// One render's drawing surface. Every chart call creates its own.
#[derive(Debug, Clone)]
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.img.width() as i64 && y < self.img.height() as i64
    }

    /// Set one pixel; out-of-bounds writes are dropped
    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if self.in_bounds(x, y) {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f64) {
        if self.in_bounds(x, y) {
            let pixel = self.img.get_pixel_mut(x as u32, y as u32);
            *pixel = theme::blend(*pixel, color, alpha);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
        for dy in 0..height as i64 {
            for dx in 0..width as i64 {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    pub fn stroke_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + width as i64 - 1;
        let bottom = y + height as i64 - 1;
        self.hline(y, x, right, color);
        self.hline(bottom, x, right, color);
        self.vline(x, y, bottom, color);
        self.vline(right, y, bottom, color);
    }

    pub fn hline(&mut self, y: i64, x1: i64, x2: i64, color: Rgb<u8>) {
        let (start, end) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        for x in start..=end {
            self.put(x, y, color);
        }
    }

    pub fn vline(&mut self, x: i64, y1: i64, y2: i64, color: Rgb<u8>) {
        let (start, end) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        for y in start..=end {
            self.put(x, y, color);
        }
    }

    pub fn dashed_hline(&mut self, y: i64, x1: i64, x2: i64, color: Rgb<u8>, dash: u32, gap: u32) {
        let (start, end) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let period = (dash + gap).max(1) as i64;
        for x in start..=end {
            if (x - start) % period < dash as i64 {
                self.put(x, y, color);
            }
        }
    }

    /// Vertical run blended at `alpha`
    pub fn blend_vspan(&mut self, x: i64, y1: i64, y2: i64, color: Rgb<u8>, alpha: f64) {
        let (start, end) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        for y in start..=end {
            self.blend_pixel(x, y, color, alpha);
        }
    }

    /// Bresenham line with a square pen
    pub fn line(&mut self, from: (i64, i64), to: (i64, i64), color: Rgb<u8>, thickness: u32) {
        let (mut x, mut y) = from;
        let (x1, y1) = to;
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let pen = thickness.max(1) as i64;
        let offset = pen / 2;
        loop {
            self.fill_rect(x - offset, y - offset, pen as u32, pen as u32, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i64, cy: i64, radius: u32, color: Rgb<u8>) {
        let r = radius as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draw `text` with its top-left corner at (x, y)
    pub fn text(&mut self, x: i64, y: i64, text: &str, color: Rgb<u8>, scale: u32) {
        let scale = scale.max(1);
        let mut cursor = x;
        for c in text.chars() {
            let rows = font::glyph(c);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        self.fill_rect(
                            cursor + (col * scale) as i64,
                            y + (row as u32 * scale) as i64,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            cursor += (ADVANCE * scale) as i64;
        }
    }

    /// Draw `text` horizontally centred on `cx`
    pub fn text_centered(&mut self, cx: i64, y: i64, text: &str, color: Rgb<u8>, scale: u32) {
        let width = font::text_width(text, scale) as i64;
        self.text(cx - width / 2, y, text, color, scale);
    }

    /// Draw `text` ending at `right`
    pub fn text_right(&mut self, right: i64, y: i64, text: &str, color: Rgb<u8>, scale: u32) {
        let width = font::text_width(text, scale) as i64;
        self.text(right - width, y, text, color, scale);
    }

    pub fn text_height(scale: u32) -> u32 {
        GLYPH_HEIGHT * scale.max(1)
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.img
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
