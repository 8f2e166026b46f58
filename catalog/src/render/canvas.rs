use font8x8::legacy::BASIC_LEGACY;
use image::{ImageFormat, Rgb as Pixel, RgbImage};
use std::path::Path;

use super::{RenderError, scheme::Rgb};

/// RGB raster with clipped line and bitmap-text primitives.
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, Pixel(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        (x < self.img.width() && y < self.img.height()).then(|| self.img.get_pixel(x, y).0)
    }

    /// Off-canvas points are dropped.
    pub fn put(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.img.width() && y < self.img.height() {
            self.img.put_pixel(x, y, Pixel(color));
        }
    }

    /// Bresenham, both end points included.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x, y, color);
            if (x, y) == to {
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

    pub fn thick_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb) {
        self.line(from, to, color);
        for (ox, oy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            self.line((from.0 + ox, from.1 + oy), (to.0 + ox, to.1 + oy), color);
        }
    }

    /// Draws `text` in the 8x8 console font, each font pixel blown up to a
    /// `scale` x `scale` block. `(x, y)` is the top-left of the first glyph.
    pub fn text(&mut self, x: i32, y: i32, scale: u32, text: &str, color: Rgb) {
        let scale = scale.max(1) as i32;
        for (i, ch) in text.chars().enumerate() {
            let glyph = glyph_for_char(ch);
            let gx = x + i as i32 * 8 * scale;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..8 {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let px = gx + col * scale;
                    let py = y + row as i32 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            self.put(px + dx, py + dy, color);
                        }
                    }
                }
            }
        }
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.img.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

fn glyph_for_char(ch: char) -> [u8; 8] {
    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        BASIC_LEGACY[index]
    } else {
        BASIC_LEGACY[b'?' as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = [0, 0, 0];
    const RED: Rgb = [255, 0, 0];

    #[test]
    fn line_covers_both_ends_and_clips() {
        let mut c = Canvas::new(10, 10, BLACK);
        c.line((-5, 2), (4, 2), RED);
        assert_eq!(c.pixel(0, 2), Some(RED));
        assert_eq!(c.pixel(4, 2), Some(RED));
        assert_eq!(c.pixel(5, 2), Some(BLACK));
        c.line((9, 0), (0, 9), RED);
        assert_eq!(c.pixel(9, 0), Some(RED));
        assert_eq!(c.pixel(0, 9), Some(RED));
        assert_eq!(c.pixel(10, 0), None);
    }

    #[test]
    fn thick_line_widens_by_one_each_side() {
        let mut c = Canvas::new(10, 10, BLACK);
        c.thick_line((5, 2), (5, 7), RED);
        for x in 4..=6 {
            assert_eq!(c.pixel(x, 4), Some(RED));
        }
        assert_eq!(c.pixel(3, 4), Some(BLACK));
        assert_eq!(c.pixel(5, 1), Some(RED));
        assert_eq!(c.pixel(5, 8), Some(RED));
    }

    #[test]
    fn text_blits_scaled_glyphs() {
        let mut c = Canvas::new(40, 20, BLACK);
        c.text(0, 0, 2, "I", RED);
        let lit = (0..40)
            .flat_map(|x| (0..20).map(move |y| (x, y)))
            .filter(|&(x, y)| c.pixel(x, y) == Some(RED))
            .count();
        assert!(lit > 0);
        assert_eq!(lit % 4, 0);
        // nothing beyond the first 16-pixel cell
        assert!((16..40).all(|x| (0..20).all(|y| c.pixel(x, y) == Some(BLACK))));
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/map.png");
        Canvas::new(4, 4, RED).save_png(&path).unwrap();
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.get_pixel(1, 1).0, RED);
    }
}
