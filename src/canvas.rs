//! The render adapter.
//!
//! Scene code draws in world units through the `Canvas` trait. `PixelCanvas`
//! rasterises those calls into a buffer of half-block terminal pixels and
//! writes the frame out as true-colour ANSI sequences.

use std::io::Write;

use image::RgbaImage;

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};

pub type Rgb = (u8, u8, u8);
pub type Rgba = (u8, u8, u8, u8);

/// Attach an alpha channel to an opaque colour.
pub const fn with_alpha(color: Rgb, alpha: u8) -> Rgba {
    (color.0, color.1, color.2, alpha)
}

/// An axis-aligned rectangle in world units, anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Drawing operations the scene needs. All coordinates are world units.
pub trait Canvas {
    /// Filled circle, alpha-blended over what is already there.
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgba);
    /// Filled ellipse inscribed in `bounds`.
    fn fill_ellipse(&mut self, bounds: Rect, color: Rgba);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    /// Filled simple polygon (even-odd rule).
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba);
    /// A line of terminal text centred on `center`.
    fn draw_text(&mut self, center: (f32, f32), text: &str, color: Rgb);
    /// `image` stretched to `size`, rotated counter-clockwise by `rotation`
    /// degrees around `center`, with an overall opacity.
    fn draw_image(
        &mut self,
        image: &RgbaImage,
        center: (f32, f32),
        size: (f32, f32),
        rotation: f32,
        alpha: u8,
    );
}

/// The terminal area the world is mapped onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Pixel dimensions. Each cell holds two pixels stacked vertically.
    pub const fn pixel_size(self) -> (usize, usize) {
        (self.cols as usize, self.rows as usize * 2)
    }

    /// Pixels per world unit on each axis.
    pub fn scale(self) -> (f32, f32) {
        let (width, height) = self.pixel_size();
        (width as f32 / WORLD_WIDTH, height as f32 / WORLD_HEIGHT)
    }

    pub fn to_pixel(self, point: (f32, f32)) -> (f32, f32) {
        let (sx, sy) = self.scale();
        (point.0 * sx, point.1 * sy)
    }

    pub fn to_world(self, pixel: (f32, f32)) -> (f32, f32) {
        let (sx, sy) = self.scale();
        if sx == 0.0 || sy == 0.0 {
            return (0.0, 0.0);
        }
        (pixel.0 / sx, pixel.1 / sy)
    }

    /// World position of the centre of a terminal cell.
    pub fn cell_to_world(self, col: u16, row: u16) -> (f32, f32) {
        self.to_world((f32::from(col) + 0.5, f32::from(row) * 2.0 + 1.0))
    }
}

pub struct PixelCanvas {
    viewport: Viewport,
    width: usize,
    height: usize,
    pixels: Vec<(f32, f32, f32)>,
    glyphs: Vec<Option<(char, Rgb)>>,
    output_buf: Vec<u8>,
}

impl PixelCanvas {
    pub fn new(viewport: Viewport) -> Self {
        let (width, height) = viewport.pixel_size();
        Self {
            viewport,
            width,
            height,
            pixels: vec![(0.0, 0.0, 0.0); width * height],
            glyphs: vec![None; usize::from(viewport.cols) * usize::from(viewport.rows)],
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        *self = Self::new(viewport);
    }

    /// Blank every pixel and drop any text from the previous frame.
    pub fn clear(&mut self) {
        self.pixels.fill((0.0, 0.0, 0.0));
        self.glyphs.fill(None);
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        to_rgb(self.pixels[y * self.width + x])
    }

    #[cfg(test)]
    pub fn glyph(&self, col: usize, row: usize) -> Option<(char, Rgb)> {
        self.glyphs[row * usize::from(self.viewport.cols) + col]
    }

    fn blend(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let alpha = f32::from(color.3) / 255.0;
        let pixel = &mut self.pixels[y as usize * self.width + x as usize];
        pixel.0 = pixel.0 * (1.0 - alpha) + f32::from(color.0) * alpha;
        pixel.1 = pixel.1 * (1.0 - alpha) + f32::from(color.1) * alpha;
        pixel.2 = pixel.2 * (1.0 - alpha) + f32::from(color.2) * alpha;
    }

    /// Blend every pixel in the bounding box whose centre satisfies
    /// `contains`. If none does, the pixel under `anchor` is lit instead so
    /// shapes smaller than a pixel don't vanish.
    fn fill_shape(
        &mut self,
        min: (f32, f32),
        max: (f32, f32),
        anchor: (f32, f32),
        color: Rgba,
        contains: impl Fn(f32, f32) -> bool,
    ) {
        if color.3 == 0 || self.width == 0 || self.height == 0 {
            return;
        }
        let x0 = (min.0.floor() as i32).max(0);
        let y0 = (min.1.floor() as i32).max(0);
        let x1 = (max.0.ceil() as i32).min(self.width as i32 - 1);
        let y1 = (max.1.ceil() as i32).min(self.height as i32 - 1);

        let mut hit = false;
        for y in y0..=y1 {
            for x in x0..=x1 {
                if contains(x as f32 + 0.5, y as f32 + 0.5) {
                    self.blend(x, y, color);
                    hit = true;
                }
            }
        }
        if !hit {
            self.blend(anchor.0.floor() as i32, anchor.1.floor() as i32, color);
        }
    }

    /// Write the frame as half-block cells: background is the top pixel,
    /// foreground the bottom one. Cells carrying text show the glyph over the
    /// average of both pixels.
    pub fn present<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        let cols = usize::from(self.viewport.cols);
        let mut prev_bg: Rgb = (255, 255, 255);
        let mut prev_fg: Rgb = (255, 255, 255);

        for row in 0..usize::from(self.viewport.rows) {
            let y = row * 2;
            for x in 0..cols {
                let top = self.pixels[y * self.width + x];
                let bottom = self.pixels[(y + 1) * self.width + x];

                let (bg, fg, symbol) = match self.glyphs[row * cols + x] {
                    Some((ch, color)) => {
                        let average = (
                            (top.0 + bottom.0) / 2.0,
                            (top.1 + bottom.1) / 2.0,
                            (top.2 + bottom.2) / 2.0,
                        );
                        (to_rgb(average), color, ch)
                    }
                    None => (to_rgb(top), to_rgb(bottom), '▄'),
                };

                if bg != prev_bg {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", bg.0, bg.1, bg.2)?;
                    prev_bg = bg;
                }
                if fg != prev_fg {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", fg.0, fg.1, fg.2)?;
                    prev_fg = fg;
                }

                let mut encoded = [0u8; 4];
                self.output_buf
                    .extend_from_slice(symbol.encode_utf8(&mut encoded).as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_bg = (255, 255, 255);
            prev_fg = (255, 255, 255);
            if row + 1 < usize::from(self.viewport.rows) {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()?;
        Ok(())
    }
}

impl Canvas for PixelCanvas {
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgba) {
        let diameter = radius * 2.0;
        self.fill_ellipse(
            Rect::new(center.0 - radius, center.1 - radius, diameter, diameter),
            color,
        );
    }

    fn fill_ellipse(&mut self, bounds: Rect, color: Rgba) {
        let (sx, sy) = self.viewport.scale();
        let (cx, cy) = self.viewport.to_pixel((
            bounds.x + bounds.width / 2.0,
            bounds.y + bounds.height / 2.0,
        ));
        let rx = (bounds.width / 2.0 * sx).max(f32::EPSILON);
        let ry = (bounds.height / 2.0 * sy).max(f32::EPSILON);

        self.fill_shape(
            (cx - rx, cy - ry),
            (cx + rx, cy + ry),
            (cx, cy),
            color,
            |px, py| {
                let dx = (px - cx) / rx;
                let dy = (py - cy) / ry;
                dx * dx + dy * dy <= 1.0
            },
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let (x0, y0) = self.viewport.to_pixel((rect.x, rect.y));
        let (x1, y1) = self
            .viewport
            .to_pixel((rect.x + rect.width, rect.y + rect.height));

        self.fill_shape(
            (x0, y0),
            (x1, y1),
            ((x0 + x1) / 2.0, (y0 + y1) / 2.0),
            color,
            |px, py| px >= x0 && px < x1 && py >= y0 && py < y1,
        );
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let pixels: Vec<(f32, f32)> = points
            .iter()
            .map(|point| self.viewport.to_pixel(*point))
            .collect();

        let mut min = (f32::MAX, f32::MAX);
        let mut max = (f32::MIN, f32::MIN);
        let mut sum = (0.0, 0.0);
        for &(x, y) in &pixels {
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
            sum = (sum.0 + x, sum.1 + y);
        }
        let count = pixels.len() as f32;

        self.fill_shape(
            min,
            max,
            (sum.0 / count, sum.1 / count),
            color,
            |px, py| {
                let mut inside = false;
                let mut j = pixels.len() - 1;
                for i in 0..pixels.len() {
                    let (xi, yi) = pixels[i];
                    let (xj, yj) = pixels[j];
                    if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
                        inside = !inside;
                    }
                    j = i;
                }
                inside
            },
        );
    }

    fn draw_text(&mut self, center: (f32, f32), text: &str, color: Rgb) {
        let cols = i32::from(self.viewport.cols);
        let rows = i32::from(self.viewport.rows);
        let (px, py) = self.viewport.to_pixel(center);
        let row = (py / 2.0).floor() as i32;
        if row < 0 || row >= rows {
            return;
        }

        let length = text.chars().count() as f32;
        let start = (px - length / 2.0).round() as i32;
        for (offset, ch) in text.chars().enumerate() {
            let col = start + offset as i32;
            if col < 0 || col >= cols {
                continue;
            }
            self.glyphs[(row * cols + col) as usize] = Some((ch, color));
        }
    }

    fn draw_image(
        &mut self,
        image: &RgbaImage,
        center: (f32, f32),
        size: (f32, f32),
        rotation: f32,
        alpha: u8,
    ) {
        let (image_width, image_height) = image.dimensions();
        if alpha == 0 || image_width == 0 || image_height == 0 || size.0 < 1.0 || size.1 < 1.0 {
            return;
        }

        let (sin, cos) = rotation.to_radians().sin_cos();
        let half = (size.0 / 2.0, size.1 / 2.0);
        let reach = (
            half.0 * cos.abs() + half.1 * sin.abs(),
            half.0 * sin.abs() + half.1 * cos.abs(),
        );
        let min = self
            .viewport
            .to_pixel((center.0 - reach.0, center.1 - reach.1));
        let max = self
            .viewport
            .to_pixel((center.0 + reach.0, center.1 + reach.1));

        let x0 = (min.0.floor() as i32).max(0);
        let y0 = (min.1.floor() as i32).max(0);
        let x1 = (max.0.ceil() as i32).min(self.width as i32 - 1);
        let y1 = (max.1.ceil() as i32).min(self.height as i32 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let world = self.viewport.to_world((x as f32 + 0.5, y as f32 + 0.5));
                let u = world.0 - center.0;
                let v = world.1 - center.1;
                // Undo the rotation to find where this pixel lands on the image.
                let source_x = (cos * u - sin * v) / size.0 + 0.5;
                let source_y = (sin * u + cos * v) / size.1 + 0.5;
                if !(0.0..1.0).contains(&source_x) || !(0.0..1.0).contains(&source_y) {
                    continue;
                }

                let texel = image.get_pixel(
                    ((source_x * image_width as f32) as u32).min(image_width - 1),
                    ((source_y * image_height as f32) as u32).min(image_height - 1),
                );
                let opacity = u16::from(texel[3]) * u16::from(alpha) / 255;
                self.blend(x, y, (texel[0], texel[1], texel[2], opacity as u8));
            }
        }
    }
}

fn to_rgb(color: (f32, f32, f32)) -> Rgb {
    (
        color.0.round().clamp(0.0, 255.0) as u8,
        color.1.round().clamp(0.0, 255.0) as u8,
        color.2.round().clamp(0.0, 255.0) as u8,
    )
}
