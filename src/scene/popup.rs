use std::sync::Arc;

use image::RgbaImage;

use crate::canvas::{Canvas, Rect, with_alpha};
use crate::constants::{
    POPUP_FADE_TICKS, POPUP_INSET, POPUP_LIFETIME, POPUP_SIZE, WHITE, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::random::RandomSource;

use super::Layer;

const GROWTH_PER_TICK: f32 = 0.05;
const INITIAL_SCALE: f32 = 0.1;
const MAX_SPIN: f32 = 2.0;
const GLOW_MARGIN: f32 = 10.0;

/// A photo that pops up, spins gently and fades away.
pub struct ImagePopup {
    image: Arc<RgbaImage>,
    width: f32,
    height: f32,
    x: f32,
    y: f32,
    lifetime: i32,
    scale: f32,
    rotation: f32,
    rotation_speed: f32,
}

impl ImagePopup {
    pub fn new(image: Arc<RgbaImage>, rng: &mut RandomSource) -> Self {
        let size = rng.int(POPUP_SIZE.0, POPUP_SIZE.1) as f32;
        let (width, height) = fit(image.dimensions(), size);

        let max_x = (WORLD_WIDTH as i32 - width as i32 - POPUP_INSET).max(POPUP_INSET);
        let max_y = (WORLD_HEIGHT as i32 - height as i32 - POPUP_INSET).max(POPUP_INSET);

        Self {
            image,
            width,
            height,
            x: rng.int(POPUP_INSET, max_x) as f32,
            y: rng.int(POPUP_INSET, max_y) as f32,
            lifetime: POPUP_LIFETIME,
            scale: INITIAL_SCALE,
            rotation: 0.0,
            rotation_speed: rng.uniform(-MAX_SPIN, MAX_SPIN),
        }
    }

    pub const fn is_alive(&self) -> bool {
        self.lifetime > 0
    }

    #[cfg(test)]
    pub const fn lifetime(&self) -> i32 {
        self.lifetime
    }

    #[cfg(test)]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Fitted size before the grow-in scale is applied.
    #[cfg(test)]
    pub const fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    #[cfg(test)]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Opaque until the last half second, then a linear fade.
    pub fn alpha(&self) -> u8 {
        if self.lifetime <= 0 {
            0
        } else if self.lifetime < POPUP_FADE_TICKS {
            (self.lifetime as f32 / POPUP_FADE_TICKS as f32 * 255.0) as u8
        } else {
            255
        }
    }
}

/// Scale `dimensions` so the longer side is `size`, keeping the aspect ratio.
fn fit(dimensions: (u32, u32), size: f32) -> (f32, f32) {
    let (width, height) = (dimensions.0.max(1) as f32, dimensions.1.max(1) as f32);
    let aspect = width / height;
    if aspect > 1.0 {
        (size, (size / aspect).round())
    } else {
        ((size * aspect).round(), size)
    }
}

impl Layer for ImagePopup {
    fn update(&mut self) {
        self.lifetime -= 1;
        if self.scale < 1.0 {
            self.scale += GROWTH_PER_TICK;
        }
        self.rotation += self.rotation_speed;
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let alpha = self.alpha();
        if alpha == 0 {
            return;
        }

        let size = (self.width * self.scale, self.height * self.scale);
        let center = (self.x + self.width / 2.0, self.y + self.height / 2.0);

        // The glow frames the rotated image's bounding box.
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let reach = (
            size.0 * cos.abs() + size.1 * sin.abs(),
            size.0 * sin.abs() + size.1 * cos.abs(),
        );
        canvas.fill_rect(
            Rect::new(
                center.0 - reach.0 / 2.0 - GLOW_MARGIN,
                center.1 - reach.1 / 2.0 - GLOW_MARGIN,
                reach.0 + GLOW_MARGIN * 2.0,
                reach.1 + GLOW_MARGIN * 2.0,
            ),
            with_alpha(WHITE, (alpha / 3).min(80)),
        );

        canvas.draw_image(&self.image, center, size, self.rotation, alpha);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::canvas::testing::{RecordingCanvas, Shape};

    fn popup(width: u32, height: u32, seed: u64) -> ImagePopup {
        let image = Arc::new(RgbaImage::new(width, height));
        ImagePopup::new(image, &mut RandomSource::with_seed(seed))
    }

    #[test]
    fn fits_longest_side_and_stays_on_screen() {
        for seed in 0..100 {
            let popup = popup(640, 480, seed);
            let (width, height) = popup.size();
            assert!((200.0..=400.0).contains(&width));
            assert!((height - width * 0.75).abs() <= 1.0, "{width}x{height}");

            let (x, y) = popup.position();
            assert!(x >= 100.0 && x + width <= 1100.0);
            assert!(y >= 100.0 && y + height <= 700.0);
        }
    }

    #[test]
    fn portrait_images_fit_by_height() {
        assert_eq!(fit((480, 640), 400.0), (300.0, 400.0));
        assert_eq!(fit((640, 480), 400.0), (400.0, 300.0));
        assert_eq!(fit((0, 0), 200.0), (200.0, 200.0));
    }

    #[test]
    fn grows_then_holds_full_size() {
        let mut popup = popup(100, 100, 1);
        for _ in 0..19 {
            popup.update();
        }
        assert!(popup.scale() >= 1.0);
        let settled = popup.scale();
        popup.update();
        assert_eq!(popup.scale(), settled);
    }

    #[test]
    fn fades_out_over_the_last_thirty_ticks() {
        let mut popup = popup(100, 100, 2);
        for _ in 0..150 {
            popup.update();
            assert_eq!(popup.alpha(), 255);
        }
        popup.update();
        assert_eq!(popup.lifetime(), 29);
        assert_eq!(popup.alpha(), 246);

        let mut previous = popup.alpha();
        while popup.is_alive() {
            popup.update();
            assert!(popup.alpha() <= previous);
            previous = popup.alpha();
        }
        assert_eq!(popup.lifetime(), 0);
        assert_eq!(popup.alpha(), 0);
    }

    #[test]
    fn draws_glow_then_image() {
        let popup = popup(100, 100, 3);
        let mut canvas = RecordingCanvas::default();
        popup.draw(&mut canvas);

        assert_eq!(canvas.shapes.len(), 2);
        assert!(matches!(canvas.shapes[0], Shape::Rect(_, (255, 255, 255, 80))));
        assert!(matches!(canvas.shapes[1], Shape::Image { alpha: 255, .. }));
    }
}
