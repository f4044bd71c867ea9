use noise::{NoiseFn, Perlin};

use crate::canvas::{Canvas, Rect, with_alpha};
use crate::constants::{DECOR_SEED, STAR_COUNT, WHITE, WORLD_HEIGHT, WORLD_WIDTH};
use crate::random::RandomSource;

use super::Layer;

struct Star {
    x: f32,
    y: f32,
    size: f32,
}

/// Night gradient with a fixed field of twinkling stars.
pub struct NightSky {
    stars: Vec<Star>,
    noise: Perlin,
    time: f64,
}

impl NightSky {
    pub fn new(rng: &mut RandomSource) -> Self {
        // Star positions come from their own seeded generator so the layout is
        // the same every run and never disturbs the scene's main stream.
        let mut layout = RandomSource::with_seed(DECOR_SEED);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: layout.int(0, WORLD_WIDTH as i32) as f32,
                y: layout.int(0, (WORLD_HEIGHT / 2.0) as i32) as f32,
                size: layout.int(1, 2) as f32,
            })
            .collect();

        Self {
            stars,
            noise: Perlin::new(rng.next_u32()),
            time: 0.0,
        }
    }

    /// Gradient colour for a world row: dark at the top, bluer towards the
    /// bottom.
    pub fn gradient(y: f32) -> (u8, u8, u8) {
        let value = (10.0 + (y / WORLD_HEIGHT) * 30.0) as u8;
        (value, value, value * 2)
    }

    /// Star brightness between roughly 40% and 100%.
    fn twinkle(&self, index: usize) -> u8 {
        let sample = self.noise.get([index as f64 * 1.7, self.time * 0.8]);
        let brightness = 0.7 + sample * 0.3;
        (brightness.clamp(0.0, 1.0) * 255.0) as u8
    }
}

impl Layer for NightSky {
    fn update(&mut self) {
        self.time += 1.0 / 60.0;
        // Wrap time to prevent floating point precision issues
        if self.time > 10000.0 {
            self.time -= 10000.0;
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        for y in 0..WORLD_HEIGHT as i32 {
            let y = y as f32;
            canvas.fill_rect(
                Rect::new(0.0, y, WORLD_WIDTH, 1.0),
                with_alpha(Self::gradient(y), 255),
            );
        }

        for (index, star) in self.stars.iter().enumerate() {
            canvas.fill_circle(
                (star.x, star.y),
                star.size,
                with_alpha(WHITE, self.twinkle(index)),
            );
        }
    }
}
