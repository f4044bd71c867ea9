use crate::canvas::{Canvas, Rect, Rgb, with_alpha};
use crate::constants::{DECOR_SEED, WHITE};
use crate::random::RandomSource;

use super::Layer;

const PLATE_SHADOW: Rgb = (150, 150, 150);
const PLATE: Rgb = (220, 220, 220);
const PLATE_SHINE: Rgb = (240, 240, 240);

const SPRINKLE_COLORS: [Rgb; 5] = [
    (255, 0, 0),
    (0, 255, 0),
    (0, 100, 255),
    (255, 255, 0),
    (255, 0, 255),
];
const SPRINKLE_COUNT: usize = 20;

const CANDLE_COUNT: usize = 7;
const CANDLE_COLORS: [Rgb; 5] = [
    (255, 182, 193),
    (173, 216, 230),
    (255, 255, 200),
    (255, 200, 200),
    (200, 255, 200),
];
const CANDLE_STRIPE: Rgb = (200, 150, 150);
const WICK: Rgb = (50, 50, 50);
const FLAME: Rgb = (255, 200, 0);
const FLAME_CORE: Rgb = (255, 255, 100);

const FLAME_STEP: f32 = 0.2;
const FLAME_SWING: f32 = 3.0;
const SPARKLE_PERIOD: u32 = 20;

/// One tier of sponge with its frosting.
struct Tier {
    width: f32,
    height: f32,
    sponge: Rgb,
    shade_left: Rgb,
    shade_right: Rgb,
    shade_width: f32,
    frosting: Rgb,
    scallop_points: usize,
    scallop_divisions: f32,
    scallop_depth: f32,
    scallop_phase: f32,
}

/// A three-tier cake with candles whose flames bob up and down.
pub struct BirthdayCake {
    x: f32,
    y: f32,
    scale: f32,
    flame_offset: f32,
    flame_direction: f32,
    sparkle_timer: u32,
    sprinkles: Vec<(f32, f32, Rgb)>,
    sparkles: Vec<(f32, f32)>,
    rng: RandomSource,
}

impl BirthdayCake {
    pub fn new(x: f32, y: f32, scale: f32, rng: RandomSource) -> Self {
        let mut cake = Self {
            x,
            y,
            scale,
            flame_offset: 0.0,
            flame_direction: 1.0,
            sparkle_timer: 0,
            sprinkles: Vec::new(),
            sparkles: Vec::new(),
            rng,
        };
        cake.sprinkles = cake.scatter_sprinkles();
        cake
    }

    fn width(&self) -> f32 {
        (140.0 * self.scale).floor()
    }

    fn tiers(&self) -> [Tier; 3] {
        let width = self.width();
        [
            Tier {
                width,
                height: (45.0 * self.scale).floor(),
                sponge: (101, 67, 33),
                shade_left: (80, 50, 20),
                shade_right: (120, 85, 45),
                shade_width: 8.0,
                frosting: (255, 182, 193),
                scallop_points: 13,
                scallop_divisions: 12.0,
                scallop_depth: 5.0,
                scallop_phase: 2.0,
            },
            Tier {
                width: (width * 0.75).floor(),
                height: (40.0 * self.scale).floor(),
                sponge: (139, 90, 43),
                shade_left: (110, 70, 30),
                shade_right: (160, 110, 55),
                shade_width: 6.0,
                frosting: (255, 192, 203),
                scallop_points: 13,
                scallop_divisions: 12.0,
                scallop_depth: 4.0,
                scallop_phase: 2.0,
            },
            Tier {
                width: (width * 0.5).floor(),
                height: (35.0 * self.scale).floor(),
                sponge: (160, 100, 50),
                shade_left: (130, 80, 40),
                shade_right: (180, 120, 60),
                shade_width: 5.0,
                frosting: (255, 200, 220),
                scallop_points: 8,
                scallop_divisions: 8.0,
                scallop_depth: 3.0,
                scallop_phase: 2.5,
            },
        ]
    }

    /// Sprinkles sit on the bottom frosting. They are laid out once from a
    /// fixed seed so every cake and every frame shows the same pattern.
    fn scatter_sprinkles(&self) -> Vec<(f32, f32, Rgb)> {
        let mut layout = RandomSource::with_seed(DECOR_SEED);
        let width = self.width() as i32;
        let frosting_y = self.y - self.tiers()[0].height;
        (0..SPRINKLE_COUNT)
            .map(|_| {
                let x = self.x - (width / 2) as f32 + layout.int(5, width - 5) as f32;
                let y = frosting_y + layout.int(-5, 5) as f32;
                (x, y, *layout.choose(&SPRINKLE_COLORS))
            })
            .collect()
    }

    #[cfg(test)]
    pub const fn flame_offset(&self) -> f32 {
        self.flame_offset
    }

    #[cfg(test)]
    pub fn sparkles(&self) -> &[(f32, f32)] {
        &self.sparkles
    }

    fn draw_plate(&self, canvas: &mut dyn Canvas) {
        let half = self.width() / 2.0;
        let width = self.width();
        canvas.fill_ellipse(
            Rect::new(self.x - half - 18.0, self.y - 8.0, width + 36.0, 28.0),
            with_alpha(PLATE_SHADOW, 255),
        );
        canvas.fill_ellipse(
            Rect::new(self.x - half - 15.0, self.y - 10.0, width + 30.0, 25.0),
            with_alpha(PLATE, 255),
        );
        canvas.fill_ellipse(
            Rect::new(self.x - half - 10.0, self.y - 8.0, width + 20.0, 8.0),
            with_alpha(PLATE_SHINE, 255),
        );
    }

    /// Draws the tier resting on `base` and returns the height of its top.
    fn draw_tier(&self, canvas: &mut dyn Canvas, tier: &Tier, base: f32) -> f32 {
        let left = self.x - tier.width / 2.0;
        let top = base - tier.height;

        canvas.fill_rect(
            Rect::new(left, top, tier.width, tier.height),
            with_alpha(tier.sponge, 255),
        );
        canvas.fill_rect(
            Rect::new(left, top, tier.shade_width, tier.height),
            with_alpha(tier.shade_left, 255),
        );
        canvas.fill_rect(
            Rect::new(
                self.x + tier.width / 2.0 - tier.shade_width,
                top,
                tier.shade_width,
                tier.height,
            ),
            with_alpha(tier.shade_right, 255),
        );

        let mut frosting: Vec<(f32, f32)> = (0..tier.scallop_points)
            .map(|i| {
                let i = i as f32;
                (
                    left + tier.width * i / tier.scallop_divisions,
                    top + tier.scallop_depth * (i * tier.scallop_phase).sin(),
                )
            })
            .collect();
        frosting.push((self.x + tier.width / 2.0, top - 8.0));
        frosting.push((left, top - 8.0));
        canvas.fill_polygon(&frosting, with_alpha(tier.frosting, 255));

        top
    }

    fn draw_candles(&self, canvas: &mut dyn Canvas, top_width: f32, top: f32) {
        let spacing = (top_width / (CANDLE_COUNT as f32 + 1.0)).floor();
        let candle_y = top - 5.0;
        let flame_y = candle_y + self.flame_offset;

        for i in 0..CANDLE_COUNT {
            let candle_x = self.x - top_width / 2.0 + spacing * (i as f32 + 1.0);

            canvas.fill_rect(
                Rect::new(candle_x - 4.0, candle_y, 8.0, 30.0),
                with_alpha(CANDLE_COLORS[i % CANDLE_COLORS.len()], 255),
            );
            canvas.fill_rect(
                Rect::new(candle_x - 3.0, candle_y + 2.0, 2.0, 26.0),
                with_alpha(WHITE, 255),
            );
            for stripe in 0..6 {
                canvas.fill_rect(
                    Rect::new(candle_x - 4.0, candle_y + stripe as f32 * 5.0, 8.0, 1.0),
                    with_alpha(CANDLE_STRIPE, 255),
                );
            }
            canvas.fill_rect(
                Rect::new(candle_x - 1.0, candle_y - 5.0, 2.0, 5.0),
                with_alpha(WICK, 255),
            );

            // Glow, then the teardrop, then its bright core.
            canvas.fill_circle((candle_x, flame_y - 8.0), 8.0, with_alpha(FLAME, 80));
            let flame = [
                (candle_x, flame_y - 18.0),
                (candle_x - 4.0, flame_y - 10.0),
                (candle_x - 3.0, flame_y - 6.0),
                (candle_x, flame_y - 8.0),
                (candle_x + 3.0, flame_y - 6.0),
                (candle_x + 4.0, flame_y - 10.0),
            ];
            canvas.fill_polygon(&flame, with_alpha(FLAME, 255));
            let core = [
                (candle_x, flame_y - 16.0),
                (candle_x - 2.0, flame_y - 10.0),
                (candle_x, flame_y - 9.0),
                (candle_x + 2.0, flame_y - 10.0),
            ];
            canvas.fill_polygon(&core, with_alpha(FLAME_CORE, 255));
        }
    }
}

impl Layer for BirthdayCake {
    fn update(&mut self) {
        self.flame_offset += FLAME_STEP * self.flame_direction;
        if self.flame_offset.abs() > FLAME_SWING {
            self.flame_direction *= -1.0;
        }
        self.sparkle_timer += 1;

        self.sparkles.clear();
        if self.sparkle_timer % SPARKLE_PERIOD < SPARKLE_PERIOD / 2 {
            let width = self.width() as i32;
            let frosting_y = self.y - self.tiers()[0].height;
            for _ in 0..3 {
                let x = self.x - (width / 2) as f32 + self.rng.int(10, width - 10) as f32;
                let y = frosting_y + self.rng.int(-5, 5) as f32;
                self.sparkles.push((x, y));
            }
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        self.draw_plate(canvas);

        let tiers = self.tiers();
        let mut base = self.y;
        for tier in &tiers {
            base = self.draw_tier(canvas, tier, base);
        }

        for &(x, y, color) in &self.sprinkles {
            canvas.fill_circle((x, y), 2.0, with_alpha(color, 255));
        }

        self.draw_candles(canvas, tiers[2].width, base);

        for &(x, y) in &self.sparkles {
            canvas.fill_circle((x, y), 2.0, with_alpha(WHITE, 255));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::canvas::testing::{RecordingCanvas, Shape};

    fn cake() -> BirthdayCake {
        BirthdayCake::new(300.0, 650.0, 1.2, RandomSource::with_seed(1))
    }

    #[test]
    fn flame_swings_between_limits() {
        let mut cake = cake();
        let mut lowest: f32 = 0.0;
        let mut highest: f32 = 0.0;
        for _ in 0..200 {
            cake.update();
            lowest = lowest.min(cake.flame_offset());
            highest = highest.max(cake.flame_offset());
        }
        assert!(highest > 3.0 && highest < 3.5, "{highest}");
        assert!(lowest < -3.0 && lowest > -3.5, "{lowest}");
    }

    #[test]
    fn flame_reverses_after_passing_the_swing() {
        let mut cake = cake();
        while cake.flame_offset() <= 3.0 {
            cake.update();
        }
        let peak = cake.flame_offset();
        cake.update();
        assert!(cake.flame_offset() < peak);
    }

    #[test]
    fn sparkles_blink_on_a_twenty_tick_cycle() {
        let mut cake = cake();
        let visible: Vec<bool> = (0..40)
            .map(|_| {
                cake.update();
                !cake.sparkles().is_empty()
            })
            .collect();
        // Timer values 1..=9 show sparkles, 10..=19 hide them, 20 shows again.
        assert!(visible[..9].iter().all(|on| *on));
        assert!(visible[9..19].iter().all(|on| !*on));
        assert!(visible[19]);
    }

    #[test]
    fn sprinkle_layout_ignores_the_cake_generator() {
        let first = cake();
        let second = BirthdayCake::new(300.0, 650.0, 1.2, RandomSource::with_seed(77));
        assert_eq!(first.sprinkles, second.sprinkles);
        assert_eq!(first.sprinkles.len(), 20);
    }

    #[test]
    fn draws_seven_candles_with_flames() {
        let cake = cake();
        let mut canvas = RecordingCanvas::default();
        cake.draw(&mut canvas);

        let glows = canvas
            .circles()
            .into_iter()
            .filter(|(_, _, radius, color)| *radius == 8.0 && color.3 == 80)
            .count();
        assert_eq!(glows, 7);

        let polygons = canvas
            .shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Polygon(..)))
            .count();
        // Three frostings plus a flame and a core per candle.
        assert_eq!(polygons, 3 + 7 * 2);
    }
}
