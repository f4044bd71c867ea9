use std::f32::consts::TAU;

use crate::canvas::{Canvas, Rgb, with_alpha};
use crate::constants::{
    PARTICLE_DECAY, PARTICLE_GRAVITY, PARTICLE_LIFETIME, PARTICLE_SIZE, PARTICLE_SPEED,
};
use crate::random::RandomSource;

/// A single spark thrown out by an exploding firework.
#[derive(Clone, Debug)]
pub struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    color: Rgb,
    lifetime: i32,
    gravity: f32,
    size: i32,
}

impl Particle {
    /// A spark at the burst origin heading in a random direction.
    pub fn new(x: f32, y: f32, color: Rgb, rng: &mut RandomSource) -> Self {
        let angle = rng.uniform(0.0, TAU);
        let speed = rng.uniform(PARTICLE_SPEED.0, PARTICLE_SPEED.1);

        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            color,
            lifetime: PARTICLE_LIFETIME,
            gravity: PARTICLE_GRAVITY,
            size: rng.int(PARTICLE_SIZE.0, PARTICLE_SIZE.1),
        }
    }

    /// Move one tick, pull downwards and fade. Dead particles stay put.
    pub fn advance(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.x += self.vx;
        self.y += self.vy;
        self.vy += self.gravity;
        self.lifetime -= PARTICLE_DECAY;
    }

    pub const fn is_alive(&self) -> bool {
        self.lifetime > 0
    }

    #[cfg(test)]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    #[cfg(test)]
    pub const fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    #[cfg(test)]
    pub const fn lifetime(&self) -> i32 {
        self.lifetime
    }

    #[cfg(test)]
    pub const fn size(&self) -> i32 {
        self.size
    }

    #[cfg(test)]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Opacity tracks the remaining lifetime.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if !self.is_alive() {
            return;
        }
        let alpha = self.lifetime.clamp(0, 255) as u8;
        canvas.fill_circle((self.x, self.y), self.size as f32, with_alpha(self.color, alpha));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::canvas::testing::RecordingCanvas;

    fn particle(seed: u64) -> Particle {
        Particle::new(600.0, 300.0, (255, 0, 0), &mut RandomSource::with_seed(seed))
    }

    #[test]
    fn starts_at_origin_with_bounded_speed_and_size() {
        for seed in 0..200 {
            let particle = particle(seed);
            assert_eq!(particle.position(), (600.0, 300.0));
            assert_eq!(particle.lifetime(), 255);
            assert!((2..=5).contains(&particle.size()));

            let (vx, vy) = particle.velocity();
            let speed = vx.hypot(vy);
            assert!((0.999..=8.001).contains(&speed), "{speed}");
        }
    }

    #[test]
    fn lifetime_drops_by_three_each_tick_until_dead() {
        let mut particle = particle(1);
        let mut ticks = 0;
        while particle.is_alive() {
            let before = particle.lifetime();
            particle.advance();
            assert_eq!(particle.lifetime(), before - 3);
            ticks += 1;
        }
        assert_eq!(ticks, 85);
        assert!(particle.lifetime() <= 0);
    }

    #[test]
    fn dead_particles_are_not_updated() {
        let mut particle = particle(2);
        for _ in 0..85 {
            particle.advance();
        }
        let frozen = (particle.position(), particle.velocity(), particle.lifetime());
        particle.advance();
        assert_eq!(
            (particle.position(), particle.velocity(), particle.lifetime()),
            frozen
        );
    }

    #[test]
    fn gravity_accumulates_on_vertical_velocity() {
        let mut particle = particle(3);
        let (vx, vy) = particle.velocity();
        let (x, y) = particle.position();
        particle.advance();
        assert_eq!(particle.position(), (x + vx, y + vy));
        assert_eq!(particle.velocity(), (vx, vy + 0.15));
    }

    #[test]
    fn draws_with_fading_alpha_and_stops_when_dead() {
        let mut particle = particle(4);
        particle.advance();

        let mut canvas = RecordingCanvas::default();
        particle.draw(&mut canvas);
        let circles = canvas.circles();
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].3, (255, 0, 0, 252));
        assert_eq!(circles[0].2, particle.size() as f32);

        while particle.is_alive() {
            particle.advance();
        }
        let mut canvas = RecordingCanvas::default();
        particle.draw(&mut canvas);
        assert!(canvas.shapes.is_empty());
    }
}
