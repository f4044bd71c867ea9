use crate::canvas::{Canvas, Rgb, with_alpha};
use crate::constants::{APEX_RANGE, ASCENT_DRAG, BURST_SIZE, LAUNCH_SPEED, PALETTE, ROCKET_RADIUS};
use crate::random::RandomSource;

use super::particle::Particle;

/// Where a firework is in its life. There is no way back from `Exploded`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Ascending,
    Exploded,
}

/// A rocket that climbs towards its apex and bursts into particles.
pub struct Firework {
    x: f32,
    y: f32,
    target_y: f32,
    color: Rgb,
    vy: f32,
    stage: Stage,
    particles: Vec<Particle>,
}

impl Firework {
    /// A rocket with a random apex, colour and launch speed.
    pub fn new(x: f32, y: f32, rng: &mut RandomSource) -> Self {
        let target_y = rng.int(APEX_RANGE.0, APEX_RANGE.1) as f32;
        let color = *rng.choose(&PALETTE);
        let vy = -rng.uniform(LAUNCH_SPEED.0, LAUNCH_SPEED.1);
        Self::with_trajectory(x, y, target_y, vy, color)
    }

    /// A rocket with explicit launch parameters. Negative `vy` is upwards.
    pub const fn with_trajectory(x: f32, y: f32, target_y: f32, vy: f32, color: Rgb) -> Self {
        Self {
            x,
            y,
            target_y,
            color,
            vy,
            stage: Stage::Ascending,
            particles: Vec::new(),
        }
    }

    /// One tick: climb while ascending, otherwise age the burst and drop the
    /// particles that have burnt out.
    pub fn advance(&mut self, rng: &mut RandomSource) {
        match self.stage {
            Stage::Ascending => {
                self.y += self.vy;
                self.vy += ASCENT_DRAG;
                // A slow rocket may turn over just short of its apex and burst
                // a little lower on the way down.
                if self.y <= self.target_y || self.vy > 0.0 {
                    self.explode(rng);
                }
            }
            Stage::Exploded => {
                for particle in &mut self.particles {
                    particle.advance();
                }
                self.particles.retain(Particle::is_alive);
            }
        }
    }

    /// Burst into 50 to 100 particles. Does nothing once exploded.
    pub fn explode(&mut self, rng: &mut RandomSource) {
        if self.is_exploded() {
            return;
        }
        let count = rng.int(BURST_SIZE.0, BURST_SIZE.1);
        let (x, y, color) = (self.x, self.y, self.color);
        self.particles
            .extend((0..count).map(|_| Particle::new(x, y, color, rng)));
        self.stage = Stage::Exploded;

        tracing::trace!("Firework burst into {count} particles at ({x:.0}, {y:.0})");
    }

    pub fn is_alive(&self) -> bool {
        !self.is_exploded() || !self.particles.is_empty()
    }

    pub fn is_exploded(&self) -> bool {
        self.stage == Stage::Exploded
    }

    #[cfg(test)]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    #[cfg(test)]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    #[cfg(test)]
    pub const fn target_y(&self) -> f32 {
        self.target_y
    }

    #[cfg(test)]
    pub const fn velocity_y(&self) -> f32 {
        self.vy
    }

    #[cfg(test)]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    #[cfg(test)]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The rocket marker while climbing, the particles afterwards.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        match self.stage {
            Stage::Ascending => {
                canvas.fill_circle((self.x, self.y), ROCKET_RADIUS, with_alpha(self.color, 255));
            }
            Stage::Exploded => {
                for particle in &self.particles {
                    particle.draw(canvas);
                }
            }
        }
    }
}
