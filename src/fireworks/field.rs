use crate::canvas::Canvas;
use crate::constants::{LAUNCH_INSET, SPAWN_INTERVAL, WORLD_HEIGHT, WORLD_WIDTH};
use crate::random::RandomSource;

use super::firework::Firework;

/// Every firework currently in the sky, plus the automatic launch cadence.
///
/// Fireworks are kept in launch order, which is also draw order, so later
/// launches render on top. Dead fireworks are dropped on every advance.
pub struct FireworkField {
    fireworks: Vec<Firework>,
    spawn_timer: u32,
    spawn_interval: u32,
    spawn_count: u64,
    width: f32,
    bottom: f32,
    inset: f32,
    rng: RandomSource,
}

impl FireworkField {
    pub fn new(rng: RandomSource) -> Self {
        Self::with_interval(SPAWN_INTERVAL, rng)
    }

    pub fn with_interval(spawn_interval: u32, rng: RandomSource) -> Self {
        Self {
            fireworks: Vec::new(),
            spawn_timer: 0,
            spawn_interval,
            spawn_count: 0,
            width: WORLD_WIDTH,
            bottom: WORLD_HEIGHT,
            inset: LAUNCH_INSET,
            rng,
        }
    }

    /// Count one tick towards the next automatic launch. Returns `true` when
    /// this tick launched a firework.
    pub fn tick(&mut self) -> bool {
        self.spawn_timer += 1;
        if self.spawn_timer < self.spawn_interval {
            return false;
        }

        self.spawn_timer = 0;
        self.launch_random();
        self.spawn_count += 1;
        tracing::debug!("Automatic launch #{}", self.spawn_count);
        true
    }

    /// Advance every firework and forget the ones that have burnt out.
    pub fn advance_all(&mut self) {
        for firework in &mut self.fireworks {
            firework.advance(&mut self.rng);
        }
        self.fireworks.retain(Firework::is_alive);
    }

    /// Launch from an explicit point. Leaves the automatic cadence alone.
    pub fn launch_at(&mut self, x: f32, y: f32) {
        let firework = Firework::new(x, y, &mut self.rng);
        self.fireworks.push(firework);
    }

    /// Launch from a random spot along the bottom edge, away from the sides.
    pub fn launch_random(&mut self) {
        let x = self
            .rng
            .int(self.inset as i32, (self.width - self.inset) as i32) as f32;
        self.launch_at(x, self.bottom);
    }

    #[cfg(test)]
    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fireworks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.fireworks.is_empty()
    }

    #[cfg(test)]
    pub const fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }

    /// Automatic launches so far. Manual launches are not counted.
    pub const fn spawn_count(&self) -> u64 {
        self.spawn_count
    }

    pub const fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for firework in &self.fireworks {
            firework.draw(canvas);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn field() -> FireworkField {
        FireworkField::new(RandomSource::with_seed(99))
    }

    #[test]
    fn advancing_an_empty_field_is_a_no_op() {
        let mut field = field();
        field.advance_all();
        assert!(field.is_empty());
        assert_eq!(field.spawn_timer(), 0);
    }

    #[test]
    fn fifteen_ticks_launch_exactly_one_firework() {
        let mut field = field();
        for _ in 0..14 {
            assert!(!field.tick());
        }
        assert!(field.is_empty());

        assert!(field.tick());
        assert_eq!(field.len(), 1);
        assert_eq!(field.spawn_timer(), 0);
        assert_eq!(field.spawn_count(), 1);

        let (x, y) = field.fireworks()[0].position();
        assert!((100.0..=1100.0).contains(&x));
        assert_eq!(y, 800.0);
    }

    #[test]
    fn cadence_repeats() {
        let mut field = field();
        let launches = (0..45).filter(|_| field.tick()).count();
        assert_eq!(launches, 3);
        assert_eq!(field.spawn_count(), 3);
    }

    #[test]
    fn manual_launch_leaves_the_timer_alone() {
        let mut field = field();
        for _ in 0..7 {
            field.tick();
        }
        field.launch_at(300.0, 800.0);

        assert_eq!(field.len(), 1);
        assert_eq!(field.fireworks()[0].position(), (300.0, 800.0));
        assert_eq!(field.spawn_timer(), 7);
        assert_eq!(field.spawn_count(), 0);
    }

    #[test]
    fn random_launches_start_inside_the_inset() {
        let mut field = field();
        for _ in 0..100 {
            field.launch_random();
        }
        assert_eq!(field.spawn_count(), 0);
        for firework in field.fireworks() {
            let (x, y) = firework.position();
            assert!((100.0..=1100.0).contains(&x));
            assert_eq!(y, 800.0);
        }
    }

    #[test]
    fn dead_fireworks_are_purged_every_advance() {
        let mut field = field();
        field.launch_at(300.0, 800.0);
        field.launch_at(900.0, 800.0);

        let mut ticks = 0;
        while !field.is_empty() {
            field.advance_all();
            assert!(field.fireworks().iter().all(Firework::is_alive));
            ticks += 1;
            assert!(ticks <= 41 + 85, "fireworks outlived their burst");
        }
    }

    #[test]
    fn later_launches_draw_on_top() {
        let mut field = field();
        field.launch_at(100.0, 800.0);
        field.launch_at(200.0, 800.0);

        let mut canvas = crate::canvas::testing::RecordingCanvas::default();
        field.draw(&mut canvas);
        let xs: Vec<f32> = canvas.circles().iter().map(|circle| circle.0).collect();
        assert_eq!(xs, vec![100.0, 200.0]);
    }
}
