//! The scene's source of randomness.
//!
//! Every component that needs random draws borrows a `RandomSource` from its
//! owner instead of reaching for a global generator. Decorations that must look
//! the same on every frame own a separately seeded instance.

// 2^24 steps are exactly representable in an f32 mantissa.
const UNIT_STEPS: u32 = 1 << 24;

/// Map `0..=UNIT_STEPS` onto `[0, 1]`.
fn closed_unit(step: u32) -> f32 {
    step as f32 / UNIT_STEPS as f32
}

/// Uniform sampling over real and integer intervals.
pub struct RandomSource {
    rng: fastrand::Rng,
}

impl RandomSource {
    /// A generator seeded from the environment.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// A deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        let mut source = Self::new();
        source.reseed(seed);
        source
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.seed(seed);
    }

    /// Uniform real in `[lo, hi]`, both ends included.
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        debug_assert!(lo <= hi, "empty interval {lo}..={hi}");
        lo + closed_unit(self.rng.u32(..=UNIT_STEPS)) * (hi - lo)
    }

    /// Uniform integer in `[lo, hi]`, both ends included.
    pub fn int(&mut self, lo: i32, hi: i32) -> i32 {
        debug_assert!(lo <= hi, "empty interval {lo}..={hi}");
        self.rng.i32(lo..=hi)
    }

    /// Pick one element. The slice must not be empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.usize(..items.len())]
    }

    /// Raw 32 bits, for seeding noise functions.
    pub fn next_u32(&mut self) -> u32 {
        self.rng.u32(..)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}
