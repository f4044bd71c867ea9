use std::time::{Duration, Instant};

/// Paces the main loop to a fixed number of frames per second.
///
/// Each iteration does its work and then calls `wait_for_next_frame`, which
/// sleeps away whatever is left of the frame interval. An iteration that
/// overruns is not made up for later: the next frame simply starts late.
pub struct AnimationClock {
    frame_duration: Duration,
    frame_started: Instant,
    frames: u64,
}

impl AnimationClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_duration: Duration::from_secs(1) / fps.max(1),
            frame_started: Instant::now(),
            frames: 0,
        }
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Frames completed so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Time left in the current frame as of `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.frame_duration
            .saturating_sub(now.saturating_duration_since(self.frame_started))
    }

    /// Block until the current frame interval is over, then start the next.
    pub fn wait_for_next_frame(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.frame_started = Instant::now();
        self.frames += 1;
    }
}
