use std::time::{Duration, Instant};

/// Frame timing diagnostics.
///
/// `begin()` marks the start of a step; `end()` records how long the step took
/// up to that point. One clock per frame loop.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_start: Instant,
    last_frame_duration: Duration,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
            last_frame_duration: Duration::ZERO,
            frame_index: 0,
        }
    }

    /// Marks the start of a frame.
    pub fn begin(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Records the time since the last `begin()` and advances the frame counter.
    pub fn end(&mut self) -> Duration {
        self.last_frame_duration = self.frame_start.elapsed();
        self.frame_index = self.frame_index.wrapping_add(1);
        self.last_frame_duration
    }

    /// Time since the current frame started.
    pub fn elapsed(&self) -> Duration {
        self.frame_start.elapsed()
    }

    /// Duration recorded by the most recent `end()`.
    pub fn last_frame_duration(&self) -> Duration {
        self.last_frame_duration
    }

    /// Number of completed frames.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
