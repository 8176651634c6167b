use std::time::{Duration, Instant};

/// Frames between averaged frame-time reports; roughly every two seconds
/// at 60 Hz.
const REPORT_INTERVAL: u32 = 120;

/// Measures the wall-clock time between consecutive frames and periodically
/// folds it into an average, so the host can log frame pacing without
/// spamming every frame.
pub struct FrameTimer {
    last_frame: Instant,
    accumulated: Duration,
    frames: u32,
}

impl FrameTimer {
    pub fn new(now: Instant) -> Self {
        Self {
            last_frame: now,
            accumulated: Duration::ZERO,
            frames: 0,
        }
    }

    /// Record the start of a new frame. Returns the time the previous frame
    /// took, plus the windowed average once every `REPORT_INTERVAL` frames.
    pub fn tick(&mut self, now: Instant) -> (Duration, Option<Duration>) {
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.accumulated += delta;
        self.frames += 1;

        if self.frames == REPORT_INTERVAL {
            let average = self.accumulated / self.frames;
            self.accumulated = Duration::ZERO;
            self.frames = 0;
            (delta, Some(average))
        } else {
            (delta, None)
        }
    }
}
