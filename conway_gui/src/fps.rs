// fps.rs - Frames-per-second counter, reported once per second

use std::time::{Duration, Instant};

pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self { window_start: now, frames: 0 }
    }

    /// Counts one frame. Returns the frame count of the last full second
    /// once a second has passed.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.duration_since(self.window_start) < Duration::from_secs(1) {
            return None;
        }
        let fps = self.frames;
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_once_per_second() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);
        for i in 1..30 {
            assert_eq!(counter.tick(start + Duration::from_millis(i * 10)), None);
        }
        assert_eq!(counter.tick(start + Duration::from_secs(1)), Some(30));
        assert_eq!(counter.tick(start + Duration::from_millis(1500)), None);
    }
}
