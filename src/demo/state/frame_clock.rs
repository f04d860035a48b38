//! Frame timing.

use std::time::{Duration, Instant};

use log::debug;

/// Time since start-up plus a once-a-second frames-per-second count.
pub struct FrameClock {
    started: Instant,
    last_fps_print: Instant,
    frame_count: u32,
    last_fps: u32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            started: now,
            last_fps_print: now,
            frame_count: 0,
            last_fps: 0,
        }
    }

    /// Seconds since the clock was created.
    pub fn elapsed(&self) -> f32 {
        self.elapsed_at(Instant::now())
    }

    pub fn elapsed_at(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.started).as_secs_f32()
    }

    /// Count a finished frame. Returns the FPS when a full second has passed.
    pub fn tick(&mut self) -> Option<u32> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Option<u32> {
        self.frame_count += 1;
        if now.saturating_duration_since(self.last_fps_print) < Duration::from_secs(1) {
            return None;
        }
        self.last_fps = self.frame_count;
        self.frame_count = 0;
        self.last_fps_print = now;
        debug!("FPS: {}", self.last_fps);
        Some(self.last_fps)
    }

    pub fn fps(&self) -> u32 {
        self.last_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_reported_once_per_second() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        for i in 1..60 {
            assert_eq!(clock.tick_at(start + Duration::from_millis(i * 16)), None);
        }
        assert_eq!(clock.tick_at(start + Duration::from_millis(1000)), Some(60));
        assert_eq!(clock.fps(), 60);
        assert_eq!(clock.tick_at(start + Duration::from_millis(1010)), None);
    }

    #[test]
    fn elapsed_is_measured_from_start() {
        let start = Instant::now();
        let clock = FrameClock::starting_at(start);
        assert!((clock.elapsed_at(start + Duration::from_millis(2500)) - 2.5).abs() < 1e-6);
    }
}
