//! Frame-rate sampling for the display loop.
//!
//! The flight model advances one tick per displayed frame and never reads
//! elapsed time; this clock exists only to report frame rate in the logs.

use std::time::Instant;

/// Measures frame rate over a reporting window.
#[derive(Debug)]
pub struct FrameClock {
    /// Frames between FPS reports.
    report_interval: u64,
    /// Start of the current reporting window.
    window_start: Instant,
    /// Frames counted in the current reporting window.
    window_frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(120)
    }
}

impl FrameClock {
    /// Create a clock that yields an FPS sample every `report_interval` frames.
    pub fn new(report_interval: u64) -> Self {
        let now = Instant::now();
        Self {
            report_interval: report_interval.max(1),
            window_start: now,
            window_frames: 0,
        }
    }

    /// Register a new frame. Returns the averaged FPS when a reporting window closes.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f32> {
        self.window_frames += 1;

        if self.window_frames < self.report_interval {
            return None;
        }
        let window = now.saturating_duration_since(self.window_start).as_secs_f32();
        let frames = self.window_frames;
        self.window_start = now;
        self.window_frames = 0;
        if window > 0.0 {
            Some(frames as f32 / window)
        } else {
            Some(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn reports_once_per_window() {
        let start = Instant::now();
        let mut clock = FrameClock::new(4);
        clock.window_start = start;
        let mut samples = Vec::new();
        for i in 1..=8u64 {
            if let Some(fps) = clock.tick_at(start + Duration::from_millis(10 * i)) {
                samples.push(fps);
            }
        }
        assert_eq!(samples.len(), 2);
        assert!((samples[0] - 100.0).abs() < 1.0);
        assert!((samples[1] - 100.0).abs() < 1.0);
    }

    #[test]
    fn zero_interval_is_treated_as_one() {
        let mut clock = FrameClock::new(0);
        assert!(clock.tick().is_some());
    }
}
