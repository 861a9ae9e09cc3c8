use std::time::Instant;

/// Measures the time between consecutive frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            frame_index: 0,
        }
    }

    /// Seconds since the previous tick; `0.0` on the very first one.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last = Some(now);
        self.frame_index = self.frame_index.wrapping_add(1);
        dt
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}
