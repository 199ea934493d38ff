/// Frame timing for the variable-step simulation loop
///
/// Each frame measures the wall-clock time since the previous frame and
/// clamps it, so a stall (window drag, breakpoint, slow present) never
/// turns into one huge integration step.
use std::time::{Duration, Instant};

/// Largest step the simulation is ever advanced by (in seconds)
pub const MAX_DELTA_TIME: f32 = 0.1;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame clock state
pub struct FrameClock {
    /// Time of last frame
    last_frame_time: Instant,

    /// Time when the clock was created
    start_time: Instant,

    /// Upper bound applied to every delta
    max_delta: f32,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl FrameClock {
    /// Create a new clock starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock whose first delta is measured from `start`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_frame_time: start,
            start_time: start,
            max_delta: MAX_DELTA_TIME,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Override the maximum step
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Begin a new frame, returns the clamped delta in seconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Begin a new frame observed at `now`
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        frame_time.as_secs_f32().min(self.max_delta)
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Get total number of frames ticked
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
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
    use approx::assert_relative_eq;

    #[test]
    fn test_clock_creation() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn test_small_delta_passes_through() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let dt = clock.tick_at(start + Duration::from_millis(16));
        assert_relative_eq!(dt, 0.016, epsilon = 1e-6);
    }

    #[test]
    fn test_large_delta_is_clamped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        let dt = clock.tick_at(start + Duration::from_secs(3));
        assert_eq!(dt, MAX_DELTA_TIME);
    }

    #[test]
    fn test_delta_measured_from_previous_frame() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);

        clock.tick_at(start + Duration::from_secs(1));
        let dt = clock.tick_at(start + Duration::from_millis(1050));
        assert_relative_eq!(dt, 0.05, epsilon = 1e-6);
    }

    #[test]
    fn test_never_exceeds_max_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let mut now = start;

        for millis in [1u64, 99, 100, 101, 250, 5_000] {
            now += Duration::from_millis(millis);
            assert!(clock.tick_at(now) <= MAX_DELTA_TIME);
        }
    }

    #[test]
    fn test_custom_max_delta() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start).with_max_delta(0.02);

        let dt = clock.tick_at(start + Duration::from_millis(50));
        assert_eq!(dt, 0.02);
    }

    #[test]
    fn test_time_going_backwards_yields_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(start);

        let dt = clock.tick_at(start - Duration::from_millis(10));
        assert_eq!(dt, 0.0);
    }

    #[test]
    fn test_frame_counting() {
        let mut clock = FrameClock::new();
        clock.tick();
        assert_eq!(clock.frame_count(), 1);
        clock.tick();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_fps_from_steady_frames() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        let mut now = start;

        for _ in 0..10 {
            now += Duration::from_millis(20);
            clock.tick_at(now);
        }

        assert_relative_eq!(clock.fps(), 50.0, epsilon = 0.01);
    }
}
