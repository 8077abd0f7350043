use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped time since the previous tick, in seconds.
    pub dt: f32,

    /// Sum of all clamped deltas since the clock started, in seconds.
    pub elapsed: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Produces `FrameTime` snapshots with clamped delta time.
///
/// The lower clamp keeps dt non-zero on tight loops; the upper clamp keeps
/// animation stable after stalls (debugger, minimized window).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: f64,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub const DEFAULT_DT_MIN: Duration = Duration::from_micros(100);
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_DT_MIN, Self::DEFAULT_DT_MAX)
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: 0.0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Advances the clock using the current time.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;
        self.elapsed += dt.as_secs_f64();

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed,
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
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

    fn clock() -> (FrameClock, Instant) {
        let c = FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100));
        let start = c.last;
        (c, start)
    }

    #[test]
    fn dt_is_clamped_both_ways() {
        let (mut c, t0) = clock();
        assert_eq!(c.tick_at(t0).dt, 0.001);
        assert_eq!(c.tick_at(t0 + Duration::from_secs(10)).dt, 0.1);
    }

    #[test]
    fn dt_in_range_is_exact() {
        let (mut c, t0) = clock();
        let ft = c.tick_at(t0 + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn frame_index_and_elapsed_accumulate() {
        let (mut c, t0) = clock();
        let a = c.tick_at(t0 + Duration::from_millis(50));
        let b = c.tick_at(t0 + Duration::from_millis(100));
        assert_eq!((a.frame_index, b.frame_index), (0, 1));
        assert!((b.elapsed - 0.1).abs() < 1e-9);
    }

    #[test]
    fn time_going_backwards_uses_min_dt() {
        let (mut c, t0) = clock();
        c.tick_at(t0 + Duration::from_millis(50));
        assert_eq!(c.tick_at(t0).dt, 0.001);
    }
}
