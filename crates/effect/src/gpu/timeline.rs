//! Simulation clock for the loaded shader. Wall-clock deltas are scaled
//! by the user speed control (0..1 maps to 0x..2x playback) and
//! accumulated, so pausing the speed slider freezes shader time without
//! losing it. Reset to zero on every successful load.

use std::time::Instant;

pub(crate) struct SessionClock {
    last_frame: Instant,
    simulation_time: f32,
}

impl SessionClock {
    pub fn new(now: Instant) -> Self {
        Self {
            last_frame: now,
            simulation_time: 0.0,
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_frame = now;
        self.simulation_time = 0.0;
    }

    /// Advances simulation time by the elapsed wall-clock seconds scaled
    /// by `speed * 2.0` and returns the new value.
    pub fn advance(&mut self, now: Instant, speed: f32) -> f32 {
        let elapsed = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.simulation_time += elapsed * speed * 2.0;
        self.simulation_time
    }

    pub fn simulation_time(&self) -> f32 {
        self.simulation_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn starts_at_zero() {
        let clock = SessionClock::new(Instant::now());
        assert_eq!(clock.simulation_time(), 0.0);
    }

    #[test]
    fn full_speed_runs_at_twice_wall_clock() {
        let start = Instant::now();
        let mut clock = SessionClock::new(start);
        let time = clock.advance(start + Duration::from_secs(1), 1.0);
        assert!((time - 2.0).abs() < 1e-5);
    }

    #[test]
    fn half_speed_matches_wall_clock() {
        let start = Instant::now();
        let mut clock = SessionClock::new(start);
        let time = clock.advance(start + Duration::from_secs(2), 0.5);
        assert!((time - 2.0).abs() < 1e-5);
    }

    #[test]
    fn zero_speed_freezes_time() {
        let start = Instant::now();
        let mut clock = SessionClock::new(start);
        clock.advance(start + Duration::from_secs(1), 1.0);
        let frozen = clock.advance(start + Duration::from_secs(5), 0.0);
        assert!((frozen - 2.0).abs() < 1e-5);
    }

    #[test]
    fn monotonic_between_resets_and_zero_at_reset() {
        let start = Instant::now();
        let mut clock = SessionClock::new(start);
        let mut last = 0.0;
        for step in 1..=5 {
            let time = clock.advance(start + Duration::from_millis(step * 100), 0.7);
            assert!(time >= last);
            last = time;
        }
        clock.reset(start + Duration::from_secs(1));
        assert_eq!(clock.simulation_time(), 0.0);
    }
}
