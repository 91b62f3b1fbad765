//! Minimal float tween evaluation.
//!
//! The host's frame clock advances elapsed time; tweens only map elapsed
//! time to a value.

use std::f64::consts::PI;
use std::time::Duration;

/// Easing curve applied to a tween's linear fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interpolator {
    Linear,
    /// Slow start and end, fast middle
    #[default]
    AccelerateDecelerate,
}

impl Interpolator {
    pub fn interpolate(self, fraction: f64) -> f64 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Interpolator::Linear => t,
            Interpolator::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

/// A single `from -> to` tween with an optional start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub start_delay: Duration,
    pub interpolator: Interpolator,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            start_delay: Duration::ZERO,
            interpolator: Interpolator::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Delay plus duration.
    pub fn total(&self) -> Duration {
        self.start_delay + self.duration
    }

    /// Linear fraction at `elapsed`, clamped to `0..=1`.
    pub fn fraction_at(&self, elapsed: Duration) -> f64 {
        if elapsed <= self.start_delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let running = elapsed - self.start_delay;
        (running.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Value at `elapsed` measured from the tween's start (delay included).
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let eased = self.interpolator.interpolate(self.fraction_at(elapsed));
        self.from + (self.to - self.from) * eased
    }

    /// Value when repeating forever, reversing direction on each cycle.
    pub fn reversing_value_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return self.from;
        }
        let cycle = self.duration.as_secs_f64();
        let t = elapsed.saturating_sub(self.start_delay).as_secs_f64();
        let index = (t / cycle).floor();
        let mut fraction = (t - index * cycle) / cycle;
        if index as u64 % 2 == 1 {
            fraction = 1.0 - fraction;
        }
        let eased = self.interpolator.interpolate(fraction);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.total()
    }
}
