//! Floating micro-motion settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Gravity;

/// Axis of the idle float animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatDirection {
    /// Vertical for top/bottom gravity, horizontal otherwise
    #[default]
    Auto,
    Horizontal,
    Vertical,
}

impl FloatDirection {
    /// Resolve `Auto` against the gravity the tooltip was placed with.
    pub fn resolve(self, gravity: Gravity) -> FloatDirection {
        match self {
            FloatDirection::Auto if gravity.is_vertical() => FloatDirection::Vertical,
            FloatDirection::Auto => FloatDirection::Horizontal,
            other => other,
        }
    }
}

/// Idle float animation: the text view oscillates `-radius..radius` along one
/// axis, reversing forever while shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Animation {
    /// Pixel amplitude of the float
    pub radius: i32,
    /// Axis of the float
    #[serde(default)]
    pub direction: FloatDirection,
    /// One-way tween time
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl Animation {
    pub const DEFAULT: Animation =
        Animation { radius: 8, direction: FloatDirection::Auto, duration: Duration::from_millis(400) };

    pub const SLOW: Animation =
        Animation { radius: 4, direction: FloatDirection::Auto, duration: Duration::from_millis(600) };

    pub fn new(radius: i32, direction: FloatDirection, duration: Duration) -> Self {
        Self { radius, direction, duration }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Serialize durations as whole milliseconds.
pub mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
