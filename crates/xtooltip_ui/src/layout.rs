//! Default sizes and timings for tooltips.

/// Standard sizing constants, in pixels.
pub mod sizes {
    /// Padding around the tooltip text
    pub const PADDING: i32 = 30;
    /// Bubble corner radius
    pub const CORNER_RADIUS: f64 = 4.0;
    /// Bubble outline width
    pub const STROKE_WEIGHT: f64 = 2.0;
    /// Intrinsic width and height of the ripple overlay
    pub const OVERLAY_INTRINSIC: i32 = 96;
}

/// Default timings and ratios.
pub mod defaults {
    use std::time::Duration;

    /// Bubble fade in/out duration
    pub const FADE_DURATION: Duration = Duration::from_millis(100);
    /// One ripple pulse
    pub const RIPPLE_DURATION: Duration = Duration::from_millis(400);
    /// Ripple pulses per play
    pub const RIPPLE_REPEAT_COUNT: u32 = 1;
    /// `padding / ARROW_RATIO` gives the arrow half-width
    pub const ARROW_RATIO: f64 = 1.4;
    /// Maximum paint alpha
    pub const ALPHA_MAX: f64 = 255.0;
}

/// Ripple timeline fractions of one pulse duration.
pub mod ripple {
    /// Alpha ramps up over this share of the pulse
    pub const FADE_IN_FRACTION: f64 = 0.3;
    /// Alpha starts ramping down at this share of the pulse
    pub const FADE_OUT_START_FRACTION: f64 = 0.55;
    /// The inner circle starts this share of a pulse after the outer one
    pub const INNER_START_DELAY_FRACTION: f64 = 0.25;
}
