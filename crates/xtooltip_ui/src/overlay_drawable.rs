//! Ripple overlay: two concentric circles pulsing out from the anchor center.

use std::time::Duration;
use kurbo::Circle;
use xtooltip_core::{Interpolator, Rect, Tween};

use crate::canvas::{Canvas, Paint};
use crate::layout::defaults::ALPHA_MAX;
use crate::layout::ripple::{FADE_IN_FRACTION, FADE_OUT_START_FRACTION, INNER_START_DELAY_FRACTION};
use crate::layout::sizes::OVERLAY_INTRINSIC;
use crate::style::OverlayStyle;

/// One circle's timeline.
#[derive(Debug, Clone, Copy, Default)]
struct Pulse {
    running: bool,
    elapsed: Duration,
    delay: Duration,
    radius: f64,
    alpha: f64,
}

impl Pulse {
    fn start(&mut self, delay: Duration) {
        *self = Pulse { running: true, delay, ..Pulse::default() };
    }

    fn reset(&mut self) {
        *self = Pulse::default();
    }

    fn end(&self, duration: Duration) -> Duration {
        self.delay + duration
    }

    fn remaining(&self, duration: Duration) -> Option<Duration> {
        self.running.then(|| self.end(duration).saturating_sub(self.elapsed))
    }

    /// Sample alpha and radius at the current elapsed time.
    fn sample(&mut self, duration: Duration, max_alpha: f64, max_radius: f64) {
        let fade_in = Tween::new(0.0, max_alpha, duration.mul_f64(FADE_IN_FRACTION)).with_delay(self.delay);
        let fade_out_delay = self.delay + duration.mul_f64(FADE_OUT_START_FRACTION);
        let fade_out = Tween::new(max_alpha, 0.0, duration.saturating_sub(duration.mul_f64(FADE_OUT_START_FRACTION)))
            .with_delay(fade_out_delay);
        let radius = Tween::new(0.0, max_radius, duration)
            .with_delay(self.delay)
            .with_interpolator(Interpolator::Linear);

        self.alpha = if self.elapsed < fade_out_delay {
            fade_in.value_at(self.elapsed)
        } else {
            fade_out.value_at(self.elapsed)
        };
        self.radius = radius.value_at(self.elapsed);
    }
}

/// The "sonar ping" drawn behind the anchor.
#[derive(Debug, Clone)]
pub struct TooltipOverlayDrawable {
    outer: Pulse,
    inner: Pulse,
    outer_paint: Paint,
    inner_paint: Paint,
    max_alpha: f64,
    max_radius: f64,
    repeat_count: u32,
    repeat_index: u32,
    duration: Duration,
    bounds: Rect,
    visible: bool,
    started: bool,
}

impl TooltipOverlayDrawable {
    pub fn new(style: &OverlayStyle) -> Self {
        let paint = Paint::fill(style.color);
        Self {
            outer: Pulse::default(),
            inner: Pulse::default(),
            outer_paint: paint,
            inner_paint: paint,
            max_alpha: (style.alpha.clamp(0.0, 1.0) * ALPHA_MAX).round(),
            max_radius: 0.0,
            repeat_count: style.repeat_count,
            repeat_index: 0,
            duration: style.duration,
            bounds: Rect::default(),
            visible: false,
            started: false,
        }
    }

    /// Width and height the overlay asks for when measured.
    pub fn intrinsic_size(&self) -> i32 {
        OVERLAY_INTRINSIC
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.max_radius = bounds.width().min(bounds.height()) as f64 / 2.0;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether either circle is still animating.
    pub fn is_running(&self) -> bool {
        self.outer.running || self.inner.running
    }

    pub fn repeat_index(&self) -> u32 {
        self.repeat_index
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer.radius
    }

    pub fn outer_alpha(&self) -> f64 {
        self.outer.alpha
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner.radius
    }

    pub fn inner_alpha(&self) -> f64 {
        self.inner.alpha
    }

    /// Show or hide the ripple. Returns whether visibility changed.
    pub fn set_visible(&mut self, visible: bool, restart: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        if visible {
            if restart || !self.started {
                self.replay();
            }
        } else {
            self.stop();
        }
        changed
    }

    pub fn play(&mut self) {
        if self.duration.is_zero() || self.repeat_count == 0 {
            return;
        }
        self.repeat_index = 0;
        self.started = true;
        self.outer.start(Duration::ZERO);
        self.inner.start(self.duration.mul_f64(INNER_START_DELAY_FRACTION));
    }

    /// Cancel both pulses and zero radii and alphas immediately.
    pub fn stop(&mut self) {
        self.outer.reset();
        self.inner.reset();
        self.started = false;
    }

    pub fn replay(&mut self) {
        self.stop();
        self.play();
    }

    /// Advance both timelines, restarting pulses that complete.
    pub fn advance(&mut self, dt: Duration) {
        let mut remaining = dt;
        while self.is_running() {
            let next_end = [self.outer.remaining(self.duration), self.inner.remaining(self.duration)]
                .into_iter()
                .flatten()
                .min()
                .unwrap_or(remaining);
            let step = next_end.min(remaining);

            for pulse in [&mut self.outer, &mut self.inner] {
                if pulse.running {
                    pulse.elapsed += step;
                    pulse.sample(self.duration, self.max_alpha, self.max_radius);
                }
            }
            remaining -= step;

            if self.outer.running && self.outer.elapsed >= self.outer.end(self.duration) {
                self.repeat_index += 1;
                if self.repeat_index < self.repeat_count {
                    self.outer.start(Duration::ZERO);
                } else {
                    self.outer.running = false;
                }
            }
            if self.inner.running && self.inner.elapsed >= self.inner.end(self.duration) {
                if self.repeat_index < self.repeat_count {
                    self.inner.start(Duration::ZERO);
                } else {
                    self.inner.running = false;
                }
            }

            if remaining.is_zero() {
                break;
            }
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        let center = self.bounds.to_kurbo().center();

        let mut outer = self.outer_paint;
        outer.set_alpha(self.outer.alpha.round() as u8);
        canvas.draw_circle(Circle::new(center, self.outer.radius), &outer);

        let mut inner = self.inner_paint;
        inner.set_alpha(self.inner.alpha.round() as u8);
        canvas.draw_circle(Circle::new(center, self.inner.radius), &inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use kurbo::Point;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn overlay(repeat_count: u32) -> TooltipOverlayDrawable {
        let style = OverlayStyle { alpha: 1.0, repeat_count, ..OverlayStyle::default() };
        let mut d = TooltipOverlayDrawable::new(&style);
        d.set_bounds(Rect::new(0, 0, 96, 96));
        d
    }

    #[test]
    fn test_outer_timeline() {
        let mut d = overlay(1);
        d.play();

        d.advance(ms(90));
        assert!((d.outer_radius() - 48.0 * 90.0 / 400.0).abs() < 0.1);
        // inner has not started yet
        assert_eq!(d.inner_radius(), 0.0);
        assert_eq!(d.inner_alpha(), 0.0);

        d.advance(ms(30));
        // fade-in is complete at 30%
        assert!((d.outer_alpha() - 255.0).abs() < 0.5);

        d.advance(ms(80));
        // holding at max between 30% and 55%
        assert!((d.outer_alpha() - 255.0).abs() < 0.5);
        assert!(d.inner_radius() > 0.0);

        d.advance(ms(200));
        assert!((d.outer_radius() - 48.0).abs() < 0.01);
        assert!(d.outer_alpha() < 0.5);
    }

    #[test]
    fn test_single_repeat_finishes() {
        let mut d = overlay(1);
        d.play();
        d.advance(ms(450));
        assert!(d.is_running());
        d.advance(ms(60));
        assert!(!d.is_running());
        assert_eq!(d.repeat_index(), 1);
    }

    #[test]
    fn test_repeats_drop_inner_delay() {
        let mut d = overlay(2);
        d.play();

        d.advance(ms(400));
        // outer restarted, inner still on its first run
        assert_eq!(d.repeat_index(), 1);
        assert!(d.outer.running);
        assert_eq!(d.outer.elapsed, Duration::ZERO);

        d.advance(ms(110));
        // inner's first run ended at 500ms and restarted without delay
        assert!(d.inner.running);
        assert_eq!(d.inner.delay, Duration::ZERO);

        d.advance(ms(300));
        assert_eq!(d.repeat_index(), 2);
        assert!(!d.outer.running);
        assert!(d.inner.running);

        d.advance(ms(100));
        assert!(!d.is_running());
    }

    #[test]
    fn test_stop_resets_synchronously() {
        let mut d = overlay(3);
        d.play();
        d.advance(ms(200));
        assert!(d.outer_radius() > 0.0);

        d.stop();
        assert!(!d.is_running());
        assert_eq!(d.outer_radius(), 0.0);
        assert_eq!(d.outer_alpha(), 0.0);
        assert_eq!(d.inner_radius(), 0.0);
        assert_eq!(d.inner_alpha(), 0.0);
    }

    #[test]
    fn test_set_visible() {
        let mut d = overlay(1);
        assert!(d.set_visible(true, false));
        assert!(d.is_running());

        d.advance(ms(100));
        // already started, no restart requested
        assert!(!d.set_visible(true, false));
        assert_eq!(d.outer.elapsed, ms(100));

        d.set_visible(true, true);
        assert_eq!(d.outer.elapsed, Duration::ZERO);

        assert!(d.set_visible(false, false));
        assert!(!d.is_running());
    }

    #[test]
    fn test_zero_duration_never_runs() {
        let style = OverlayStyle { duration: Duration::ZERO, ..OverlayStyle::default() };
        let mut d = TooltipOverlayDrawable::new(&style);
        d.play();
        assert!(!d.is_running());
        d.advance(ms(16));
    }

    #[test]
    fn test_draw_centered_circles() {
        let mut d = overlay(1);
        d.set_bounds(Rect::new(10, 10, 106, 106));
        d.play();
        d.advance(ms(200));

        let mut canvas = RecordingCanvas::new();
        d.draw(&mut canvas);
        assert_eq!(canvas.ops().len(), 2);
        match &canvas.ops()[0] {
            DrawOp::Circle { circle, .. } => {
                assert_eq!(circle.center, Point::new(58.0, 58.0));
                assert!((circle.radius - 24.0).abs() < 0.1);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }
}
