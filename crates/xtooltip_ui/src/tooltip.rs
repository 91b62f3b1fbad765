//! Tooltip lifecycle: placement, attach, fade, timers, input and teardown.
//!
//! ```text
//! Hidden -> Showing (attached, fading in) -> Visible -> Hiding (fading out) -> Hidden
//! ```
//!
//! Everything runs on the host's event loop. Time only moves when the host
//! calls [`Tooltip::advance`]; [`Tooltip::next_deadline`] tells it how long it
//! may sleep.

use std::fmt;
use std::rc::Weak;
use std::time::Duration;

use kurbo::Vec2;
use uuid::Uuid;
use xtooltip_core::placement::size_tolerance;
use xtooltip_core::{
    find_position, gravity_fallback_order, AnchorGeometry, Animation, ClosePolicy, FloatDirection,
    Gravity, PlacementRequest, Point, Positions, TimerId, Timers, Tween,
};

use crate::canvas::Canvas;
use crate::host::{AnchorView, ContentLayout, ContentView, KeyAction, KeyCode, KeyEvent, PopupLayoutParams, TooltipHost};
use crate::overlay_drawable::TooltipOverlayDrawable;
use crate::popup::{OverlayView, PopupView};
use crate::style::TooltipStyle;
use crate::text_drawable::TooltipTextDrawable;

/// Lifecycle state of a tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TooltipState {
    Hidden,
    /// Attached, fading in
    Showing,
    /// Attached and fully opaque
    Visible,
    /// Fading out, dismissed when the fade ends
    Hiding,
}

/// What the bubble points at.
#[derive(Clone)]
pub(crate) enum Anchor {
    /// A fixed screen point
    Point(Point),
    View {
        view: Weak<dyn AnchorView>,
        offset: Point,
        follow: bool,
    },
}

impl fmt::Debug for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Point(point) => f.debug_tuple("Point").field(point).finish(),
            Anchor::View { view, offset, follow } => f
                .debug_struct("View")
                .field("alive", &(view.strong_count() > 0))
                .field("offset", offset)
                .field("follow", follow)
                .finish(),
        }
    }
}

/// Immutable configuration assembled by [`TooltipBuilder`](crate::TooltipBuilder).
#[derive(Debug, Clone)]
pub(crate) struct TooltipConfig {
    pub anchor: Anchor,
    pub content: ContentView,
    pub style: TooltipStyle,
    pub overlay: bool,
    pub floating_animation: Option<Animation>,
    pub show_duration: Duration,
    pub fade_duration: Duration,
    pub activate_delay: Duration,
    pub show_arrow: bool,
    pub close_policy: ClosePolicy,
}

impl TooltipConfig {
    fn is_custom_view(&self) -> bool {
        matches!(self.content.layout, ContentLayout::Custom { .. })
    }

    fn float_radius(&self) -> i32 {
        self.floating_animation.map_or(0, |animation| animation.radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    AutoHide,
    Activate,
}

#[derive(Debug, Clone, Copy)]
struct Fade {
    tween: Tween,
    elapsed: Duration,
    hiding: bool,
}

impl Fade {
    fn remaining(&self) -> Duration {
        self.tween.duration.saturating_sub(self.elapsed)
    }
}

/// Idle float of the text view inside its content frame.
#[derive(Debug, Clone, Copy)]
struct FloatMotion {
    tween: Tween,
    direction: FloatDirection,
    elapsed: Duration,
    running: bool,
}

impl FloatMotion {
    fn translation(&self) -> Vec2 {
        if !self.running {
            return Vec2::ZERO;
        }
        let value = self.tween.reversing_value_at(self.elapsed);
        match self.direction {
            FloatDirection::Vertical => Vec2::new(0.0, value),
            _ => Vec2::new(value, 0.0),
        }
    }
}

/// Anchor sample taken at `show()` time.
enum AnchorSample {
    Point(Point),
    View { geometry: AnchorGeometry, offset: Point },
    Gone,
}

#[derive(Debug, Clone, Copy)]
enum CallbackSlot {
    Prepare,
    Shown,
    Hidden,
    Failure,
}

type Callback = Box<dyn FnMut(&Tooltip)>;

/// A tooltip instance bound to one host.
pub struct Tooltip {
    id: Uuid,
    config: TooltipConfig,
    host: Box<dyn TooltipHost>,
    state: TooltipState,
    showing: bool,
    activated: bool,
    positions: Option<Positions>,
    popup: Option<PopupView>,
    params: Option<PopupLayoutParams>,
    timers: Timers<TimerKind>,
    hide_timer: Option<TimerId>,
    activate_timer: Option<TimerId>,
    fade: Option<Fade>,
    float_motion: Option<FloatMotion>,
    alpha: f64,
    last_anchor_location: Option<Point>,
    tracking_back: bool,
    on_prepare: Option<Callback>,
    on_shown: Option<Callback>,
    on_hidden: Option<Callback>,
    on_failure: Option<Callback>,
}

impl fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tooltip")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("anchor", &self.config.anchor)
            .field("positions", &self.positions)
            .field("activated", &self.activated)
            .finish_non_exhaustive()
    }
}

impl Tooltip {
    pub(crate) fn new(config: TooltipConfig, host: Box<dyn TooltipHost>) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(tooltip = %id, anchor = ?config.anchor, "Tooltip created");
        Self {
            id,
            config,
            host,
            state: TooltipState::Hidden,
            showing: false,
            activated: false,
            positions: None,
            popup: None,
            params: None,
            timers: Timers::new(),
            hide_timer: None,
            activate_timer: None,
            fade: None,
            float_motion: None,
            alpha: 0.0,
            last_anchor_location: None,
            tracking_back: false,
            on_prepare: None,
            on_shown: None,
            on_hidden: None,
            on_failure: None,
        }
    }

    // ---- accessors ----

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> TooltipState {
        self.state
    }

    /// Attached to the window surface.
    pub fn is_showing(&self) -> bool {
        self.showing
    }

    /// Fully faded in.
    pub fn is_visible(&self) -> bool {
        self.state == TooltipState::Visible
    }

    /// Touch and back-key dismissal are live.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Gravity the last placement settled on.
    pub fn gravity(&self) -> Option<Gravity> {
        self.positions.as_ref().map(|positions| positions.gravity)
    }

    pub fn positions(&self) -> Option<&Positions> {
        self.positions.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.config.content.text
    }

    pub fn close_policy(&self) -> ClosePolicy {
        self.config.close_policy
    }

    pub fn offset_x(&self) -> f64 {
        self.positions.as_ref().map_or(0.0, Positions::offset_x)
    }

    pub fn offset_y(&self) -> f64 {
        self.positions.as_ref().map_or(0.0, Positions::offset_y)
    }

    /// Content alpha, `0.0..=1.0`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The attached popup, for the host's paint pass.
    pub fn popup(&self) -> Option<&PopupView> {
        self.popup.as_ref().filter(|_| self.showing)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending_count()
    }

    /// Time until the next timer or fade completion.
    pub fn next_deadline(&self) -> Option<Duration> {
        let fade = self.fade.as_ref().map(Fade::remaining);
        match (self.timers.next_deadline(), fade) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether something is moving and the host should keep producing frames.
    pub fn is_animating(&self) -> bool {
        let floating = self.float_motion.is_some_and(|motion| motion.running);
        let ripple = self
            .popup
            .as_ref()
            .and_then(PopupView::overlay)
            .is_some_and(|overlay| overlay.drawable.is_running());
        self.fade.is_some() || floating || ripple
    }

    // ---- callbacks ----

    /// Called right before placement runs.
    pub fn do_on_prepare(&mut self, callback: impl FnMut(&Tooltip) + 'static) -> &mut Self {
        self.on_prepare = Some(Box::new(callback));
        self
    }

    /// Called when the fade-in completes.
    pub fn do_on_shown(&mut self, callback: impl FnMut(&Tooltip) + 'static) -> &mut Self {
        self.on_shown = Some(Box::new(callback));
        self
    }

    /// Called after the popup is removed.
    pub fn do_on_hidden(&mut self, callback: impl FnMut(&Tooltip) + 'static) -> &mut Self {
        self.on_hidden = Some(Box::new(callback));
        self
    }

    /// Called when no gravity fits or the host refuses the popup.
    pub fn do_on_failure(&mut self, callback: impl FnMut(&Tooltip) + 'static) -> &mut Self {
        self.on_failure = Some(Box::new(callback));
        self
    }

    fn slot_mut(&mut self, slot: CallbackSlot) -> &mut Option<Callback> {
        match slot {
            CallbackSlot::Prepare => &mut self.on_prepare,
            CallbackSlot::Shown => &mut self.on_shown,
            CallbackSlot::Hidden => &mut self.on_hidden,
            CallbackSlot::Failure => &mut self.on_failure,
        }
    }

    fn fire(&mut self, slot: CallbackSlot) {
        if let Some(mut callback) = self.slot_mut(slot).take() {
            callback(&*self);
            *self.slot_mut(slot) = Some(callback);
        }
    }

    // ---- show ----

    /// Place and attach the tooltip, trying `gravity` first.
    ///
    /// Does nothing while already showing or when the anchor view is gone.
    #[tracing::instrument(level = "debug", skip_all, name = "tooltip_show", fields(tooltip = %self.id))]
    pub fn show(&mut self, gravity: Gravity, fit_to_screen: bool) {
        if self.showing {
            tracing::debug!("Already showing");
            return;
        }

        let sample = self.sample_anchor();
        if matches!(sample, AnchorSample::Gone) {
            tracing::debug!("Anchor view is gone, not showing");
            return;
        }

        self.ensure_popup();
        let order = gravity_fallback_order(gravity);
        self.fire(CallbackSlot::Prepare);

        let Some(request) = self.placement_request(&sample, fit_to_screen) else {
            return;
        };

        match find_position(&request, &order) {
            Some(positions) => {
                let anchor_location = match sample {
                    AnchorSample::View { geometry, .. } => Some(geometry.location),
                    _ => None,
                };
                self.attach(positions, anchor_location);
            }
            None => {
                tracing::info!(requested = %gravity, ?order, "No gravity fits the display frame");
                self.fire(CallbackSlot::Failure);
            }
        }
    }

    fn sample_anchor(&self) -> AnchorSample {
        match &self.config.anchor {
            Anchor::Point(point) => AnchorSample::Point(*point),
            Anchor::View { view, offset, .. } => match view.upgrade() {
                Some(view) => AnchorSample::View {
                    geometry: AnchorGeometry::new(view.location_on_screen(), view.size()),
                    offset: *offset,
                },
                None => AnchorSample::Gone,
            },
        }
    }

    fn ensure_popup(&mut self) {
        if self.popup.is_some() {
            return;
        }

        let text_size = self.host.measure_content(&self.config.content);
        let overlay = self
            .config
            .overlay
            .then(|| OverlayView::new(TooltipOverlayDrawable::new(&self.config.style.overlay)));
        let drawable = (!self.config.is_custom_view()).then(|| TooltipTextDrawable::new(&self.config.style));

        tracing::debug!(?text_size, overlay = overlay.is_some(), "Popup built");
        self.popup = Some(PopupView::new(
            self.config.content.clone(),
            text_size,
            self.config.float_radius(),
            overlay,
            drawable,
        ));
    }

    fn placement_request(&self, sample: &AnchorSample, fit_to_screen: bool) -> Option<PlacementRequest> {
        let popup = self.popup.as_ref()?;
        let (anchor, offset) = match sample {
            AnchorSample::Point(point) => (None, *point),
            AnchorSample::View { geometry, offset } => (Some(*geometry), *offset),
            AnchorSample::Gone => return None,
        };

        Some(PlacementRequest {
            anchor,
            offset,
            content_size: popup.content_size(),
            padding: self.config.style.padding,
            float_radius: self.config.float_radius(),
            overlay_size: popup.overlay().map(|overlay| overlay.size),
            display_frame: self.host.visible_display_frame(),
            tolerance: size_tolerance(self.host.density()),
            fit_to_screen,
        })
    }

    fn attach(&mut self, positions: Positions, anchor_location: Option<Point>) {
        let gravity = positions.gravity;
        let show_arrow = self.config.show_arrow && !self.config.is_custom_view();
        let padding = self.config.style.padding;

        self.float_motion = self.config.floating_animation.filter(|a| a.radius > 0).map(|animation| {
            let radius = animation.radius as f64;
            FloatMotion {
                tween: Tween::new(-radius, radius, animation.duration),
                direction: animation.direction.resolve(gravity),
                elapsed: Duration::ZERO,
                running: false,
            }
        });

        if let Some(popup) = self.popup.as_mut() {
            if let Some(drawable) = popup.drawable_mut() {
                if show_arrow {
                    drawable.set_anchor(gravity, padding / 2, Some(positions.arrow_point));
                } else {
                    drawable.set_anchor(gravity, 0, None);
                }
            }

            if gravity == Gravity::Center {
                popup.remove_overlay();
            } else if let Some(overlay) = popup.overlay_mut() {
                overlay.center_on(positions.center());
            }

            popup.set_content_translation(positions.content_origin());
            popup.set_text_translation(Vec2::ZERO);
            popup.set_alpha(0.0);
        }

        let params = PopupLayoutParams::for_policy(self.config.close_policy, self.id);
        if let Err(e) = self.host.add_popup(&params) {
            tracing::warn!(error = %e, "Failed to add tooltip popup");
            self.float_motion = None;
            self.fire(CallbackSlot::Failure);
            return;
        }

        tracing::info!(
            %gravity,
            content = ?positions.content_point,
            arrow = ?positions.arrow_point,
            "Tooltip shown"
        );

        self.params = Some(params);
        self.positions = Some(positions);
        self.last_anchor_location = anchor_location;
        self.showing = true;
        self.state = TooltipState::Showing;
        self.fade_in();
    }

    fn fade_in(&mut self) {
        self.set_alpha(0.0);
        if self.config.fade_duration.is_zero() {
            self.finish_fade_in();
        } else {
            self.fade = Some(Fade {
                tween: Tween::new(0.0, 1.0, self.config.fade_duration),
                elapsed: Duration::ZERO,
                hiding: false,
            });
        }
    }

    fn finish_fade_in(&mut self) {
        self.fade = None;
        self.set_alpha(1.0);
        self.state = TooltipState::Visible;
        tracing::debug!(tooltip = %self.id, "Tooltip visible");
        self.fire(CallbackSlot::Shown);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
        if let Some(popup) = self.popup.as_mut() {
            popup.set_alpha(alpha);
        }
    }

    // ---- window attach ----

    /// The host attached the popup window.
    ///
    /// Starts the float and the ripple and (re)schedules the auto-hide and
    /// activation timers.
    pub fn on_content_attached(&mut self) {
        if !self.showing {
            return;
        }

        if let Some(motion) = self.float_motion.as_mut() {
            motion.running = true;
            motion.elapsed = Duration::ZERO;
        }
        self.apply_float();

        if let Some(id) = self.hide_timer.take() {
            self.timers.cancel(id);
        }
        if !self.config.show_duration.is_zero() {
            self.hide_timer = Some(self.timers.schedule(TimerKind::AutoHide, self.config.show_duration));
        }

        if let Some(id) = self.activate_timer.take() {
            self.timers.cancel(id);
        }
        if self.config.activate_delay.is_zero() {
            self.activated = true;
        } else {
            self.activated = false;
            self.activate_timer = Some(self.timers.schedule(TimerKind::Activate, self.config.activate_delay));
        }

        if let Some(overlay) = self.popup.as_mut().and_then(PopupView::overlay_mut) {
            overlay.drawable.set_visible(true, false);
        }

        tracing::debug!(tooltip = %self.id, show_duration = ?self.config.show_duration, "Content attached");
    }

    /// The host detached the popup window.
    pub fn on_content_detached(&mut self) {
        self.cancel_timers();
        self.activated = false;
        if let Some(motion) = self.float_motion.as_mut() {
            motion.running = false;
        }
        self.apply_float();
        if let Some(overlay) = self.popup.as_mut().and_then(PopupView::overlay_mut) {
            overlay.drawable.set_visible(false, false);
        }
        tracing::debug!(tooltip = %self.id, "Content detached");
    }

    fn cancel_timers(&mut self) {
        self.timers.cancel_all();
        self.hide_timer = None;
        self.activate_timer = None;
    }

    // ---- clock ----

    /// Advance the tooltip clock by `dt`, firing timers and finishing fades
    /// at their exact deadlines.
    pub fn advance(&mut self, dt: Duration) {
        let mut remaining = dt;
        loop {
            let step = self.next_deadline().map_or(remaining, |deadline| deadline.min(remaining));

            self.step_animations(step);
            let fired = self.timers.advance(step);
            remaining -= step;

            self.settle_fade();
            for (id, kind) in fired {
                self.on_timer(id, kind);
            }

            if remaining.is_zero() {
                break;
            }
        }
    }

    fn step_animations(&mut self, dt: Duration) {
        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += dt;
            let alpha = fade.tween.value_at(fade.elapsed);
            self.set_alpha(alpha);
        }

        if let Some(motion) = self.float_motion.as_mut() {
            if motion.running {
                motion.elapsed += dt;
            }
        }
        self.apply_float();

        if let Some(popup) = self.popup.as_mut() {
            popup.advance_overlay(dt);
        }
    }

    fn apply_float(&mut self) {
        let translation = self.float_motion.map_or(Vec2::ZERO, |motion| motion.translation());
        if let Some(popup) = self.popup.as_mut() {
            popup.set_text_translation(translation);
        }
    }

    fn settle_fade(&mut self) {
        let Some(fade) = self.fade else {
            return;
        };
        if !fade.tween.is_finished(fade.elapsed) {
            return;
        }

        if fade.hiding {
            self.fade = None;
            self.set_alpha(0.0);
            self.dismiss();
        } else {
            self.finish_fade_in();
        }
    }

    fn on_timer(&mut self, id: TimerId, kind: TimerKind) {
        match kind {
            TimerKind::AutoHide if self.hide_timer == Some(id) => {
                self.hide_timer = None;
                tracing::debug!(tooltip = %self.id, "Auto-hide timer fired");
                self.hide();
            }
            TimerKind::Activate if self.activate_timer == Some(id) => {
                self.activate_timer = None;
                self.activated = true;
                tracing::trace!(tooltip = %self.id, "Tooltip activated");
            }
            _ => tracing::trace!(?kind, "Ignoring stale timer"),
        }
    }

    // ---- hide / dismiss ----

    /// Fade out, then dismiss. Does nothing unless showing and not already hiding.
    pub fn hide(&mut self) {
        if !self.showing || self.state == TooltipState::Hiding {
            return;
        }

        tracing::debug!(tooltip = %self.id, "Hiding tooltip");
        self.cancel_timers();
        self.state = TooltipState::Hiding;

        if self.config.fade_duration.is_zero() {
            self.dismiss();
            return;
        }

        self.fade = Some(Fade {
            tween: Tween::new(self.alpha, 0.0, self.config.fade_duration),
            elapsed: Duration::ZERO,
            hiding: true,
        });
    }

    /// Remove the popup right away. Safe to call from any state, any number of times.
    #[tracing::instrument(level = "debug", skip_all, name = "tooltip_dismiss", fields(tooltip = %self.id))]
    pub fn dismiss(&mut self) {
        if !self.showing {
            return;
        }

        self.cancel_timers();
        self.fade = None;
        self.float_motion = None;
        self.tracking_back = false;
        self.activated = false;

        if let Some(params) = self.params.take() {
            self.host.remove_popup(&params);
        }

        self.showing = false;
        self.state = TooltipState::Hidden;
        self.positions = None;
        self.popup = None;
        self.last_anchor_location = None;
        self.alpha = 0.0;

        tracing::info!("Tooltip dismissed");
        self.fire(CallbackSlot::Hidden);
    }

    // ---- input ----

    /// Touch anywhere on the popup window. Returns whether it was consumed.
    pub fn on_touch(&mut self, x: f64, y: f64) -> bool {
        if !self.showing || !self.is_visible() || !self.activated {
            return false;
        }

        let policy = self.config.close_policy;
        let inside = self.popup.as_ref().is_some_and(|popup| popup.text_rect().contains(kurbo::Point::new(x, y)));
        tracing::trace!(x, y, inside, %policy, "Touch");

        if policy.should_hide(inside) {
            self.hide();
        }
        policy.consume()
    }

    /// Key event on the popup window. Back press-then-release hides.
    pub fn on_key(&mut self, event: KeyEvent) -> bool {
        if !self.is_visible() || !self.activated || event.code != KeyCode::Back {
            return false;
        }

        match event.action {
            KeyAction::Down if event.repeat_count == 0 => {
                self.tracking_back = true;
                true
            }
            KeyAction::Up => {
                let tracking = std::mem::take(&mut self.tracking_back);
                if tracking && !event.canceled {
                    self.hide();
                    true
                } else {
                    false
                }
            }
            KeyAction::Down => false,
        }
    }

    // ---- anchor ----

    /// Pre-draw pass of the anchor's window: follow the anchor if it moved.
    pub fn on_pre_draw(&mut self) {
        if !self.showing {
            return;
        }

        let (view, follow) = match &self.config.anchor {
            Anchor::View { view, follow, .. } => (view.upgrade(), *follow),
            Anchor::Point(_) => return,
        };

        let Some(view) = view else {
            tracing::debug!(tooltip = %self.id, "Anchor view dropped");
            self.dismiss();
            return;
        };
        if !view.is_attached_to_window() {
            self.dismiss();
            return;
        }
        if !follow {
            return;
        }

        let location = view.location_on_screen();
        if let Some(last) = self.last_anchor_location {
            if last != location {
                self.offset_by((location.x - last.x) as f64, (location.y - last.y) as f64);
            }
        }
        self.last_anchor_location = Some(location);
    }

    /// The anchor view left its window.
    pub fn on_anchor_detached(&mut self) {
        tracing::debug!(tooltip = %self.id, "Anchor detached");
        self.dismiss();
    }

    /// Move the bubble and the ripple by a delta.
    pub fn offset_by(&mut self, dx: f64, dy: f64) {
        let Some(positions) = self.positions.as_mut() else {
            return;
        };
        positions.offset_by(dx, dy);

        let content = positions.content_origin();
        let center = positions.center();
        tracing::trace!(dx, dy, ?content, "Offset tooltip");

        if let Some(popup) = self.popup.as_mut() {
            popup.set_content_translation(content);
            if let Some(overlay) = popup.overlay_mut() {
                overlay.center_on(center);
            }
        }
    }

    /// Replace the text. The placement is kept.
    pub fn update_text(&mut self, text: impl Into<String>) {
        self.config.content.text = text.into();
        if let Some(popup) = self.popup.as_mut() {
            let size = self.host.measure_content(&self.config.content);
            popup.set_text(self.config.content.text.clone(), size);
        }
    }

    /// Paint the popup, if attached.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(popup) = self.popup() {
            popup.draw(canvas);
        }
    }
}

impl Drop for Tooltip {
    fn drop(&mut self) {
        if let Some(params) = self.params.take() {
            self.host.remove_popup(&params);
        }
    }
}
