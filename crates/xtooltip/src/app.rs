//! Simulated host and the demo scenarios it runs.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use xtooltip_core::{Animation, ClosePolicy, Gravity, Point, Rect, Size, TooltipError};
use xtooltip_ui::{
    AnchorView, ContentView, KeyEvent, PopupLayoutParams, RecordingCanvas, Tooltip, TooltipBuilder,
    TooltipHost, TooltipStyle,
};

const FRAME: Duration = Duration::from_millis(16);
const SCREEN: Rect = Rect::new(0, 0, 1080, 1920);
/// Rough glyph metrics for the simulated text measurement.
const CHAR_WIDTH: i32 = 14;
const LINE_HEIGHT: i32 = 36;

#[derive(Debug, Default)]
struct Surface {
    attached: Vec<String>,
}

/// Window surface shared between the demo and the tooltips it builds.
#[derive(Debug, Clone, Default)]
struct DemoHost {
    surface: Rc<RefCell<Surface>>,
}

impl DemoHost {
    fn is_attached(&self, title: &str) -> bool {
        self.surface.borrow().attached.iter().any(|t| t == title)
    }
}

impl TooltipHost for DemoHost {
    fn visible_display_frame(&self) -> Rect {
        SCREEN
    }

    fn density(&self) -> f64 {
        2.0
    }

    fn measure_content(&mut self, content: &ContentView) -> Size {
        let chars = content.text.chars().count() as i32;
        let max_text = content.max_width.unwrap_or(SCREEN.width()) - content.padding * 2;
        let line_width = (chars * CHAR_WIDTH).max(CHAR_WIDTH);
        let lines = (line_width + max_text - 1) / max_text.max(1);
        Size::new(line_width.min(max_text) + content.padding * 2, lines * LINE_HEIGHT + content.padding * 2)
    }

    fn add_popup(&mut self, params: &PopupLayoutParams) -> Result<(), TooltipError> {
        tracing::debug!(title = %params.title, flags = ?params.flags, "Window add");
        self.surface.borrow_mut().attached.push(params.title.clone());
        Ok(())
    }

    fn remove_popup(&mut self, params: &PopupLayoutParams) {
        tracing::debug!(title = %params.title, "Window remove");
        self.surface.borrow_mut().attached.retain(|t| *t != params.title);
    }
}

/// A button that can be scrolled around the screen.
#[derive(Debug)]
struct DemoAnchor {
    location: Cell<Point>,
    size: Size,
}

impl DemoAnchor {
    fn new(x: i32, y: i32, width: i32, height: i32) -> Rc<Self> {
        Rc::new(Self { location: Cell::new(Point::new(x, y)), size: Size::new(width, height) })
    }

    fn scroll_by(&self, dx: i32, dy: i32) {
        self.location.set(self.location.get().offset(dx, dy));
    }
}

impl AnchorView for DemoAnchor {
    fn location_on_screen(&self) -> Point {
        self.location.get()
    }

    fn size(&self) -> Size {
        self.size
    }
}

/// Runs the demo scenarios against the simulated host.
pub struct DemoApp {
    style: TooltipStyle,
    host: DemoHost,
}

impl DemoApp {
    pub fn new(style: TooltipStyle) -> Self {
        Self { style, host: DemoHost::default() }
    }

    pub fn run(&mut self) -> Result<(), TooltipError> {
        self.follow_scrolling_anchor()?;
        self.fallback_near_edge()?;
        self.dismiss_on_touch()?;
        self.dismiss_on_back()?;
        Ok(())
    }

    fn builder(&self) -> TooltipBuilder {
        TooltipBuilder::new().style(self.style.clone())
    }

    /// Show the tooltip and attach it the way a window manager would.
    fn show(&self, tooltip: &mut Tooltip, gravity: Gravity) {
        tooltip.do_on_shown(|t| tracing::info!(tooltip = %t.id(), gravity = ?t.gravity(), "Shown"));
        tooltip.do_on_hidden(|t| tracing::info!(tooltip = %t.id(), "Hidden"));
        tooltip.do_on_failure(|t| tracing::warn!(tooltip = %t.id(), "No room for tooltip"));

        tooltip.show(gravity, true);
        if self.host.is_attached(&format!("ToolTip:{}", tooltip.id().simple())) {
            tooltip.on_content_attached();
        }
    }

    /// Advance frames until the tooltip is gone or `limit` elapses.
    fn run_frames(&self, tooltip: &mut Tooltip, limit: Duration, mut on_frame: impl FnMut(&mut Tooltip, u32)) {
        let mut canvas = RecordingCanvas::new();
        let mut elapsed = Duration::ZERO;
        let mut frame = 0;

        while tooltip.is_showing() && elapsed < limit {
            on_frame(tooltip, frame);
            tooltip.on_pre_draw();
            tooltip.advance(FRAME);
            tooltip.draw(&mut canvas);

            let ops = canvas.take_ops();
            tracing::trace!(frame, ops = ops.len(), alpha = tooltip.alpha(), "Frame");

            elapsed += FRAME;
            frame += 1;
        }

        tracing::debug!(frames = frame, ?elapsed, next = ?tooltip.next_deadline(), "Frame loop done");
    }

    fn follow_scrolling_anchor(&mut self) -> Result<(), TooltipError> {
        tracing::info!("Scenario: follow a scrolling anchor");

        let button = DemoAnchor::new(450, 900, 180, 96);
        let mut tooltip = self
            .builder()
            .anchor_view(&button, 0, 0, true)
            .text("Tap here to start a new query")
            .floating_animation(Some(Animation::DEFAULT))
            .show_duration(Duration::from_secs(2))
            .build(self.host.clone())?;

        self.show(&mut tooltip, Gravity::Top);
        self.run_frames(&mut tooltip, Duration::from_secs(3), |_, frame| {
            if frame < 30 {
                button.scroll_by(0, -4);
            }
        });

        tracing::info!(offset_y = tooltip.offset_y(), "Follow scenario done");
        Ok(())
    }

    fn fallback_near_edge(&mut self) -> Result<(), TooltipError> {
        tracing::info!("Scenario: fall back when the requested side has no room");

        let mut tooltip = self
            .builder()
            .anchor_point(1060, 400)
            .text("Pinned to the right edge")
            .floating_animation(Some(Animation::SLOW))
            .show_duration(Duration::from_millis(500))
            .build(self.host.clone())?;

        self.show(&mut tooltip, Gravity::Right);
        tracing::info!(gravity = ?tooltip.gravity(), "Fallback resolved");
        self.run_frames(&mut tooltip, Duration::from_secs(1), |_, _| {});
        Ok(())
    }

    fn dismiss_on_touch(&mut self) -> Result<(), TooltipError> {
        tracing::info!("Scenario: dismiss on outside touch");

        let button = DemoAnchor::new(100, 1500, 120, 120);
        let mut tooltip = self
            .builder()
            .anchor_view(&button, 0, 0, false)
            .text("Touch anywhere outside to close")
            .close_policy(ClosePolicy::TOUCH_OUTSIDE_CONSUME)
            .activate_delay(Duration::from_millis(300))
            .build(self.host.clone())?;

        self.show(&mut tooltip, Gravity::Bottom);
        self.run_frames(&mut tooltip, Duration::from_secs(2), |tooltip, frame| {
            if frame % 10 == 0 {
                let consumed = tooltip.on_touch(900.0, 200.0);
                tracing::debug!(frame, consumed, "Touch outside");
            }
        });
        Ok(())
    }

    fn dismiss_on_back(&mut self) -> Result<(), TooltipError> {
        tracing::info!("Scenario: dismiss with the back key");

        let mut tooltip = self
            .builder()
            .anchor_point(540, 960)
            .text("Press back to close")
            .close_policy(ClosePolicy::TOUCH_NONE)
            .build(self.host.clone())?;

        self.show(&mut tooltip, Gravity::Center);
        self.run_frames(&mut tooltip, Duration::from_secs(1), |tooltip, frame| {
            if frame == 12 {
                tooltip.on_key(KeyEvent::back_down());
                tooltip.on_key(KeyEvent::back_up());
            }
        });
        Ok(())
    }
}
