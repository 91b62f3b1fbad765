//! Traits and values exchanged with the host toolkit.
//!
//! The host owns windows, layout, fonts and the event loop. The tooltip only
//! asks it to measure and attach one popup, and receives input back through
//! the `on_*` methods on [`Tooltip`](crate::Tooltip).

use bitflags::bitflags;
use uuid::Uuid;
use xtooltip_core::{ClosePolicy, Point, Rect, Size, TooltipError};

use crate::style::Color;

/// A view the tooltip points at.
///
/// Held weakly: dropping the last strong reference tears the tooltip down.
pub trait AnchorView {
    /// Top-left corner in screen coordinates.
    fn location_on_screen(&self) -> Point;

    /// Laid-out size in pixels.
    fn size(&self) -> Size;

    fn is_attached_to_window(&self) -> bool {
        true
    }
}

/// Window surface and measurement services of the host toolkit.
pub trait TooltipHost {
    /// Visible frame of the parent window, in screen coordinates.
    fn visible_display_frame(&self) -> Rect;

    /// Pixels per dp.
    fn density(&self) -> f64 {
        1.0
    }

    /// Measure the text view, its padding included.
    fn measure_content(&mut self, content: &ContentView) -> Size;

    /// Attach the full-screen popup window.
    fn add_popup(&mut self, params: &PopupLayoutParams) -> Result<(), TooltipError>;

    /// Detach the popup added with the same params.
    fn remove_popup(&mut self, params: &PopupLayoutParams);
}

/// Which layout the host inflates for the bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLayout {
    /// Single text view with the bubble drawable as background
    Default,
    /// Host layout resource with the text element inside it
    Custom { layout_id: u32, text_id: u32 },
}

/// What the host renders inside the bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentView {
    pub text: String,
    pub text_color: Color,
    pub typeface: Option<String>,
    pub text_style: Option<String>,
    pub max_width: Option<i32>,
    pub padding: i32,
    pub layout: ContentLayout,
}

bitflags! {
    /// Window flags of the popup, with the platform's window flag values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const NOT_FOCUSABLE = 0x0000_0008;
        const NOT_TOUCHABLE = 0x0000_0010;
        const NOT_TOUCH_MODAL = 0x0000_0020;
        const LAYOUT_IN_SCREEN = 0x0000_0100;
        const LAYOUT_NO_LIMITS = 0x0000_0200;
        const LAYOUT_INSET_DECOR = 0x0001_0000;
        const ALT_FOCUSABLE_IM = 0x0002_0000;
        const WATCH_OUTSIDE_TOUCH = 0x0004_0000;
    }
}

/// Layout params for the popup window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupLayoutParams {
    pub title: String,
    /// The popup spans the whole screen so outside touches reach it
    pub full_screen: bool,
    pub translucent: bool,
    pub flags: WindowFlags,
}

impl PopupLayoutParams {
    pub fn for_policy(policy: ClosePolicy, id: Uuid) -> Self {
        let mut flags = WindowFlags::NOT_TOUCH_MODAL
            | WindowFlags::ALT_FOCUSABLE_IM
            | WindowFlags::WATCH_OUTSIDE_TOUCH
            | WindowFlags::LAYOUT_NO_LIMITS
            | WindowFlags::LAYOUT_IN_SCREEN
            | WindowFlags::LAYOUT_INSET_DECOR;
        flags.set(WindowFlags::NOT_FOCUSABLE, !(policy.inside() || policy.outside()));
        flags.set(WindowFlags::NOT_TOUCHABLE, !policy.consume());

        Self { title: format!("ToolTip:{}", id.simple()), full_screen: true, translucent: true, flags }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Back,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

/// Key event delivered to the popup window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub action: KeyAction,
    pub repeat_count: u32,
    pub canceled: bool,
}

impl KeyEvent {
    pub fn new(code: KeyCode, action: KeyAction) -> Self {
        Self { code, action, repeat_count: 0, canceled: false }
    }

    pub fn back_down() -> Self {
        Self::new(KeyCode::Back, KeyAction::Down)
    }

    pub fn back_up() -> Self {
        Self::new(KeyCode::Back, KeyAction::Up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_params_flags() {
        let id = Uuid::new_v4();

        let params = PopupLayoutParams::for_policy(ClosePolicy::TOUCH_NONE, id);
        assert!(params.flags.contains(WindowFlags::NOT_FOCUSABLE | WindowFlags::NOT_TOUCHABLE));
        assert!(params.flags.contains(WindowFlags::WATCH_OUTSIDE_TOUCH));
        assert!(params.full_screen);
        assert_eq!(params.title, format!("ToolTip:{}", id.simple()));

        let params = PopupLayoutParams::for_policy(ClosePolicy::TOUCH_OUTSIDE_NO_CONSUME, id);
        assert!(!params.flags.contains(WindowFlags::NOT_FOCUSABLE));
        assert!(params.flags.contains(WindowFlags::NOT_TOUCHABLE));

        let params = PopupLayoutParams::for_policy(ClosePolicy::TOUCH_INSIDE_CONSUME, id);
        assert!(!params.flags.intersects(WindowFlags::NOT_FOCUSABLE | WindowFlags::NOT_TOUCHABLE));
        assert_eq!(params.flags.bits(), 0x0007_0320);
    }

    #[test]
    fn test_key_event_helpers() {
        let down = KeyEvent::back_down();
        assert_eq!(down.code, KeyCode::Back);
        assert_eq!(down.action, KeyAction::Down);
        assert_eq!(down.repeat_count, 0);
        assert!(!KeyEvent::back_up().canceled);
    }
}
