//! Fluent configuration for [`Tooltip`].

use std::rc::{Rc, Weak};
use std::time::Duration;

use xtooltip_core::{Animation, ClosePolicy, Point, TooltipError};

use crate::host::{AnchorView, ContentLayout, ContentView, TooltipHost};
use crate::layout::defaults;
use crate::style::TooltipStyle;
use crate::tooltip::{Anchor, Tooltip, TooltipConfig};

/// Builder for a [`Tooltip`]. Every setting is fixed once built.
#[derive(Debug, Clone)]
pub struct TooltipBuilder {
    anchor: Option<Anchor>,
    text: String,
    max_width: Option<i32>,
    typeface: Option<String>,
    style: TooltipStyle,
    overlay: bool,
    floating_animation: Option<Animation>,
    show_duration: Duration,
    fade_duration: Duration,
    activate_delay: Duration,
    show_arrow: bool,
    close_policy: ClosePolicy,
    custom_view: Option<(u32, u32)>,
}

impl TooltipBuilder {
    pub fn new() -> Self {
        Self {
            anchor: None,
            text: String::new(),
            max_width: None,
            typeface: None,
            style: TooltipStyle::default(),
            overlay: true,
            floating_animation: None,
            show_duration: Duration::ZERO,
            fade_duration: defaults::FADE_DURATION,
            activate_delay: Duration::ZERO,
            show_arrow: true,
            close_policy: ClosePolicy::default(),
            custom_view: None,
        }
    }

    /// Point the tooltip at a fixed screen point.
    pub fn anchor_point(mut self, x: i32, y: i32) -> Self {
        self.anchor = Some(Anchor::Point(Point::new(x, y)));
        self
    }

    /// Point the tooltip at a view, offset by `(x_offset, y_offset)`.
    ///
    /// Only a weak reference is kept. With `follow` the bubble tracks the
    /// view as it moves.
    pub fn anchor_view<A: AnchorView + 'static>(
        mut self,
        view: &Rc<A>,
        x_offset: i32,
        y_offset: i32,
        follow: bool,
    ) -> Self {
        let view: Weak<A> = Rc::downgrade(view);
        let view: Weak<dyn AnchorView> = view;
        self.anchor = Some(Anchor::View { view, offset: Point::new(x_offset, y_offset), follow });
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn max_width(mut self, max_width: i32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Font family name resolved by the host.
    pub fn typeface(mut self, typeface: impl Into<String>) -> Self {
        self.typeface = Some(typeface.into());
        self
    }

    pub fn style(mut self, style: TooltipStyle) -> Self {
        self.style = style;
        self
    }

    /// Show the ripple behind the anchor.
    pub fn overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn floating_animation(mut self, animation: Option<Animation>) -> Self {
        self.floating_animation = animation;
        self
    }

    /// Auto-hide after this long. Zero keeps the tooltip until dismissed.
    pub fn show_duration(mut self, duration: Duration) -> Self {
        self.show_duration = duration;
        self
    }

    pub fn fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    /// Ignore touch and back key for this long after attach.
    pub fn activate_delay(mut self, delay: Duration) -> Self {
        self.activate_delay = delay;
        self
    }

    pub fn arrow(mut self, show: bool) -> Self {
        self.show_arrow = show;
        self
    }

    pub fn close_policy(mut self, policy: ClosePolicy) -> Self {
        self.close_policy = policy;
        self
    }

    /// Use a host layout instead of the default bubble. Disables the arrow
    /// and the bubble background.
    pub fn custom_view(mut self, layout_id: u32, text_id: u32) -> Self {
        self.custom_view = Some((layout_id, text_id));
        self
    }

    pub fn build(self, host: impl TooltipHost + 'static) -> Result<Tooltip, TooltipError> {
        let anchor = self
            .anchor
            .ok_or_else(|| TooltipError::config("Tooltip needs an anchor view or an anchor point"))?;

        let layout = match self.custom_view {
            Some((layout_id, text_id)) => ContentLayout::Custom { layout_id, text_id },
            None => ContentLayout::Default,
        };

        let content = ContentView {
            text: self.text,
            text_color: self.style.text_color,
            typeface: self.typeface.or_else(|| self.style.font.clone()),
            text_style: self.style.text_style.clone(),
            max_width: self.max_width,
            padding: self.style.padding,
            layout,
        };

        let config = TooltipConfig {
            anchor,
            content,
            style: self.style,
            overlay: self.overlay,
            floating_animation: self.floating_animation,
            show_duration: self.show_duration,
            fade_duration: self.fade_duration,
            activate_delay: self.activate_delay,
            show_arrow: self.show_arrow && self.custom_view.is_none(),
            close_policy: self.close_policy,
        };

        Ok(Tooltip::new(config, Box::new(host)))
    }
}

impl Default for TooltipBuilder {
    fn default() -> Self {
        Self::new()
    }
}
