//! The assembled popup: bubble content, its background and the ripple.
//!
//! All translations are in screen coordinates since the popup window spans
//! the whole screen.

use kurbo::{Point, Rect as RectF, Vec2};
use std::time::Duration;
use xtooltip_core::{Rect, Size};

use crate::canvas::Canvas;
use crate::host::ContentView;
use crate::overlay_drawable::TooltipOverlayDrawable;
use crate::text_drawable::TooltipTextDrawable;

/// The ripple and where it sits.
#[derive(Debug, Clone)]
pub struct OverlayView {
    pub drawable: TooltipOverlayDrawable,
    pub translation: Point,
    pub size: Size,
}

impl OverlayView {
    pub fn new(drawable: TooltipOverlayDrawable) -> Self {
        let extent = drawable.intrinsic_size();
        let mut drawable = drawable;
        drawable.set_bounds(Rect::new(0, 0, extent, extent));
        Self { drawable, translation: Point::ORIGIN, size: Size::new(extent, extent) }
    }

    /// Center the ripple on `point`.
    pub fn center_on(&mut self, point: Point) {
        let half = Vec2::new(self.size.width as f64 / 2.0, self.size.height as f64 / 2.0);
        self.translation = point - half;
    }
}

/// Content frame around the text view; the frame's padding leaves room for
/// the float animation.
#[derive(Debug, Clone)]
pub struct PopupView {
    content: ContentView,
    text_size: Size,
    float_radius: i32,
    content_translation: Point,
    text_translation: Vec2,
    alpha: f64,
    overlay: Option<OverlayView>,
    drawable: Option<TooltipTextDrawable>,
}

impl PopupView {
    pub fn new(
        content: ContentView,
        text_size: Size,
        float_radius: i32,
        overlay: Option<OverlayView>,
        drawable: Option<TooltipTextDrawable>,
    ) -> Self {
        let mut popup = Self {
            content,
            text_size,
            float_radius,
            content_translation: Point::ORIGIN,
            text_translation: Vec2::ZERO,
            alpha: 0.0,
            overlay,
            drawable,
        };
        popup.sync_drawable_bounds();
        popup
    }

    pub fn content(&self) -> &ContentView {
        &self.content
    }

    /// Swap the text and the size the host measured for it.
    pub fn set_text(&mut self, text: String, text_size: Size) {
        self.content.text = text;
        self.text_size = text_size;
        self.sync_drawable_bounds();
    }

    /// Text view size plus the float padding on each side.
    pub fn content_size(&self) -> Size {
        Size::new(
            self.text_size.width + self.float_radius * 2,
            self.text_size.height + self.float_radius * 2,
        )
    }

    pub fn text_size(&self) -> Size {
        self.text_size
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn content_translation(&self) -> Point {
        self.content_translation
    }

    pub fn set_content_translation(&mut self, translation: Point) {
        self.content_translation = translation;
    }

    /// Float offset of the text view inside the content frame.
    pub fn text_translation(&self) -> Vec2 {
        self.text_translation
    }

    pub fn set_text_translation(&mut self, translation: Vec2) {
        self.text_translation = translation;
    }

    pub fn overlay(&self) -> Option<&OverlayView> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut OverlayView> {
        self.overlay.as_mut()
    }

    pub fn remove_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn drawable(&self) -> Option<&TooltipTextDrawable> {
        self.drawable.as_ref()
    }

    pub fn drawable_mut(&mut self) -> Option<&mut TooltipTextDrawable> {
        self.drawable.as_mut()
    }

    /// Screen rect of the content frame.
    pub fn content_rect(&self) -> RectF {
        let size = self.content_size();
        RectF::from_origin_size(self.content_translation, (size.width as f64, size.height as f64))
    }

    /// Screen rect of the text view, float translation included.
    pub fn text_rect(&self) -> RectF {
        let size = self.text_size;
        RectF::from_origin_size(self.text_origin(), (size.width as f64, size.height as f64))
    }

    /// Where the host draws the text view.
    pub fn text_origin(&self) -> Point {
        let r = self.float_radius as f64;
        self.content_translation + Vec2::new(r, r) + self.text_translation
    }

    pub(crate) fn advance_overlay(&mut self, dt: Duration) {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.drawable.advance(dt);
        }
    }

    /// Paint the ripple, then the bubble background at the text origin.
    ///
    /// Both sit in one layer faded by [`alpha`](Self::alpha). The host draws
    /// the text on top using [`text_origin`](Self::text_origin) and the same
    /// alpha.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.save();
        canvas.set_layer_alpha(self.alpha);

        if let Some(overlay) = &self.overlay {
            if overlay.drawable.is_visible() {
                canvas.save();
                canvas.translate(overlay.translation.to_vec2());
                overlay.drawable.draw(canvas);
                canvas.restore();
            }
        }

        if let Some(drawable) = &self.drawable {
            canvas.save();
            canvas.translate(self.text_origin().to_vec2());
            drawable.draw(canvas);
            canvas.restore();
        }

        canvas.restore();
    }

    fn sync_drawable_bounds(&mut self) {
        let Size { width, height } = self.text_size;
        if let Some(drawable) = self.drawable.as_mut() {
            drawable.set_bounds(Rect::new(0, 0, width, height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::host::ContentLayout;
    use crate::style::{Color, OverlayStyle, TooltipStyle};

    fn content() -> ContentView {
        ContentView {
            text: "Hello".to_string(),
            text_color: Color::rgb(255, 255, 255),
            typeface: None,
            text_style: None,
            max_width: None,
            padding: 30,
            layout: ContentLayout::Default,
        }
    }

    fn popup() -> PopupView {
        let style = TooltipStyle::dark();
        PopupView::new(
            content(),
            Size::new(184, 64),
            8,
            Some(OverlayView::new(TooltipOverlayDrawable::new(&OverlayStyle::default()))),
            Some(TooltipTextDrawable::new(&style)),
        )
    }

    #[test]
    fn test_content_and_text_rects() {
        let mut popup = popup();
        popup.set_content_translation(Point::new(400.0, 420.0));
        assert_eq!(popup.content_size(), Size::new(200, 80));
        assert_eq!(popup.content_rect(), RectF::new(400.0, 420.0, 600.0, 500.0));
        assert_eq!(popup.text_rect(), RectF::new(408.0, 428.0, 592.0, 492.0));

        popup.set_text_translation(Vec2::new(0.0, -8.0));
        assert_eq!(popup.text_rect(), RectF::new(408.0, 420.0, 592.0, 484.0));
    }

    #[test]
    fn test_drawable_tracks_text_size() {
        let mut popup = popup();
        assert_eq!(popup.drawable().unwrap().bounds(), Rect::new(0, 0, 184, 64));
        popup.set_text("Longer text".to_string(), Size::new(240, 64));
        assert_eq!(popup.drawable().unwrap().bounds(), Rect::new(0, 0, 240, 64));
        assert_eq!(popup.content().text, "Longer text");
    }

    #[test]
    fn test_overlay_centered() {
        let mut popup = popup();
        popup.overlay_mut().unwrap().center_on(Point::new(500.0, 520.0));
        assert_eq!(popup.overlay().unwrap().translation, Point::new(452.0, 472.0));
        popup.remove_overlay();
        assert!(popup.overlay().is_none());
    }

    fn draw_ops(popup: &PopupView) -> Vec<DrawOp> {
        let mut canvas = RecordingCanvas::new();
        popup.draw(&mut canvas);
        canvas.take_ops()
    }

    #[test]
    fn test_draw_fades_ripple_and_bubble_together() {
        let mut popup = popup();
        popup.set_content_translation(Point::new(100.0, 100.0));
        popup.overlay_mut().unwrap().drawable.set_visible(true, false);
        // mid-pulse, both circles close to their peak
        popup.advance_overlay(Duration::from_millis(250));

        popup.set_alpha(1.0);
        let opaque: Vec<u8> = draw_ops(&popup)
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { paint, .. } => Some(paint.alpha()),
                DrawOp::Path { .. } => None,
            })
            .collect();
        assert_eq!(opaque.len(), 2);
        assert!(opaque.iter().all(|&alpha| alpha > 100));

        popup.set_alpha(0.5);
        for (op, full) in draw_ops(&popup)
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .zip(&opaque)
        {
            if let DrawOp::Circle { paint, .. } = op {
                assert_eq!(paint.alpha(), (*full as f64 * 0.5).round() as u8);
            }
        }
        for op in draw_ops(&popup) {
            if let DrawOp::Path { origin, paint, .. } = op {
                assert_eq!(origin, Point::new(108.0, 108.0));
                assert_eq!(paint.alpha(), 128);
            }
        }
    }

    #[test]
    fn test_transparent_popup_draws_nothing_visible() {
        let mut popup = popup();
        popup.overlay_mut().unwrap().drawable.set_visible(true, false);
        popup.advance_overlay(Duration::from_millis(250));
        popup.set_alpha(0.0);

        let ops = draw_ops(&popup);
        assert_eq!(ops.len(), 4);
        for op in ops {
            let alpha = match op {
                DrawOp::Circle { paint, .. } | DrawOp::Path { paint, .. } => paint.alpha(),
            };
            assert_eq!(alpha, 0);
        }
    }
}
