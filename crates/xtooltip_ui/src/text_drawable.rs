//! Bubble background: a rounded rectangle with an arrow pointing at the anchor.

use kurbo::{BezPath, Point, Rect as RectF, RoundedRect, Shape};
use xtooltip_core::{Gravity, Rect};

use crate::canvas::{Canvas, Paint};
use crate::layout::defaults::ALPHA_MAX;
use crate::style::TooltipStyle;

/// Flattening tolerance for the rounded corners of an arrowless bubble.
const CORNER_TOLERANCE: f64 = 0.1;

/// Shadow outline hint for hosts that clip elevation shadows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub shape: RoundedRect,
    /// 0.0 when the bubble is translucent
    pub alpha: f64,
}

/// Where the arrow ended up after clamping, in drawable coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Notch {
    pub gravity: Gravity,
    /// Tip position along the edge
    pub apex: f64,
    /// Half-width of the arrow base
    pub weight: f64,
    /// Lowest legal apex position (edge start plus corner radius)
    pub min: f64,
    /// Highest legal apex position (edge end minus corner radius)
    pub max: f64,
}

/// The bubble background drawable.
///
/// The outline is cached and only rebuilt when the bounds or one of the
/// anchor inputs change.
#[derive(Debug, Clone)]
pub struct TooltipTextDrawable {
    radius: f64,
    arrow_ratio: f64,
    fill: Option<Paint>,
    stroke: Option<Paint>,
    alpha: u8,
    bounds: Rect,
    padding: i32,
    arrow_weight: f64,
    point: Option<Point>,
    gravity: Option<Gravity>,
    notch: Option<Notch>,
    path: BezPath,
}

impl TooltipTextDrawable {
    pub fn new(style: &TooltipStyle) -> Self {
        Self {
            radius: style.corner_radius,
            arrow_ratio: style.arrow_ratio,
            fill: style.background_color.map(Paint::fill),
            stroke: style.stroke_color.map(|c| Paint::stroke(c, style.stroke_weight)),
            alpha: ALPHA_MAX as u8,
            bounds: Rect::default(),
            padding: 0,
            arrow_weight: 0.0,
            point: None,
            gravity: None,
            notch: None,
            path: BezPath::new(),
        }
    }

    /// Point the arrow at `point` on the edge that faces `gravity`'s anchor.
    ///
    /// `padding` is the inset reserved for the arrow. Returns whether the
    /// outline had to be rebuilt.
    pub fn set_anchor(&mut self, gravity: Gravity, padding: i32, point: Option<Point>) -> bool {
        if self.gravity == Some(gravity) && self.padding == padding && self.point == point {
            return false;
        }

        self.gravity = Some(gravity);
        self.padding = padding;
        self.arrow_weight = padding as f64 / self.arrow_ratio;
        self.point = point;

        if !self.bounds.is_empty() {
            self.calculate_path();
        }
        true
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.calculate_path();
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Bounding box of the current outline, `None` before the first layout.
    pub fn path_bounds(&self) -> Option<RectF> {
        (!self.path.elements().is_empty()).then(|| self.path.bounding_box())
    }

    /// The arrow as last laid out, if one is drawn.
    pub fn notch(&self) -> Option<Notch> {
        self.notch
    }

    pub fn arrow_weight(&self) -> f64 {
        self.arrow_weight
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
        if let Some(fill) = self.fill.as_mut() {
            fill.set_alpha(alpha);
        }
        if let Some(stroke) = self.stroke.as_mut() {
            stroke.set_alpha(alpha);
        }
    }

    pub fn outline(&self) -> Outline {
        let rect = self.bounds.inset(self.padding, self.padding).to_kurbo();
        let alpha = if self.alpha < ALPHA_MAX as u8 { 0.0 } else { 1.0 };
        Outline { shape: RoundedRect::from_rect(rect, self.radius), alpha }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(fill) = &self.fill {
            canvas.draw_path(&self.path, fill);
        }
        if let Some(stroke) = &self.stroke {
            canvas.draw_path(&self.path, stroke);
        }
    }

    fn calculate_path(&mut self) {
        self.path = BezPath::new();
        self.notch = None;

        let outer = self.bounds.to_kurbo();
        let inner = outer.inset(-(self.padding as f64));

        match (self.point, self.gravity) {
            (Some(point), Some(gravity)) if gravity.has_arrow() => {
                let notch = self.layout_notch(&inner, point, gravity);
                tracing::trace!(?notch, "bubble arrow");
                self.trace_outline(&outer, &inner, &notch);
                self.notch = Some(notch);
            }
            _ => self.path = RoundedRect::from_rect(inner, self.radius).to_path(CORNER_TOLERANCE),
        }
    }

    /// Clamp the arrow so its base stays between the corner arcs.
    fn layout_notch(&self, inner: &RectF, point: Point, gravity: Gravity) -> Notch {
        let (start, end, apex) = if gravity.is_vertical() {
            (inner.x0, inner.x1, inner.x0 + point.x)
        } else {
            (inner.y0, inner.y1, inner.y0 + point.y)
        };

        let min = start + self.radius;
        let max = end - self.radius;
        let span = (max - min).max(0.0);

        let weight = if span < self.arrow_weight * 2.0 { span / 2.0 } else { self.arrow_weight };
        let apex = if min + weight > max - weight {
            (min + max) / 2.0
        } else {
            apex.clamp(min + weight, max - weight)
        };

        Notch { gravity, apex, weight, min, max }
    }

    /// Walk the perimeter clockwise, detouring out to the un-inset edge at the
    /// side facing the anchor.
    fn trace_outline(&mut self, outer: &RectF, inner: &RectF, notch: &Notch) {
        let RectF { x0: left, y0: top, x1: right, y1: bottom } = *inner;
        let r = self.radius;
        let Notch { gravity, apex, weight, .. } = *notch;
        let path = &mut self.path;

        path.move_to((left + r, top));

        if gravity == Gravity::Bottom {
            path.line_to((apex - weight, top));
            path.line_to((apex, outer.y0));
            path.line_to((apex + weight, top));
        }

        path.line_to((right - r, top));
        path.quad_to((right, top), (right, top + r));

        if gravity == Gravity::Left {
            path.line_to((right, apex - weight));
            path.line_to((outer.x1, apex));
            path.line_to((right, apex + weight));
        }

        path.line_to((right, bottom - r));
        path.quad_to((right, bottom), (right - r, bottom));

        if gravity == Gravity::Top {
            path.line_to((apex + weight, bottom));
            path.line_to((apex, outer.y1));
            path.line_to((apex - weight, bottom));
        }

        path.line_to((left + r, bottom));
        path.quad_to((left, bottom), (left, bottom - r));

        if gravity == Gravity::Right {
            path.line_to((left, apex + weight));
            path.line_to((outer.x0, apex));
            path.line_to((left, apex - weight));
        }

        path.line_to((left, top + r));
        path.quad_to((left, top), (left + r, top));
        path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use kurbo::PathEl;

    fn drawable() -> TooltipTextDrawable {
        let mut d = TooltipTextDrawable::new(&TooltipStyle::dark());
        d.set_bounds(Rect::new(0, 0, 184, 64));
        d
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn contains_point(path: &BezPath, x: f64, y: f64) -> bool {
        path.elements().iter().any(|el| match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) | PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                approx(p.x, x) && approx(p.y, y)
            }
            PathEl::ClosePath => false,
        })
    }

    #[test]
    fn test_plain_round_rect_without_point() {
        let mut d = drawable();
        d.set_anchor(Gravity::Center, 0, None);
        assert!(d.notch().is_none());

        let bounds = d.path_bounds().unwrap();
        assert!(approx(bounds.x0, 0.0) && approx(bounds.y0, 0.0));
        assert!(approx(bounds.x1, 184.0) && approx(bounds.y1, 64.0));
        assert_eq!(d.path().elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn test_top_gravity_points_down_from_bottom_edge() {
        let mut d = drawable();
        // padding 15, apex relative x 77 => absolute 92, the middle of 184
        d.set_anchor(Gravity::Top, 15, Some(Point::new(77.0, 0.0)));

        let notch = d.notch().unwrap();
        assert_eq!(notch.apex, 92.0);
        assert!(contains_point(d.path(), 92.0, 64.0));
        // inset edges everywhere else
        let bounds = d.path_bounds().unwrap();
        assert!(approx(bounds.y0, 15.0));
        assert!(approx(bounds.y1, 64.0));
        assert!(approx(bounds.x0, 15.0));
    }

    #[test]
    fn test_each_gravity_uses_facing_edge() {
        let cases = [
            (Gravity::Bottom, Point::new(40.0, 0.0), (55.0, 0.0)),
            (Gravity::Left, Point::new(0.0, 17.0), (184.0, 32.0)),
            (Gravity::Right, Point::new(0.0, 17.0), (0.0, 32.0)),
        ];
        for (gravity, point, (x, y)) in cases {
            let mut d = drawable();
            d.set_anchor(gravity, 15, Some(point));
            assert!(contains_point(d.path(), x, y), "{gravity}: tip missing");
        }
    }

    #[test]
    fn test_apex_clamped_away_from_corners() {
        let mut d = drawable();
        d.set_anchor(Gravity::Bottom, 15, Some(Point::new(-500.0, 0.0)));
        let notch = d.notch().unwrap();
        assert_eq!(notch.apex, notch.min + notch.weight);

        d.set_anchor(Gravity::Bottom, 15, Some(Point::new(500.0, 0.0)));
        let notch = d.notch().unwrap();
        assert_eq!(notch.apex, notch.max - notch.weight);
    }

    #[test]
    fn test_narrow_bubble_shrinks_arrow() {
        let mut d = TooltipTextDrawable::new(&TooltipStyle::dark());
        // inner height 40 - 2*15 = 10, usable span 10 - 2*4 = 2
        d.set_bounds(Rect::new(0, 0, 200, 40));
        d.set_anchor(Gravity::Left, 15, Some(Point::new(0.0, 30.0)));

        let notch = d.notch().unwrap();
        assert!(d.arrow_weight() > 10.0);
        assert_eq!(notch.weight, 1.0);
        assert!(notch.apex - notch.weight >= notch.min);
        assert!(notch.apex + notch.weight <= notch.max);
    }

    #[test]
    fn test_set_anchor_skips_identical_input() {
        let mut d = drawable();
        assert!(d.set_anchor(Gravity::Top, 15, Some(Point::new(77.0, 0.0))));
        assert!(!d.set_anchor(Gravity::Top, 15, Some(Point::new(77.0, 0.0))));
        assert!(d.set_anchor(Gravity::Top, 15, Some(Point::new(70.0, 0.0))));
        assert!(d.set_anchor(Gravity::Top, 0, None));
    }

    #[test]
    fn test_path_rebuilt_not_appended() {
        let mut d = drawable();
        d.set_anchor(Gravity::Top, 15, Some(Point::new(77.0, 0.0)));
        let len = d.path().elements().len();
        d.set_bounds(Rect::new(0, 0, 200, 64));
        assert_eq!(d.path().elements().len(), len);
        assert_eq!(d.path().elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn test_alpha_and_outline() {
        let mut d = drawable();
        d.set_anchor(Gravity::Top, 15, Some(Point::new(77.0, 0.0)));
        assert_eq!(d.outline().alpha, 1.0);
        assert_eq!(d.outline().shape.rect(), RectF::new(15.0, 15.0, 169.0, 49.0));

        d.set_alpha(128);
        assert_eq!(d.alpha(), 128);
        assert_eq!(d.outline().alpha, 0.0);

        let mut canvas = RecordingCanvas::new();
        d.draw(&mut canvas);
        assert_eq!(canvas.ops().len(), 2);
        for op in canvas.ops() {
            match op {
                DrawOp::Path { paint, .. } => assert_eq!(paint.alpha(), 128),
                other => panic!("unexpected op {other:?}"),
            }
        }
    }
}
