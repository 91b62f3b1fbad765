//! Placement engine.
//!
//! Computes where the bubble, its arrow and the ripple center go for one
//! gravity, falling back through the remaining gravities when the candidate
//! does not fit the visible display frame.

use crate::models::{Gravity, Point, Positions, Rect, Size};

/// Slack allowed when testing the candidate against the display frame, in dp.
pub const SIZE_TOLERANCE_DP: f64 = 10.0;

/// Convert [`SIZE_TOLERANCE_DP`] to pixels for a screen density.
pub fn size_tolerance(density: f64) -> i32 {
    (density * SIZE_TOLERANCE_DP) as i32
}

/// On-screen bounds of an anchor view, sampled at placement time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorGeometry {
    /// Top-left corner in screen coordinates
    pub location: Point,
    /// Laid-out size
    pub size: Size,
}

impl AnchorGeometry {
    pub fn new(location: Point, size: Size) -> Self {
        Self { location, size }
    }

    /// Point on the anchor the bubble attaches to for `gravity`.
    pub fn edge_point(&self, gravity: Gravity) -> Point {
        let Point { x, y } = self.location;
        let Size { width: w, height: h } = self.size;
        match gravity {
            Gravity::Left => Point::new(x, y + h / 2),
            Gravity::Right => Point::new(x + w, y + h / 2),
            Gravity::Top => Point::new(x + w / 2, y),
            Gravity::Bottom => Point::new(x + w / 2, y + h),
            Gravity::Center => Point::new(x + w / 2, y + h / 2),
        }
    }

    pub fn center(&self) -> kurbo::Point {
        kurbo::Point::new(
            (self.location.x + self.size.width / 2) as f64,
            (self.location.y + self.size.height / 2) as f64,
        )
    }
}

/// Everything the engine needs for one `show()`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    /// Anchor bounds, or `None` in point-only mode
    pub anchor: Option<AnchorGeometry>,
    /// Offset added to the anchor edge point, or the absolute point in point-only mode
    pub offset: Point,
    /// Measured bubble size, float padding included
    pub content_size: Size,
    /// Bubble padding
    pub padding: i32,
    /// Float animation amplitude (0 when disabled)
    pub float_radius: i32,
    /// Measured ripple overlay size, when an overlay is shown
    pub overlay_size: Option<Size>,
    /// Visible display frame of the parent window
    pub display_frame: Rect,
    /// Overhang allowed against the display frame, in pixels
    pub tolerance: i32,
    /// Reject candidates that do not fit the display frame
    pub fit_to_screen: bool,
}

/// Find the first gravity in `gravities` whose candidate is acceptable.
///
/// Returns `None` when the list is exhausted.
pub fn find_position(request: &PlacementRequest, gravities: &[Gravity]) -> Option<Positions> {
    let (&gravity, remaining) = gravities.split_first()?;

    let positions = candidate(request, gravity);

    if request.fit_to_screen {
        let rect = Rect::from_origin_size(
            Point::new(positions.content_point.x as i32, positions.content_point.y as i32),
            request.content_size,
        );
        if !request.display_frame.contains_with_tolerance(&rect, request.tolerance) {
            tracing::debug!(
                %gravity,
                display_frame = ?request.display_frame,
                candidate = ?rect,
                "content won't fit, trying next gravity"
            );
            return find_position(request, remaining);
        }
    }

    Some(positions)
}

/// Compute the candidate for a single gravity without any fit check.
pub fn candidate(request: &PlacementRequest, gravity: Gravity) -> Positions {
    let (anchor_point, center_point) = match &request.anchor {
        Some(anchor) => {
            let edge = anchor.edge_point(gravity);
            let center = anchor.center();
            (
                edge.offset(request.offset.x, request.offset.y),
                center + kurbo::Vec2::new(request.offset.x as f64, request.offset.y as f64),
            )
        }
        None => (request.offset, kurbo::Point::from(request.offset)),
    };

    let Size { width: w, height: h } = request.content_size;
    let arrow_inset = request.padding / 2 + request.float_radius;

    let (mut content, arrow) = match gravity {
        Gravity::Left => {
            (Point::new(anchor_point.x - w, anchor_point.y - h / 2), Point::new(0, h / 2 - arrow_inset))
        }
        Gravity::Top => {
            (Point::new(anchor_point.x - w / 2, anchor_point.y - h), Point::new(w / 2 - arrow_inset, 0))
        }
        Gravity::Right => {
            (Point::new(anchor_point.x, anchor_point.y - h / 2), Point::new(0, h / 2 - arrow_inset))
        }
        Gravity::Bottom => {
            (Point::new(anchor_point.x - w / 2, anchor_point.y), Point::new(w / 2 - arrow_inset, 0))
        }
        Gravity::Center => (Point::new(anchor_point.x - w / 2, anchor_point.y - h / 2), Point::new(0, 0)),
    };

    // A bare point has no bounds of its own; keep the bubble clear of the ripple.
    if request.anchor.is_none() {
        if let Some(overlay) = request.overlay_size {
            content = match gravity {
                Gravity::Left => content.offset(-overlay.width / 2, 0),
                Gravity::Right => content.offset(overlay.width / 2, 0),
                Gravity::Top => content.offset(0, -overlay.height / 2),
                Gravity::Bottom => content.offset(0, overlay.height / 2),
                Gravity::Center => content,
            };
        }
    }

    tracing::debug!(
        %gravity,
        anchor = ?anchor_point,
        center = ?center_point,
        content = ?content,
        arrow = ?arrow,
        "candidate position"
    );

    Positions::new(arrow.into(), center_point, content.into(), gravity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::gravity_fallback_order;

    fn request(anchor: Option<AnchorGeometry>, frame: Rect) -> PlacementRequest {
        PlacementRequest {
            anchor,
            offset: Point::new(0, 0),
            content_size: Size::new(200, 80),
            padding: 30,
            float_radius: 8,
            overlay_size: None,
            display_frame: frame,
            tolerance: 10,
            fit_to_screen: true,
        }
    }

    fn anchor() -> AnchorGeometry {
        AnchorGeometry::new(Point::new(450, 500), Size::new(100, 40))
    }

    #[test]
    fn test_top_scenario() {
        let req = request(Some(anchor()), Rect::new(0, 0, 1080, 1920));
        let pos = find_position(&req, &gravity_fallback_order(Gravity::Top)).unwrap();

        assert_eq!(pos.gravity, Gravity::Top);
        assert_eq!(pos.content_point, kurbo::Point::new(400.0, 420.0));
        assert_eq!(pos.arrow_point, kurbo::Point::new(77.0, 0.0));
        assert_eq!(pos.center_point, kurbo::Point::new(500.0, 520.0));
    }

    #[test]
    fn test_edge_points() {
        let a = anchor();
        assert_eq!(a.edge_point(Gravity::Left), Point::new(450, 520));
        assert_eq!(a.edge_point(Gravity::Right), Point::new(550, 520));
        assert_eq!(a.edge_point(Gravity::Top), Point::new(500, 500));
        assert_eq!(a.edge_point(Gravity::Bottom), Point::new(500, 540));
        assert_eq!(a.edge_point(Gravity::Center), Point::new(500, 520));
    }

    #[test]
    fn test_each_gravity_lands_on_its_side() {
        let req = request(Some(anchor()), Rect::new(-5000, -5000, 5000, 5000));
        let a = anchor();

        for gravity in Gravity::ALL {
            let pos = find_position(&req, &gravity_fallback_order(gravity)).unwrap();
            assert_eq!(pos.gravity, gravity);

            let left = pos.content_point.x as i32;
            let top = pos.content_point.y as i32;
            let right = left + 200;
            let bottom = top + 80;
            match gravity {
                Gravity::Left => assert!(right <= a.location.x),
                Gravity::Right => assert!(left >= a.location.x + a.size.width),
                Gravity::Top => assert!(bottom <= a.location.y),
                Gravity::Bottom => assert!(top >= a.location.y + a.size.height),
                Gravity::Center => {
                    assert_eq!(left + 100, 500);
                    assert_eq!(top + 40, 520);
                }
            }
        }
    }

    #[test]
    fn test_falls_back_when_top_does_not_fit() {
        // anchor near the top edge: TOP overflows, LEFT is next in order
        let a = AnchorGeometry::new(Point::new(450, 20), Size::new(100, 40));
        let req = request(Some(a), Rect::new(0, 0, 1080, 1920));

        let pos = find_position(&req, &gravity_fallback_order(Gravity::Top)).unwrap();
        assert_eq!(pos.gravity, Gravity::Left);
    }

    #[test]
    fn test_exhaustion_returns_none() {
        let req = request(Some(anchor()), Rect::new(0, 0, 100, 100));
        assert!(find_position(&req, &gravity_fallback_order(Gravity::Bottom)).is_none());
        assert!(find_position(&req, &[]).is_none());
    }

    #[test]
    fn test_fit_disabled_keeps_first_gravity() {
        let mut req = request(Some(anchor()), Rect::new(0, 0, 100, 100));
        req.fit_to_screen = false;
        let pos = find_position(&req, &gravity_fallback_order(Gravity::Right)).unwrap();
        assert_eq!(pos.gravity, Gravity::Right);
        assert_eq!(pos.content_point, kurbo::Point::new(550.0, 480.0));
        assert_eq!(pos.arrow_point, kurbo::Point::new(0.0, 40.0 - 15.0 - 8.0));
    }

    #[test]
    fn test_point_mode_shifts_by_overlay() {
        let mut req = request(None, Rect::new(0, 0, 1080, 1920));
        req.offset = Point::new(300, 300);
        req.overlay_size = Some(Size::new(96, 96));

        let pos = candidate(&req, Gravity::Bottom);
        assert_eq!(pos.content_point, kurbo::Point::new(200.0, 348.0));
        assert_eq!(pos.center_point, kurbo::Point::new(300.0, 300.0));

        let pos = candidate(&req, Gravity::Center);
        assert_eq!(pos.content_point, kurbo::Point::new(200.0, 260.0));
    }

    #[test]
    fn test_offset_applies_to_anchor_and_center() {
        let mut req = request(Some(anchor()), Rect::new(0, 0, 1080, 1920));
        req.offset = Point::new(10, -5);
        let pos = candidate(&req, Gravity::Bottom);
        assert_eq!(pos.content_point, kurbo::Point::new(410.0, 535.0));
        assert_eq!(pos.center_point, kurbo::Point::new(510.0, 515.0));
    }

    #[test]
    fn test_size_tolerance() {
        assert_eq!(size_tolerance(1.0), 10);
        assert_eq!(size_tolerance(2.75), 27);
    }
}
