//! Result of a successful placement attempt.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use super::Gravity;

/// Placement computed for one gravity.
///
/// The base points never change after placement; following a moving anchor
/// only accumulates an offset that the `*_x()`/`*_y()` accessors add back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Positions {
    /// Notch tip, relative to the bubble's padding box
    pub arrow_point: Point,
    /// Anchor's visual center in screen space, used for the ripple
    pub center_point: Point,
    /// Bubble top-left in screen space
    pub content_point: Point,
    /// Gravity that produced this candidate
    pub gravity: Gravity,
    offset: Vec2,
}

impl Positions {
    pub fn new(arrow_point: Point, center_point: Point, content_point: Point, gravity: Gravity) -> Self {
        Self { arrow_point, center_point, content_point, gravity, offset: Vec2::ZERO }
    }

    /// Accumulate a translation delta.
    pub fn offset_by(&mut self, dx: f64, dy: f64) {
        self.offset += Vec2::new(dx, dy);
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn offset_x(&self) -> f64 {
        self.offset.x
    }

    pub fn offset_y(&self) -> f64 {
        self.offset.y
    }

    pub fn content_point_x(&self) -> f64 {
        self.content_point.x + self.offset.x
    }

    pub fn content_point_y(&self) -> f64 {
        self.content_point.y + self.offset.y
    }

    pub fn center_point_x(&self) -> f64 {
        self.center_point.x + self.offset.x
    }

    pub fn center_point_y(&self) -> f64 {
        self.center_point.y + self.offset.y
    }

    pub fn arrow_point_x(&self) -> f64 {
        self.arrow_point.x + self.offset.x
    }

    pub fn arrow_point_y(&self) -> f64 {
        self.arrow_point.y + self.offset.y
    }

    /// Bubble top-left with the follow offset applied.
    pub fn content_origin(&self) -> Point {
        self.content_point + self.offset
    }

    /// Ripple center with the follow offset applied.
    pub fn center(&self) -> Point {
        self.center_point + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_accumulates() {
        let mut positions = Positions::new(
            Point::new(77.0, 0.0),
            Point::new(500.0, 520.0),
            Point::new(400.0, 420.0),
            Gravity::Top,
        );

        positions.offset_by(0.0, -10.0);
        positions.offset_by(5.0, -10.0);

        assert_eq!(positions.offset_x(), 5.0);
        assert_eq!(positions.offset_y(), -20.0);
        assert_eq!(positions.content_point_x(), 405.0);
        assert_eq!(positions.content_point_y(), 400.0);
        assert_eq!(positions.center_point_y(), 500.0);
        assert_eq!(positions.content_origin(), Point::new(405.0, 400.0));
        assert_eq!(positions.center(), Point::new(505.0, 500.0));
        // base points are untouched
        assert_eq!(positions.content_point, Point::new(400.0, 420.0));
    }
}
