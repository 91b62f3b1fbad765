//! Paints and the canvas the drawables paint into.
//!
//! Outlines are `kurbo` paths; the host implements [`Canvas`] on top of its
//! own renderer.

use kurbo::{BezPath, Circle, Point, Vec2};

use crate::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

/// Color and style of a draw call. Alpha lives in the color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f64,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self { color, style: PaintStyle::Fill, stroke_width: 0.0 }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self { color, style: PaintStyle::Stroke, stroke_width: width }
    }

    pub fn alpha(&self) -> u8 {
        self.color.a
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.color.a = alpha;
    }
}

/// Drawing surface provided by the host during its paint pass.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    /// Multiply the alpha of subsequent draws by `alpha` (`0.0..=1.0`).
    fn set_layer_alpha(&mut self, alpha: f64);
    fn draw_path(&mut self, path: &BezPath, paint: &Paint);
    fn draw_circle(&mut self, circle: Circle, paint: &Paint);
}

/// A recorded draw call, in absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Path { origin: Point, path: BezPath, paint: Paint },
    Circle { circle: Circle, paint: Paint },
}

#[derive(Debug, Clone, Copy)]
struct CanvasState {
    origin: Point,
    alpha: f64,
}

/// Canvas that records draw calls, resolving translation and layer alpha.
///
/// Useful for headless hosts and for asserting on drawable output.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    state: CanvasState,
    stack: Vec<CanvasState>,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            state: CanvasState { origin: Point::ORIGIN, alpha: 1.0 },
            stack: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    fn resolve(&self, paint: &Paint) -> Paint {
        let mut paint = *paint;
        paint.set_alpha((paint.alpha() as f64 * self.state.alpha).round() as u8);
        paint
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.origin += offset;
    }

    fn set_layer_alpha(&mut self, alpha: f64) {
        self.state.alpha *= alpha.clamp(0.0, 1.0);
    }

    fn draw_path(&mut self, path: &BezPath, paint: &Paint) {
        let paint = self.resolve(paint);
        self.ops.push(DrawOp::Path { origin: self.state.origin, path: path.clone(), paint });
    }

    fn draw_circle(&mut self, circle: Circle, paint: &Paint) {
        let paint = self.resolve(paint);
        let circle = Circle::new(circle.center + self.state.origin.to_vec2(), circle.radius);
        self.ops.push(DrawOp::Circle { circle, paint });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_canvas_translation_and_alpha() {
        let mut canvas = RecordingCanvas::new();
        let paint = Paint::fill(Color::rgb(255, 0, 0));

        canvas.save();
        canvas.translate(Vec2::new(100.0, 50.0));
        canvas.set_layer_alpha(0.5);
        canvas.draw_circle(Circle::new((10.0, 10.0), 5.0), &paint);
        canvas.restore();
        canvas.draw_circle(Circle::new((10.0, 10.0), 5.0), &paint);

        match &canvas.ops()[0] {
            DrawOp::Circle { circle, paint } => {
                assert_eq!(circle.center, Point::new(110.0, 60.0));
                assert_eq!(paint.alpha(), 128);
            }
            other => panic!("unexpected op {other:?}"),
        }
        match &canvas.ops()[1] {
            DrawOp::Circle { circle, paint } => {
                assert_eq!(circle.center, Point::new(10.0, 10.0));
                assert_eq!(paint.alpha(), 255);
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn test_nested_layer_alpha_multiplies() {
        let mut canvas = RecordingCanvas::new();
        let paint = Paint::stroke(Color::rgb(0, 0, 255), 2.0);

        canvas.save();
        canvas.set_layer_alpha(0.5);
        canvas.save();
        canvas.set_layer_alpha(0.5);
        canvas.draw_path(&BezPath::new(), &paint);
        canvas.restore();
        canvas.draw_path(&BezPath::new(), &paint);
        canvas.restore();

        let alphas: Vec<u8> = canvas
            .take_ops()
            .into_iter()
            .map(|op| match op {
                DrawOp::Path { paint, .. } => paint.alpha(),
                DrawOp::Circle { paint, .. } => paint.alpha(),
            })
            .collect();
        assert_eq!(alphas, vec![64, 128]);
        assert!(canvas.ops().is_empty());
    }
}
