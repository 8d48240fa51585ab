//! Drawing definitions for the annotation editor.

mod arrow;
mod freehand;
mod rectangle;

pub use arrow::Arrow;
pub use freehand::Freehand;
pub use rectangle::Rectangle;

use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry;

/// Unique identifier for drawings, stable for a drawing's lifetime.
pub type DrawingId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Presentation attributes shared by every drawing variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DrawingStyle {
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke width before resolution scaling.
    pub stroke_width: f64,
    /// Resolution-derived multiplier keeping stroke thickness proportionate
    /// across differently sized source images.
    pub stroke_scaling: f64,
}

impl DrawingStyle {
    pub fn new(color: Color, stroke_width: f64, stroke_scaling: f64) -> Self {
        Self {
            color: color.into(),
            stroke_width,
            stroke_scaling,
        }
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.color.into()
    }

    /// Stroke width actually painted, after resolution scaling.
    pub fn effective_width(&self) -> f64 {
        self.stroke_width * self.stroke_scaling
    }
}

/// Accumulated post-commit edits, pivoted at the drawing's top-left corner.
///
/// The original control points are never touched after authoring ends; all
/// later moves and resizes live here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DrawingTransform {
    /// Accumulated pan offset in surface pixels.
    pub translate: Vec2,
    /// Horizontal scale applied on top of the original geometry.
    pub scale_x: f64,
    /// Vertical scale applied on top of the original geometry.
    pub scale_y: f64,
}

impl Default for DrawingTransform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Common trait for all drawing variants.
///
/// `start`/`draw`/`end` are the authoring lifecycle driven by the tool; they
/// are the only writers of the control points and path.
pub trait DrawingTrait {
    /// Get the unique identifier.
    fn id(&self) -> DrawingId;

    /// Begin authoring at the anchor point.
    fn start(&mut self, point: Point);

    /// Extend the in-progress geometry to the current pointer position.
    fn draw(&mut self, point: Point);

    /// Finish authoring at the release point.
    fn end(&mut self, point: Point);

    /// Minimum-extent check. Invalid drawings stay in the editor's list but
    /// render as nothing.
    fn is_valid(&self) -> bool;

    /// Top-left of the untransformed control geometry.
    fn top_left_point(&self) -> Point;

    /// Bottom-right of the untransformed control geometry.
    fn bottom_right_point(&self) -> Point;

    /// Get the vector path in local coordinates.
    fn path(&self) -> &BezPath;

    /// Get the style.
    fn style(&self) -> &DrawingStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut DrawingStyle;

    /// Get the accumulated edit transform.
    fn transform(&self) -> &DrawingTransform;

    /// Get the mutable edit transform.
    fn transform_mut(&mut self) -> &mut DrawingTransform;
}

/// Enum wrapper for all drawing variants (for storage and serialization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Drawing {
    Rectangle(Rectangle),
    Arrow(Arrow),
    Freehand(Freehand),
}

impl Drawing {
    pub fn id(&self) -> DrawingId {
        match self {
            Drawing::Rectangle(d) => d.id(),
            Drawing::Arrow(d) => d.id(),
            Drawing::Freehand(d) => d.id(),
        }
    }

    pub fn start(&mut self, point: Point) {
        match self {
            Drawing::Rectangle(d) => d.start(point),
            Drawing::Arrow(d) => d.start(point),
            Drawing::Freehand(d) => d.start(point),
        }
    }

    pub fn draw(&mut self, point: Point) {
        match self {
            Drawing::Rectangle(d) => d.draw(point),
            Drawing::Arrow(d) => d.draw(point),
            Drawing::Freehand(d) => d.draw(point),
        }
    }

    pub fn end(&mut self, point: Point) {
        match self {
            Drawing::Rectangle(d) => d.end(point),
            Drawing::Arrow(d) => d.end(point),
            Drawing::Freehand(d) => d.end(point),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Drawing::Rectangle(d) => d.is_valid(),
            Drawing::Arrow(d) => d.is_valid(),
            Drawing::Freehand(d) => d.is_valid(),
        }
    }

    pub fn top_left_point(&self) -> Point {
        match self {
            Drawing::Rectangle(d) => d.top_left_point(),
            Drawing::Arrow(d) => d.top_left_point(),
            Drawing::Freehand(d) => d.top_left_point(),
        }
    }

    pub fn bottom_right_point(&self) -> Point {
        match self {
            Drawing::Rectangle(d) => d.bottom_right_point(),
            Drawing::Arrow(d) => d.bottom_right_point(),
            Drawing::Freehand(d) => d.bottom_right_point(),
        }
    }

    pub fn path(&self) -> &BezPath {
        match self {
            Drawing::Rectangle(d) => d.path(),
            Drawing::Arrow(d) => d.path(),
            Drawing::Freehand(d) => d.path(),
        }
    }

    pub fn style(&self) -> &DrawingStyle {
        match self {
            Drawing::Rectangle(d) => d.style(),
            Drawing::Arrow(d) => d.style(),
            Drawing::Freehand(d) => d.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut DrawingStyle {
        match self {
            Drawing::Rectangle(d) => d.style_mut(),
            Drawing::Arrow(d) => d.style_mut(),
            Drawing::Freehand(d) => d.style_mut(),
        }
    }

    pub fn transform(&self) -> &DrawingTransform {
        match self {
            Drawing::Rectangle(d) => d.transform(),
            Drawing::Arrow(d) => d.transform(),
            Drawing::Freehand(d) => d.transform(),
        }
    }

    pub fn transform_mut(&mut self) -> &mut DrawingTransform {
        match self {
            Drawing::Rectangle(d) => d.transform_mut(),
            Drawing::Arrow(d) => d.transform_mut(),
            Drawing::Freehand(d) => d.transform_mut(),
        }
    }

    /// Bounding box of the control geometry under the accumulated
    /// translate/scale, in surface pixels.
    pub fn bounding_box(&self) -> Rect {
        let tl = self.top_left_point();
        let br = self.bottom_right_point();
        let t = self.transform();
        let x = tl.x + t.translate.x;
        let y = tl.y + t.translate.y;
        let width = (br.x - tl.x) * t.scale_x;
        let height = (br.y - tl.y) * t.scale_y;
        Rect::new(x, y, x + width, y + height)
    }

    /// Affine mapping local path coordinates into surface pixels: scale
    /// about the drawing's top-left corner, then translate.
    pub fn render_affine(&self) -> Affine {
        let t = self.transform();
        let pivot = self.top_left_point().to_vec2();
        Affine::translate(pivot + t.translate)
            * Affine::scale_non_uniform(t.scale_x, t.scale_y)
            * Affine::translate(-pivot)
    }

    /// Check whether a surface-pixel point hits this drawing's stroke.
    ///
    /// The point is mapped into local space by inverting the render
    /// transform, then probed at seven offsets (center, half a stroke width
    /// along each axis, and half a stroke width along the main diagonal)
    /// against the path with half-stroke-width tolerance, so the effective
    /// hit area extends one stroke width around the path.
    pub fn hit_test(&self, point: Point) -> bool {
        let affine = self.render_affine();
        if affine.determinant().abs() < f64::EPSILON {
            // collapsed by a degenerate resize; nothing visible to hit
            return false;
        }
        let local = affine.inverse() * point;
        let half = self.style().stroke_width / 2.0;
        let diag = half * std::f64::consts::FRAC_1_SQRT_2;
        let probes = [
            Vec2::ZERO,
            Vec2::new(half, 0.0),
            Vec2::new(-half, 0.0),
            Vec2::new(0.0, half),
            Vec2::new(0.0, -half),
            Vec2::new(diag, diag),
            Vec2::new(-diag, -diag),
        ];
        probes
            .iter()
            .any(|offset| geometry::point_to_path_dist(local + *offset, self.path()) <= half)
    }

    /// Pan the drawing. `delta` is in surface pixels, already un-scaled by
    /// the caller.
    pub fn move_by(&mut self, delta: Vec2) {
        self.transform_mut().translate += delta;
    }

    /// Resize the drawing by a handle-drag delta in surface pixels.
    ///
    /// Recomputes the per-axis scale as `(current scaled extent − delta) /
    /// original extent`, anchored at the drawing's top-left corner. Axes
    /// with zero original extent are left untouched.
    pub fn scale_by(&mut self, delta: Vec2) {
        let tl = self.top_left_point();
        let br = self.bottom_right_point();
        let original_w = br.x - tl.x;
        let original_h = br.y - tl.y;
        let t = self.transform_mut();
        if original_w.abs() > f64::EPSILON {
            t.scale_x = (original_w * t.scale_x - delta.x) / original_w;
        }
        if original_h.abs() > f64::EPSILON {
            t.scale_y = (original_h * t.scale_y - delta.y) / original_h;
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.style_mut().color = color.into();
    }

    pub fn set_stroke_size(&mut self, stroke_width: f64) {
        self.style_mut().stroke_width = stroke_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> DrawingStyle {
        DrawingStyle::new(Color::from_rgba8(255, 0, 0, 255), 6.0, 1.0)
    }

    fn rectangle(from: Point, to: Point) -> Drawing {
        let mut drawing = Drawing::Rectangle(Rectangle::new(style()));
        drawing.start(from);
        drawing.end(to);
        drawing
    }

    #[test]
    fn test_bounding_box_untransformed() {
        let drawing = rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));
        assert_eq!(drawing.bounding_box(), Rect::new(10.0, 10.0, 110.0, 60.0));
    }

    #[test]
    fn test_move_by_shifts_bounding_box() {
        let mut drawing = rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));
        drawing.move_by(Vec2::new(5.0, -3.0));
        assert_eq!(drawing.bounding_box(), Rect::new(15.0, 7.0, 115.0, 57.0));
    }

    #[test]
    fn test_scale_by_round_trip() {
        let mut drawing = rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));
        let before = drawing.bounding_box();
        drawing.scale_by(Vec2::new(12.0, -7.0));
        drawing.move_by(Vec2::new(30.0, 40.0));
        drawing.scale_by(Vec2::new(-12.0, 7.0));
        drawing.move_by(Vec2::new(-30.0, -40.0));
        let after = drawing.bounding_box();
        assert!((before.x0 - after.x0).abs() < 1e-9);
        assert!((before.y0 - after.y0).abs() < 1e-9);
        assert!((before.x1 - after.x1).abs() < 1e-9);
        assert!((before.y1 - after.y1).abs() < 1e-9);
    }

    #[test]
    fn test_scale_by_anchors_top_left() {
        let mut drawing = rectangle(Point::new(10.0, 10.0), Point::new(20.0, 20.0));
        drawing.scale_by(Vec2::new(-10.0, -10.0));
        let rect = drawing.bounding_box();
        // top-left stays, extents double
        assert_eq!(rect, Rect::new(10.0, 10.0, 30.0, 30.0));
    }

    #[test]
    fn test_hit_test_corners_always_hit() {
        let drawing = rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));
        assert!(drawing.hit_test(Point::new(10.0, 10.0)));
        assert!(drawing.hit_test(Point::new(110.0, 60.0)));
    }

    #[test]
    fn test_hit_test_outside_by_stroke_width_misses() {
        let drawing = rectangle(Point::new(10.0, 10.0), Point::new(110.0, 60.0));
        let w = drawing.style().stroke_width;
        // strictly outside by more than a stroke width on both axes
        assert!(!drawing.hit_test(Point::new(110.0 + w + 0.5, 60.0 + w + 0.5)));
        assert!(!drawing.hit_test(Point::new(10.0 - w - 0.5, 10.0 - w - 0.5)));
    }

    #[test]
    fn test_hit_test_center_of_outline_misses() {
        let drawing = rectangle(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        // rectangles are outlines; the middle is empty
        assert!(!drawing.hit_test(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_hit_test_respects_transform() {
        let mut drawing = rectangle(Point::new(10.0, 10.0), Point::new(20.0, 20.0));
        drawing.move_by(Vec2::new(100.0, 0.0));
        assert!(drawing.hit_test(Point::new(110.0, 10.0)));
        assert!(!drawing.hit_test(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_set_color_and_stroke_size() {
        let mut drawing = rectangle(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        drawing.set_color(Color::from_rgba8(0, 255, 0, 255));
        drawing.set_stroke_size(12.0);
        assert_eq!(drawing.style().color, SerializableColor::from(Color::from_rgba8(0, 255, 0, 255)));
        assert!((drawing.style().stroke_width - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serde_round_trip() {
        let drawing = rectangle(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let json = serde_json::to_string(&drawing).unwrap();
        let back: Drawing = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), drawing.id());
        assert_eq!(back.bounding_box(), drawing.bounding_box());
    }
}
