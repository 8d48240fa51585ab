//! Arrow annotation.

use super::{DrawingId, DrawingStyle, DrawingTrait, DrawingTransform};
use crate::geometry;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight shaft from tail to head with two head-wing segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: DrawingId,
    /// Tail of the arrow, recorded on pointer-down.
    pub start_point: Point,
    /// Head of the arrow, tracking the pointer.
    pub end_point: Point,
    /// Shaft plus wings, rebuilt from the control points on every
    /// authoring step.
    pub(crate) path: BezPath,
    pub style: DrawingStyle,
    pub transform: DrawingTransform,
}

impl Arrow {
    /// Length of each head wing in surface pixels, before resolution
    /// scaling.
    pub const HEAD_LENGTH: f64 = 20.0;

    /// Angle between each wing and the shaft.
    pub const HEAD_ANGLE: f64 = std::f64::consts::PI / 5.0;

    pub fn new(style: DrawingStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_point: Point::ZERO,
            end_point: Point::ZERO,
            path: BezPath::new(),
            style,
            transform: DrawingTransform::default(),
        }
    }

    fn rebuild_path(&mut self) {
        let mut path = BezPath::new();
        path.move_to(self.start_point);
        path.line_to(self.end_point);

        let shaft = self.end_point - self.start_point;
        if shaft.hypot() > f64::EPSILON {
            // wings point back toward the tail, sized independently of the
            // shaft so the head stays visually constant
            let back = -shaft.normalize() * (Self::HEAD_LENGTH * self.style.stroke_scaling);
            let left = geometry::rotate(back, Self::HEAD_ANGLE);
            let right = geometry::rotate(back, -Self::HEAD_ANGLE);
            path.move_to(self.end_point);
            path.line_to(self.end_point + left);
            path.move_to(self.end_point);
            path.line_to(self.end_point + right);
        }
        self.path = path;
    }
}

impl DrawingTrait for Arrow {
    fn id(&self) -> DrawingId {
        self.id
    }

    fn start(&mut self, point: Point) {
        self.start_point = point;
        self.end_point = point;
        self.rebuild_path();
    }

    fn draw(&mut self, point: Point) {
        self.end_point = point;
        self.rebuild_path();
    }

    fn end(&mut self, point: Point) {
        self.end_point = point;
        self.rebuild_path();
    }

    fn is_valid(&self) -> bool {
        self.start_point.distance(self.end_point) > 0.0
    }

    fn top_left_point(&self) -> Point {
        Point::new(
            self.start_point.x.min(self.end_point.x),
            self.start_point.y.min(self.end_point.y),
        )
    }

    fn bottom_right_point(&self) -> Point {
        Point::new(
            self.start_point.x.max(self.end_point.x),
            self.start_point.y.max(self.end_point.y),
        )
    }

    fn path(&self) -> &BezPath {
        &self.path
    }

    fn style(&self) -> &DrawingStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut DrawingStyle {
        &mut self.style
    }

    fn transform(&self) -> &DrawingTransform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut DrawingTransform {
        &mut self.transform
    }
}
