//! Rectangle annotation.

use super::{DrawingId, DrawingStyle, DrawingTrait, DrawingTransform};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle outline spanning two diagonal corners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: DrawingId,
    /// Anchor corner recorded on pointer-down.
    pub start_point: Point,
    /// Opposite corner, tracking the pointer.
    pub end_point: Point,
    /// Outline path, rebuilt from the control points on every authoring step.
    pub(crate) path: BezPath,
    pub style: DrawingStyle,
    pub transform: DrawingTransform,
}

impl Rectangle {
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
        let rect = Rect::from_points(self.start_point, self.end_point);
        self.path = rect.to_path(0.1);
    }
}

impl DrawingTrait for Rectangle {
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
