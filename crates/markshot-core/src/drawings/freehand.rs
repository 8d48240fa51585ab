//! Freehand pen stroke.

use super::{DrawingId, DrawingStyle, DrawingTrait, DrawingTransform};
use crate::geometry;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A polyline stroke following the pointer.
///
/// Samples are appended to the path as they are accepted; the bounding box
/// grows incrementally with them, so `top_left_point`/`bottom_right_point`
/// read the running box rather than the two endpoint control points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Freehand {
    pub(crate) id: DrawingId,
    /// First sample of the stroke.
    pub start_point: Point,
    /// Most recent accepted sample; the final point after `end`.
    pub end_point: Point,
    pub(crate) path: BezPath,
    /// Running bounding box over all accepted samples.
    pub(crate) bounding_box: Rect,
    /// Last sample accepted into the path, for the distance filter.
    last_point: Point,
    pub style: DrawingStyle,
    pub transform: DrawingTransform,
}

impl Freehand {
    /// Minimum distance between accepted samples, in surface pixels.
    /// High-frequency pointer events closer than this are dropped.
    pub const MIN_SAMPLE_DISTANCE: f64 = 5.0;

    pub fn new(style: DrawingStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_point: Point::ZERO,
            end_point: Point::ZERO,
            path: BezPath::new(),
            bounding_box: Rect::ZERO,
            last_point: Point::ZERO,
            style,
            transform: DrawingTransform::default(),
        }
    }

    fn accept(&mut self, point: Point) {
        self.path.line_to(point);
        self.bounding_box = geometry::expand_bounding_box(self.bounding_box, &[point]);
        self.last_point = point;
        self.end_point = point;
    }
}

impl DrawingTrait for Freehand {
    fn id(&self) -> DrawingId {
        self.id
    }

    fn start(&mut self, point: Point) {
        self.start_point = point;
        self.end_point = point;
        self.last_point = point;
        self.bounding_box = geometry::bounding_box_of(&[point]);
        self.path = BezPath::new();
        self.path.move_to(point);
    }

    fn draw(&mut self, point: Point) {
        if self.last_point.distance(point) >= Self::MIN_SAMPLE_DISTANCE {
            self.accept(point);
        }
    }

    fn end(&mut self, point: Point) {
        // the stroke always terminates exactly at pointer-up
        self.accept(point);
    }

    fn is_valid(&self) -> bool {
        self.bounding_box.width() > 0.0 || self.bounding_box.height() > 0.0
    }

    fn top_left_point(&self) -> Point {
        self.bounding_box.origin()
    }

    fn bottom_right_point(&self) -> Point {
        Point::new(self.bounding_box.x1, self.bounding_box.y1)
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
