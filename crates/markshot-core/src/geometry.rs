//! Geometry kernel: pure coordinate math shared by the editor.
//!
//! Everything here operates on kurbo value types and owns no state. All
//! arithmetic is `f64`; rounding to integer pixels happens only at the
//! pointer-translation boundary, never internally.

use kurbo::{BezPath, PathEl, Point, Rect, Vec2};

/// Tolerance used when flattening Bézier paths for distance queries.
const FLATTEN_TOLERANCE: f64 = 0.25;

/// Rotate a vector by `angle` radians (counter-clockwise in y-down space).
pub fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Axis-aligned bounding box of a point set via min/max reduction.
///
/// An empty slice yields [`Rect::ZERO`].
pub fn bounding_box_of(points: &[Point]) -> Rect {
    let Some((first, rest)) = points.split_first() else {
        return Rect::ZERO;
    };
    rest.iter()
        .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
}

/// Grow a bounding box to also cover `points`, keeping the box's own two
/// extremal corners. Lets a freehand stroke's box expand incrementally
/// without rescanning every prior sample.
pub fn expand_bounding_box(rect: Rect, points: &[Point]) -> Rect {
    points.iter().fold(rect, |rect, p| rect.union_pt(*p))
}

/// Describes the output surface: its backing resolution in physical pixels,
/// and its on-screen (document) size and origin. Backing resolution and
/// on-screen size differ under device pixel ratio or responsive scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    /// Backing-store width in physical pixels.
    pub pixel_width: f64,
    /// Backing-store height in physical pixels.
    pub pixel_height: f64,
    /// On-screen width of the surface.
    pub display_width: f64,
    /// On-screen height of the surface.
    pub display_height: f64,
    /// On-screen position of the surface's top-left corner.
    pub origin: Point,
}

impl SurfaceMetrics {
    /// Metrics for a surface displayed at its native resolution with its
    /// top-left corner at the document origin.
    pub fn native(width: f64, height: f64) -> Self {
        Self {
            pixel_width: width,
            pixel_height: height,
            display_width: width,
            display_height: height,
            origin: Point::ZERO,
        }
    }
}

/// Per-axis ratio between the surface's backing resolution and its
/// on-screen size.
pub fn screen_to_canvas_ratio(metrics: &SurfaceMetrics) -> Vec2 {
    Vec2::new(
        metrics.pixel_width / metrics.display_width,
        metrics.pixel_height / metrics.display_height,
    )
}

/// Map a pointer position from document space into surface-pixel space,
/// rounded to the nearest integer pixel.
pub fn translate_pointer_event(position: Point, metrics: &SurfaceMetrics) -> Point {
    let ratio = screen_to_canvas_ratio(metrics);
    Point::new(
        ((position.x - metrics.origin.x) * ratio.x).round(),
        ((position.y - metrics.origin.y) * ratio.y).round(),
    )
}

/// Scale a document-space pointer delta into surface pixels, unrounded.
pub fn translate_delta_to_canvas(delta: Vec2, metrics: &SurfaceMetrics) -> Vec2 {
    let ratio = screen_to_canvas_ratio(metrics);
    Vec2::new(delta.x * ratio.x, delta.y * ratio.y)
}

/// Map a surface-pixel rectangle back into document space. Used to position
/// the resize overlay, which lives outside the drawing surface.
pub fn box_to_document_space(rect: Rect, metrics: &SurfaceMetrics) -> Rect {
    let ratio = screen_to_canvas_ratio(metrics);
    Rect::new(
        metrics.origin.x + rect.x0 / ratio.x,
        metrics.origin.y + rect.y0 / ratio.y,
        metrics.origin.x + rect.x1 / ratio.x,
        metrics.origin.y + rect.y1 / ratio.y,
    )
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}

/// Minimum distance from a point to a path, measured against the path's
/// flattened line segments.
pub fn point_to_path_dist(point: Point, path: &BezPath) -> f64 {
    let mut best = f64::INFINITY;
    let mut cursor: Option<Point> = None;
    let mut subpath_start: Option<Point> = None;
    kurbo::flatten(path.iter(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            best = best.min(point.distance(p));
            cursor = Some(p);
            subpath_start = Some(p);
        }
        PathEl::LineTo(p) => {
            if let Some(from) = cursor {
                best = best.min(point_to_segment_dist(point, from, p));
            }
            cursor = Some(p);
        }
        PathEl::ClosePath => {
            if let (Some(from), Some(start)) = (cursor, subpath_start) {
                best = best.min(point_to_segment_dist(point, from, start));
            }
            cursor = subpath_start;
        }
        // flatten only emits moves, lines and closes
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    best
}
