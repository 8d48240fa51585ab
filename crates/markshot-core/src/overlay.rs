//! Resize/move overlay mirroring the selected drawing's bounding box.
//!
//! The overlay lives in document space, outside the drawing surface's
//! coordinate system. The core tracks its geometry and drag state; the host
//! presents it (dashed border on all four sides, one circular bottom-right
//! handle) from [`ResizerView`].

use kurbo::{Point, Rect};

/// Radius of the circular corner handle, in document pixels.
pub const HANDLE_RADIUS: f64 = 5.0;
/// Offset of the handle center from the box's bottom-right corner.
pub const HANDLE_OFFSET: f64 = 12.0;
/// Hit tolerance around the handle center.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;

/// What a drag that started on the overlay manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragKind {
    #[default]
    None,
    /// Dragging the box body: move the selection.
    Body,
    /// Dragging the corner handle: resize the selection.
    Handle,
}

/// Host-renderable state of the overlay. Width and height are absolute;
/// a drag past the opposite edge mirrors the box about the affected axes
/// instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizerView {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub flip_x: bool,
    pub flip_y: bool,
}

/// Document-space rectangle with drag handles, synchronized to one
/// selected drawing. Dropped whenever the selection changes or the editor
/// is torn down.
#[derive(Debug, Clone)]
pub struct Resizer {
    x: f64,
    y: f64,
    /// Signed; negative after a drag-through resize.
    width: f64,
    /// Signed; negative after a drag-through resize.
    height: f64,
    drag: DragKind,
}

impl Resizer {
    pub fn new(bounding_box: Rect) -> Self {
        Self {
            x: bounding_box.x0,
            y: bounding_box.y0,
            width: bounding_box.width(),
            height: bounding_box.height(),
            drag: DragKind::None,
        }
    }

    /// Current presentation state.
    pub fn view(&self) -> ResizerView {
        ResizerView {
            origin: Point::new(self.x, self.y),
            width: self.width.abs(),
            height: self.height.abs(),
            flip_x: self.width < 0.0,
            flip_y: self.height < 0.0,
        }
    }

    /// Center of the corner handle, following the box through flips.
    pub fn handle_center(&self) -> Point {
        Point::new(
            self.x + self.width + HANDLE_OFFSET.copysign(self.width),
            self.y + self.height + HANDLE_OFFSET.copysign(self.height),
        )
    }

    /// Shift the overlay by a raw document-space delta.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Grow or shrink the overlay by a raw document-space delta.
    pub fn resize(&mut self, dx: f64, dy: f64) {
        self.width += dx;
        self.height += dy;
    }

    /// Classify a pointer-down. Returns true when the point lands on the
    /// handle or the box body and a drag begins; the handle wins where the
    /// two overlap.
    pub fn begin_drag(&mut self, point: Point) -> bool {
        if self.handle_center().distance(point) <= HANDLE_HIT_TOLERANCE {
            self.drag = DragKind::Handle;
            true
        } else if self.body_rect().contains(point) {
            self.drag = DragKind::Body;
            true
        } else {
            false
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = DragKind::None;
    }

    pub fn drag_kind(&self) -> DragKind {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragKind::None
    }

    fn body_rect(&self) -> Rect {
        Rect::from_points(
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y + self.height),
        )
    }
}
