//! Host abstractions consumed by the editor: the output surface and the
//! animation-frame scheduler.

use kurbo::{Affine, BezPath, Rect};
use peniko::Color;

/// Identifier for a scheduled animation frame.
pub type FrameToken = u64;

/// Schedule-once-per-frame primitive provided by the host.
///
/// The editor cancels any pending request before issuing a new one, so at
/// most one frame is outstanding at a time. Tests inject a recording fake
/// instead of relying on real frame timing.
pub trait FrameScheduler {
    /// Request a callback on the next animation frame.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancel a previously requested frame.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// A 2D output surface the editor composes onto.
///
/// The base image's pixel content is owned by the implementation; the core
/// only ever asks for it to be drawn at surface resolution.
pub trait DrawSurface {
    /// Resize the backing store to the given pixel dimensions.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear the whole surface.
    fn clear(&mut self);

    /// Draw the base image scaled to cover the full surface.
    fn draw_base_image(&mut self);

    /// Stroke a vector path under an affine transform.
    fn stroke_path(&mut self, path: &BezPath, transform: Affine, color: Color, width: f64);

    /// Outline a rectangle in surface pixels; used to highlight the
    /// selected drawing.
    fn outline_rect(&mut self, rect: Rect, color: Color, width: f64);
}
