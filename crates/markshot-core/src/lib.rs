//! Markshot Core Library
//!
//! Platform-agnostic engine for annotating a captured screenshot with vector
//! drawings (rectangles, arrows, freehand strokes), selecting and editing
//! them, and composing the result onto an output surface.

pub mod drawings;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod overlay;
pub mod surface;
pub mod tools;

pub use drawings::{Drawing, DrawingId, DrawingStyle, DrawingTransform};
pub use editor::{CursorStyle, ImageEditor, SourceImage};
pub use geometry::SurfaceMetrics;
pub use input::{KeyEvent, MouseButton, PointerEvent};
pub use overlay::{DragKind, Resizer, ResizerView};
pub use surface::{DrawSurface, FrameScheduler, FrameToken};
pub use tools::{Tool, ToolError, ToolKind};
