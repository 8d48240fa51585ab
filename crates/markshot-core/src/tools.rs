//! Tool dispatch: turns a start/move/end pointer sequence into a drawing.

use crate::drawings::{Arrow, Drawing, DrawingStyle, Freehand, Rectangle};
use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Drawing variants a tool can author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Rectangle,
    Arrow,
    Pen,
}

/// Errors raised when the tool state machine is driven out of order.
/// These indicate a caller bug and are never swallowed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("a drawing is already in progress")]
    AlreadyDrawing,
    #[error("no drawing is in progress")]
    NotDrawing,
}

/// Factory bound to one drawing variant, holding at most one in-progress
/// drawing while a gesture is open.
#[derive(Debug, Clone)]
pub struct Tool {
    kind: ToolKind,
    buffer: Option<Drawing>,
}

impl Tool {
    pub fn new(kind: ToolKind) -> Self {
        Self { kind, buffer: None }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    /// True while a gesture is open.
    pub fn is_drawing(&self) -> bool {
        self.buffer.is_some()
    }

    /// Begin a gesture: instantiate a fresh drawing of the bound variant and
    /// anchor it at `point`.
    pub fn start_drawing(
        &mut self,
        point: Point,
        color: Color,
        stroke_width: f64,
        stroke_scaling: f64,
    ) -> Result<(), ToolError> {
        if self.buffer.is_some() {
            return Err(ToolError::AlreadyDrawing);
        }
        let style = DrawingStyle::new(color, stroke_width, stroke_scaling);
        let mut drawing = match self.kind {
            ToolKind::Rectangle => Drawing::Rectangle(Rectangle::new(style)),
            ToolKind::Arrow => Drawing::Arrow(Arrow::new(style)),
            ToolKind::Pen => Drawing::Freehand(Freehand::new(style)),
        };
        drawing.start(point);
        self.buffer = Some(drawing);
        Ok(())
    }

    /// Forward a pointer-move to the buffered drawing.
    pub fn draw(&mut self, point: Point) -> Result<(), ToolError> {
        match self.buffer.as_mut() {
            Some(drawing) => {
                drawing.draw(point);
                Ok(())
            }
            None => Err(ToolError::NotDrawing),
        }
    }

    /// Close the gesture and hand the completed drawing to the caller, who
    /// decides whether to commit it.
    pub fn end_drawing(&mut self, point: Point) -> Result<Drawing, ToolError> {
        let mut drawing = self.buffer.take().ok_or(ToolError::NotDrawing)?;
        drawing.end(point);
        Ok(drawing)
    }

    /// Read-only peek at the in-progress drawing, for live preview.
    pub fn drawing_buffer(&self) -> Option<&Drawing> {
        self.buffer.as_ref()
    }
}
