//! Editor controller: owns the drawings, the active tool, selection state
//! and the redraw scheduler, and wires pointer/keyboard input to them.

use crate::drawings::{Drawing, DrawingId};
use crate::geometry::{self, SurfaceMetrics};
use crate::input::{KeyEvent, MouseButton, PointerEvent};
use crate::overlay::{DragKind, Resizer};
use crate::surface::{DrawSurface, FrameScheduler, FrameToken};
use crate::tools::{Tool, ToolKind};
use kurbo::{Point, Vec2};
use peniko::Color;

/// Area divisor for the resolution-normalizing stroke scalar: a one
/// megapixel image gets scaling 1.0.
const SCALING_BASE: f64 = 1_000_000.0;

/// Width of the selection highlight outline, in surface pixels.
const SELECTION_OUTLINE_WIDTH: f64 = 2.0;

/// Default annotation stroke width.
pub const DEFAULT_STROKE_SIZE: f64 = 6.0;

fn default_color() -> Color {
    Color::from_rgba8(0x79, 0x62, 0x8c, 0xff)
}

fn selection_color() -> Color {
    Color::from_rgba8(59, 130, 246, 255)
}

/// Stroke scalar for a source image of the given pixel dimensions, so a 4K
/// screenshot's default stroke does not look hairline-thin next to a 720p
/// one.
fn resolution_scaling(width: f64, height: f64) -> f64 {
    ((width * height) / SCALING_BASE).sqrt().max(1.0)
}

/// Source image descriptor. Pixel content stays with the surface
/// implementation; the core only tracks dimensions and readiness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceImage {
    /// Native width in pixels.
    pub width: f64,
    /// Native height in pixels.
    pub height: f64,
    /// Whether decoding has finished.
    pub complete: bool,
}

impl SourceImage {
    /// An image whose dimensions are already known.
    pub fn loaded(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            complete: true,
        }
    }

    /// An image still decoding; the editor stays non-interactive until
    /// [`ImageEditor::image_loaded`] is called.
    pub fn loading() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            complete: false,
        }
    }
}

/// Pointer cursor the host should show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    /// A tool is active: drawing mode.
    Crosshair,
    /// No tool: selection/pan mode.
    Grab,
}

/// The screenshot annotation editor.
///
/// Single-threaded and event-driven: the host feeds it pointer/keyboard
/// events and calls [`render`](Self::render) when the scheduled animation
/// frame fires. Not safe to drive from multiple concurrent callers.
pub struct ImageEditor<S: FrameScheduler> {
    /// Committed drawings; insertion order is z-order.
    drawings: Vec<Drawing>,
    scheduled_frame: Option<FrameToken>,
    scheduler: S,
    metrics: SurfaceMetrics,
    image: SourceImage,
    is_interactive: bool,
    selected_drawing_id: Option<DrawingId>,
    resizer: Option<Resizer>,
    drawing_scaling: f64,
    tool: Option<Tool>,
    color: Color,
    stroke_size: f64,
    /// Last pointer position in document space, for drag deltas.
    last_pointer_position: Option<Point>,
}

impl<S: FrameScheduler> ImageEditor<S> {
    /// Create an editor for the given surface and source image. Input is
    /// ignored until the image reports ready; if it already is, the surface
    /// is sized to the image's native resolution and a first render is
    /// scheduled immediately.
    pub fn new(metrics: SurfaceMetrics, image: SourceImage, scheduler: S) -> Self {
        let mut editor = Self {
            drawings: Vec::new(),
            scheduled_frame: None,
            scheduler,
            metrics,
            image,
            is_interactive: false,
            selected_drawing_id: None,
            resizer: None,
            drawing_scaling: 1.0,
            tool: None,
            color: default_color(),
            stroke_size: DEFAULT_STROKE_SIZE,
            last_pointer_position: None,
        };
        if editor.image.complete {
            editor.activate();
        }
        editor
    }

    fn activate(&mut self) {
        self.is_interactive = true;
        self.metrics.pixel_width = self.image.width;
        self.metrics.pixel_height = self.image.height;
        self.drawing_scaling = resolution_scaling(self.image.width, self.image.height);
        log::debug!(
            "editor interactive: {}x{} image, stroke scaling {:.3}",
            self.image.width,
            self.image.height,
            self.drawing_scaling
        );
        self.schedule_redraw();
    }

    /// Signal that the source image finished decoding.
    pub fn image_loaded(&mut self, width: f64, height: f64) {
        self.image = SourceImage::loaded(width, height);
        self.activate();
    }

    /// Update the surface's on-screen placement after a host layout change.
    /// The backing resolution stays tied to the source image.
    pub fn set_viewport(&mut self, display_width: f64, display_height: f64, origin: Point) {
        self.metrics.display_width = display_width;
        self.metrics.display_height = display_height;
        self.metrics.origin = origin;
    }

    /// Install a tool, or none for selection mode. A gesture still open on
    /// the outgoing tool is force-ended and its drawing discarded.
    pub fn set_tool(&mut self, kind: Option<ToolKind>) {
        if let Some(tool) = self.tool.as_mut() {
            if tool.is_drawing() {
                let _ = tool.end_drawing(Point::ZERO);
            }
        }
        self.tool = kind.map(Tool::new);
    }

    pub fn tool_kind(&self) -> Option<ToolKind> {
        self.tool.as_ref().map(Tool::kind)
    }

    /// Set the authoring color. Applies immediately to the selected drawing
    /// if there is one.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        if self.selected_drawing_id.is_some() {
            if let Some(drawing) = self.selected_drawing_mut() {
                drawing.set_color(color);
            }
            self.schedule_redraw();
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the authoring stroke width. Applies immediately to the selected
    /// drawing if there is one.
    pub fn set_stroke_size(&mut self, stroke_size: f64) {
        self.stroke_size = stroke_size;
        if self.selected_drawing_id.is_some() {
            if let Some(drawing) = self.selected_drawing_mut() {
                drawing.set_stroke_size(stroke_size);
            }
            self.schedule_redraw();
        }
    }

    pub fn stroke_size(&self) -> f64 {
        self.stroke_size
    }

    pub fn cursor(&self) -> CursorStyle {
        if self.tool.is_some() {
            CursorStyle::Crosshair
        } else {
            CursorStyle::Grab
        }
    }

    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    pub fn selected_drawing_id(&self) -> Option<DrawingId> {
        self.selected_drawing_id
    }

    pub fn resizer(&self) -> Option<&Resizer> {
        self.resizer.as_ref()
    }

    pub fn drawing_scaling(&self) -> f64 {
        self.drawing_scaling
    }

    pub fn metrics(&self) -> &SurfaceMetrics {
        &self.metrics
    }

    pub fn is_interactive(&self) -> bool {
        self.is_interactive
    }

    /// Whether a redraw is scheduled but not yet painted.
    pub fn has_pending_frame(&self) -> bool {
        self.scheduled_frame.is_some()
    }

    /// Route a pointer event. Ignored until the source image is ready.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        if !self.is_interactive {
            return;
        }
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.handle_pointer_down(position),
            PointerEvent::Down { .. } => {}
            PointerEvent::Move { position } => self.handle_pointer_move(position),
            PointerEvent::Up { position } => self.handle_pointer_up(position),
        }
    }

    /// Route a key press. Delete/Backspace removes the selected drawing.
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        let KeyEvent::Pressed(key) = event else {
            return;
        };
        if !matches!(key.as_str(), "Delete" | "Backspace") {
            return;
        }
        let Some(id) = self.selected_drawing_id.take() else {
            return;
        };
        self.drawings.retain(|d| d.id() != id);
        self.resizer = None;
        self.schedule_redraw();
    }

    fn handle_pointer_down(&mut self, position: Point) {
        self.last_pointer_position = Some(position);

        // the overlay sits above the surface and captures its own clicks
        if let Some(resizer) = self.resizer.as_mut() {
            if resizer.begin_drag(position) {
                return;
            }
        }

        match self.tool.as_mut() {
            Some(tool) => {
                if tool.is_drawing() {
                    return;
                }
                let point = geometry::translate_pointer_event(position, &self.metrics);
                if let Err(err) =
                    tool.start_drawing(point, self.color, self.stroke_size, self.drawing_scaling)
                {
                    log::error!("failed to start drawing: {err}");
                }
                self.schedule_redraw();
            }
            None => self.handle_selection_click(position),
        }
    }

    fn handle_selection_click(&mut self, position: Point) {
        let point = geometry::translate_pointer_event(position, &self.metrics);
        let hit = self
            .drawings
            .iter()
            .rev()
            .find(|d| d.hit_test(point))
            .map(Drawing::id);
        self.selected_drawing_id = hit;
        self.resizer = None;
        if let Some(id) = hit {
            if let Some(drawing) = self.drawings.iter().find(|d| d.id() == id) {
                let document_box =
                    geometry::box_to_document_space(drawing.bounding_box(), &self.metrics);
                self.resizer = Some(Resizer::new(document_box));
            }
        }
        self.schedule_redraw();
    }

    fn handle_pointer_move(&mut self, position: Point) {
        let delta = self
            .last_pointer_position
            .map_or(Vec2::ZERO, |last| position - last);
        self.last_pointer_position = Some(position);

        let drag = self.resizer.as_ref().map_or(DragKind::None, Resizer::drag_kind);
        match drag {
            DragKind::Body => {
                if let Some(resizer) = self.resizer.as_mut() {
                    resizer.move_by(delta.x, delta.y);
                }
                let canvas_delta = geometry::translate_delta_to_canvas(delta, &self.metrics);
                if let Some(drawing) = self.selected_drawing_mut() {
                    drawing.move_by(canvas_delta);
                }
                self.schedule_redraw();
            }
            DragKind::Handle => {
                if let Some(resizer) = self.resizer.as_mut() {
                    resizer.resize(delta.x, delta.y);
                }
                let canvas_delta = geometry::translate_delta_to_canvas(delta, &self.metrics);
                if let Some(drawing) = self.selected_drawing_mut() {
                    drawing.scale_by(canvas_delta);
                }
                self.schedule_redraw();
            }
            DragKind::None => {
                let Some(tool) = self.tool.as_mut() else {
                    return;
                };
                if !tool.is_drawing() {
                    return;
                }
                let point = geometry::translate_pointer_event(position, &self.metrics);
                if let Err(err) = tool.draw(point) {
                    log::error!("failed to extend drawing: {err}");
                }
                self.schedule_redraw();
            }
        }
    }

    fn handle_pointer_up(&mut self, position: Point) {
        self.last_pointer_position = Some(position);

        if let Some(resizer) = self.resizer.as_mut() {
            resizer.end_drag();
        }

        let Some(tool) = self.tool.as_mut() else {
            return;
        };
        if !tool.is_drawing() {
            return;
        }
        let point = geometry::translate_pointer_event(position, &self.metrics);
        match tool.end_drawing(point) {
            // committed regardless of validity; an invalid drawing stays in
            // the list and renders as nothing
            Ok(drawing) => {
                log::debug!("committed drawing {}", drawing.id());
                self.drawings.push(drawing);
            }
            Err(err) => log::error!("failed to end drawing: {err}"),
        }
        self.schedule_redraw();
    }

    fn selected_drawing_mut(&mut self) -> Option<&mut Drawing> {
        let id = self.selected_drawing_id?;
        self.drawings.iter_mut().find(|d| d.id() == id)
    }

    /// Cancel any pending frame and schedule exactly one redraw on the next
    /// animation frame, coalescing bursts of input into a single paint.
    fn schedule_redraw(&mut self) {
        if let Some(token) = self.scheduled_frame.take() {
            self.scheduler.cancel_frame(token);
        }
        self.scheduled_frame = Some(self.scheduler.request_frame());
    }

    /// Paint the composed scene: base image, committed drawings in
    /// insertion order (the selected one highlighted), then the in-progress
    /// buffer. Consumes the pending frame token.
    pub fn render(&mut self, surface: &mut dyn DrawSurface) {
        self.scheduled_frame = None;
        surface.resize(self.metrics.pixel_width as u32, self.metrics.pixel_height as u32);
        surface.clear();
        surface.draw_base_image();
        for drawing in &self.drawings {
            let selected = Some(drawing.id()) == self.selected_drawing_id;
            render_drawing(surface, drawing, selected);
        }
        if let Some(buffer) = self.tool.as_ref().and_then(Tool::drawing_buffer) {
            render_drawing(surface, buffer, false);
        }
    }

    /// JSON snapshot of the committed drawings.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.drawings)
    }

    /// Replace the committed drawings from a JSON snapshot. Clears the
    /// selection.
    pub fn load_drawings(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.drawings = serde_json::from_str(json)?;
        self.selected_drawing_id = None;
        self.resizer = None;
        self.schedule_redraw();
        Ok(())
    }

    /// Tear the editor down: cancel any pending frame and discard the
    /// overlay and all drawings.
    pub fn destroy(&mut self) {
        if let Some(token) = self.scheduled_frame.take() {
            self.scheduler.cancel_frame(token);
        }
        self.resizer = None;
        self.drawings.clear();
        self.selected_drawing_id = None;
        self.tool = None;
        self.is_interactive = false;
    }
}

fn render_drawing(surface: &mut dyn DrawSurface, drawing: &Drawing, selected: bool) {
    if !drawing.is_valid() {
        return;
    }
    surface.stroke_path(
        drawing.path(),
        drawing.render_affine(),
        drawing.style().stroke(),
        drawing.style().effective_width(),
    );
    if selected {
        surface.outline_rect(
            drawing.bounding_box(),
            selection_color(),
            SELECTION_OUTLINE_WIDTH,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawSurface;
    use kurbo::{Affine, BezPath, Rect};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct SchedulerState {
        next: FrameToken,
        requested: usize,
        cancelled: usize,
    }

    #[derive(Clone, Default)]
    struct FakeScheduler(Rc<RefCell<SchedulerState>>);

    impl FakeScheduler {
        fn requested(&self) -> usize {
            self.0.borrow().requested
        }

        fn cancelled(&self) -> usize {
            self.0.borrow().cancelled
        }
    }

    impl FrameScheduler for FakeScheduler {
        fn request_frame(&mut self) -> FrameToken {
            let mut state = self.0.borrow_mut();
            state.next += 1;
            state.requested += 1;
            state.next
        }

        fn cancel_frame(&mut self, _token: FrameToken) {
            self.0.borrow_mut().cancelled += 1;
        }
    }

    #[derive(Debug, PartialEq)]
    enum Op {
        Resize(u32, u32),
        Clear,
        BaseImage,
        Stroke,
        Outline,
    }

    #[derive(Default)]
    struct RecordingSurface {
        ops: Vec<Op>,
    }

    impl DrawSurface for RecordingSurface {
        fn resize(&mut self, width: u32, height: u32) {
            self.ops.push(Op::Resize(width, height));
        }

        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn draw_base_image(&mut self) {
            self.ops.push(Op::BaseImage);
        }

        fn stroke_path(&mut self, _path: &BezPath, _transform: Affine, _color: Color, _width: f64) {
            self.ops.push(Op::Stroke);
        }

        fn outline_rect(&mut self, _rect: Rect, _color: Color, _width: f64) {
            self.ops.push(Op::Outline);
        }
    }

    fn editor() -> (ImageEditor<FakeScheduler>, FakeScheduler) {
        let _ = env_logger::builder().is_test(true).try_init();
        let scheduler = FakeScheduler::default();
        let editor = ImageEditor::new(
            SurfaceMetrics::native(2000.0, 1000.0),
            SourceImage::loaded(2000.0, 1000.0),
            scheduler.clone(),
        );
        (editor, scheduler)
    }

    fn down(editor: &mut ImageEditor<FakeScheduler>, x: f64, y: f64) {
        editor.handle_pointer_event(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    fn mv(editor: &mut ImageEditor<FakeScheduler>, x: f64, y: f64) {
        editor.handle_pointer_event(PointerEvent::Move {
            position: Point::new(x, y),
        });
    }

    fn up(editor: &mut ImageEditor<FakeScheduler>, x: f64, y: f64) {
        editor.handle_pointer_event(PointerEvent::Up {
            position: Point::new(x, y),
        });
    }

    fn draw_rectangle(editor: &mut ImageEditor<FakeScheduler>, from: (f64, f64), to: (f64, f64)) {
        editor.set_tool(Some(ToolKind::Rectangle));
        down(editor, from.0, from.1);
        mv(editor, (from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
        up(editor, to.0, to.1);
        editor.set_tool(None);
    }

    #[test]
    fn test_drawing_scaling_from_resolution() {
        let (editor, _) = editor();
        assert!((editor.drawing_scaling() - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_small_image_scaling_clamps_to_one() {
        let editor = ImageEditor::new(
            SurfaceMetrics::native(640.0, 480.0),
            SourceImage::loaded(640.0, 480.0),
            FakeScheduler::default(),
        );
        assert!((editor.drawing_scaling() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rectangle_end_to_end() {
        let (mut editor, _) = editor();
        editor.set_tool(Some(ToolKind::Rectangle));
        down(&mut editor, 10.0, 10.0);
        mv(&mut editor, 60.0, 30.0);
        up(&mut editor, 110.0, 60.0);

        assert_eq!(editor.drawings().len(), 1);
        let drawing = &editor.drawings()[0];
        assert_eq!(drawing.bounding_box(), Rect::new(10.0, 10.0, 110.0, 60.0));
        assert!(drawing.is_valid());
    }

    #[test]
    fn test_pointer_ignored_until_image_ready() {
        let mut editor = ImageEditor::new(
            SurfaceMetrics::native(0.0, 0.0),
            SourceImage::loading(),
            FakeScheduler::default(),
        );
        editor.set_tool(Some(ToolKind::Rectangle));
        down(&mut editor, 10.0, 10.0);
        up(&mut editor, 50.0, 50.0);
        assert!(editor.drawings().is_empty());

        editor.image_loaded(2000.0, 1000.0);
        assert!(editor.is_interactive());
        assert!((editor.drawing_scaling() - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((editor.metrics().pixel_width - 2000.0).abs() < f64::EPSILON);
        editor.set_viewport(2000.0, 1000.0, Point::ZERO);

        down(&mut editor, 10.0, 10.0);
        up(&mut editor, 50.0, 50.0);
        assert_eq!(editor.drawings().len(), 1);
    }

    #[test]
    fn test_click_miss_clears_selection_and_overlay() {
        let (mut editor, _) = editor();
        draw_rectangle(&mut editor, (10.0, 10.0), (110.0, 60.0));

        down(&mut editor, 10.0, 10.0);
        assert!(editor.selected_drawing_id().is_some());
        assert!(editor.resizer().is_some());
        up(&mut editor, 10.0, 10.0);

        down(&mut editor, 900.0, 900.0);
        assert!(editor.selected_drawing_id().is_none());
        assert!(editor.resizer().is_none());
    }

    #[test]
    fn test_selection_topmost_wins() {
        let (mut editor, _) = editor();
        draw_rectangle(&mut editor, (0.0, 0.0), (50.0, 50.0));
        draw_rectangle(&mut editor, (40.0, 40.0), (100.0, 100.0));
        let later = editor.drawings()[1].id();

        // on the later rectangle's top edge, inside the earlier one's
        // hit tolerance of its right edge: both hit, topmost wins
        down(&mut editor, 45.0, 40.0);
        assert_eq!(editor.selected_drawing_id(), Some(later));
    }

    #[test]
    fn test_delete_removes_selected_drawing() {
        let (mut editor, _) = editor();
        draw_rectangle(&mut editor, (10.0, 10.0), (110.0, 60.0));
        down(&mut editor, 10.0, 10.0);
        up(&mut editor, 10.0, 10.0);
        assert!(editor.selected_drawing_id().is_some());

        editor.handle_key_event(KeyEvent::Pressed("Delete".into()));
        assert!(editor.drawings().is_empty());
        assert!(editor.selected_drawing_id().is_none());
        assert!(editor.resizer().is_none());
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let (mut editor, _) = editor();
        draw_rectangle(&mut editor, (10.0, 10.0), (110.0, 60.0));

        editor.handle_key_event(KeyEvent::Pressed("Delete".into()));
        editor.handle_key_event(KeyEvent::Pressed("Backspace".into()));
        assert_eq!(editor.drawings().len(), 1);
    }

    #[test]
    fn test_unrelated_key_is_ignored() {
        let (mut editor, _) = editor();
        draw_rectangle(&mut editor, (10.0, 10.0), (110.0, 60.0));
        down(&mut editor, 10.0, 10.0);
        up(&mut editor, 10.0, 10.0);

        editor.handle_key_event(KeyEvent::Pressed("Escape".into()));
        assert_eq!(editor.drawings().len(), 1);
        assert!(editor.selected_drawing_id().is_some());
    }

    #[test]
    fn test_move_burst_coalesces_to_one_frame() {
        let (mut editor, scheduler) = editor();
        editor.set_tool(Some(ToolKind::Pen));
        down(&mut editor, 0.0, 0.0);

        let before = scheduler.requested();
        for i in 1..=20 {
            mv(&mut editor, (i * 10) as f64, 0.0);
        }
        let requested = scheduler.requested() - before;
        // every re-schedule cancelled the previous frame: one outstanding
        assert_eq!(requested, 20);
        assert!(scheduler.cancelled() >= requested - 1);
        assert!(editor.has_pending_frame());

        let mut surface = RecordingSurface::default();
        editor.render(&mut surface);
        assert!(!editor.has_pending_frame());
    }

    #[test]
    fn test_tool_switch_discards_open_gesture() {
        let (mut editor, _) = editor();
        editor.set_tool(Some(ToolKind::Arrow));
        down(&mut editor, 10.0, 10.0);
        mv(&mut editor, 50.0, 50.0);

        editor.set_tool(Some(ToolKind::Pen));
        up(&mut editor, 90.0, 90.0);
        assert!(editor.drawings().is_empty());
    }

    #[test]
    fn test_invalid_drawing_commits_but_does_not_render() {
        let (mut editor, _) = editor();
        editor.set_tool(Some(ToolKind::Rectangle));
        down(&mut editor, 40.0, 40.0);
        up(&mut editor, 40.0, 40.0);

        assert_eq!(editor.drawings().len(), 1);
        assert!(!editor.drawings()[0].is_valid());

        let mut surface = RecordingSurface::default();
        editor.render(&mut surface);
        assert_eq!(
            surface.ops,
            vec![Op::Resize(2000, 1000), Op::Clear, Op::BaseImage]
        );
    }

    #[test]
    fn test_render_order_and_selection_highlight() {
        let (mut editor, _) = editor();
        draw_rectangle(&mut editor, (10.0, 10.0), (110.0, 60.0));
        draw_rectangle(&mut editor, (200.0, 200.0), (300.0, 300.0));
        down(&mut editor, 10.0, 10.0);
        up(&mut editor, 10.0, 10.0);

        // an open gesture renders last, unhighlighted
        editor.set_tool(Some(ToolKind::Arrow));
        down(&mut editor, 400.0, 400.0);
        mv(&mut editor, 500.0, 500.0);

        let mut surface = RecordingSurface::default();
        editor.render(&mut surface);
        assert_eq!(
            surface.ops,
            vec![
                Op::Resize(2000, 1000),
                Op::Clear,
                Op::BaseImage,
                Op::Stroke,
                Op::Outline,
                Op::Stroke,
                Op::Stroke,
            ]
        );
    }

    #[test]
    fn test_set_color_applies_to_selection() {
        let (mut editor, _) = editor();
        draw_rectangle(&mut editor, (10.0, 10.0), (110.0, 60.0));
        down(&mut editor, 10.0, 10.0);
        up(&mut editor, 10.0, 10.0);

        let red = Color::from_rgba8(255, 0, 0, 255);
        editor.set_color(red);
        editor.set_stroke_size(12.0);
        let drawing = &editor.drawings()[0];
        assert_eq!(drawing.style().stroke().to_rgba8(), red.to_rgba8());
        assert!((drawing.style().stroke_width - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlay_body_drag_moves_drawing() {
        let (mut editor, _) = editor();
        draw_rectangle(&mut editor, (100.0, 100.0), (300.0, 200.0));
        // surface shown at half size: document deltas double on the canvas
        editor.set_viewport(1000.0, 500.0, Point::ZERO);

        // select by clicking the left edge; the overlay spans (50,50)-(150,100)
        down(&mut editor, 50.0, 75.0);
        up(&mut editor, 50.0, 75.0);
        assert!(editor.resizer().is_some());

        down(&mut editor, 75.0, 75.0); // inside the overlay body
        mv(&mut editor, 85.0, 80.0);
        up(&mut editor, 85.0, 80.0);

        let drawing = &editor.drawings()[0];
        assert_eq!(
            drawing.bounding_box(),
            Rect::new(120.0, 110.0, 320.0, 210.0)
        );
        // the overlay itself tracked the raw document delta
        let view = editor.resizer().unwrap().view();
        assert_eq!(view.origin, Point::new(60.0, 55.0));
    }

    #[test]
    fn test_overlay_handle_drag_scales_drawing() {
        let (mut editor, _) = editor();
        draw_rectangle(&mut editor, (100.0, 100.0), (300.0, 200.0));

        // select by clicking the left edge
        down(&mut editor, 100.0, 150.0);
        up(&mut editor, 100.0, 150.0);
        let handle = editor.resizer().unwrap().handle_center();

        down(&mut editor, handle.x, handle.y);
        mv(&mut editor, handle.x + 20.0, handle.y + 10.0);
        up(&mut editor, handle.x + 20.0, handle.y + 10.0);

        let drawing = &editor.drawings()[0];
        let t = drawing.transform();
        // (200 * 1.0 - 20) / 200 and (100 * 1.0 - 10) / 100
        assert!((t.scale_x - 0.9).abs() < 1e-12);
        assert!((t.scale_y - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_json_snapshot_round_trip() {
        let (mut editor, _) = editor();
        draw_rectangle(&mut editor, (10.0, 10.0), (110.0, 60.0));
        editor.set_tool(Some(ToolKind::Arrow));
        down(&mut editor, 0.0, 0.0);
        up(&mut editor, 50.0, 50.0);

        let json = editor.to_json().unwrap();
        let (mut other, _) = self::editor();
        other.load_drawings(&json).unwrap();
        assert_eq!(other.drawings().len(), 2);
        assert_eq!(other.drawings()[0].id(), editor.drawings()[0].id());
        assert!(other.selected_drawing_id().is_none());
    }

    #[test]
    fn test_destroy_cancels_pending_frame() {
        let (mut editor, scheduler) = editor();
        draw_rectangle(&mut editor, (10.0, 10.0), (110.0, 60.0));
        assert!(editor.has_pending_frame());

        let cancelled = scheduler.cancelled();
        editor.destroy();
        assert!(!editor.has_pending_frame());
        assert_eq!(scheduler.cancelled(), cancelled + 1);
        assert!(editor.drawings().is_empty());
        assert!(!editor.is_interactive());
    }

    #[test]
    fn test_cursor_follows_tool() {
        let (mut editor, _) = editor();
        assert_eq!(editor.cursor(), CursorStyle::Grab);
        editor.set_tool(Some(ToolKind::Pen));
        assert_eq!(editor.cursor(), CursorStyle::Crosshair);
        editor.set_tool(None);
        assert_eq!(editor.cursor(), CursorStyle::Grab);
    }
}
