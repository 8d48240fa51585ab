//! tiny-skia implementation of the editor's draw surface.

use crate::{export, RasterError};
use kurbo::{Affine, BezPath, PathEl, Rect};
use markshot_core::DrawSurface;
use peniko::Color;
use tiny_skia::{
    LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

/// Output surface backed by a CPU pixmap. Owns the decoded base screenshot;
/// the editor core only ever asks for it to be drawn.
pub struct PixmapSurface {
    pixmap: Pixmap,
    base_image: Option<Pixmap>,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RasterError::InvalidDimensions { width, height })?;
        Ok(Self {
            pixmap,
            base_image: None,
        })
    }

    /// Install an already-decoded base image.
    pub fn set_base_image(&mut self, image: Pixmap) {
        self.base_image = Some(image);
    }

    /// Decode encoded image bytes (PNG/JPEG/WebP) into the base image.
    pub fn decode_base_image(&mut self, bytes: &[u8]) -> Result<(), RasterError> {
        self.base_image = Some(export::decode_image(bytes)?);
        Ok(())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encode the composited surface as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        export::encode_png(&self.pixmap)
    }

    /// Encode the composited surface as a `data:image/png;base64,` URL.
    pub fn to_data_url(&self) -> Result<String, RasterError> {
        export::to_data_url(&self.pixmap)
    }
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32)
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

fn to_skia_transform(affine: Affine) -> Transform {
    let c = affine.as_coeffs();
    Transform::from_row(
        c[0] as f32,
        c[1] as f32,
        c[2] as f32,
        c[3] as f32,
        c[4] as f32,
        c[5] as f32,
    )
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

impl DrawSurface for PixmapSurface {
    fn resize(&mut self, width: u32, height: u32) {
        if self.pixmap.width() == width && self.pixmap.height() == height {
            return;
        }
        match Pixmap::new(width, height) {
            Some(pixmap) => self.pixmap = pixmap,
            None => log::warn!("ignoring resize to degenerate {width}x{height}"),
        }
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn draw_base_image(&mut self) {
        let Some(base) = &self.base_image else {
            return;
        };
        let sx = self.pixmap.width() as f32 / base.width() as f32;
        let sy = self.pixmap.height() as f32 / base.height() as f32;
        self.pixmap.draw_pixmap(
            0,
            0,
            base.as_ref(),
            &PixmapPaint::default(),
            Transform::from_scale(sx, sy),
            None,
        );
    }

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, color: Color, width: f64) {
        let Some(skia_path) = to_skia_path(path) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(to_skia_color(color));
        paint.anti_alias = true;
        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &skia_path,
            &paint,
            &stroke,
            to_skia_transform(transform),
            None,
        );
    }

    fn outline_rect(&mut self, rect: Rect, color: Color, width: f64) {
        let Some(skia_rect) = tiny_skia::Rect::from_ltrb(
            rect.x0 as f32,
            rect.y0 as f32,
            rect.x1 as f32,
            rect.y1 as f32,
        ) else {
            return;
        };
        let path = PathBuilder::from_rect(skia_rect);
        let mut paint = Paint::default();
        paint.set_color(to_skia_color(color));
        paint.anti_alias = true;
        let stroke = Stroke {
            width: width as f32,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}
