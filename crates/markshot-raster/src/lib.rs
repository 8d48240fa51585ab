//! CPU raster backend for the markshot annotation editor.
//!
//! Implements the core's [`DrawSurface`](markshot_core::DrawSurface) on a
//! tiny-skia pixmap, decodes the base screenshot, and exports the composited
//! result as PNG bytes or a data URL.

mod export;
mod pixmap;

pub use export::{decode_image, encode_png, to_data_url};
pub use pixmap::PixmapSurface;

use thiserror::Error;

/// Raster backend errors.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("png encode failed: {0}")]
    Encode(#[from] png::EncodingError),
}
