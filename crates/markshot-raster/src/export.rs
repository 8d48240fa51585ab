//! PNG and data-URL export of composited pixmaps, and base-image decoding.

use crate::RasterError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tiny_skia::{IntSize, Pixmap};

/// Encode a pixmap as PNG bytes.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RasterError> {
    // tiny-skia stores premultiplied alpha; PNG wants straight alpha
    let mut data = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
    }
    Ok(bytes)
}

/// Encode a pixmap as a `data:image/png;base64,` URL for submission.
pub fn to_data_url(pixmap: &Pixmap) -> Result<String, RasterError> {
    let bytes = encode_png(pixmap)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(bytes)))
}

/// Decode encoded image bytes (PNG/JPEG/WebP) into a pixmap.
pub fn decode_image(bytes: &[u8]) -> Result<Pixmap, RasterError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    let size =
        IntSize::from_wh(width, height).ok_or(RasterError::InvalidDimensions { width, height })?;
    // screenshots are opaque, so straight and premultiplied alpha coincide
    Pixmap::from_vec(image.into_raw(), size).ok_or(RasterError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixmap() -> Pixmap {
        let mut pixmap = Pixmap::new(64, 32).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(200, 100, 50, 255));
        pixmap
    }

    #[test]
    fn test_encode_png_round_trips() {
        let bytes = encode_png(&pixmap()).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 32);
        assert_eq!(decoded.get_pixel(0, 0).0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_decode_image_from_png_bytes() {
        let bytes = encode_png(&pixmap()).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 32);
    }

    #[test]
    fn test_data_url_prefix() {
        let url = to_data_url(&pixmap()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > "data:image/png;base64,".len());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_image(b"not an image"),
            Err(RasterError::Decode(_))
        ));
    }
}
