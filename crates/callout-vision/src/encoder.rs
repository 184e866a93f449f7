//! PNG 인코더.
//!
//! 업로드 와이어 포맷은 PNG. 인코딩 실패는 내부 에러로 매핑한다.

use callout_core::error::CoreError;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// PNG 인코딩
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, CoreError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| CoreError::Internal(format!("PNG 인코딩 실패: {e}")))?;

    debug!(
        "PNG 인코딩: {}x{} → {} bytes",
        image.width(),
        image.height(),
        bytes.len()
    );

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn encode_png_basic() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            32,
            32,
            image::Rgba([200, 10, 10, 255]),
        ));
        let bytes = encode_png(&img).unwrap();
        // PNG 시그니처 확인
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn encoded_png_is_decodable() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            16,
            8,
            image::Rgba([0, 255, 0, 255]),
        ));
        let bytes = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 8);
    }
}
