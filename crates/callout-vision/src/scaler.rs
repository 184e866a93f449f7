//! 업로드 전 다운스케일.
//!
//! fast_image_resize 기반. 종횡비를 유지하며 목표 너비로 축소한다.
//! 원본이 이미 목표보다 좁으면 업스케일하지 않는다.

use callout_core::error::CoreError;
use fast_image_resize::{images::Image as FirImage, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbaImage};
use tracing::debug;

/// 목표 너비로 다운스케일 (종횡비 유지)
///
/// `target_width`가 0이거나 원본 너비 이상이면 원본을 그대로 반환한다.
pub fn downscale_to_width(
    image: &DynamicImage,
    target_width: u32,
) -> Result<DynamicImage, CoreError> {
    let (src_w, src_h) = (image.width(), image.height());

    if src_w == 0 || src_h == 0 {
        return Err(CoreError::Internal("소스 이미지 크기 0".to_string()));
    }
    if target_width == 0 || src_w <= target_width {
        return Ok(image.clone());
    }

    // 종횡비 유지 높이 계산 (최소 1)
    let target_height = ((target_width as u64 * src_h as u64) / src_w as u64).max(1) as u32;

    let src_rgba = image.to_rgba8();
    let src_image = FirImage::from_vec_u8(
        src_w,
        src_h,
        src_rgba.into_raw(),
        fast_image_resize::PixelType::U8x4,
    )
    .map_err(|e| CoreError::Internal(format!("소스 이미지 생성 실패: {e}")))?;

    let mut dst_image = FirImage::new(
        target_width,
        target_height,
        fast_image_resize::PixelType::U8x4,
    );

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(
        fast_image_resize::FilterType::Bilinear,
    ));

    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| CoreError::Internal(format!("리사이즈 실패: {e}")))?;

    let result = RgbaImage::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| CoreError::Internal("결과 이미지 생성 실패".to_string()))?;

    debug!(
        "다운스케일: {}x{} → {}x{}",
        src_w, src_h, target_width, target_height
    );

    Ok(DynamicImage::ImageRgba8(result))
}
