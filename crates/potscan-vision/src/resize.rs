//! 고속 리사이즈.
//!
//! fast_image_resize 기반 RGBA 리사이즈. 레터박스 변환의 스케일 단계에서 사용.

use fast_image_resize::{images::Image as FirImage, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbaImage};
use potscan_core::error::CoreError;
use tracing::debug;

/// 지정 크기로 리사이즈 (비율 유지는 호출자 책임)
pub fn fast_resize(image: &DynamicImage, width: u32, height: u32) -> Result<RgbaImage, CoreError> {
    let (src_w, src_h) = (image.width(), image.height());

    if src_w == 0 || src_h == 0 {
        return Err(CoreError::Decode("소스 이미지 크기 0".to_string()));
    }
    if width == 0 || height == 0 {
        return Err(CoreError::Internal("목표 이미지 크기 0".to_string()));
    }

    let src_rgba = image.to_rgba8();

    // 동일 크기면 변환 불필요
    if src_w == width && src_h == height {
        return Ok(src_rgba);
    }

    let src_image = FirImage::from_vec_u8(
        src_w,
        src_h,
        src_rgba.into_raw(),
        fast_image_resize::PixelType::U8x4,
    )
    .map_err(|e| CoreError::Internal(format!("소스 이미지 생성 실패: {e}")))?;

    let mut dst_image = FirImage::new(width, height, fast_image_resize::PixelType::U8x4);

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(
        fast_image_resize::FilterType::Bilinear,
    ));

    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| CoreError::Internal(format!("리사이즈 실패: {e}")))?;

    let result = RgbaImage::from_raw(width, height, dst_image.into_vec())
        .ok_or_else(|| CoreError::Internal("결과 이미지 생성 실패".to_string()))?;

    debug!("리사이즈: {}x{} → {}x{}", src_w, src_h, width, height);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_image(w: u32, h: u32, color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, image::Rgba(color)))
    }

    #[test]
    fn resize_basic() {
        let img = make_test_image(1280, 720, [100, 100, 100, 255]);
        let out = fast_resize(&img, 640, 360).unwrap();
        assert_eq!(out.dimensions(), (640, 360));
    }

    #[test]
    fn upscale() {
        let img = make_test_image(48, 64, [10, 20, 30, 255]);
        let out = fast_resize(&img, 480, 640).unwrap();
        assert_eq!(out.dimensions(), (480, 640));
        assert_eq!(out.get_pixel(240, 320).0, [10, 20, 30, 255]);
    }

    #[test]
    fn same_size_noop() {
        let img = make_test_image(640, 640, [1, 2, 3, 255]);
        let out = fast_resize(&img, 640, 640).unwrap();
        assert_eq!(out.dimensions(), (640, 640));
        assert_eq!(out.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }

    #[test]
    fn zero_size_source_error() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        assert!(matches!(fast_resize(&img, 100, 100), Err(CoreError::Decode(_))));
    }

    #[test]
    fn zero_size_target_error() {
        let img = make_test_image(100, 100, [100, 100, 100, 255]);
        assert!(fast_resize(&img, 0, 100).is_err());
    }
}
