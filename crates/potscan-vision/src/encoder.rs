//! 캔버스 재인코더.
//!
//! 레터박스 캔버스를 원본 미디어 타입으로 다시 인코딩한다.
//! 인코딩할 수 없는 타입이면 PNG로 대체한다.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use potscan_core::error::CoreError;
use std::io::Cursor;
use tracing::debug;

/// PNG 대체 시 미디어 타입
pub const FALLBACK_MEDIA_TYPE: &str = "image/png";

/// 손실 포맷 품질 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    /// WebP 품질 (0-100)
    pub webp_quality: u8,
    /// JPEG 품질 (1-100)
    pub jpeg_quality: u8,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            webp_quality: 85,
            jpeg_quality: 90,
        }
    }
}

/// 인코딩 결과
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    /// 인코딩된 바이트
    pub bytes: Vec<u8>,
    /// 실제 사용된 미디어 타입
    pub media_type: String,
}

/// 출력 포맷
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Jpeg,
    WebP,
    Lossless(ImageFormat),
}

impl Target {
    /// 미디어 타입 → 출력 포맷 (없으면 PNG 대체)
    fn from_media_type(media_type: &str) -> Option<(Self, &'static str)> {
        let subtype = media_type
            .trim()
            .to_ascii_lowercase()
            .strip_prefix("image/")
            .map(str::to_string)?;
        let target = match subtype.as_str() {
            "jpeg" | "jpg" | "pjpeg" => (Target::Jpeg, "image/jpeg"),
            "webp" => (Target::WebP, "image/webp"),
            "png" => (Target::Lossless(ImageFormat::Png), "image/png"),
            "gif" => (Target::Lossless(ImageFormat::Gif), "image/gif"),
            "bmp" | "x-ms-bmp" => (Target::Lossless(ImageFormat::Bmp), "image/bmp"),
            "tiff" => (Target::Lossless(ImageFormat::Tiff), "image/tiff"),
            _ => return None,
        };
        Some(target)
    }
}

/// 캔버스를 요청된 미디어 타입으로 인코딩.
///
/// 결과가 비어 있으면 `CoreError::Encoding`.
pub fn encode_canvas(
    canvas: &RgbaImage,
    media_type: &str,
    settings: EncodeSettings,
) -> Result<EncodedFrame, CoreError> {
    let (target, resolved_type) = match Target::from_media_type(media_type) {
        Some(target) => target,
        None => {
            debug!("인코딩 불가 타입 {media_type}, PNG로 대체");
            (Target::Lossless(ImageFormat::Png), FALLBACK_MEDIA_TYPE)
        }
    };

    let bytes = match target {
        Target::Jpeg => encode_jpeg(canvas, settings.jpeg_quality)?,
        Target::WebP => encode_webp(canvas, settings.webp_quality),
        Target::Lossless(format) => encode_lossless(canvas, format)?,
    };

    let bytes = non_empty(bytes, resolved_type)?;

    let raw_size = canvas.as_raw().len().max(1);
    debug!(
        "캔버스 인코딩: {}x{} → {} bytes ({}, 압축률 {:.1}%)",
        canvas.width(),
        canvas.height(),
        bytes.len(),
        resolved_type,
        (bytes.len() as f32 / raw_size as f32) * 100.0
    );

    Ok(EncodedFrame {
        bytes,
        media_type: resolved_type.to_string(),
    })
}

/// 빈 인코딩 결과는 전송하지 않는다
fn non_empty(bytes: Vec<u8>, media_type: &str) -> Result<Vec<u8>, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Encoding(format!(
            "{media_type} 인코딩 결과가 비어 있음"
        )));
    }
    Ok(bytes)
}

/// JPEG는 알파가 없으므로 검은 배경에 합성 후 인코딩
fn encode_jpeg(canvas: &RgbaImage, quality: u8) -> Result<Vec<u8>, CoreError> {
    let flattened = flatten_on_black(canvas);
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    DynamicImage::ImageRgb8(flattened)
        .write_with_encoder(encoder)
        .map_err(|e| CoreError::Encoding(format!("JPEG: {e}")))?;
    Ok(buf)
}

fn encode_webp(canvas: &RgbaImage, quality: u8) -> Vec<u8> {
    let encoder = webp::Encoder::from_rgba(canvas, canvas.width(), canvas.height());
    encoder.encode(f32::from(quality.min(100))).to_vec()
}

fn encode_lossless(canvas: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut buf), format)
        .map_err(|e| CoreError::Encoding(format!("{format:?}: {e}")))?;
    Ok(buf)
}

/// 알파 채널을 검은 배경 위에 합성
fn flatten_on_black(canvas: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(canvas.width(), canvas.height(), |x, y| {
        let [r, g, b, a] = canvas.get_pixel(x, y).0;
        let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        image::Rgb([scale(r), scale(g), scale(b)])
    })
}
