//! 레터박스 변환.
//!
//! 임의 비율 이미지를 정사각 캔버스에 왜곡 없이 맞춘다.
//! 긴 변이 캔버스 한 변에 맞춰지고, 짧은 변은 비율대로 축소되어
//! 양쪽에 같은 여백을 두고 중앙에 놓인다. 여백은 투명(0,0,0,0)으로 남는다.

use image::{imageops, DynamicImage, RgbaImage};
use potscan_core::error::CoreError;
use potscan_core::models::frame::Placement;
use tracing::debug;

use crate::resize;

/// 레터박스 배치 (실수 좌표, 캔버스 그리기 기준)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterboxGeometry {
    /// 캔버스 한 변 길이
    pub frame_size: u32,
    /// 스케일된 너비
    pub new_width: f64,
    /// 스케일된 높이
    pub new_height: f64,
    /// 가로 여백 (왼쪽)
    pub offset_x: f64,
    /// 세로 여백 (위쪽)
    pub offset_y: f64,
}

impl LetterboxGeometry {
    /// 원본 크기로부터 배치 계산.
    ///
    /// - 비율 ≥ 1 (가로형/정사각): 너비 = 캔버스, 높이 = 캔버스 / 비율
    /// - 비율 < 1 (세로형): 높이 = 캔버스, 너비 = 캔버스 × 비율
    pub fn compute(src_width: u32, src_height: u32, frame_size: u32) -> Result<Self, CoreError> {
        if src_width == 0 || src_height == 0 {
            return Err(CoreError::Decode(format!(
                "크기 0 이미지: {src_width}x{src_height}"
            )));
        }
        if frame_size == 0 {
            return Err(CoreError::Internal("캔버스 크기 0".to_string()));
        }

        let size = f64::from(frame_size);
        let aspect = f64::from(src_width) / f64::from(src_height);
        let (new_width, new_height) = if aspect >= 1.0 {
            (size, size / aspect)
        } else {
            (size * aspect, size)
        };

        Ok(Self {
            frame_size,
            new_width,
            new_height,
            offset_x: (size - new_width) / 2.0,
            offset_y: (size - new_height) / 2.0,
        })
    }

    /// 픽셀 격자에 맞춘 배치 영역.
    ///
    /// 크기는 반올림(최소 1픽셀), 여백은 남은 공간을 양쪽에 균등 분배한다.
    pub fn placement(&self) -> Placement {
        let width = pixel_extent(self.new_width, self.frame_size);
        let height = pixel_extent(self.new_height, self.frame_size);
        Placement {
            x: (self.frame_size - width) / 2,
            y: (self.frame_size - height) / 2,
            width,
            height,
        }
    }

    /// 여백이 없는지 (정사각 원본)
    pub fn is_unpadded(&self) -> bool {
        self.offset_x == 0.0 && self.offset_y == 0.0
    }
}

fn pixel_extent(value: f64, frame_size: u32) -> u32 {
    (value.round() as u32).clamp(1, frame_size)
}

/// 디코딩된 이미지를 정사각 캔버스에 레터박스로 그린다
pub fn letterbox(image: &DynamicImage, frame_size: u32) -> Result<(RgbaImage, Placement), CoreError> {
    let geometry = LetterboxGeometry::compute(image.width(), image.height(), frame_size)?;
    let placement = geometry.placement();

    let scaled = resize::fast_resize(image, placement.width, placement.height)?;

    let mut canvas = RgbaImage::new(frame_size, frame_size);
    imageops::replace(
        &mut canvas,
        &scaled,
        i64::from(placement.x),
        i64::from(placement.y),
    );

    debug!(
        "레터박스: {}x{} → {}x{} @ ({}, {}) 캔버스 {}",
        image.width(),
        image.height(),
        placement.width,
        placement.height,
        placement.x,
        placement.y,
        frame_size
    );

    Ok((canvas, placement))
}
