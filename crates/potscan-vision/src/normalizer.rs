//! 프레임 정규화기.
//!
//! `FrameNormalizer` 포트 구현. 디코딩 → 레터박스 → 재인코딩.
//! CPU 작업은 blocking 스레드에서 실행하고, 단계마다 세대를 확인한다.

use async_trait::async_trait;
use image::DynamicImage;
use potscan_core::config::VisionConfig;
use potscan_core::error::CoreError;
use potscan_core::generation::Generation;
use potscan_core::models::frame::{CanonicalFrame, Placement};
use potscan_core::models::media::SelectedFile;
use potscan_core::ports::normalizer::FrameNormalizer;
use std::sync::Arc;
use tracing::debug;

use crate::encoder::{self, EncodeSettings};
use crate::letterbox;

/// 레터박스 정규화기
#[derive(Debug, Clone)]
pub struct LetterboxNormalizer {
    frame_size: u32,
    settings: EncodeSettings,
}

impl LetterboxNormalizer {
    /// 새 정규화기 생성
    pub fn new(frame_size: u32, settings: EncodeSettings) -> Self {
        Self {
            frame_size,
            settings,
        }
    }

    /// 비전 설정으로 생성
    pub fn from_config(config: &VisionConfig) -> Self {
        Self::new(
            config.frame_size,
            EncodeSettings {
                webp_quality: config.webp_quality,
                jpeg_quality: config.jpeg_quality,
            },
        )
    }

    /// 캔버스 한 변 길이
    pub fn frame_size(&self) -> u32 {
        self.frame_size
    }

    /// 동기 버전: 바이트 → 정규화 프레임 (CLI 미리보기, 벤치마크용)
    pub fn normalize_bytes(
        &self,
        file_name: &str,
        media_type: &str,
        bytes: &[u8],
    ) -> Result<CanonicalFrame, CoreError> {
        let image = decode(bytes)?;
        let (canvas, placement) = letterbox::letterbox(&image, self.frame_size)?;
        let encoded = encoder::encode_canvas(&canvas, media_type, self.settings)?;
        Ok(self.assemble(file_name, placement, encoded))
    }

    fn assemble(
        &self,
        file_name: &str,
        placement: Placement,
        encoded: encoder::EncodedFrame,
    ) -> CanonicalFrame {
        CanonicalFrame {
            width: self.frame_size,
            height: self.frame_size,
            placement,
            media_type: encoded.media_type,
            file_name: CanonicalFrame::resized_name(file_name),
            bytes: Arc::from(encoded.bytes),
        }
    }
}

impl Default for LetterboxNormalizer {
    fn default() -> Self {
        Self::from_config(&VisionConfig::default())
    }
}

/// 바이트 → 이미지 디코딩
fn decode(bytes: &[u8]) -> Result<DynamicImage, CoreError> {
    let image = image::load_from_memory(bytes).map_err(|e| CoreError::Decode(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(CoreError::Decode(format!(
            "크기 0 이미지: {}x{}",
            image.width(),
            image.height()
        )));
    }
    Ok(image)
}

/// CPU 작업을 blocking 스레드에서 실행
async fn run_blocking<T, F>(task: F) -> Result<T, CoreError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, CoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| CoreError::Internal(format!("blocking 작업 실패: {e}")))?
}

#[async_trait]
impl FrameNormalizer for LetterboxNormalizer {
    async fn normalize(
        &self,
        file: &SelectedFile,
        bytes: Arc<[u8]>,
        generation: &Generation,
    ) -> Result<CanonicalFrame, CoreError> {
        let image = generation
            .guard(run_blocking(move || decode(&bytes)))
            .await?;
        debug!(
            "디코딩 완료: {} {}x{} (세대 {})",
            file.name,
            image.width(),
            image.height(),
            generation.id()
        );

        let frame_size = self.frame_size;
        let (canvas, placement) = generation
            .guard(run_blocking(move || letterbox::letterbox(&image, frame_size)))
            .await?;

        let media_type = file.declared_type.clone();
        let settings = self.settings;
        let encoded = generation
            .guard(run_blocking(move || {
                encoder::encode_canvas(&canvas, &media_type, settings)
            }))
            .await?;

        Ok(self.assemble(&file.name, placement, encoded))
    }
}
