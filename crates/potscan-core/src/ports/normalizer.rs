//! 프레임 정규화 포트.
//!
//! 구현: `potscan-vision` crate (image, fast_image_resize, webp)

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CoreError;
use crate::generation::Generation;
use crate::models::frame::CanonicalFrame;
use crate::models::media::SelectedFile;

/// 이미지 → 정규화 프레임 변환기
#[async_trait]
pub trait FrameNormalizer: Send + Sync {
    /// 디코딩 → 레터박스 → 재인코딩을 순서대로 실행.
    ///
    /// 각 단계 사이에서 `generation`이 대체되었으면
    /// `CoreError::Superseded`로 중단한다.
    async fn normalize(
        &self,
        file: &SelectedFile,
        bytes: Arc<[u8]>,
        generation: &Generation,
    ) -> Result<CanonicalFrame, CoreError>;
}
