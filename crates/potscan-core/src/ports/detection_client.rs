//! 탐지 서비스 클라이언트 포트.
//!
//! 구현: `potscan-network` crate (reqwest multipart)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::detection::{DetectionResponse, UploadRequest};

/// 탐지 백엔드 클라이언트
#[async_trait]
pub trait DetectionClient: Send + Sync {
    /// 업로드 요청 전송 후 응답 해석.
    ///
    /// 전송 자체가 실패하면 `Err` (Network/Timeout),
    /// 백엔드가 실패를 보고하면 `Ok(DetectionResponse::Error)`.
    /// 자동 재시도는 하지 않는다.
    async fn detect(&self, request: &UploadRequest) -> Result<DetectionResponse, CoreError>;
}
