//! 탐지 서비스 HTTP 클라이언트.
//!
//! `DetectionClient` 포트 구현. `file` 필드 하나짜리 multipart POST.
//! 자동 재시도는 하지 않는다. 타임아웃은 클라이언트 빌더에 건다.

use async_trait::async_trait;
use potscan_core::error::CoreError;
use potscan_core::models::detection::{DetectionResponse, UploadRequest};
use potscan_core::ports::detection_client::DetectionClient;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, warn};

use crate::response;

/// multipart 파일 필드 이름
pub const FILE_FIELD: &str = "file";

/// 탐지 서비스 클라이언트: `DetectionClient` 포트 구현
pub struct HttpDetectionClient {
    client: reqwest::Client,
    detect_url: String,
    timeout: Duration,
}

impl HttpDetectionClient {
    /// 새 탐지 클라이언트 생성
    pub fn new(detect_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        Ok(Self {
            client,
            detect_url: detect_url.to_string(),
            timeout,
        })
    }

    /// 요청 대상 URL
    pub fn detect_url(&self) -> &str {
        &self.detect_url
    }

    /// 업로드 요청 → multipart 폼
    fn build_form(request: &UploadRequest) -> Result<Form, CoreError> {
        let part = Part::bytes(request.payload.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(&request.media_type)
            .map_err(|e| CoreError::Internal(format!("잘못된 미디어 타입: {e}")))?;
        Ok(Form::new().part(FILE_FIELD, part))
    }

    /// 전송 에러 분류 (타임아웃 / 그 외 네트워크)
    fn map_transport_error(&self, e: reqwest::Error) -> CoreError {
        if e.is_timeout() {
            CoreError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            CoreError::Network(format!("탐지 요청 실패: {e}"))
        }
    }
}

#[async_trait]
impl DetectionClient for HttpDetectionClient {
    async fn detect(&self, request: &UploadRequest) -> Result<DetectionResponse, CoreError> {
        debug!(
            "탐지 요청: {} ({}, {} bytes, 세대 {})",
            request.file_name,
            request.media_type,
            request.payload.len(),
            request.generation
        );

        let form = Self::build_form(request)?;
        let resp = self
            .client
            .post(&self.detect_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.map_transport_error(e))?;

        if status.is_success() {
            let parsed = response::parse_success(request.kind, &text)?;
            debug!("탐지 응답 수신 ({status})");
            Ok(parsed)
        } else {
            warn!("탐지 서비스 실패 응답 ({status})");
            Ok(response::parse_failure(&text))
        }
    }
}
