//! 애플리케이션 설정 구조체.
//!
//! 탐지 서버 주소, 요청 타임아웃, 프레임 크기/인코딩 품질, 알림 설정 등
//! 런타임 설정을 정의한다. 파일은 [`crate::config_manager`]가 관리하고,
//! 환경변수 오버레이는 `potscan-app`에서 `config` crate로 적용한다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 탐지 서버 연결 설정
    pub server: ServerConfig,
    /// 비전(이미지 정규화) 설정
    #[serde(default)]
    pub vision: VisionConfig,
    /// 알림 설정
    #[serde(default)]
    pub notification: NotificationConfig,
}

// ============================================================
// 서버 설정
// ============================================================

/// 탐지 서버 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 서버 기본 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 탐지 엔드포인트 경로
    #[serde(default = "default_detect_path")]
    pub detect_path: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            detect_path: default_detect_path(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

// ============================================================
// 비전 설정
// ============================================================

/// 이미지 정규화 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// 정규화 프레임 한 변 길이 (픽셀)
    #[serde(default = "default_frame_size")]
    pub frame_size: u32,
    /// WebP 재인코딩 품질 (0-100)
    #[serde(default = "default_webp_quality")]
    pub webp_quality: u8,
    /// JPEG 재인코딩 품질 (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            frame_size: default_frame_size(),
            webp_quality: default_webp_quality(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

// ============================================================
// 알림 설정
// ============================================================

/// 알림 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// 알림 전체 활성화 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 성공 알림 표시 여부 (경고/에러는 항상 표시)
    #[serde(default = "default_true")]
    pub show_success: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            show_success: true,
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            vision: VisionConfig::default(),
            notification: NotificationConfig::default(),
        }
    }

    /// 서버 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }

    /// 탐지 엔드포인트 전체 URL
    pub fn detect_url(&self) -> String {
        format!(
            "{}/{}",
            self.server.base_url.trim_end_matches('/'),
            self.server.detect_path.trim_start_matches('/')
        )
    }

    /// 설정값 유효성 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.server.base_url.starts_with("http://")
            || self.server.base_url.starts_with("https://"))
        {
            return Err(CoreError::Validation {
                field: "server.base_url".to_string(),
                message: format!("http(s) URL이 아님: {}", self.server.base_url),
            });
        }
        if self.server.request_timeout_ms == 0 {
            return Err(CoreError::Validation {
                field: "server.request_timeout_ms".to_string(),
                message: "0보다 커야 함".to_string(),
            });
        }
        if self.vision.frame_size == 0 {
            return Err(CoreError::Validation {
                field: "vision.frame_size".to_string(),
                message: "0보다 커야 함".to_string(),
            });
        }
        if self.vision.webp_quality > 100 {
            return Err(CoreError::Validation {
                field: "vision.webp_quality".to_string(),
                message: format!("0-100 범위 초과: {}", self.vision.webp_quality),
            });
        }
        if self.vision.jpeg_quality == 0 || self.vision.jpeg_quality > 100 {
            return Err(CoreError::Validation {
                field: "vision.jpeg_quality".to_string(),
                message: format!("1-100 범위 초과: {}", self.vision.jpeg_quality),
            });
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_detect_path() -> String {
    "/api/detect/".to_string()
}
fn default_request_timeout_ms() -> u64 {
    60_000
}
fn default_frame_size() -> u32 {
    640
}
fn default_webp_quality() -> u8 {
    85
}
fn default_jpeg_quality() -> u8 {
    90
}
