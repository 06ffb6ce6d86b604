//! UI 상태 및 표시용 데이터.
//!
//! 마크업에 독립적인 데이터만 정의한다. 실제 그리기는 `UploadSurface` 구현 몫.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 업로드 화면 상태: 항상 정확히 하나만 활성
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiState {
    /// 선택된 파일 없음
    Idle,
    /// 파일 선택됨, 미리보기 표시
    FilePreview,
    /// 분석 요청 진행 중
    Analyzing,
    /// 결과 표시
    ResultShown,
    /// 에러 표시
    ErrorShown,
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UiState::Idle => "idle",
            UiState::FilePreview => "file-preview",
            UiState::Analyzing => "analyzing",
            UiState::ResultShown => "result-shown",
            UiState::ErrorShown => "error-shown",
        };
        write!(f, "{name}")
    }
}

/// 알림 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

/// 표시할 미디어 참조
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "url", rename_all = "lowercase")]
pub enum MediaReference {
    /// 이미지 참조 (URL 또는 data URL)
    Image(String),
    /// 재생 가능한 비디오 참조
    Video(String),
}

impl MediaReference {
    /// 참조 URL
    pub fn url(&self) -> &str {
        match self {
            MediaReference::Image(url) | MediaReference::Video(url) => url,
        }
    }
}

/// 탐지 결과 표시 데이터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionView {
    /// 제목
    pub heading: String,
    /// 심각도 텍스트 (예: "42%")
    pub severity_text: String,
    /// 탐지 객체 텍스트 (예: "3")
    pub objects_text: String,
    /// 결과 미디어 (없으면 표시 생략)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaReference>,
}

/// 결과 영역에 표시할 페이로드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DisplayPayload {
    /// 탐지 성공
    Detection(DetectionView),
    /// 실패 메시지
    Failure { title: String, message: String },
}
