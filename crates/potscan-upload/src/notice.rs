//! 사용자 알림 문구.

use potscan_core::error::{CoreError, UNKNOWN_ERROR_MESSAGE};
use potscan_core::models::ui::NotificationKind;

/// 미리보기 빈 상태 문구
pub const EMPTY_PREVIEW_TEXT: &str = "Drag and drop your file here";

/// 알림 한 건
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(kind: NotificationKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }

    /// 이미지/비디오가 아닌 파일 선택
    pub fn invalid_format() -> Self {
        Self::new(
            NotificationKind::Error,
            "Invalid File Format",
            "Please upload an image or video file only.",
        )
    }

    /// 파일 없이 분석 요청
    pub fn no_file_selected() -> Self {
        Self::new(
            NotificationKind::Warning,
            "No File Selected",
            "Please select an image or video before analyzing.",
        )
    }

    /// 분석 중 재요청
    pub fn analysis_in_progress() -> Self {
        Self::new(
            NotificationKind::Warning,
            "Analysis In Progress",
            "Please wait for the current analysis to finish.",
        )
    }

    /// 분석 성공
    pub fn analysis_complete() -> Self {
        Self::new(
            NotificationKind::Success,
            "Analysis Complete",
            "File processed successfully!",
        )
    }

    /// 업로드 실패 (백엔드 메시지 또는 기본 문구)
    pub fn upload_failed(message: &str) -> Self {
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE
        } else {
            message
        };
        Self::new(NotificationKind::Error, "Upload Failed", message)
    }

    /// 선택 시점 미리보기 생성 실패
    pub fn preview_failed(error: &CoreError) -> Self {
        Self::new(
            NotificationKind::Error,
            "Preview Failed",
            error.user_message(),
        )
    }
}
