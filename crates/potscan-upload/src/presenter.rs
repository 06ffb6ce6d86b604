//! 결과 프레젠터.
//!
//! 탐지 응답(또는 에러) → 결과 영역 표시 데이터 변환. 순수 함수.

use potscan_core::error::{CoreError, UNKNOWN_ERROR_MESSAGE};
use potscan_core::models::detection::{DetectionResponse, DetectionResult};
use potscan_core::models::media::MediaKind;
use potscan_core::models::ui::{DetectionView, DisplayPayload, MediaReference};

/// 결과 제목
pub const RESULT_HEADING: &str = "Detection Results:";

/// 실패 제목
pub const FAILURE_TITLE: &str = "Upload Failed";

/// DetectionResult → 표시 데이터
pub fn render(result: &DetectionResult, kind: MediaKind) -> DisplayPayload {
    DisplayPayload::Detection(DetectionView {
        heading: RESULT_HEADING.to_string(),
        severity_text: format_severity(result.severity),
        objects_text: result.objects.to_string(),
        media: result
            .result_media_url
            .as_ref()
            .map(|url| media_reference(url, kind)),
    })
}

/// 파싱된 응답 전체 → 표시 데이터
pub fn render_response(response: &DetectionResponse) -> DisplayPayload {
    match response {
        DetectionResponse::Image(result) => render(result, MediaKind::Image),
        DetectionResponse::Video(result) => render(result, MediaKind::Video),
        DetectionResponse::Error(message) => render_failure(message),
    }
}

/// 전송/처리 에러 → 표시 데이터
pub fn render_error(error: &CoreError) -> DisplayPayload {
    render_failure(&error.user_message())
}

fn render_failure(message: &str) -> DisplayPayload {
    let message = if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE
    } else {
        message
    };
    DisplayPayload::Failure {
        title: FAILURE_TITLE.to_string(),
        message: message.to_string(),
    }
}

/// 심각도 백분율 텍스트 (정수면 소수점 없이)
fn format_severity(severity: f64) -> String {
    format!("{severity}%")
}

fn media_reference(url: &str, kind: MediaKind) -> MediaReference {
    match kind {
        MediaKind::Image => MediaReference::Image(url.to_string()),
        MediaKind::Video => MediaReference::Video(url.to_string()),
    }
}
