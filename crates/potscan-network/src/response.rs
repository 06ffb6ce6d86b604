//! 탐지 응답 본문 해석.
//!
//! 백엔드 JSON은 응답 파싱 시점에 한 번만 태그드 유니온으로 변환한다.
//! 성공 본문: `{ severity, objects, image_url?, video_url? }`
//! 실패 본문: `{ error }` (그 외 형태는 기본 문구)

use potscan_core::error::{CoreError, UNKNOWN_ERROR_MESSAGE};
use potscan_core::models::detection::{DetectionResponse, DetectionResult, ObjectSummary};
use potscan_core::models::media::MediaKind;
use serde::Deserialize;

/// 백엔드 응답 본문 (모든 필드 선택적)
#[derive(Debug, Deserialize)]
struct DetectResponseBody {
    #[serde(default)]
    severity: Option<f64>,
    #[serde(default)]
    objects: Option<ObjectSummary>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// 성공 상태 코드의 본문 해석.
///
/// `error` 필드가 있으면 백엔드 실패로 본다. 결과 미디어 URL은 제출 종류에 맞는
/// 필드를 우선하고, 없으면 다른 필드를 쓴다.
pub fn parse_success(kind: MediaKind, body: &str) -> Result<DetectionResponse, CoreError> {
    let parsed: DetectResponseBody = serde_json::from_str(body)
        .map_err(|e| CoreError::InvalidResponse(format!("JSON 파싱 실패: {e}")))?;

    if let Some(message) = parsed.error.filter(|m| !m.trim().is_empty()) {
        return Ok(DetectionResponse::Error(message));
    }

    let severity = parsed
        .severity
        .ok_or_else(|| CoreError::InvalidResponse("severity 필드 없음".to_string()))?;
    let objects = parsed
        .objects
        .ok_or_else(|| CoreError::InvalidResponse("objects 필드 없음".to_string()))?;

    let (primary, secondary) = match kind {
        MediaKind::Image => (parsed.image_url, parsed.video_url),
        MediaKind::Video => (parsed.video_url, parsed.image_url),
    };
    let result = DetectionResult {
        severity,
        objects,
        result_media_url: primary.or(secondary).filter(|url| !url.is_empty()),
    };

    Ok(match kind {
        MediaKind::Image => DetectionResponse::Image(result),
        MediaKind::Video => DetectionResponse::Video(result),
    })
}

/// 실패 상태 코드의 본문 해석: 항상 `DetectionResponse::Error`
pub fn parse_failure(body: &str) -> DetectionResponse {
    let message = serde_json::from_str::<DetectResponseBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());
    DetectionResponse::Error(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_success_ignores_video_url() {
        let response = parse_success(
            MediaKind::Image,
            r#"{"severity": 42, "objects": 3, "image_url": "/r/1.png"}"#,
        )
        .unwrap();
        assert_eq!(
            response,
            DetectionResponse::Image(DetectionResult {
                severity: 42.0,
                objects: ObjectSummary::Count(3),
                result_media_url: Some("/r/1.png".to_string()),
            })
        );
    }

    #[test]
    fn video_success_prefers_video_url() {
        let response = parse_success(
            MediaKind::Video,
            r#"{"severity": 12.5, "objects": 1, "image_url": "/r/frame.png", "video_url": "/r/out.mp4"}"#,
        )
        .unwrap();
        let result = response.result().unwrap();
        assert_eq!(response.kind(), Some(MediaKind::Video));
        assert_eq!(result.result_media_url.as_deref(), Some("/r/out.mp4"));
    }

    #[test]
    fn label_objects_and_missing_url() {
        let response = parse_success(
            MediaKind::Image,
            r#"{"severity": 0, "objects": "No pothole detected", "image_url": null}"#,
        )
        .unwrap();
        let result = response.result().unwrap();
        assert_eq!(
            result.objects,
            ObjectSummary::Label("No pothole detected".to_string())
        );
        assert_eq!(result.result_media_url, None);
    }

    #[test]
    fn error_field_on_success_status() {
        let response = parse_success(MediaKind::Image, r#"{"error": "corrupt file"}"#).unwrap();
        assert_eq!(response, DetectionResponse::Error("corrupt file".to_string()));
    }

    #[test]
    fn malformed_success_body() {
        assert!(matches!(
            parse_success(MediaKind::Image, "<html>"),
            Err(CoreError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_success(MediaKind::Image, r#"{"objects": 3}"#),
            Err(CoreError::InvalidResponse(_))
        ));
    }

    #[test]
    fn failure_body_shapes() {
        assert_eq!(
            parse_failure(r#"{"error": "corrupt file"}"#),
            DetectionResponse::Error("corrupt file".to_string())
        );
        assert_eq!(
            parse_failure("Internal Server Error"),
            DetectionResponse::Error(UNKNOWN_ERROR_MESSAGE.to_string())
        );
        assert_eq!(
            parse_failure(r#"{"detail": "nope"}"#),
            DetectionResponse::Error(UNKNOWN_ERROR_MESSAGE.to_string())
        );
    }
}
