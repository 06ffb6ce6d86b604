//! # potscan-core
//!
//! POTSCAN 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 도메인 데이터 구조체 (선택 파일, 정규화 프레임, 탐지 결과, UI 상태)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)
//! - [`generation`]: 파이프라인 실행 세대 태그 (stale 콜백 폐기용)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod generation;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::detection::{DetectionResponse, DetectionResult, ObjectSummary};
    use crate::models::media::MediaKind;

    #[test]
    fn detection_result_serde_roundtrip() {
        let result = DetectionResult {
            severity: 42.0,
            objects: ObjectSummary::Count(3),
            result_media_url: Some("/r/1.png".to_string()),
        };

        let json = serde_json::to_string(&result).unwrap();
        let deserialized: DetectionResult = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, result);
    }

    #[test]
    fn response_kind_follows_variant() {
        let result = DetectionResult {
            severity: 0.0,
            objects: ObjectSummary::Label("No pothole".to_string()),
            result_media_url: None,
        };
        assert_eq!(
            DetectionResponse::Video(result.clone()).kind(),
            Some(MediaKind::Video)
        );
        assert_eq!(
            DetectionResponse::Image(result).kind(),
            Some(MediaKind::Image)
        );
        assert_eq!(
            DetectionResponse::Error("corrupt file".to_string()).kind(),
            None
        );
    }

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.detect_path, "/api/detect/");
        assert_eq!(config.vision.frame_size, 640);
        assert!(config.notification.enabled);
    }
}
