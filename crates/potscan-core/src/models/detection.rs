//! 업로드 요청 및 탐지 결과 모델.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::frame::CanonicalFrame;
use super::media::{MediaKind, SelectedFile};

/// 탐지 서비스로 보내는 업로드 요청.
///
/// 분석 요청마다 한 번 생성되어 정확히 한 번 전송된다.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// 제출 미디어 종류
    pub kind: MediaKind,
    /// multipart 파일 이름
    pub file_name: String,
    /// multipart 파트 미디어 타입
    pub media_type: String,
    /// 전송할 바이트 (이미지: 정규화 프레임, 비디오: 원본)
    pub payload: Arc<[u8]>,
    /// 요청을 만든 파이프라인 세대
    pub generation: u64,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
}

impl UploadRequest {
    /// 정규화 프레임으로 이미지 요청 생성
    pub fn image(frame: &CanonicalFrame, generation: u64) -> Self {
        Self {
            kind: MediaKind::Image,
            file_name: frame.file_name.clone(),
            media_type: frame.media_type.clone(),
            payload: Arc::clone(&frame.bytes),
            generation,
            created_at: Utc::now(),
        }
    }

    /// 원본 바이트 그대로 비디오 요청 생성
    pub fn video(file: &SelectedFile, bytes: Arc<[u8]>, generation: u64) -> Self {
        Self {
            kind: MediaKind::Video,
            file_name: file.name.clone(),
            media_type: file.declared_type.clone(),
            payload: bytes,
            generation,
            created_at: Utc::now(),
        }
    }
}

/// 탐지된 객체 요약.
///
/// 정수 개수가 기본이며, 라벨 문자열("Pothole", "No pothole detected")을
/// 보내는 백엔드도 허용한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectSummary {
    Count(u64),
    Label(String),
}

impl fmt::Display for ObjectSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectSummary::Count(n) => write!(f, "{n}"),
            ObjectSummary::Label(label) => write!(f, "{label}"),
        }
    }
}

/// 성공한 탐지 결과 (불변)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// 심각도 (백분율)
    pub severity: f64,
    /// 탐지 객체 요약
    pub objects: ObjectSummary,
    /// 주석 처리된 결과 미디어 URL (탐지 없음이면 None일 수 있음)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_media_url: Option<String>,
}

/// 응답 파싱 시 한 번 결정되는 태그드 유니온
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionResponse {
    /// 이미지 제출에 대한 결과 (`image_url`)
    Image(DetectionResult),
    /// 비디오 제출에 대한 결과 (`video_url`)
    Video(DetectionResult),
    /// 백엔드가 보고한 실패 메시지
    Error(String),
}

impl DetectionResponse {
    /// 결과 미디어 종류 (에러면 None)
    pub fn kind(&self) -> Option<MediaKind> {
        match self {
            DetectionResponse::Image(_) => Some(MediaKind::Image),
            DetectionResponse::Video(_) => Some(MediaKind::Video),
            DetectionResponse::Error(_) => None,
        }
    }

    /// 성공 결과 참조
    pub fn result(&self) -> Option<&DetectionResult> {
        match self {
            DetectionResponse::Image(r) | DetectionResponse::Video(r) => Some(r),
            DetectionResponse::Error(_) => None,
        }
    }
}
