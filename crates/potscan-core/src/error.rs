//! POTSCAN 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 `CoreError`를 그대로 반환한다.
//! 알림으로 노출되는 문구는 [`CoreError::user_message`]가 결정한다.

use thiserror::Error;

/// 원인을 특정할 수 없을 때 사용자에게 보여주는 기본 문구
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// 코어 레이어 에러.
/// 업로드 파이프라인의 실패 분류와 설정/직렬화 등 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 분석 요청 시 선택된 파일 없음
    #[error("선택된 파일 없음")]
    NoFileSelected,

    /// 이미지/비디오가 아닌 미디어 타입
    #[error("지원하지 않는 파일 형식: {media_type}")]
    InvalidFormat {
        /// 선언된 미디어 타입 (예: "application/pdf")
        media_type: String,
    },

    /// 이미지 디코딩 실패
    #[error("이미지 디코딩 실패: {0}")]
    Decode(String),

    /// 캔버스 재인코딩 실패 (빈 결과 포함)
    #[error("이미지 인코딩 실패: {0}")]
    Encoding(String),

    /// 네트워크 에러 (연결 실패, 요청 전송 실패)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 요청 타임아웃
    #[error("요청 타임아웃: {timeout_ms}ms 초과")]
    Timeout {
        /// 초과된 타임아웃 시간 (밀리초)
        timeout_ms: u64,
    },

    /// 백엔드가 실패를 보고함 (응답 본문의 `error` 메시지)
    #[error("백엔드 에러: {0}")]
    Backend(String),

    /// 해석할 수 없는 응답 본문
    #[error("잘못된 응답: {0}")]
    InvalidResponse(String),

    /// 더 새로운 선택에 의해 대체된 실행 (사용자에게 보고하지 않음)
    #[error("세대 {generation} 실행이 대체됨")]
    Superseded {
        /// 대체된 실행의 세대 번호
        generation: u64,
    },

    /// 이미 분석이 진행 중
    #[error("분석이 이미 진행 중")]
    AnalysisInFlight,

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 대체된 세대의 실행인지 여부 (조용히 폐기 대상)
    pub fn is_superseded(&self) -> bool {
        matches!(self, CoreError::Superseded { .. })
    }

    /// 알림에 표시할 가장 구체적인 메시지
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Backend(message) if !message.trim().is_empty() => message.clone(),
            CoreError::Timeout { timeout_ms } => {
                format!("The detection service did not respond within {timeout_ms} ms.")
            }
            CoreError::Network(detail) => {
                format!("Could not reach the detection service: {detail}")
            }
            CoreError::Decode(detail) => format!("Could not decode the image: {detail}"),
            CoreError::Encoding(detail) => format!("Could not re-encode the image: {detail}"),
            CoreError::Io(e) => format!("Could not read the selected file: {e}"),
            _ => UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }
}
