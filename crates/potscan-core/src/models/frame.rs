//! 정규화 프레임(canonical frame) 모델.
//!
//! 레터박스 변환 결과. 생성 후 변경되지 않으며 선택마다 새로 만들어진다.

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 정규화 프레임 한 변의 기본 길이 (픽셀)
pub const CANONICAL_FRAME_SIZE: u32 = 640;

/// 재인코딩된 파일 이름 접두사
pub const RESIZED_PREFIX: &str = "resized_";

/// 캔버스 위에 원본이 그려진 픽셀 영역
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// 정규화 프레임 (정사각 캔버스 + 인코딩된 바이트)
#[derive(Debug, Clone)]
pub struct CanonicalFrame {
    /// 캔버스 너비
    pub width: u32,
    /// 캔버스 높이
    pub height: u32,
    /// 원본이 그려진 영역
    pub placement: Placement,
    /// 인코딩된 미디어 타입 (원본 타입, 인코딩 불가 시 "image/png")
    pub media_type: String,
    /// 업로드 파일 이름 (`resized_` 접두사)
    pub file_name: String,
    /// 인코딩된 바이트
    pub bytes: Arc<[u8]>,
}

impl CanonicalFrame {
    /// 원본 파일 이름으로 업로드 파일 이름 생성
    pub fn resized_name(original: &str) -> String {
        format!("{RESIZED_PREFIX}{original}")
    }

    /// 미리보기용 data URL
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, B64.encode(&self.bytes))
    }

    /// 인코딩된 크기 (바이트)
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}
