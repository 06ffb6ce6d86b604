//! 미디어 검증기.
//!
//! 선언된 미디어 타입 접두사("image/", "video/")만으로 분류한다.
//! 파일 내용은 보지 않는다.

use potscan_core::models::media::{MediaClass, SelectedFile};

/// 선택 파일 분류
pub fn validate(file: &SelectedFile) -> MediaClass {
    classify(&file.declared_type)
}

/// 미디어 타입 문자열 분류 (대소문자 무시)
pub fn classify(declared_type: &str) -> MediaClass {
    let declared = declared_type.trim().to_ascii_lowercase();
    if declared.starts_with("image/") {
        MediaClass::Image
    } else if declared.starts_with("video/") {
        MediaClass::Video
    } else {
        MediaClass::Rejected
    }
}
