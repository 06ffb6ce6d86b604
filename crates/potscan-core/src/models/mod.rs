//! POTSCAN 도메인 모델.
//!
//! 선택 파일, 정규화 프레임, 업로드 요청, 탐지 결과, UI 상태를 정의한다.

pub mod detection;
pub mod frame;
pub mod media;
pub mod ui;
