//! # potscan-upload
//!
//! 업로드 파이프라인.
//! 파일 선택 → 검증 → (이미지: 디코딩 → 레터박스 → 재인코딩) → 전송 → 결과 표시를
//! 명시적 상태 머신으로 조율한다. 오래된 세대의 비동기 결과는 버린다.

pub mod notice;
pub mod orchestrator;
pub mod presenter;

pub use orchestrator::UploadOrchestrator;
