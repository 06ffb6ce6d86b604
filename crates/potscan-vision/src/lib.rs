//! # potscan-vision
//!
//! 클라이언트 사이드 이미지 정규화 크레이트.
//! 선택 파일의 미디어 타입 검증, 임의 비율 이미지를 640×640 정사각 캔버스에
//! 왜곡 없이 맞추는 레터박스 변환, 원본 포맷으로의 재인코딩을 담당한다.

pub mod encoder;
pub mod letterbox;
pub mod normalizer;
pub mod resize;
pub mod validator;
