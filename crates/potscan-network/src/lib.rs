//! # potscan-network
//!
//! 탐지 서비스 HTTP 어댑터.
//! 정규화 프레임(이미지) 또는 원본 바이트(비디오)를 `file` 필드 하나의
//! multipart 요청으로 전송하고, 응답을 한 번만 해석하여
//! [`DetectionResponse`](potscan_core::models::detection::DetectionResponse)로 돌려준다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use potscan_network::http_client::HttpDetectionClient;
//!
//! let client = HttpDetectionClient::new(&config.detect_url(), config.request_timeout())?;
//! ```

pub mod http_client;
pub mod response;
