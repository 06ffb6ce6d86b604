//! 선택된 미디어 파일 모델.
//!
//! 사용자가 선택한 파일은 생성 후 변경되지 않으며,
//! 새 파일이 선택되거나 업로드가 끝나면 폐기된다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::CoreError;

/// 검증을 통과한 미디어 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// `image/*`
    Image,
    /// `video/*`
    Video,
}

impl MediaKind {
    /// 분석 버튼 라벨
    pub fn analyze_label(&self) -> &'static str {
        match self {
            MediaKind::Image => "Analyse Image",
            MediaKind::Video => "Analyse Video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// 미디어 검증 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaClass {
    Image,
    Video,
    Rejected,
}

impl MediaClass {
    /// 허용된 경우 미디어 종류 반환
    pub fn kind(&self) -> Option<MediaKind> {
        match self {
            MediaClass::Image => Some(MediaKind::Image),
            MediaClass::Video => Some(MediaKind::Video),
            MediaClass::Rejected => None,
        }
    }
}

/// 파일 바이트의 출처
#[derive(Debug, Clone)]
pub enum MediaSource {
    /// 디스크 경로 (읽기는 파이프라인에서 비동기로 수행)
    Path(PathBuf),
    /// 이미 메모리에 있는 바이트
    Memory(Arc<[u8]>),
}

/// 사용자가 선택한 파일
#[derive(Debug, Clone)]
pub struct SelectedFile {
    /// 원본 파일 이름
    pub name: String,
    /// 선언된 미디어 타입 (예: "image/png")
    pub declared_type: String,
    /// 바이트 출처
    pub source: MediaSource,
}

impl SelectedFile {
    /// 디스크 경로로부터 선택 파일 생성.
    ///
    /// 미디어 타입은 확장자로 추정한다 (브라우저 `File.type`과 동일한 방식).
    /// 추정할 수 없으면 `application/octet-stream`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CoreError::Validation {
                field: "path".to_string(),
                message: format!("파일 이름이 없는 경로: {}", path.display()),
            })?;
        let declared_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        Ok(Self {
            name,
            declared_type,
            source: MediaSource::Path(path.to_path_buf()),
        })
    }

    /// 메모리 바이트로 선택 파일 생성
    pub fn in_memory(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            source: MediaSource::Memory(bytes.into()),
        }
    }

    /// 파일 바이트 읽기 (비동기 중단 지점)
    pub async fn read_bytes(&self) -> Result<Arc<[u8]>, CoreError> {
        match &self.source {
            MediaSource::Memory(bytes) => Ok(Arc::clone(bytes)),
            MediaSource::Path(path) => {
                let bytes = tokio::fs::read(path).await?;
                Ok(Arc::from(bytes))
            }
        }
    }

    /// 재생/표시용 원본 참조 (비디오 미리보기용)
    pub fn reference(&self) -> String {
        match &self.source {
            MediaSource::Path(path) => format!("file://{}", path.display()),
            MediaSource::Memory(_) => format!("memory://{}", self.name),
        }
    }
}
