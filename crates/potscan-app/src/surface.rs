//! 터미널 업로드 화면.
//!
//! `UploadSurface` 포트 구현. 화면 갱신을 stdout 한 줄씩 출력하고,
//! `status` 명령용으로 마지막 상태를 보관한다.

use parking_lot::Mutex;
use potscan_core::models::frame::CanonicalFrame;
use potscan_core::models::ui::{DisplayPayload, MediaReference};
use potscan_core::ports::surface::UploadSurface;
use std::io::Write;
use tracing::warn;

/// 미리보기 영역 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewState {
    /// 빈 상태 문구
    Empty(String),
    /// 파일 이름만 표시 (디코딩 대기)
    Selected(String),
    /// 정규화된 이미지
    Image {
        file_name: String,
        media_type: String,
        width: u32,
        height: u32,
        bytes: usize,
    },
    /// 비디오 참조
    Video { reference: String, media_type: String },
}

/// 화면 상태 스냅샷
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSnapshot {
    pub preview: PreviewState,
    pub analyze_label: Option<String>,
    pub busy: bool,
    pub result: Option<DisplayPayload>,
}

impl Default for SurfaceSnapshot {
    fn default() -> Self {
        Self {
            preview: PreviewState::Empty(String::new()),
            analyze_label: None,
            busy: false,
            result: None,
        }
    }
}

/// 터미널 화면: `UploadSurface` 포트 구현
pub struct TerminalSurface {
    base_url: String,
    snapshot: Mutex<SurfaceSnapshot>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalSurface {
    /// stdout 출력 화면 생성. 상대 결과 URL은 `base_url` 기준으로 해석한다.
    pub fn new(base_url: &str) -> Self {
        Self::with_writer(base_url, Box::new(std::io::stdout()))
    }

    pub fn with_writer(base_url: &str, out: Box<dyn Write + Send>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            snapshot: Mutex::new(SurfaceSnapshot::default()),
            out: Mutex::new(out),
        }
    }

    /// 현재 화면 상태
    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.snapshot.lock().clone()
    }

    /// 결과 미디어 URL 해석 (절대 URL, data URL은 그대로)
    pub fn resolve_url(&self, url: &str) -> String {
        if url.contains("://") || url.starts_with("data:") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }

    /// 결과 페이로드 → 출력 줄
    pub fn render_lines(&self, payload: &DisplayPayload) -> Vec<String> {
        match payload {
            DisplayPayload::Detection(view) => {
                let mut lines = vec![
                    view.heading.clone(),
                    format!("  Severity: {}", view.severity_text),
                    format!("  Objects Detected: {}", view.objects_text),
                ];
                match &view.media {
                    Some(MediaReference::Image(url)) => {
                        lines.push(format!("  Image: {}", self.resolve_url(url)));
                    }
                    Some(MediaReference::Video(url)) => {
                        lines.push(format!("  Video: {}", self.resolve_url(url)));
                    }
                    None => {}
                }
                lines
            }
            DisplayPayload::Failure { title, message } => vec![format!("{title}: {message}")],
        }
    }

    fn emit(&self, line: &str) {
        let mut out = self.out.lock();
        if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
            warn!("화면 출력 실패: {e}");
        }
    }
}

impl UploadSurface for TerminalSurface {
    fn clear_file_input(&self) {
        self.snapshot.lock().analyze_label = None;
    }

    fn show_empty_preview(&self, text: &str) {
        self.snapshot.lock().preview = PreviewState::Empty(text.to_string());
        self.emit(&format!("[preview] {text}"));
    }

    fn show_selected_name(&self, name: &str) {
        self.snapshot.lock().preview = PreviewState::Selected(name.to_string());
        self.emit(&format!("Selected: {name}"));
    }

    fn show_image_preview(&self, frame: &CanonicalFrame) {
        self.snapshot.lock().preview = PreviewState::Image {
            file_name: frame.file_name.clone(),
            media_type: frame.media_type.clone(),
            width: frame.width,
            height: frame.height,
            bytes: frame.byte_len(),
        };
        let p = frame.placement;
        self.emit(&format!(
            "[preview] {} {}x{} ({}, {} bytes, content {}x{} at {},{})",
            frame.file_name,
            frame.width,
            frame.height,
            frame.media_type,
            frame.byte_len(),
            p.width,
            p.height,
            p.x,
            p.y
        ));
    }

    fn show_video_preview(&self, reference: &str, media_type: &str) {
        self.snapshot.lock().preview = PreviewState::Video {
            reference: reference.to_string(),
            media_type: media_type.to_string(),
        };
        self.emit(&format!("[preview] {reference} ({media_type})"));
    }

    fn set_analyze_label(&self, label: &str) {
        self.snapshot.lock().analyze_label = Some(label.to_string());
        self.emit(&format!("[action] {label}"));
    }

    fn set_busy(&self, busy: bool) {
        self.snapshot.lock().busy = busy;
        if busy {
            self.emit("Analyzing...");
        }
    }

    fn clear_result(&self) {
        self.snapshot.lock().result = None;
    }

    fn show_result(&self, payload: &DisplayPayload) {
        self.snapshot.lock().result = Some(payload.clone());
        for line in self.render_lines(payload) {
            self.emit(&line);
        }
    }
}
