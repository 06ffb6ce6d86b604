//! 통합 테스트 공용 도우미.

#![allow(dead_code)]

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use parking_lot::Mutex;
use potscan_core::error::CoreError;
use potscan_core::models::frame::CanonicalFrame;
use potscan_core::models::ui::{DisplayPayload, NotificationKind};
use potscan_core::ports::notifier::Notifier;
use potscan_core::ports::surface::UploadSurface;
use std::io::Cursor;

/// 단색 테스트 이미지를 지정 포맷으로 인코딩
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(img).to_rgb8()),
        _ => DynamicImage::ImageRgba8(img),
    };
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

/// 받은 알림 기록
#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<(NotificationKind, String, String)>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<(NotificationKind, String, String)> {
        self.notices.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> Result<(), CoreError> {
        self.notices
            .lock()
            .push((kind, title.to_string(), message.to_string()));
        Ok(())
    }
}

/// 화면 갱신 기록
#[derive(Default)]
pub struct RecordingSurface {
    pub previews: Mutex<Vec<String>>,
    pub frames: Mutex<Vec<CanonicalFrame>>,
    pub results: Mutex<Vec<DisplayPayload>>,
    pub busy: Mutex<Vec<bool>>,
}

impl RecordingSurface {
    pub fn last_result(&self) -> Option<DisplayPayload> {
        self.results.lock().last().cloned()
    }

    pub fn last_frame(&self) -> Option<CanonicalFrame> {
        self.frames.lock().last().cloned()
    }
}

impl UploadSurface for RecordingSurface {
    fn clear_file_input(&self) {}

    fn show_empty_preview(&self, text: &str) {
        self.previews.lock().push(format!("empty:{text}"));
    }

    fn show_selected_name(&self, name: &str) {
        self.previews.lock().push(format!("selected:{name}"));
    }

    fn show_image_preview(&self, frame: &CanonicalFrame) {
        self.previews.lock().push(format!("image:{}", frame.file_name));
        self.frames.lock().push(frame.clone());
    }

    fn show_video_preview(&self, reference: &str, _media_type: &str) {
        self.previews.lock().push(format!("video:{reference}"));
    }

    fn set_analyze_label(&self, _label: &str) {}

    fn set_busy(&self, busy: bool) {
        self.busy.lock().push(busy);
    }

    fn clear_result(&self) {}

    fn show_result(&self, payload: &DisplayPayload) {
        self.results.lock().push(payload.clone());
    }
}
