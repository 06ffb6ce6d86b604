//! 업로드 화면 포트.
//!
//! 파일 입력, 미리보기, 분석 버튼, 로딩 표시, 결과 영역을 묶은 단일 화면.
//! 오케스트레이터만 이 포트를 호출한다.
//!
//! 구현: `potscan-app` crate (터미널 화면)

use crate::models::frame::CanonicalFrame;
use crate::models::ui::DisplayPayload;

/// 업로드 화면
pub trait UploadSurface: Send + Sync {
    /// 파일 입력 초기화 (stale 선택 제거)
    fn clear_file_input(&self);

    /// 미리보기를 빈 상태 문구로 초기화
    fn show_empty_preview(&self, text: &str);

    /// 선택된 파일 이름 표시
    fn show_selected_name(&self, name: &str);

    /// 정규화된 이미지 미리보기 표시
    fn show_image_preview(&self, frame: &CanonicalFrame);

    /// 비디오 미리보기 표시
    fn show_video_preview(&self, reference: &str, media_type: &str);

    /// 분석 버튼 라벨 변경
    fn set_analyze_label(&self, label: &str);

    /// 로딩 표시 on/off
    fn set_busy(&self, busy: bool);

    /// 결과 영역 비우기
    fn clear_result(&self);

    /// 결과 영역에 페이로드 표시
    fn show_result(&self, payload: &DisplayPayload);
}
