//! 업로드 오케스트레이터.
//!
//! 업로드 화면의 유일한 소유자. 상태 전이:
//!
//! ```text
//! Idle ──select──▶ FilePreview ──analyze──▶ Analyzing ──ok──▶ ResultShown
//!                     ▲   │                     │ └──err──▶ ErrorShown
//!                     └───┴──────select─────────┴──────────────┘
//! ```
//!
//! 선택마다 세대가 증가하며, 이전 세대의 디코딩/인코딩/요청은 취소되고
//! 결과는 화면에 반영되지 않는다. 분석은 한 번에 하나만 진행한다.
//!
//! 선택과 분석은 각각 동기 단계(`stage_*`)와 비동기 단계(`complete_*`)로 나뉜다.
//! 세대와 상태는 동기 단계에서 확정되므로, 비동기 단계를 별도 태스크로 돌려도
//! 호출 순서가 곧 적용 순서다.

use parking_lot::Mutex;
use potscan_core::error::CoreError;
use potscan_core::generation::{Generation, GenerationCounter};
use potscan_core::models::detection::{DetectionResponse, DetectionResult, UploadRequest};
use potscan_core::models::frame::CanonicalFrame;
use potscan_core::models::media::{MediaKind, SelectedFile};
use potscan_core::models::ui::UiState;
use potscan_core::ports::detection_client::DetectionClient;
use potscan_core::ports::normalizer::FrameNormalizer;
use potscan_core::ports::notifier::Notifier;
use potscan_core::ports::surface::UploadSurface;
use potscan_vision::validator;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::notice::{Notice, EMPTY_PREVIEW_TEXT};
use crate::presenter;

/// 선택별 정규화 프레임 슬롯.
///
/// 정규화하는 쪽이 잠금을 쥐고 있으므로, 같은 세대의 분석은 진행 중인
/// 미리보기 정규화를 기다렸다가 그 결과를 재사용한다.
type FrameSlot = Arc<tokio::sync::Mutex<Option<CanonicalFrame>>>;

/// 현재 선택 (세대에 묶임)
#[derive(Debug, Clone)]
struct Selection {
    file: SelectedFile,
    kind: MediaKind,
    generation: u64,
    frame: FrameSlot,
}

#[derive(Debug)]
struct Inner {
    state: UiState,
    selection: Option<Selection>,
}

/// 동기 단계까지 반영된 선택
#[derive(Debug)]
pub struct StagedSelection(Staged);

#[derive(Debug)]
enum Staged {
    Cleared,
    Rejected(SelectedFile),
    Accepted {
        file: SelectedFile,
        kind: MediaKind,
        generation: Generation,
        frame: FrameSlot,
    },
}

/// 동기 단계까지 반영된 분석 (시작 실패 포함)
#[derive(Debug)]
pub struct StagedAnalysis(Result<(Generation, Selection), CoreError>);

/// 업로드 상태 머신
pub struct UploadOrchestrator {
    normalizer: Arc<dyn FrameNormalizer>,
    client: Arc<dyn DetectionClient>,
    notifier: Arc<dyn Notifier>,
    surface: Arc<dyn UploadSurface>,
    generations: GenerationCounter,
    inner: Mutex<Inner>,
}

impl UploadOrchestrator {
    /// 새 오케스트레이터 생성 (Idle 상태)
    pub fn new(
        normalizer: Arc<dyn FrameNormalizer>,
        client: Arc<dyn DetectionClient>,
        notifier: Arc<dyn Notifier>,
        surface: Arc<dyn UploadSurface>,
    ) -> Self {
        surface.show_empty_preview(EMPTY_PREVIEW_TEXT);
        Self {
            normalizer,
            client,
            notifier,
            surface,
            generations: GenerationCounter::new(),
            inner: Mutex::new(Inner {
                state: UiState::Idle,
                selection: None,
            }),
        }
    }

    /// 현재 UI 상태
    pub fn state(&self) -> UiState {
        self.inner.lock().state
    }

    /// 현재 선택된 파일 이름
    pub fn selected_name(&self) -> Option<String> {
        self.inner
            .lock()
            .selection
            .as_ref()
            .map(|s| s.file.name.clone())
    }

    /// 현재 선택의 정규화 프레임 (정규화가 끝났을 때만)
    pub fn current_frame(&self) -> Option<CanonicalFrame> {
        let slot = self
            .inner
            .lock()
            .selection
            .as_ref()
            .map(|s| Arc::clone(&s.frame))?;
        let frame = slot.try_lock().ok().and_then(|cached| (*cached).clone());
        frame
    }

    /// 파일 선택 처리.
    ///
    /// 이전 선택과 진행 중인 분석을 모두 대체한다. 이미지면 미리보기 프레임을
    /// 만들어 캐시하고, 비디오면 재생 참조를 표시한다. `None`이면 선택 해제.
    pub async fn select_file(&self, file: Option<SelectedFile>) -> Result<(), CoreError> {
        let staged = self.stage_selection(file);
        self.complete_selection(staged).await
    }

    /// 선택의 동기 단계: 세대 증가, 검증, 상태/화면 반영
    pub fn stage_selection(&self, file: Option<SelectedFile>) -> StagedSelection {
        let Some(file) = file else {
            self.reset_selection();
            return StagedSelection(Staged::Cleared);
        };

        match self.accept_selection(&file) {
            Some((generation, kind, frame)) => StagedSelection(Staged::Accepted {
                file,
                kind,
                generation,
                frame,
            }),
            None => StagedSelection(Staged::Rejected(file)),
        }
    }

    /// 선택의 비동기 단계: 알림, 미리보기 생성
    pub async fn complete_selection(&self, staged: StagedSelection) -> Result<(), CoreError> {
        match staged.0 {
            Staged::Cleared => Ok(()),
            Staged::Rejected(file) => {
                warn!("지원하지 않는 파일 형식: {} ({})", file.name, file.declared_type);
                self.send(Notice::invalid_format()).await;
                Err(CoreError::InvalidFormat {
                    media_type: file.declared_type,
                })
            }
            Staged::Accepted {
                file,
                kind: MediaKind::Video,
                generation,
                ..
            } => {
                self.present_video(&file, &generation);
                Ok(())
            }
            Staged::Accepted {
                file,
                kind: MediaKind::Image,
                generation,
                frame,
            } => match self.canonical_frame(&file, &generation, &frame).await {
                Ok(frame) => self.present_frame(&frame, &generation),
                Err(e) if e.is_superseded() => {
                    debug!("세대 {} 미리보기 폐기", generation.id());
                    Err(e)
                }
                Err(e) => {
                    warn!("미리보기 생성 실패: {}: {e}", file.name);
                    if generation.is_current() {
                        self.send(Notice::preview_failed(&e)).await;
                    }
                    Err(e)
                }
            },
        }
    }

    /// 분석 요청 처리.
    ///
    /// 선택이 없으면 경고 후 상태 유지, 분석 중이면 경고 후 무시한다.
    /// 성공하면 탐지 결과를, 실패하면 알림을 보낸 뒤 원인 에러를 반환한다.
    pub async fn analyze(&self) -> Result<DetectionResult, CoreError> {
        let staged = self.stage_analysis();
        self.complete_analysis(staged).await
    }

    /// 분석의 동기 단계: Analyzing 진입 (로딩 표시 on, 이전 결과 제거)
    pub fn stage_analysis(&self) -> StagedAnalysis {
        StagedAnalysis(self.begin_analysis())
    }

    /// 분석의 비동기 단계: 요청 생성 → 전송 → 결과 반영
    pub async fn complete_analysis(
        &self,
        staged: StagedAnalysis,
    ) -> Result<DetectionResult, CoreError> {
        let (generation, selection) = match staged.0 {
            Ok(started) => started,
            Err(CoreError::AnalysisInFlight) => {
                warn!("분석 진행 중, 요청 무시");
                self.send(Notice::analysis_in_progress()).await;
                return Err(CoreError::AnalysisInFlight);
            }
            Err(CoreError::NoFileSelected) => {
                warn!("선택된 파일 없이 분석 요청");
                self.send(Notice::no_file_selected()).await;
                return Err(CoreError::NoFileSelected);
            }
            Err(e) => return Err(e),
        };

        let outcome = self.submit(&selection, &generation).await;
        self.finish(&selection, &generation, outcome).await
    }

    /// 새 세대로 선택 교체. 거부된 형식이면 화면을 비우고 `None`
    fn accept_selection(&self, file: &SelectedFile) -> Option<(Generation, MediaKind, FrameSlot)> {
        let class = validator::validate(file);
        let mut inner = self.inner.lock();
        let generation = self.generations.advance();
        self.supersede_analysis(&inner);
        self.surface.show_selected_name(&file.name);

        let Some(kind) = class.kind() else {
            self.surface.clear_file_input();
            self.surface.show_empty_preview(EMPTY_PREVIEW_TEXT);
            inner.selection = None;
            self.transition(&mut inner, UiState::Idle);
            return None;
        };

        self.surface.set_analyze_label(kind.analyze_label());
        self.surface.clear_result();
        let frame = FrameSlot::default();
        inner.selection = Some(Selection {
            file: file.clone(),
            kind,
            generation: generation.id(),
            frame: Arc::clone(&frame),
        });
        self.transition(&mut inner, UiState::FilePreview);
        Some((generation, kind, frame))
    }

    /// 현재 세대일 때만 비디오 미리보기 표시
    fn present_video(&self, file: &SelectedFile, generation: &Generation) {
        let _inner = self.inner.lock();
        if generation.is_current() {
            self.surface
                .show_video_preview(&file.reference(), &file.declared_type);
        }
    }

    /// 현재 세대일 때만 이미지 미리보기 표시
    fn present_frame(
        &self,
        frame: &CanonicalFrame,
        generation: &Generation,
    ) -> Result<(), CoreError> {
        let _inner = self.inner.lock();
        generation.ensure_current()?;
        self.surface.show_image_preview(frame);
        debug!(
            "미리보기 표시: {} ({} bytes, 세대 {})",
            frame.file_name,
            frame.byte_len(),
            generation.id()
        );
        Ok(())
    }

    fn begin_analysis(&self) -> Result<(Generation, Selection), CoreError> {
        let mut inner = self.inner.lock();
        if inner.state == UiState::Analyzing {
            return Err(CoreError::AnalysisInFlight);
        }
        let selection = inner
            .selection
            .clone()
            .ok_or(CoreError::NoFileSelected)?;

        let generation = self.generations.current();
        if generation.id() != selection.generation {
            return Err(CoreError::Superseded {
                generation: selection.generation,
            });
        }

        self.surface.set_busy(true);
        self.surface.clear_result();
        self.transition(&mut inner, UiState::Analyzing);
        Ok((generation, selection))
    }

    /// 요청 생성 → 전송 (세대가 바뀌면 중간 취소)
    async fn submit(
        &self,
        selection: &Selection,
        generation: &Generation,
    ) -> Result<DetectionResponse, CoreError> {
        let request = match selection.kind {
            MediaKind::Image => {
                let frame = self
                    .canonical_frame(&selection.file, generation, &selection.frame)
                    .await?;
                UploadRequest::image(&frame, generation.id())
            }
            MediaKind::Video => {
                let bytes = generation.guard(selection.file.read_bytes()).await?;
                UploadRequest::video(&selection.file, bytes, generation.id())
            }
        };

        info!(
            "분석 요청 전송: {} ({}, 세대 {})",
            request.file_name,
            request.kind,
            generation.id()
        );
        generation.guard(self.client.detect(&request)).await
    }

    /// 분석 종료 처리 (대체된 세대면 조용히 폐기)
    async fn finish(
        &self,
        selection: &Selection,
        generation: &Generation,
        outcome: Result<DetectionResponse, CoreError>,
    ) -> Result<DetectionResult, CoreError> {
        let (notice, result) = {
            let mut inner = self.inner.lock();
            if !generation.is_current() || inner.state != UiState::Analyzing {
                debug!("세대 {} 분석 결과 폐기", generation.id());
                return Err(CoreError::Superseded {
                    generation: generation.id(),
                });
            }
            self.surface.set_busy(false);

            match outcome {
                Ok(response) => {
                    self.surface.show_result(&presenter::render_response(&response));
                    match response {
                        DetectionResponse::Image(result) | DetectionResponse::Video(result) => {
                            self.transition(&mut inner, UiState::ResultShown);
                            info!(
                                "분석 완료: {} 심각도 {}% 객체 {}",
                                selection.file.name, result.severity, result.objects
                            );
                            (Notice::analysis_complete(), Ok(result))
                        }
                        DetectionResponse::Error(message) => {
                            self.transition(&mut inner, UiState::ErrorShown);
                            warn!("탐지 서비스 실패: {message}");
                            (
                                Notice::upload_failed(&message),
                                Err(CoreError::Backend(message)),
                            )
                        }
                    }
                }
                Err(e) if e.is_superseded() => {
                    return Err(e);
                }
                Err(e) => {
                    self.surface.show_result(&presenter::render_error(&e));
                    self.transition(&mut inner, UiState::ErrorShown);
                    warn!("분석 실패: {}: {e}", selection.file.name);
                    (Notice::upload_failed(&e.user_message()), Err(e))
                }
            }
        };

        self.send(notice).await;
        result
    }

    /// 슬롯의 프레임 재사용, 없으면 읽기 → 정규화 후 슬롯에 저장.
    ///
    /// 같은 세대에서 정규화가 진행 중이면 끝날 때까지 기다린다.
    async fn canonical_frame(
        &self,
        file: &SelectedFile,
        generation: &Generation,
        slot: &FrameSlot,
    ) -> Result<CanonicalFrame, CoreError> {
        let mut cached = generation
            .guard(async { Ok::<_, CoreError>(slot.lock().await) })
            .await?;
        if let Some(frame) = cached.as_ref() {
            debug!("정규화 프레임 재사용 (세대 {})", generation.id());
            return Ok(frame.clone());
        }

        let bytes = generation.guard(file.read_bytes()).await?;
        debug!("파일 읽기 완료: {} ({} bytes)", file.name, bytes.len());
        let frame = generation
            .guard(self.normalizer.normalize(file, bytes, generation))
            .await?;
        *cached = Some(frame.clone());
        Ok(frame)
    }

    /// 선택 해제 → Idle
    fn reset_selection(&self) {
        let mut inner = self.inner.lock();
        self.generations.advance();
        self.supersede_analysis(&inner);
        self.surface.clear_file_input();
        self.surface.show_empty_preview(EMPTY_PREVIEW_TEXT);
        inner.selection = None;
        self.transition(&mut inner, UiState::Idle);
    }

    /// 진행 중인 분석이 있으면 로딩 표시 해제
    fn supersede_analysis(&self, inner: &Inner) {
        if inner.state == UiState::Analyzing {
            info!("새 선택으로 진행 중인 분석 취소");
            self.surface.set_busy(false);
        }
    }

    fn transition(&self, inner: &mut Inner, next: UiState) {
        if inner.state != next {
            info!("상태 전이: {} → {}", inner.state, next);
        }
        inner.state = next;
    }

    /// 알림 전송 (실패는 로그만)
    async fn send(&self, notice: Notice) {
        if let Err(e) = self
            .notifier
            .notify(notice.kind, &notice.title, &notice.message)
            .await
        {
            warn!("알림 전송 실패: {e}");
        }
    }
}
