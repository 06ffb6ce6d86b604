//! 대화형 세션 루프.
//!
//! stdin에서 명령을 한 줄씩 읽어 오케스트레이터에 전달한다.
//! 선택/분석은 별도 태스크로 실행하므로 분석 중에도 새 선택이 가능하다
//! (이전 세대는 오케스트레이터가 취소).

use anyhow::Result;
use potscan_core::models::media::SelectedFile;
use potscan_upload::UploadOrchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::surface::{PreviewState, TerminalSurface};

/// 세션 명령
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(PathBuf),
    Clear,
    Analyze,
    Status,
    Help,
    Quit,
}

impl Command {
    /// 입력 한 줄 해석. 빈 줄은 `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "select" | "open" => {
                if rest.is_empty() {
                    return Err("usage: select <path>".to_string());
                }
                Command::Select(PathBuf::from(unquote(rest)))
            }
            "clear" => Command::Clear,
            "analyze" | "analyse" => Command::Analyze,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {other} (type 'help')")),
        };
        Ok(Some(command))
    }
}

/// 감싼 따옴표 제거 (경로에 공백이 있을 때)
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

const HELP: &str = "\
Commands:
  select <path>   choose an image or video file
  clear           clear the current selection
  analyze         send the selected file for detection
  status          show the current state
  help            show this help
  quit            exit";

/// 세션 실행 (quit, EOF, 종료 신호 중 먼저 오는 것까지)
pub async fn run(
    orchestrator: Arc<UploadOrchestrator>,
    surface: Arc<TerminalSurface>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = shutdown_rx.changed() => {
                info!("종료 신호로 세션 종료");
                break;
            }
        };
        let Some(line) = line else {
            debug!("stdin EOF");
            break;
        };

        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => dispatch(command, &orchestrator, &surface),
            Err(message) => eprintln!("{message}"),
        }
    }

    Ok(())
}

/// 명령 실행. 선택/분석의 동기 단계는 여기서 바로 적용하고,
/// 나머지만 태스크로 넘긴다 (입력 순서 = 적용 순서).
fn dispatch(command: Command, orchestrator: &Arc<UploadOrchestrator>, surface: &TerminalSurface) {
    match command {
        Command::Select(path) => {
            let file = match SelectedFile::from_path(&path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("cannot select {}: {e}", path.display());
                    return;
                }
            };
            let staged = orchestrator.stage_selection(Some(file));
            let orchestrator = Arc::clone(orchestrator);
            tokio::spawn(async move {
                if let Err(e) = orchestrator.complete_selection(staged).await {
                    debug!("선택 처리 종료: {e}");
                }
            });
        }
        Command::Clear => {
            let staged = orchestrator.stage_selection(None);
            let orchestrator = Arc::clone(orchestrator);
            tokio::spawn(async move {
                if let Err(e) = orchestrator.complete_selection(staged).await {
                    warn!("선택 해제 실패: {e}");
                }
            });
        }
        Command::Analyze => {
            let staged = orchestrator.stage_analysis();
            let orchestrator = Arc::clone(orchestrator);
            tokio::spawn(async move {
                if let Err(e) = orchestrator.complete_analysis(staged).await {
                    debug!("분석 종료: {e}");
                }
            });
        }
        Command::Status => print_status(orchestrator, surface),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

fn print_status(orchestrator: &UploadOrchestrator, surface: &TerminalSurface) {
    let snapshot = surface.snapshot();
    println!("State: {}", orchestrator.state());
    println!(
        "File: {}",
        orchestrator.selected_name().as_deref().unwrap_or("-")
    );
    let preview = match &snapshot.preview {
        PreviewState::Empty(text) => text.clone(),
        PreviewState::Selected(name) => format!("{name} (loading)"),
        PreviewState::Image {
            file_name,
            media_type,
            width,
            height,
            bytes,
        } => format!("{file_name} {width}x{height} {media_type} ({bytes} bytes)"),
        PreviewState::Video {
            reference,
            media_type,
        } => format!("{reference} ({media_type})"),
    };
    println!("Preview: {preview}");
    if let Some(label) = snapshot.analyze_label {
        println!("Action: {label}");
    }
    if snapshot.busy {
        println!("Analyzing...");
    }
    if let Some(result) = snapshot.result {
        for line in surface.render_lines(&result) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::ConsoleNotifier;
    use potscan_core::config::{NotificationConfig, VisionConfig};
    use potscan_core::models::ui::UiState;
    use potscan_network::http_client::HttpDetectionClient;
    use potscan_vision::normalizer::LetterboxNormalizer;
    use std::time::Duration;

    fn quiet_session() -> (Arc<UploadOrchestrator>, Arc<TerminalSurface>) {
        let surface = Arc::new(TerminalSurface::with_writer(
            "http://127.0.0.1:9",
            Box::new(std::io::sink()),
        ));
        let orchestrator = Arc::new(UploadOrchestrator::new(
            Arc::new(LetterboxNormalizer::from_config(&VisionConfig::default())),
            Arc::new(
                HttpDetectionClient::new("http://127.0.0.1:9/api/detect/", Duration::from_secs(1))
                    .unwrap(),
            ),
            Arc::new(ConsoleNotifier::with_writer(
                NotificationConfig::default(),
                Box::new(std::io::sink()),
            )),
            surface.clone(),
        ));
        (orchestrator, surface)
    }

    #[tokio::test]
    async fn commands_apply_in_input_order() {
        let (orchestrator, surface) = quiet_session();

        dispatch(Command::Select(PathBuf::from("a.png")), &orchestrator, &surface);
        dispatch(Command::Select(PathBuf::from("b.png")), &orchestrator, &surface);
        // 태스크가 돌기 전에 이미 마지막 선택이 반영됨
        assert_eq!(orchestrator.selected_name().as_deref(), Some("b.png"));
        assert_eq!(orchestrator.state(), UiState::FilePreview);

        dispatch(Command::Analyze, &orchestrator, &surface);
        assert_eq!(orchestrator.state(), UiState::Analyzing);

        dispatch(Command::Clear, &orchestrator, &surface);
        assert_eq!(orchestrator.state(), UiState::Idle);
        assert!(orchestrator.selected_name().is_none());
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            Command::parse("select road.png"),
            Ok(Some(Command::Select(PathBuf::from("road.png"))))
        );
        assert_eq!(
            Command::parse("  SELECT \"my road.jpg\" "),
            Ok(Some(Command::Select(PathBuf::from("my road.jpg"))))
        );
        assert_eq!(Command::parse("analyse"), Ok(Some(Command::Analyze)));
        assert_eq!(Command::parse("status"), Ok(Some(Command::Status)));
        assert_eq!(Command::parse("clear"), Ok(Some(Command::Clear)));
        assert_eq!(Command::parse("exit"), Ok(Some(Command::Quit)));
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("select").is_err());
        assert!(Command::parse("upload x").is_err());
    }
}
