//! # potscan
//!
//! 포트홀 탐지 클라이언트 바이너리 진입점.
//! DI 와이어링, CLI, 설정 계층, 라이프사이클 관리.

mod lifecycle;
mod notifier;
mod session;
mod settings;
mod surface;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use potscan_core::config::AppConfig;
use potscan_core::config_manager::ConfigManager;
use potscan_core::models::media::SelectedFile;
use potscan_network::http_client::HttpDetectionClient;
use potscan_upload::UploadOrchestrator;
use potscan_vision::normalizer::LetterboxNormalizer;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;
use crate::notifier::ConsoleNotifier;
use crate::settings::Overrides;
use crate::surface::TerminalSurface;

/// POTSCAN 포트홀 탐지 클라이언트
///
/// 이미지를 정사각 프레임으로 레터박스 정규화한 뒤 탐지 서비스에 업로드한다.
#[derive(Parser, Debug)]
#[command(name = "potscan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 서버 URL 지정 (기본: http://localhost:8000)
    #[arg(long, short = 's', global = true)]
    server: Option<String>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    log_level: String,

    /// 요청 타임아웃 (밀리초)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 파일 하나를 선택해 분석하고 결과 출력
    Analyze {
        /// 이미지 또는 비디오 파일
        file: PathBuf,
    },
    /// 정규화 프레임만 생성해 저장
    Preview {
        /// 이미지 파일
        file: PathBuf,
        /// 저장 경로 (기본: 데이터 디렉토리의 previews/)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// 대화형 세션 (select / analyze / status / quit)
    Session,
    /// 설정 파일 관리
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// 적용된 설정 출력 (파일 + 환경변수 + CLI)
    Show,
    /// 설정 파일 경로 출력
    Path,
    /// 기본 설정 파일 생성
    Init {
        /// 기존 파일을 기본값으로 덮어쓰기
        #[arg(long)]
        force: bool,
    },
}

/// 미리보기 저장 경로 결정 (CLI 인자 또는 플랫폼별 기본 경로)
///
/// # 플랫폼별 기본 경로:
/// - macOS: `~/Library/Application Support/com.potscan.potscan/previews/`
/// - Windows: `%APPDATA%\potscan\potscan\data\previews\`
/// - Linux: `~/.local/share/potscan/previews/`
fn resolve_preview_path(out: Option<&Path>, file_name: &str) -> PathBuf {
    out.map(Path::to_path_buf).unwrap_or_else(|| {
        ProjectDirs::from("com", "potscan", "potscan")
            .map(|p| p.data_dir().join("previews"))
            .unwrap_or_else(|| PathBuf::from("./previews"))
            .join(file_name)
    })
}

/// 설정 로드 + 어댑터 생성 (DI 와이어링)
struct App {
    orchestrator: Arc<UploadOrchestrator>,
    surface: Arc<TerminalSurface>,
}

impl App {
    fn wire(config: &AppConfig) -> Result<Self> {
        let normalizer = Arc::new(LetterboxNormalizer::from_config(&config.vision));
        let client = Arc::new(
            HttpDetectionClient::new(&config.detect_url(), config.request_timeout())
                .map_err(|e| anyhow!("탐지 클라이언트 생성 실패: {e}"))?,
        );
        let notifier = Arc::new(ConsoleNotifier::new(config.notification.clone()));
        let surface = Arc::new(TerminalSurface::new(&config.server.base_url));

        info!("탐지 엔드포인트: {}", client.detect_url());

        let orchestrator = Arc::new(UploadOrchestrator::new(
            normalizer,
            client,
            notifier,
            surface.clone(),
        ));
        Ok(Self {
            orchestrator,
            surface,
        })
    }
}

async fn run_analyze(config: &AppConfig, path: &Path) -> Result<ExitCode> {
    let app = App::wire(config)?;
    let file = SelectedFile::from_path(path)?;

    // 미리보기 실패는 분석 단계에서 다시 시도
    if let Err(e) = app.orchestrator.select_file(Some(file)).await {
        if app.orchestrator.selected_name().is_none() {
            warn!("파일 선택 실패: {e}");
            return Ok(ExitCode::FAILURE);
        }
    }

    match app.orchestrator.analyze().await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            warn!("분석 실패: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_preview(config: &AppConfig, path: &Path, out: Option<&Path>) -> Result<ExitCode> {
    let app = App::wire(config)?;
    let file = SelectedFile::from_path(path)?;

    if let Err(e) = app.orchestrator.select_file(Some(file)).await {
        warn!("미리보기 실패: {e}");
        return Ok(ExitCode::FAILURE);
    }
    let Some(frame) = app.orchestrator.current_frame() else {
        bail!("이미지 파일만 미리보기를 저장할 수 있습니다: {}", path.display());
    };

    let out_path = resolve_preview_path(out, &frame.file_name);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("디렉토리 생성 실패: {}", parent.display()))?;
        }
    }
    tokio::fs::write(&out_path, &frame.bytes)
        .await
        .with_context(|| format!("미리보기 저장 실패: {}", out_path.display()))?;

    println!("Saved: {}", out_path.display());
    Ok(ExitCode::SUCCESS)
}

async fn run_session(config: &AppConfig) -> Result<ExitCode> {
    let app = App::wire(config)?;
    let lifecycle = Arc::new(LifecycleManager::new());

    let signal_lifecycle = lifecycle.clone();
    tokio::spawn(async move {
        signal_lifecycle.wait_for_signal().await;
    });

    session::run(app.orchestrator, app.surface, lifecycle.subscribe()).await?;
    info!("POTSCAN 세션 종료");
    Ok(ExitCode::SUCCESS)
}

fn run_config(manager: &ConfigManager, config: &AppConfig, action: &ConfigAction) -> Result<ExitCode> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        ConfigAction::Path => {
            println!("{}", manager.config_path().display());
        }
        ConfigAction::Init { force } => {
            if *force {
                manager
                    .update(AppConfig::default_config())
                    .map_err(|e| anyhow!("설정 초기화 실패: {e}"))?;
                println!("✅ Reset to defaults: {}", manager.config_path().display());
            } else {
                println!("✅ Config file: {}", manager.config_path().display());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // tracing 초기화 (결과 출력과 섞이지 않도록 stderr)
    let log_filter = format!(
        "potscan={},potscan_app={},potscan_core={},potscan_vision={},potscan_network={},potscan_upload={}",
        args.log_level, args.log_level, args.log_level, args.log_level, args.log_level, args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // 설정 로드: 파일 → 환경변수 → CLI
    let manager = settings::open_manager(args.config.clone())?;
    let overrides = Overrides {
        server: args.server.clone(),
        timeout_ms: args.timeout_ms,
    };
    let config = settings::resolve(&manager, settings::process_env(), &overrides)?;

    match &args.command {
        Command::Analyze { file } => run_analyze(&config, file).await,
        Command::Preview { file, out } => run_preview(&config, file, out.as_deref()).await,
        Command::Session => run_session(&config).await,
        Command::Config { action } => run_config(&manager, &config, action),
    }
}
