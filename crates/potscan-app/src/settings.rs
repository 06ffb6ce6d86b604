//! 설정 계층 적용.
//!
//! 우선순위: CLI 인자 > `POTSCAN_*` 환경변수 > 설정 파일 > 기본값.
//! 환경변수는 `__`로 중첩 필드를 구분한다 (예: `POTSCAN_SERVER__BASE_URL`).

use anyhow::{Context, Result};
use config::{Config, Environment};
use potscan_core::config::AppConfig;
use potscan_core::config_manager::ConfigManager;
use std::path::PathBuf;
use tracing::{debug, info};

/// 환경변수 접두사
pub const ENV_PREFIX: &str = "POTSCAN";

/// CLI에서 넘어온 설정 덮어쓰기
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// 서버 기본 URL
    pub server: Option<String>,
    /// 요청 타임아웃 (밀리초)
    pub timeout_ms: Option<u64>,
}

/// 설정 파일 관리자 열기 (경로 미지정 시 플랫폼 기본 경로)
pub fn open_manager(path: Option<PathBuf>) -> Result<ConfigManager> {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    }
    .context("설정 파일 로드 실패")?;
    debug!("설정 파일: {}", manager.config_path().display());
    Ok(manager)
}

/// 프로세스 환경변수 소스
pub fn process_env() -> Environment {
    env_source(None)
}

/// 환경변수 소스 (테스트에서는 맵을 직접 주입)
pub fn env_source(map: Option<config::Map<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(map)
}

/// 파일 설정 위에 환경변수 덮어쓰기
pub fn layer_env(file_config: &AppConfig, env: Environment) -> Result<AppConfig> {
    let layered = Config::builder()
        .add_source(Config::try_from(file_config).context("설정 직렬화 실패")?)
        .add_source(env)
        .build()
        .context("환경변수 설정 병합 실패")?
        .try_deserialize::<AppConfig>()
        .context("병합된 설정 해석 실패")?;
    Ok(layered)
}

/// CLI 덮어쓰기 적용
pub fn apply_overrides(config: &mut AppConfig, overrides: &Overrides) {
    if let Some(ref server) = overrides.server {
        config.server.base_url = server.clone();
    }
    if let Some(timeout_ms) = overrides.timeout_ms {
        config.server.request_timeout_ms = timeout_ms;
    }
}

/// 최종 런타임 설정 결정 + 검증
pub fn resolve(manager: &ConfigManager, env: Environment, overrides: &Overrides) -> Result<AppConfig> {
    let mut config = layer_env(&manager.get(), env)?;
    apply_overrides(&mut config, overrides);
    config.validate().context("설정 검증 실패")?;
    info!(
        "설정 적용: 서버 {} (타임아웃 {}ms, 프레임 {}px)",
        config.server.base_url, config.server.request_timeout_ms, config.vision.frame_size
    );
    Ok(config)
}
