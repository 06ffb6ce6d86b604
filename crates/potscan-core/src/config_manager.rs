//! 설정 파일 관리.
//!
//! `config.json` 하나를 소유한다. 처음 열 때 파일이 없으면 기본값으로 만들고,
//! 갱신은 검증을 통과한 설정만 임시 파일에 쓴 뒤 rename으로 교체한다.

use crate::config::AppConfig;
use crate::error::CoreError;
use directories::ProjectDirs;
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// 설정 파일 이름
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 설정 파일 핸들 (복제해도 같은 설정을 공유)
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
    current: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    /// 플랫폼 설정 디렉토리의 `config.json` 열기
    pub fn new() -> Result<Self, CoreError> {
        Self::with_path(Self::default_config_path()?)
    }

    /// 지정 경로의 설정 파일 열기 (없으면 기본값으로 생성)
    pub fn with_path(path: PathBuf) -> Result<Self, CoreError> {
        let config = if path.exists() {
            read_config(&path)?
        } else {
            let defaults = AppConfig::default_config();
            write_config(&path, &defaults)?;
            info!("기본 설정 파일 생성: {}", path.display());
            defaults
        };

        Ok(Self {
            path,
            current: Arc::new(RwLock::new(config)),
        })
    }

    /// 현재 설정 복제본
    pub fn get(&self) -> AppConfig {
        self.current.read().clone()
    }

    /// 검증 후 교체 + 저장. 검증 실패 시 메모리/파일 모두 그대로
    pub fn update(&self, config: AppConfig) -> Result<(), CoreError> {
        config.validate()?;
        write_config(&self.path, &config)?;
        *self.current.write() = config;
        debug!("설정 저장: {}", self.path.display());
        Ok(())
    }

    /// 현재 설정을 수정해 저장하고 결과 반환
    pub fn update_with<F>(&self, edit: F) -> Result<AppConfig, CoreError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.get();
        edit(&mut config);
        self.update(config.clone())?;
        Ok(config)
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    /// 파일 내용으로 다시 읽기
    pub fn reload(&self) -> Result<(), CoreError> {
        let config = read_config(&self.path)?;
        *self.current.write() = config;
        info!("설정 다시 로드: {}", self.path.display());
        Ok(())
    }

    /// 플랫폼별 기본 설정 파일 경로
    ///
    /// - Linux: `$XDG_CONFIG_HOME/potscan/config.json`
    /// - macOS: `~/Library/Application Support/com.potscan.potscan/config.json`
    /// - Windows: `%APPDATA%\potscan\potscan\config\config.json`
    pub fn default_config_path() -> Result<PathBuf, CoreError> {
        let dirs = ProjectDirs::from("com", "potscan", "potscan")
            .ok_or_else(|| CoreError::Config("홈 디렉토리를 찾을 수 없음".to_string()))?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn read_config(path: &Path) -> Result<AppConfig, CoreError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CoreError::Config(format!("설정 파일 읽기 실패 ({}): {e}", path.display())))?;
    let config = serde_json::from_str(&text)
        .map_err(|e| CoreError::Config(format!("설정 파일 파싱 실패 ({}): {e}", path.display())))?;
    debug!("설정 파일 로드: {}", path.display());
    Ok(config)
}

/// 같은 디렉토리의 임시 파일에 쓰고 rename
fn write_config(path: &Path, config: &AppConfig) -> Result<(), CoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            CoreError::Config(format!("설정 디렉토리 생성 실패 ({}): {e}", dir.display()))
        })?;
    }

    let text = serde_json::to_string_pretty(config)?;
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, text)
        .and_then(|_| fs::rename(&staging, path))
        .map_err(|e| CoreError::Config(format!("설정 파일 저장 실패 ({}): {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let manager = ConfigManager::with_path(config_path.clone()).unwrap();
        assert!(config_path.exists());

        let config = manager.get();
        assert_eq!(config.server.detect_path, "/api/detect/");
    }

    #[test]
    fn update_and_persist_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let manager = ConfigManager::with_path(config_path.clone()).unwrap();

        manager
            .update_with(|c| {
                c.server.base_url = "http://10.0.0.5:8000".to_string();
                c.server.request_timeout_ms = 5_000;
            })
            .unwrap();

        let manager2 = ConfigManager::with_path(config_path).unwrap();
        let config = manager2.get();

        assert_eq!(config.server.base_url, "http://10.0.0.5:8000");
        assert_eq!(config.server.request_timeout_ms, 5_000);
    }

    #[test]
    fn update_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.json")).unwrap();

        let result = manager.update_with(|c| c.vision.frame_size = 0);
        assert!(result.is_err());
        assert_eq!(manager.get().vision.frame_size, 640);
    }

    #[test]
    fn reload_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let manager = ConfigManager::with_path(config_path.clone()).unwrap();

        let mut config = manager.get();
        config.vision.webp_quality = 70;
        let content = serde_json::to_string_pretty(&config).unwrap();
        fs::write(&config_path, content).unwrap();

        manager.reload().unwrap();
        assert_eq!(manager.get().vision.webp_quality, 70);
    }

    #[test]
    fn save_leaves_no_staging_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let manager = ConfigManager::with_path(config_path.clone()).unwrap();
        manager.update_with(|c| c.vision.jpeg_quality = 75).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["config.json".to_string()]);
    }

    #[test]
    fn default_path_ends_with_file_name() {
        if let Ok(path) = ConfigManager::default_config_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }

    #[test]
    fn corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "{ not json").unwrap();

        let result = ConfigManager::with_path(config_path);
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
