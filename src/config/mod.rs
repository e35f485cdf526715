use crate::daemon::transport::UnixTransport;
use crate::error::{EpdError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 기본 데몬 socket 경로
pub const DEFAULT_ENDPOINT: &str = "/run/epdd";

/// endpoint를 덮어쓰는 환경 변수
pub const ENDPOINT_ENV: &str = "EPD_ENDPOINT";

/// EPD 클라이언트 설정
///
/// 설정 파일은 ~/.epd/config.toml에 저장됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// 데몬 socket 경로
    #[serde(default = "default_endpoint")]
    pub endpoint: PathBuf,

    /// 이미지 전송 후 자동으로 update 실행
    #[serde(default)]
    pub auto_update: bool,

    /// 요청당 timeout (ms). 없으면 데몬이 응답할 때까지 기다린다
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_endpoint() -> PathBuf {
    PathBuf::from(DEFAULT_ENDPOINT)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            auto_update: false,
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// endpoint 지정해서 생성
    pub fn with_endpoint(endpoint: impl Into<PathBuf>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// 설정 파일 경로 가져오기
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// 설정 디렉토리 경로
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".epd")
    }

    /// 설정 파일에서 로드 (없으면 기본값), 이후 `EPD_ENDPOINT` 적용
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;

        if let Some(endpoint) = std::env::var_os(ENDPOINT_ENV) {
            if !endpoint.is_empty() {
                config.endpoint = PathBuf::from(endpoint);
            }
        }

        Ok(config)
    }

    /// 지정한 파일에서 로드 (없으면 기본값)
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            EpdError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// 설정을 기본 경로에 저장
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// 설정을 지정한 파일에 저장
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // 디렉토리가 없으면 생성
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| EpdError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)?;

        Ok(())
    }

    /// 설정 파일 초기화 (기본값으로)
    pub fn init() -> Result<PathBuf> {
        let path = Self::config_path();
        Self::default().save_to(&path)?;
        Ok(path)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// 이 설정으로 Unix socket transport 생성
    pub fn transport(&self) -> UnixTransport {
        UnixTransport::new(&self.endpoint).with_timeout(self.timeout())
    }
}
