use colored::*;
use epd::{ClientConfig, EpdError, Result};

/// 기본 설정 파일 생성
pub fn init_config() -> Result<()> {
    let path = ClientConfig::init()?;
    eprintln!("{} Wrote {}", "[OK]".green().bold(), path.display());
    Ok(())
}

/// 적용되는 설정 출력 (파일 + 환경 변수 + CLI 옵션)
pub fn show_config(config: &ClientConfig) -> Result<()> {
    let toml_string = toml::to_string_pretty(config)
        .map_err(|e| EpdError::Config(format!("Failed to serialize config: {}", e)))?;

    eprintln!("# {}", ClientConfig::config_path().display().to_string().dimmed());
    print!("{}", toml_string);
    Ok(())
}
