use crate::error::{EpdError, Result};
use std::fmt;

/// 데몬의 `get panel` 응답을 파싱한 패널 정보
///
/// 형식: `<name> <version> <width>x<height> COG <cog> FILM <film>`
/// (예: `EPD 2.0 200x96 COG 3 FILM 2`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDescriptor {
    /// "<name> <version>" (예: "EPD 2.0")
    pub panel: String,
    pub name: String,
    pub version: String,
    pub width: u32,
    pub height: u32,
    pub cog: u32,
    pub film: u32,
}

fn invalid() -> EpdError {
    EpdError::Parse("invalid panel string".to_string())
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn number(token: &str) -> Result<u32> {
    if !is_digits(token) {
        return Err(invalid());
    }
    token.parse().map_err(|_| invalid())
}

fn keyword(token: Option<&str>, expected: &str) -> Result<()> {
    match token {
        Some(t) if t == expected => Ok(()),
        _ => Err(invalid()),
    }
}

impl PanelDescriptor {
    /// descriptor 한 줄 파싱
    ///
    /// 문법에 맞지 않으면 `EpdError::Parse("invalid panel string")`.
    /// geometry 값의 범위는 검사하지 않는다 (`validate` 참고).
    pub fn parse(line: &str) -> Result<Self> {
        // 앞쪽 공백은 허용하지 않고, 뒤쪽 공백(개행 포함)만 허용
        if line.starts_with(char::is_whitespace) {
            return Err(invalid());
        }

        let mut tokens = line.split_whitespace();

        let name = tokens.next().ok_or_else(invalid)?;
        if !name.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let version = tokens.next().ok_or_else(invalid)?;
        match version.split_once('.') {
            Some((major, minor)) if is_digits(major) && is_digits(minor) => {}
            _ => return Err(invalid()),
        }

        let geometry = tokens.next().ok_or_else(invalid)?;
        let (width, height) = geometry.split_once('x').ok_or_else(invalid)?;
        let width = number(width)?;
        let height = number(height)?;

        keyword(tokens.next(), "COG")?;
        let cog = number(tokens.next().ok_or_else(invalid)?)?;

        keyword(tokens.next(), "FILM")?;
        let film = number(tokens.next().ok_or_else(invalid)?)?;

        if tokens.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            panel: format!("{} {}", name, version),
            name: name.to_string(),
            version: version.to_string(),
            width,
            height,
            cog,
            film,
        })
    }

    /// geometry 검증 (width, height >= 1)
    pub fn validate(&self) -> Result<()> {
        if self.width < 1 || self.height < 1 {
            return Err(EpdError::Validation("invalid panel geometry".to_string()));
        }
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl fmt::Display for PanelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{} COG {} FILM {}",
            self.panel, self.width, self.height, self.cog, self.film
        )
    }
}
