use thiserror::Error;

#[derive(Error, Debug)]
pub enum EpdError {
    /// 소켓 연결/송신/수신 실패 (재시도하지 않음)
    #[error("Transport error: {0}")]
    Transport(String),

    /// 데몬 응답 값이 기대한 형식과 다름
    #[error("Parse error: {0}")]
    Parse(String),

    /// 패널 geometry, 이미지 모드 또는 크기 검증 실패
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EpdError>;
