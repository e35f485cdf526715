use crate::error::{EpdError, Result};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

/// 응답 최대 크기. 데몬의 버퍼 크기와 같으며, 넘는 부분은 잘린다.
pub const RECEIVE_LIMIT: usize = 8192;

/// 요청 하나를 보내고 응답 하나를 받는 IPC 채널
#[async_trait]
pub trait Transport: Send + Sync {
    /// 접속 대상 (로그/에러 메시지용)
    fn endpoint(&self) -> &Path;

    /// 요청 바이트를 보내고 응답 바이트를 받는다
    async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>>;
}

/// Unix socket transport
///
/// 매 요청마다 새로 연결하고, 어떤 경로로 반환하든 연결은 drop 시점에 닫힌다.
#[derive(Debug, Clone)]
pub struct UnixTransport {
    socket_path: PathBuf,
    timeout: Option<Duration>,
}

impl UnixTransport {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            timeout: None,
        }
    }

    /// 교환 전체에 적용할 timeout 설정 (기본값: 없음)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn exchange_once(&self, request: &[u8]) -> Result<Vec<u8>> {
        let mut stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            EpdError::Transport(format!(
                "Failed to connect to {}: {}",
                self.socket_path.display(),
                e
            ))
        })?;

        stream
            .write_all(request)
            .await
            .map_err(|e| EpdError::Transport(format!("Failed to write request: {}", e)))?;

        read_reply(&mut stream).await
    }
}

#[async_trait]
impl Transport for UnixTransport {
    fn endpoint(&self) -> &Path {
        &self.socket_path
    }

    async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.exchange_once(request))
                .await
                .map_err(|_| {
                    EpdError::Transport(format!(
                        "No reply from {} within {}ms",
                        self.socket_path.display(),
                        limit.as_millis()
                    ))
                })?,
            None => self.exchange_once(request).await,
        }
    }
}

/// 데몬이 연결을 닫거나, 완전한 JSON 문서가 도착하거나, RECEIVE_LIMIT에 닿을 때까지 읽기
async fn read_reply(stream: &mut UnixStream) -> Result<Vec<u8>> {
    let mut reply = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    while reply.len() < RECEIVE_LIMIT {
        let want = chunk.len().min(RECEIVE_LIMIT - reply.len());
        let read = stream
            .read(&mut chunk[..want])
            .await
            .map_err(|e| EpdError::Transport(format!("Failed to read reply: {}", e)))?;

        if read == 0 {
            break;
        }
        reply.extend_from_slice(&chunk[..read]);

        if serde_json::from_slice::<IgnoredAny>(&reply).is_ok() {
            break;
        }
    }

    Ok(reply)
}
