use crate::daemon::protocol::{Command, Parameter, Reply, ReplyStatus};
use crate::daemon::transport::Transport;
use crate::error::{EpdError, Result};
use tracing::{debug, warn};

/// 데몬 클라이언트 (명령어 인코딩 + 응답 해석)
pub struct DaemonClient<T: Transport> {
    transport: T,
}

impl<T: Transport> DaemonClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 명령어를 보내고 응답 원문을 돌려받는다
    pub async fn send_request(&self, command: &Command) -> Result<String> {
        let request_json = command.to_json()?;

        debug!(
            command = command.name(),
            endpoint = %self.transport.endpoint().display(),
            bytes = request_json.len(),
            "sending command"
        );

        let raw = self.transport.exchange(request_json.as_bytes()).await?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    /// `get` 명령어: 응답 value를 그대로 반환
    ///
    /// action 명령어와 달리 실패 응답이나 value 누락은 에러로 전파한다.
    pub async fn query(&self, parameter: Parameter) -> Result<String> {
        let raw = self.send_request(&Command::Get { parameter }).await?;

        let reply = Reply::from_json(&raw).map_err(|e| {
            EpdError::Parse(format!(
                "Failed to parse reply to get {}: {}",
                parameter.as_str(),
                e
            ))
        })?;

        if let ReplyStatus::Failure(result) = &reply.status {
            return Err(EpdError::Parse(format!(
                "get {} returned {}: {}",
                parameter.as_str(),
                result,
                reply.reason.as_deref().unwrap_or("no reason given")
            )));
        }

        let value = reply.value.ok_or_else(|| {
            EpdError::Parse(format!("missing value in reply to get {}", parameter.as_str()))
        })?;

        debug!(parameter = parameter.as_str(), value = %value, "query answered");
        Ok(value)
    }

    /// action 명령어 실행
    ///
    /// success가 아닌 응답은 경고 로그만 남기고 에러로 만들지 않는다.
    /// transport 에러는 그대로 전파된다.
    pub async fn execute(&self, command: &Command) -> Result<()> {
        let raw = self.send_request(command).await?;

        match Reply::from_json(&raw) {
            Ok(reply) if reply.is_success() => {
                debug!(command = command.name(), "command succeeded");
            }
            Ok(reply) => {
                let result: String = reply.status.into();
                warn!(
                    command = command.name(),
                    result = %result,
                    reason = reply.reason.as_deref().unwrap_or(""),
                    "daemon did not report success"
                );
            }
            Err(e) if matches!(command, Command::Image { .. }) => {
                // image 응답은 데이터 echo 때문에 데몬 버퍼 크기에서 잘린다
                debug!(command = command.name(), error = %e, "reply truncated");
            }
            Err(e) => {
                let preview: String = raw.chars().take(80).collect();
                warn!(
                    command = command.name(),
                    error = %e,
                    reply = %preview,
                    "could not decode daemon reply"
                );
            }
        }

        Ok(())
    }
}
