//! 테스트용 in-memory 데몬

use crate::daemon::protocol::{Command, Parameter};
use crate::daemon::transport::Transport;
use crate::error::{EpdError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

struct FakeState {
    version: String,
    panel: String,
    temperature: String,
    commands: Vec<Command>,
    /// 다음 응답 덮어쓰기. `None`이면 transport 실패
    overrides: VecDeque<Option<String>>,
}

/// 실제 데몬처럼 요청 객체에 `result`/`value`를 덧붙여 돌려주는 가짜 데몬
#[derive(Clone)]
pub struct FakeDaemon {
    endpoint: PathBuf,
    state: Arc<Mutex<FakeState>>,
}

impl FakeDaemon {
    pub fn new(panel: &str) -> Self {
        Self {
            endpoint: PathBuf::from("/fake/epdd"),
            state: Arc::new(Mutex::new(FakeState {
                version: "4".to_string(),
                panel: panel.to_string(),
                temperature: " 23\n".to_string(),
                commands: Vec::new(),
                overrides: VecDeque::new(),
            })),
        }
    }

    /// 다음 요청에 이 원문으로 응답
    pub fn reply_with(&self, raw: &str) {
        self.state.lock().unwrap().overrides.push_back(Some(raw.to_string()));
    }

    /// 다음 요청은 연결 실패
    pub fn fail_next(&self) {
        self.state.lock().unwrap().overrides.push_back(None);
    }

    pub fn set_temperature(&self, raw: &str) {
        self.state.lock().unwrap().temperature = raw.to_string();
    }

    pub fn commands(&self) -> Vec<Command> {
        self.state.lock().unwrap().commands.clone()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands().iter().map(Command::name).collect()
    }

    pub fn clear_commands(&self) {
        self.state.lock().unwrap().commands.clear();
    }
}

#[async_trait]
impl Transport for FakeDaemon {
    fn endpoint(&self) -> &Path {
        &self.endpoint
    }

    async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>> {
        let mut state = self.state.lock().unwrap();

        let reply_override = state.overrides.pop_front();
        if let Some(None) = reply_override {
            return Err(EpdError::Transport("fake daemon unavailable".to_string()));
        }

        let text = String::from_utf8_lossy(request);
        let command = Command::from_json(&text)?;
        state.commands.push(command.clone());

        if let Some(Some(raw)) = reply_override {
            return Ok(raw.into_bytes());
        }

        let mut echo: Value = serde_json::from_str(&text)?;
        echo["result"] = Value::from("success");
        if let Command::Get { parameter } = command {
            let value = match parameter {
                Parameter::Version => state.version.clone(),
                Parameter::Panel => state.panel.clone(),
                Parameter::Temperature => state.temperature.clone(),
            };
            echo["value"] = Value::from(value);
        }

        Ok(echo.to_string().into_bytes())
    }
}
