//! epdd처럼 동작하는 테스트용 데몬 (실제 Unix socket 사용)

#![allow(dead_code)]

use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};

/// 데몬의 응답 버퍼 크기
const DAEMON_BUFFER: usize = 8192;

pub struct FakeEpdd {
    _dir: TempDir,
    pub socket_path: PathBuf,
    requests: Arc<Mutex<Vec<Value>>>,
    connections: Arc<Mutex<usize>>,
}

impl FakeEpdd {
    /// 임시 디렉토리에 socket을 만들고 accept 루프 시작
    pub async fn start(panel: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("epdd");
        let listener = UnixListener::bind(&socket_path).unwrap();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let connections = Arc::new(Mutex::new(0));

        let panel = panel.to_string();
        let task_requests = Arc::clone(&requests);
        let task_connections = Arc::clone(&connections);
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                *task_connections.lock().unwrap() += 1;
                handle(stream, &panel, &task_requests).await;
            }
        });

        Self {
            _dir: dir,
            socket_path,
            requests,
            connections,
        }
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn command_names(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r["command"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn connections(&self) -> usize {
        *self.connections.lock().unwrap()
    }
}

async fn handle(mut stream: UnixStream, panel: &str, requests: &Mutex<Vec<Value>>) {
    // 완전한 JSON 객체가 될 때까지 읽기
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let request: Value = loop {
        let read = stream.read(&mut chunk).await.unwrap_or(0);
        if read == 0 {
            return;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Ok(value) = serde_json::from_slice(&buffer) {
            break value;
        }
    };
    requests.lock().unwrap().push(request.clone());

    let mut reply = request;
    match reply["command"].as_str() {
        Some("get") => match reply["parameter"].as_str() {
            Some("version") => {
                reply["value"] = Value::from("4");
            }
            Some("panel") => {
                reply["value"] = Value::from(panel);
            }
            Some("temperature") => {
                reply["value"] = Value::from(" 21\n");
            }
            _ => {
                reply["result"] = Value::from("failure");
                reply["reason"] = Value::from("Invalid Parameter");
            }
        },
        Some("image") if reply.get("data").is_none() => {
            reply["result"] = Value::from("failure");
            reply["reason"] = Value::from("Missing 'data'");
        }
        Some("image") | Some("update") | Some("partial") | Some("clear") | Some("blink") => {}
        _ => {
            reply["result"] = Value::from("invalid");
        }
    }
    if reply.get("result").is_none() {
        reply["result"] = Value::from("success");
    }

    // 데몬은 응답을 자기 버퍼 크기로 자른다
    let mut bytes = reply.to_string().into_bytes();
    bytes.truncate(DAEMON_BUFFER - 1);
    let _ = stream.write_all(&bytes).await;
}
