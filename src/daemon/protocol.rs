use serde::{Deserialize, Serialize};

/// `get` 명령어로 조회할 수 있는 값
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    /// 데몬 프로토콜 버전
    Version,
    /// 패널 descriptor 한 줄 (예: "EPD 2.0 200x96 COG 3 FILM 2")
    Panel,
    /// 패널 온도 (섭씨)
    Temperature,
}

impl Parameter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Version => "version",
            Parameter::Panel => "panel",
            Parameter::Temperature => "temperature",
        }
    }
}

/// 래스터 비트 순서 태그
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    Little,
    Big,
}

/// 데몬으로 전송하는 명령어
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Command {
    /// 값 조회
    Get { parameter: Parameter },
    /// 이미지 데이터 전송 (base64)
    Image {
        data: String,
        #[serde(with = "string_flag")]
        inverted: bool,
        endian: Endian,
    },
    /// 전체 refresh
    Update,
    /// 부분 refresh
    Partial,
    /// 화면 지우기
    Clear,
    Blink,
}

impl Command {
    /// 로그용 명령어 이름
    pub fn name(&self) -> &'static str {
        match self {
            Command::Get { .. } => "get",
            Command::Image { .. } => "image",
            Command::Update => "update",
            Command::Partial => "partial",
            Command::Clear => "clear",
            Command::Blink => "blink",
        }
    }

    /// JSON으로 직렬화
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// JSON에서 역직렬화
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// 응답의 `result` 필드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReplyStatus {
    Success,
    /// "failure", "invalid" 등 success가 아닌 모든 값
    Failure(String),
}

impl From<String> for ReplyStatus {
    fn from(value: String) -> Self {
        if value == "success" {
            ReplyStatus::Success
        } else {
            ReplyStatus::Failure(value)
        }
    }
}

impl From<ReplyStatus> for String {
    fn from(status: ReplyStatus) -> Self {
        match status {
            ReplyStatus::Success => "success".to_string(),
            ReplyStatus::Failure(value) => value,
        }
    }
}

/// 데몬의 응답
///
/// 데몬은 요청 객체에 `result` (및 `value`, `reason`)를 덧붙여 그대로 돌려준다.
/// 나머지 echo 필드는 무시한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(rename = "result")]
    pub status: ReplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Reply {
    pub fn success() -> Self {
        Self {
            status: ReplyStatus::Success,
            value: None,
            reason: None,
        }
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::success()
        }
    }

    pub fn failure(result: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::Failure(result.into()),
            value: None,
            reason: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ReplyStatus::Success
    }

    /// JSON으로 직렬화
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// JSON에서 역직렬화
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// 데몬은 boolean 플래그를 "true"/"false" 문자열로 주고받는다
mod string_flag {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *flag { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_get_command_fields() {
        let command = Command::Get {
            parameter: Parameter::Panel,
        };

        let json: Value = serde_json::from_str(&command.to_json().unwrap()).unwrap();
        assert_eq!(json["command"], "get");
        assert_eq!(json["parameter"], "panel");
    }

    #[test]
    fn test_action_command_has_only_command_field() {
        let json: Value = serde_json::from_str(&Command::Partial.to_json().unwrap()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["command"], "partial");
    }

    #[test]
    fn test_image_command_flags_are_strings() {
        let command = Command::Image {
            data: "AAAA".to_string(),
            inverted: true,
            endian: Endian::Little,
        };

        let json: Value = serde_json::from_str(&command.to_json().unwrap()).unwrap();
        assert_eq!(json["command"], "image");
        assert_eq!(json["data"], "AAAA");
        assert_eq!(json["inverted"], "true");
        assert_eq!(json["endian"], "little");

        let decoded = Command::from_json(&command.to_json().unwrap()).unwrap();
        assert_eq!(decoded, command);
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let json = r#"{"command":"image","data":"","inverted":"yes","endian":"little"}"#;
        assert!(Command::from_json(json).is_err());
    }

    #[test]
    fn test_reply_ignores_echoed_fields() {
        let json = r#"{"command":"get","parameter":"version","value":"4","result":"success"}"#;
        let reply = Reply::from_json(json).unwrap();

        assert!(reply.is_success());
        assert_eq!(reply.value.as_deref(), Some("4"));
        assert_eq!(reply.reason, None);
    }

    #[test]
    fn test_reply_failure_status() {
        let json = r#"{"command":"get","result":"failure","reason":"Parameter missing"}"#;
        let reply = Reply::from_json(json).unwrap();

        assert!(!reply.is_success());
        assert_eq!(reply.status, ReplyStatus::Failure("failure".to_string()));
        assert_eq!(reply.reason.as_deref(), Some("Parameter missing"));
    }

    #[test]
    fn test_reply_without_result_is_error() {
        assert!(Reply::from_json("unknown\n").is_err());
        assert!(Reply::from_json(r#"{"command":"update"}"#).is_err());
    }

    #[test]
    fn test_command_names() {
        assert_eq!(Command::Update.name(), "update");
        assert_eq!(Command::Blink.name(), "blink");
        assert_eq!(
            Command::Get {
                parameter: Parameter::Temperature
            }
            .name(),
            "get"
        );
    }
}
