//! 聊天请求与响应
//!
//! 响应的形状随 SDK 版本和接口不同而变化，这里用一个枚举兜住所有情况，
//! 从 JSON 构造时永不失败。

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// 对话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    #[serde(rename = "USER", alias = "user", alias = "User")]
    User,
    #[serde(
        rename = "CHATBOT",
        alias = "chatbot",
        alias = "Chatbot",
        alias = "assistant",
        alias = "ASSISTANT"
    )]
    Chatbot,
    #[serde(rename = "SYSTEM", alias = "system")]
    System,
    #[serde(rename = "TOOL", alias = "tool")]
    Tool,
    #[serde(rename = "UNKNOWN")]
    #[serde(other)]
    Unknown,
}

/// 历史对话中的一轮
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChatTurn {
    pub fn new(role: ChatRole, message: impl Into<String>) -> Self {
        Self {
            role,
            message: Some(message.into()),
        }
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self::new(ChatRole::User, message)
    }

    pub fn chatbot(message: impl Into<String>) -> Self {
        Self::new(ChatRole::Chatbot, message)
    }
}

/// 聊天请求
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_history: Option<Vec<ChatTurn>>,
}

impl ChatRequest {
    pub const DEFAULT_MODEL: &'static str = "command-a-03-2025";

    /// 创建请求，消息不能为空
    pub fn new(message: impl Into<String>) -> AppResult<Self> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(AppError::invalid_request("prompt must not be empty"));
        }
        Ok(Self {
            model: Self::DEFAULT_MODEL.to_string(),
            message,
            preamble: None,
            chat_history: None,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// 附加系统前言，同时清空历史，保证是一次全新的单轮对话
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self.chat_history = Some(Vec::new());
        self
    }
}

/// 响应里 `chat_history` 的一项
///
/// 形状不对的条目原样保留为 `Other`，不影响整个响应的解析。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryEntry {
    Turn(ChatTurn),
    Other(Value),
}

impl HistoryEntry {
    pub fn as_turn(&self) -> Option<&ChatTurn> {
        match self {
            HistoryEntry::Turn(turn) => Some(turn),
            HistoryEntry::Other(_) => None,
        }
    }
}

impl From<ChatTurn> for HistoryEntry {
    fn from(turn: ChatTurn) -> Self {
        HistoryEntry::Turn(turn)
    }
}

/// 旧版接口的生成结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    #[serde(default)]
    pub text: String,
}

/// 提供方返回的响应对象
///
/// 所有字段都是可选的，未识别的字段原样保留在 `extra` 中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// 可能是纯字符串，也可能是结构化的助手消息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generations: Vec<Generation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chat_history: Vec<HistoryEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatReply {
    /// 能识别的历史轮次，跳过形状不对的条目
    pub fn turns(&self) -> impl DoubleEndedIterator<Item = &ChatTurn> {
        self.chat_history.iter().filter_map(HistoryEntry::as_turn)
    }
}

/// 聊天响应
#[derive(Debug, Clone, PartialEq)]
pub enum ChatResponse {
    /// 能按提供方对象解析的响应
    Reply(ChatReply),
    /// 形状不规整的键值映射
    Mapping(Map<String, Value>),
    /// 其他任何值
    Raw(Value),
}

impl ChatResponse {
    /// 从 JSON 构造，永不失败
    ///
    /// 对象先尝试按 [`ChatReply`] 解析，解析不了的退化为 `Mapping`。
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                match serde_json::from_value::<ChatReply>(Value::Object(map.clone())) {
                    Ok(reply) => ChatResponse::Reply(reply),
                    Err(_) => ChatResponse::Mapping(map),
                }
            }
            other => ChatResponse::Raw(other),
        }
    }

    /// 转回 JSON
    pub fn to_value(&self) -> Value {
        match self {
            ChatResponse::Reply(reply) => {
                serde_json::to_value(reply).unwrap_or_else(|_| Value::Object(reply.extra.clone()))
            }
            ChatResponse::Mapping(map) => Value::Object(map.clone()),
            ChatResponse::Raw(value) => value.clone(),
        }
    }
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        ChatResponse::Reply(reply)
    }
}

impl fmt::Display for ChatResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatResponse::Raw(Value::String(s)) => f.write_str(s),
            other => write!(f, "{}", other.to_value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_rejects_empty_prompt() {
        assert!(ChatRequest::new("   ").is_err());
        let request = ChatRequest::new("2+2?").unwrap();
        assert_eq!(request.model, "command-a-03-2025");
        assert!(request.preamble.is_none());
    }

    #[test]
    fn test_request_serialization_with_preamble() {
        let request = ChatRequest::new("2+2?").unwrap().with_preamble("You are a math tutor");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "command-a-03-2025",
                "message": "2+2?",
                "preamble": "You are a math tutor",
                "chat_history": []
            })
        );
    }

    #[test]
    fn test_request_serialization_without_preamble() {
        let request = ChatRequest::new("hi").unwrap().with_model("command-r");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"model": "command-r", "message": "hi"}));
    }

    #[test]
    fn test_from_value_parses_provider_payload() {
        let response = ChatResponse::from_value(json!({
            "response_id": "r-1",
            "text": "x = 1",
            "chat_history": [
                {"role": "USER", "message": "solve"},
                {"role": "CHATBOT", "message": "x = 1"}
            ],
            "finish_reason": "COMPLETE"
        }));

        let ChatResponse::Reply(reply) = response else {
            panic!("expected Reply");
        };
        assert_eq!(reply.text.as_deref(), Some("x = 1"));
        let turns: Vec<&ChatTurn> = reply.turns().collect();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, ChatRole::Chatbot);
        assert_eq!(reply.extra.get("response_id"), Some(&json!("r-1")));
    }

    #[test]
    fn test_from_value_unknown_role_and_malformed_history() {
        let response = ChatResponse::from_value(json!({
            "chat_history": [{"role": "NARRATOR", "message": "..."}]
        }));
        let ChatResponse::Reply(reply) = response else {
            panic!("expected Reply");
        };
        assert_eq!(reply.turns().next().map(|t| t.role), Some(ChatRole::Unknown));

        let response = ChatResponse::from_value(json!({"text": "42", "chat_history": "oops"}));
        assert!(matches!(response, ChatResponse::Mapping(_)));

        let response = ChatResponse::from_value(json!(["not", "an", "object"]));
        assert!(matches!(response, ChatResponse::Raw(_)));
    }

    #[test]
    fn test_malformed_turn_keeps_reply_shape() {
        let response = ChatResponse::from_value(json!({
            "chat_history": [
                {"role": "CHATBOT", "message": "a"},
                {"role": "TOOL", "message": {"tool_results": []}},
                {"message": "no role"}
            ]
        }));
        let ChatResponse::Reply(reply) = response else {
            panic!("expected Reply");
        };
        assert_eq!(reply.chat_history.len(), 3);
        assert_eq!(reply.turns().count(), 1);
        assert!(matches!(reply.chat_history[1], HistoryEntry::Other(_)));
        assert_eq!(
            serde_json::to_value(&reply).unwrap()["chat_history"][2],
            json!({"message": "no role"})
        );
    }

    #[test]
    fn test_display_is_compact_json() {
        let response = ChatResponse::from_value(json!({"foo": 1}));
        assert_eq!(response.to_string(), r#"{"foo":1}"#);
        assert_eq!(ChatResponse::Raw(json!("plain")).to_string(), "plain");
    }
}
