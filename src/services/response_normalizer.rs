//! 响应归一化
//!
//! 从各种形状的聊天响应中取出助手的文本。按固定顺序尝试，先命中先返回：
//!
//! 1. 对象上的 `text`
//! 2. 对象上的 `message`
//! 3. 映射中的 `"text"` 键
//! 4. `generations` 第一项的 `text`
//! 5. 倒序遍历 `chat_history`，第一条 CHATBOT 消息
//! 6. 整个响应的字符串表示

use serde_json::Value;

use crate::models::{ChatReply, ChatResponse, ChatRole};

/// 提取响应文本，永不失败
pub fn normalize(response: &ChatResponse) -> String {
    match response {
        ChatResponse::Reply(reply) => from_reply(reply).unwrap_or_else(|| response.to_string()),
        ChatResponse::Mapping(map) => map
            .get("text")
            .map(value_text)
            .unwrap_or_else(|| response.to_string()),
        ChatResponse::Raw(_) => response.to_string(),
    }
}

fn from_reply(reply: &ChatReply) -> Option<String> {
    if let Some(text) = &reply.text {
        return Some(text.clone());
    }
    if let Some(message) = &reply.message {
        return Some(message_text(message));
    }
    if let Some(first) = reply.generations.first() {
        return Some(first.text.clone());
    }
    reply
        .turns()
        .rev()
        .filter(|turn| turn.role == ChatRole::Chatbot)
        .find_map(|turn| turn.message.clone())
}

/// `message` 字段可能是字符串，也可能是 `{role, content: [{type, text}]}`
fn message_text(message: &Value) -> String {
    if let Some(blocks) = message.get("content").and_then(Value::as_array) {
        let texts: Vec<&str> = blocks
            .iter()
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .collect();
        if !texts.is_empty() {
            return texts.concat();
        }
    }
    value_text(message)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
