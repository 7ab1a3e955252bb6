//! Cohere 聊天 API 客户端
//!
//! 只负责把 [`ChatRequest`] 发出去并把返回的 JSON 包装成 [`ChatResponse`]

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{ChatRequest, ChatResponse};

/// 聊天传输层，便于在测试中替换
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn chat(&self, api_key: &str, request: &ChatRequest) -> AppResult<ChatResponse>;
}

/// Cohere 客户端
#[derive(Debug, Clone)]
pub struct CohereClient {
    http: reqwest::Client,
    base_url: String,
}

impl CohereClient {
    /// 创建新的 Cohere 客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.cohere_api_base_url)
    }

    /// 使用自定义地址创建
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/v1/chat", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatTransport for CohereClient {
    async fn chat(&self, api_key: &str, request: &ChatRequest) -> AppResult<ChatResponse> {
        let url = self.chat_url();
        debug!("POST {}，模型: {}", url, request.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .header("Accept", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::remote(format!("请求 {} 失败: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::remote(format!("HTTP {}: {}", status, body)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::remote(format!("聊天 API 返回的不是合法 JSON: {}", e)))?;

        Ok(ChatResponse::from_value(payload))
    }
}
