//! 聊天调用服务
//!
//! 这一层兜住所有失败：缺少密钥、远程调用出错都会记录日志并转成带标签的
//! [`AppError`] 返回，不会把传输层的原始错误抛给调用方。

use tracing::{debug, error, info};

use crate::clients::{ChatTransport, CohereClient};
use crate::config::Config;
use crate::credentials::{CredentialSource, EnvCredential};
use crate::error::{AppError, AppResult};
use crate::models::{ChatRequest, ChatResponse};
use crate::utils::logging::truncate_text;

/// 聊天调用器
pub struct ChatInvoker {
    credentials: Box<dyn CredentialSource>,
    transport: Box<dyn ChatTransport>,
    model: String,
}

impl ChatInvoker {
    /// 使用指定的密钥来源和传输层创建
    pub fn new(
        credentials: impl CredentialSource + 'static,
        transport: impl ChatTransport + 'static,
    ) -> Self {
        Self {
            credentials: Box::new(credentials),
            transport: Box::new(transport),
            model: ChatRequest::DEFAULT_MODEL.to_string(),
        }
    }

    /// 按配置创建：密钥取自 `COHERE_API_KEY`，请求发往 Cohere
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            EnvCredential::new(Config::COHERE_KEY_VAR),
            CohereClient::new(config),
        )
        .with_model(&config.cohere_model)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// 发送一次单轮聊天
    ///
    /// # 参数
    /// - `prompt`: 用户提问，不能为空
    /// - `preamble`: 系统前言（可选），提供时附带空的历史记录
    ///
    /// # 返回
    /// 成功时返回原始响应，失败时返回带标签的错误
    pub async fn invoke(&self, prompt: &str, preamble: Option<&str>) -> AppResult<ChatResponse> {
        info!("开始聊天，提示词: '{}'", truncate_text(prompt, 80));

        let request = match ChatRequest::new(prompt) {
            Ok(request) => request.with_model(&self.model),
            Err(e) => {
                error!("请求参数不合法: {}", e);
                return Err(e);
            }
        };

        let Some(api_key) = self.credentials.resolve() else {
            error!("环境变量中找不到 API 密钥: {}", self.credentials.name());
            return Err(AppError::missing_credential(self.credentials.name()));
        };
        debug!("API 密钥获取成功");

        let request = match preamble.filter(|p| !p.trim().is_empty()) {
            Some(preamble) => {
                debug!("已添加系统前言");
                request.with_preamble(preamble)
            }
            None => request,
        };
        debug!("请求已构建，模型: {}", request.model);

        info!("发送请求到聊天 API");
        match self.transport.chat(&api_key, &request).await {
            Ok(response) => {
                info!("收到聊天 API 响应");
                debug!("原始响应: {}", response);
                Ok(response)
            }
            Err(err) => {
                error!(error = ?err, "聊天调用失败: {}", err);
                Err(into_remote_failure(err))
            }
        }
    }
}

fn into_remote_failure(err: AppError) -> AppError {
    match err {
        AppError::RemoteCallFailure { .. } => err,
        other => {
            let text = other.to_string();
            let message = text.strip_prefix("Error: ").unwrap_or(&text);
            AppError::remote(format!("{} ({})", message, other.kind()))
        }
    }
}
