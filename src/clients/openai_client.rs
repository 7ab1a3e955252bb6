//! OpenAI 兼容接口客户端
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点（兼容 OpenAI API 的服务均可）
//!
//! 提供两种能力：带图片的单轮问答，以及受 JSON Schema 约束的结构化输出。

use std::sync::Arc;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
        ChatCompletionRequestUserMessageContentPart, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse, ImageDetail, ImageUrl,
        ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

/// 结构化输出请求
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub schema_name: String,
    pub schema: Value,
}

/// 补全传输层，便于在测试中替换
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// 发送一段文字加一张图片，返回模型的纯文本回答
    async fn complete_with_image(
        &self,
        model: &str,
        prompt: &str,
        image_url: &str,
    ) -> AppResult<String>;

    /// 发送结构化输出请求，返回模型给出的 JSON 文本
    async fn complete_structured(&self, request: StructuredRequest) -> AppResult<String>;
}

#[async_trait]
impl<T: CompletionTransport + ?Sized> CompletionTransport for Arc<T> {
    async fn complete_with_image(
        &self,
        model: &str,
        prompt: &str,
        image_url: &str,
    ) -> AppResult<String> {
        (**self).complete_with_image(model, prompt, image_url).await
    }

    async fn complete_structured(&self, request: StructuredRequest) -> AppResult<String> {
        (**self).complete_structured(request).await
    }
}

/// OpenAI 客户端
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
}

impl OpenAiClient {
    /// 创建新的客户端
    pub fn new(api_key: &str, api_base_url: &str) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base_url);

        Self {
            client: Client::with_config(openai_config),
        }
    }

    async fn send(
        &self,
        model: &str,
        request: CreateChatCompletionRequest,
    ) -> AppResult<CreateChatCompletionResponse> {
        self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败 (模型: {}): {}", model, e);
            AppError::remote(format!("LLM API 调用失败: {}", e))
        })
    }
}

#[async_trait]
impl CompletionTransport for OpenAiClient {
    async fn complete_with_image(
        &self,
        model: &str,
        prompt: &str,
        image_url: &str,
    ) -> AppResult<String> {
        debug!("调用 Vision API，模型: {}", model);

        let content_parts = vec![
            ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText {
                    text: prompt.to_string(),
                },
            ),
            ChatCompletionRequestUserMessageContentPart::ImageUrl(
                ChatCompletionRequestMessageContentPartImage {
                    image_url: ImageUrl {
                        url: image_url.to_string(),
                        detail: Some(ImageDetail::Auto),
                    },
                },
            ),
        ];

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .build()?;

        let response = self.send(model, request).await?;
        debug!("Vision API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::EmptyResponse {
                model: model.to_string(),
            })?;

        Ok(content)
    }

    async fn complete_structured(&self, request: StructuredRequest) -> AppResult<String> {
        debug!(
            "调用结构化输出，模型: {}，schema: {}",
            request.model, request.schema_name
        );

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(request.system_prompt.as_str())
            .build()?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(request.user_prompt.as_str())
            .build()?;

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(request.temperature)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: None,
                    name: request.schema_name.clone(),
                    schema: Some(request.schema.clone()),
                    strict: Some(true),
                },
            })
            .build()?;

        let response = self.send(&request.model, chat_request).await?;

        let message = response
            .choices
            .first()
            .map(|choice| choice.message.clone())
            .ok_or_else(|| AppError::EmptyResponse {
                model: request.model.clone(),
            })?;

        if let Some(refusal) = message.refusal {
            return Err(AppError::schema(format!("模型拒绝回答: {}", refusal)));
        }

        message.content.ok_or_else(|| AppError::EmptyResponse {
            model: request.model.clone(),
        })
    }
}
