//! 拆题服务
//!
//! 用结构化输出让模型把一段文字拆成若干道题，结果直接按 schema 解析，
//! 不做修补；不符合 schema 时返回 `SchemaViolation`。

use tracing::{debug, info};

use crate::clients::{CompletionTransport, StructuredRequest};
use crate::error::{AppError, AppResult};
use crate::models::{AllQuestions, Question};
use crate::utils::logging::truncate_text;

/// 拆题器
pub struct QuestionSplitter<T> {
    transport: T,
    model: String,
    temperature: f32,
}

impl<T: CompletionTransport> QuestionSplitter<T> {
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";

    pub fn new(transport: T) -> Self {
        Self {
            transport,
            model: Self::DEFAULT_MODEL.to_string(),
            temperature: 0.0,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// 拆分题目
    ///
    /// # 参数
    /// - `system_prompt`: 系统提示词
    /// - `user_text`: 含有一道或多道题的文本
    ///
    /// # 返回
    /// 按模型给出的顺序排列的题目列表
    pub async fn split_questions(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> AppResult<Vec<Question>> {
        info!("✂️ 开始拆题，文本预览: {}", truncate_text(user_text, 60));

        let request = StructuredRequest {
            model: self.model.clone(),
            system_prompt: system_prompt.to_string(),
            user_prompt: user_text.to_string(),
            temperature: self.temperature,
            schema_name: AllQuestions::SCHEMA_NAME.to_string(),
            schema: AllQuestions::json_schema(),
        };

        let raw = self.transport.complete_structured(request).await?;
        debug!("结构化输出: {}", truncate_text(&raw, 200));

        let parsed: AllQuestions = serde_json::from_str(&raw)
            .map_err(|e| AppError::schema(format!("{} (原文: {})", e, truncate_text(&raw, 200))))?;

        info!("✓ 拆分出 {} 道题", parsed.questions.len());
        Ok(parsed.questions)
    }
}
