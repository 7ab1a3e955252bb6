//! 图片题目处理流程 - 流程层
//!
//! 流程顺序：
//! 1. 读图 → 纯文本
//! 2. 拆题 → 题目列表
//!
//! 任一步失败都直接返回错误，不做兜底。

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::clients::{CompletionTransport, OpenAiClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::Question;
use crate::services::prompts::{IMAGE_READER_PROMPT, QUESTION_SPLITTER_PROMPT};
use crate::services::{ImageQuestionExtractor, QuestionSplitter};
use crate::utils::logging::log_stage;

/// 流程输出
#[derive(Debug, Clone)]
pub struct FlowOutput {
    /// 读图得到的文本
    pub extracted_text: String,
    /// 拆分后的题目
    pub questions: Vec<Question>,
}

/// 图片题目处理流程
pub struct QuestionFlow<T> {
    extractor: ImageQuestionExtractor<T>,
    splitter: QuestionSplitter<T>,
}

impl QuestionFlow<Arc<OpenAiClient>> {
    /// 按配置创建，两步共用一个客户端
    pub fn from_config(config: &Config, api_key: &str) -> Self {
        let client = Arc::new(OpenAiClient::new(api_key, &config.openai_api_base_url));
        Self {
            extractor: ImageQuestionExtractor::new(client.clone()).with_model(&config.vision_model),
            splitter: QuestionSplitter::new(client)
                .with_model(&config.splitter_model)
                .with_temperature(config.splitter_temperature),
        }
    }
}

impl<T: CompletionTransport> QuestionFlow<T> {
    pub fn new(extractor: ImageQuestionExtractor<T>, splitter: QuestionSplitter<T>) -> Self {
        Self { extractor, splitter }
    }

    /// 识别图片并拆题
    pub async fn run(&self, image_path: impl AsRef<Path>) -> AppResult<FlowOutput> {
        log_stage("📷 第 1 步：读图");
        let extracted_text = self
            .extractor
            .extract_text(image_path, IMAGE_READER_PROMPT)
            .await?;

        log_stage("✂️ 第 2 步：拆题");
        let questions = self
            .splitter
            .split_questions(QUESTION_SPLITTER_PROMPT, &extracted_text)
            .await?;

        info!("✅ 流程完成，共 {} 道题", questions.len());
        Ok(FlowOutput {
            extracted_text,
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::StructuredRequest;
    use crate::error::{AppError, ErrorKind};
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 读图返回固定文本，拆题时检查收到的正是这段文本
    #[derive(Default)]
    struct ScriptedTransport {
        structured_calls: AtomicUsize,
    }

    const PAGE_TEXT: &str = "1) Factor x^2 - 1.\n2) Differentiate sin(x).";

    #[async_trait]
    impl CompletionTransport for ScriptedTransport {
        async fn complete_with_image(&self, _: &str, prompt: &str, url: &str) -> AppResult<String> {
            assert_eq!(prompt, IMAGE_READER_PROMPT);
            assert!(url.starts_with("data:image/jpeg;base64,"));
            Ok(PAGE_TEXT.to_string())
        }

        async fn complete_structured(&self, request: StructuredRequest) -> AppResult<String> {
            self.structured_calls.fetch_add(1, Ordering::SeqCst);
            if request.user_prompt != PAGE_TEXT {
                return Err(AppError::invalid_request("unexpected text"));
            }
            Ok(r#"{"questions":[
                {"question_summary":"Factor","full_question":"Factor x^2 - 1."},
                {"question_summary":"Derivative","full_question":"Differentiate sin(x)."}
            ]}"#
            .to_string())
        }
    }

    fn flow(transport: Arc<ScriptedTransport>) -> QuestionFlow<Arc<ScriptedTransport>> {
        QuestionFlow::new(
            ImageQuestionExtractor::new(transport.clone()),
            QuestionSplitter::new(transport),
        )
    }

    #[tokio::test]
    async fn test_run_chains_extract_and_split() {
        let mut image = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        image.write_all(&[0xff, 0xd8, 0xff]).unwrap();

        let transport = Arc::new(ScriptedTransport::default());
        let output = flow(transport.clone()).run(image.path()).await.unwrap();

        assert_eq!(output.extracted_text, PAGE_TEXT);
        assert_eq!(output.questions.len(), 2);
        assert_eq!(output.questions[1].full_question, "Differentiate sin(x).");
        assert_eq!(transport.structured_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_image_stops_before_split() {
        let transport = Arc::new(ScriptedTransport::default());
        let err = flow(transport.clone()).run("missing.jpg").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ImageRead);
        assert_eq!(transport.structured_calls.load(Ordering::SeqCst), 0);
    }
}
