//! 读图服务
//!
//! 把本地图片编码成 data URL，连同提示词一起发给视觉模型，返回纯文本。
//! 这里不做兜底：读文件、网络、空回答等错误原样返回给调用方。

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, info};

use crate::clients::CompletionTransport;
use crate::error::{AppError, AppResult};

/// 图片题目识别器
pub struct ImageQuestionExtractor<T> {
    transport: T,
    model: String,
}

impl<T: CompletionTransport> ImageQuestionExtractor<T> {
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";

    pub fn new(transport: T) -> Self {
        Self {
            transport,
            model: Self::DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// 识别图片中的文字
    ///
    /// # 参数
    /// - `image_path`: 本地图片路径
    /// - `instruction_prompt`: 给模型的指令
    ///
    /// # 返回
    /// 模型输出的纯文本
    pub async fn extract_text(
        &self,
        image_path: impl AsRef<Path>,
        instruction_prompt: &str,
    ) -> AppResult<String> {
        let image_path = image_path.as_ref();
        info!("📷 读取图片: {}", image_path.display());

        let data_url = encode_image(image_path).await?;
        debug!("图片已编码，data URL 长度: {}", data_url.len());

        let text = self
            .transport
            .complete_with_image(&self.model, instruction_prompt, &data_url)
            .await?;

        info!("✓ 图片识别完成，文本长度: {} 字符", text.chars().count());
        Ok(text)
    }
}

/// 读取整个文件并编码为 `data:<mime>;base64,...`
pub async fn encode_image(image_path: &Path) -> AppResult<String> {
    let bytes = tokio::fs::read(image_path)
        .await
        .map_err(|e| AppError::image_read(image_path.display().to_string(), e))?;

    Ok(format!(
        "data:{};base64,{}",
        image_mime(image_path),
        STANDARD.encode(bytes)
    ))
}

/// 按扩展名推断图片类型，不认识的按 JPEG 处理
fn image_mime(image_path: &Path) -> &'static str {
    mime_guess::from_path(image_path)
        .first_raw()
        .filter(|mime| mime.starts_with("image/"))
        .unwrap_or("image/jpeg")
}
