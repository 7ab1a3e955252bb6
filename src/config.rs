/// 程序配置
///
/// 密钥不放在这里，由 [`crate::credentials`] 单独注入。
#[derive(Clone, Debug)]
pub struct Config {
    // --- 聊天（Cohere）配置 ---
    pub cohere_api_base_url: String,
    pub cohere_model: String,
    // --- OpenAI 兼容接口配置 ---
    pub openai_api_base_url: String,
    /// 读图使用的模型
    pub vision_model: String,
    /// 拆题使用的模型
    pub splitter_model: String,
    pub splitter_temperature: f32,
    // --- 运行配置 ---
    /// 输出日志文件（追加写入）
    pub log_file: String,
    /// 待识别的图片
    pub image_path: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Config {
    /// Cohere 密钥环境变量
    pub const COHERE_KEY_VAR: &'static str = "COHERE_API_KEY";
    /// OpenAI 密钥环境变量
    pub const OPENAI_KEY_VAR: &'static str = "OPENAI_API_KEY";
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cohere_api_base_url: "https://api.cohere.com".to_string(),
            cohere_model: "command-a-03-2025".to_string(),
            openai_api_base_url: "https://api.openai.com/v1".to_string(),
            vision_model: "gpt-4o".to_string(),
            splitter_model: "gpt-4o-mini".to_string(),
            splitter_temperature: 0.0,
            log_file: "cohere_chat.log".to_string(),
            image_path: "IMG_2075.png".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置或无法解析的项使用默认值
    ///
    /// 会先尝试读取当前目录下的 `.env`。
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 使用自定义查找函数加载配置
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            cohere_api_base_url: lookup("COHERE_API_BASE_URL").unwrap_or(default.cohere_api_base_url),
            cohere_model: lookup("COHERE_MODEL").unwrap_or(default.cohere_model),
            openai_api_base_url: lookup("OPENAI_API_BASE_URL").unwrap_or(default.openai_api_base_url),
            vision_model: lookup("VISION_MODEL").unwrap_or(default.vision_model),
            splitter_model: lookup("SPLITTER_MODEL").unwrap_or(default.splitter_model),
            splitter_temperature: lookup("SPLITTER_TEMPERATURE").and_then(|v| v.parse().ok()).unwrap_or(default.splitter_temperature),
            log_file: lookup("LOG_FILE").unwrap_or(default.log_file),
            image_path: lookup("IMAGE_PATH").unwrap_or(default.image_path),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_env_empty() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.cohere_model, "command-a-03-2025");
        assert_eq!(config.vision_model, "gpt-4o");
        assert_eq!(config.splitter_model, "gpt-4o-mini");
        assert_eq!(config.log_file, "cohere_chat.log");
        assert_eq!(config.splitter_temperature, 0.0);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = [
            ("COHERE_MODEL", "command-r"),
            ("SPLITTER_TEMPERATURE", "not-a-number"),
            ("VERBOSE_LOGGING", "true"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.cohere_model, "command-r");
        assert_eq!(config.splitter_temperature, 0.0);
        assert!(config.verbose_logging);
    }
}
