//! 统一错误类型
//!
//! 所有对外操作都返回 [`AppResult`]，失败时携带 [`ErrorKind`] 标签和消息，
//! 调用方可以按标签分支，也可以直接打印。

use std::fmt;

use thiserror::Error;

/// 错误标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 环境中找不到 API 密钥
    MissingCredential,
    /// 远程调用失败（网络、HTTP 状态、SDK 错误）
    RemoteCallFailure,
    /// 请求参数不合法
    InvalidRequest,
    /// 图片读取失败
    ImageRead,
    /// 模型返回内容为空
    EmptyResponse,
    /// 结构化输出不符合约定的 schema
    SchemaViolation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MissingCredential => "MissingCredential",
            ErrorKind::RemoteCallFailure => "RemoteCallFailure",
            ErrorKind::InvalidRequest => "InvalidRequest",
            ErrorKind::ImageRead => "ImageRead",
            ErrorKind::EmptyResponse => "EmptyResponse",
            ErrorKind::SchemaViolation => "SchemaViolation",
        };
        f.write_str(name)
    }
}

/// 应用程序错误类型
///
/// `Display` 统一以 `Error: ` 开头。
#[derive(Debug, Error)]
pub enum AppError {
    /// 找不到 API 密钥
    #[error("Error: API key not found ({var_name})")]
    MissingCredential { var_name: String },

    /// 远程调用失败
    #[error("Error: {message}")]
    RemoteCallFailure { message: String },

    /// 请求参数不合法
    #[error("Error: invalid request: {message}")]
    InvalidRequest { message: String },

    /// 图片读取失败
    #[error("Error: failed to read image {path}: {source}")]
    ImageRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 模型返回内容为空
    #[error("Error: empty response from model {model}")]
    EmptyResponse { model: String },

    /// 结构化输出解析失败
    #[error("Error: response does not match schema: {message}")]
    SchemaViolation { message: String },
}

impl AppError {
    /// 返回错误标签
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingCredential { .. } => ErrorKind::MissingCredential,
            AppError::RemoteCallFailure { .. } => ErrorKind::RemoteCallFailure,
            AppError::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            AppError::ImageRead { .. } => ErrorKind::ImageRead,
            AppError::EmptyResponse { .. } => ErrorKind::EmptyResponse,
            AppError::SchemaViolation { .. } => ErrorKind::SchemaViolation,
        }
    }

    // ========== 便捷构造函数 ==========

    /// 创建缺少密钥错误
    pub fn missing_credential(var_name: impl Into<String>) -> Self {
        AppError::MissingCredential {
            var_name: var_name.into(),
        }
    }

    /// 创建远程调用失败错误
    pub fn remote(message: impl Into<String>) -> Self {
        AppError::RemoteCallFailure {
            message: message.into(),
        }
    }

    /// 创建请求参数错误
    pub fn invalid_request(message: impl Into<String>) -> Self {
        AppError::InvalidRequest {
            message: message.into(),
        }
    }

    /// 创建图片读取错误
    pub fn image_read(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::ImageRead {
            path: path.into(),
            source,
        }
    }

    /// 创建 schema 不符错误
    pub fn schema(message: impl Into<String>) -> Self {
        AppError::SchemaViolation {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::schema(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::remote(err.to_string())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_error_prefix() {
        let err = AppError::remote("connection reset");
        assert_eq!(err.to_string(), "Error: connection reset");
        assert_eq!(err.kind(), ErrorKind::RemoteCallFailure);

        let err = AppError::missing_credential("COHERE_API_KEY");
        assert!(err.to_string().starts_with("Error: API key not found"));
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
    }

    #[test]
    fn test_image_read_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = AppError::image_read("missing.png", io);
        assert_eq!(err.kind(), ErrorKind::ImageRead);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn test_json_error_maps_to_schema_violation() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AppError = json_err.into();
        assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    }
}
