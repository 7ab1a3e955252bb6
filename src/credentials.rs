//! API 密钥来源
//!
//! 各组件在构造时显式拿到一个 [`CredentialSource`]，不直接读环境变量。
//! 交互式输入是一个可替换的 [`SecretPrompt`] 策略，结果只缓存在进程内。

use std::io::{self, BufRead, Write};
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

/// 密钥来源
pub trait CredentialSource: Send + Sync {
    /// 用于日志和错误信息的名称（通常是环境变量名）
    fn name(&self) -> &str;

    /// 尝试取得密钥，取不到或为空白时返回 `None`
    fn resolve(&self) -> Option<String>;

    /// 取得密钥，取不到时返回 `MissingCredential`
    fn require(&self) -> AppResult<String> {
        self.resolve()
            .ok_or_else(|| AppError::missing_credential(self.name()))
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// 从环境变量读取密钥
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var_name: String,
}

impl EnvCredential {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl CredentialSource for EnvCredential {
    fn name(&self) -> &str {
        &self.var_name
    }

    fn resolve(&self) -> Option<String> {
        std::env::var(&self.var_name).ok().and_then(non_blank)
    }
}

/// 固定密钥，主要用于测试和嵌入调用
#[derive(Debug, Clone)]
pub struct StaticCredential {
    name: String,
    value: Option<String>,
}

impl StaticCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            name: "static".to_string(),
            value: non_blank(value.into()),
        }
    }

    /// 一个永远取不到密钥的来源
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

impl CredentialSource for StaticCredential {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self) -> Option<String> {
        self.value.clone()
    }
}

/// 交互式询问密钥的策略
pub trait SecretPrompt: Send + Sync {
    fn ask(&self, label: &str) -> Option<String>;
}

/// 从终端标准输入读取密钥
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl SecretPrompt for StdinPrompt {
    fn ask(&self, label: &str) -> Option<String> {
        eprint!("Enter API key for {}: ", label);
        let _ = io::stderr().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => non_blank(line),
            Err(e) => {
                warn!("读取密钥输入失败: {}", e);
                None
            }
        }
    }
}

/// 先查内层来源，取不到时询问一次并缓存在进程内
///
/// 缓存不落盘；询问结果为空时不缓存，下次还会再问。
pub struct PromptingCredential<S, P> {
    inner: S,
    prompt: P,
    label: String,
    cached: OnceLock<String>,
}

impl<S: CredentialSource, P: SecretPrompt> PromptingCredential<S, P> {
    pub fn new(inner: S, prompt: P, label: impl Into<String>) -> Self {
        Self {
            inner,
            prompt,
            label: label.into(),
            cached: OnceLock::new(),
        }
    }
}

impl<S: CredentialSource, P: SecretPrompt> CredentialSource for PromptingCredential<S, P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn resolve(&self) -> Option<String> {
        if let Some(value) = self.inner.resolve() {
            return Some(value);
        }
        if let Some(value) = self.cached.get() {
            return Some(value.clone());
        }

        debug!("{} 未设置，改为交互式输入", self.inner.name());
        let value = self.prompt.ask(&self.label)?;
        Some(self.cached.get_or_init(|| value).clone())
    }
}
