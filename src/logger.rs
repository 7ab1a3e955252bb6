//! 日志初始化
//!
//! 同时输出到终端和追加写入的日志文件。

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// 初始化全局日志
///
/// 返回的 guard 需要一直持有到程序结束，否则文件中的日志可能丢失。
/// 重复调用时只有第一次生效。
pub fn init(config: &Config) -> WorkerGuard {
    let default_level = if config.verbose_logging { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (dir, file_name) = split_log_path(&config.log_file);
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false).with_target(true))
        .try_init();

    guard
}

/// 拆分日志路径为 (目录, 文件名)
fn split_log_path(log_file: &str) -> (String, String) {
    let path = Path::new(log_file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string());
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cohere_chat.log".to_string());
    (dir, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        assert_eq!(
            split_log_path("cohere_chat.log"),
            (".".to_string(), "cohere_chat.log".to_string())
        );
        assert_eq!(
            split_log_path("logs/app.log"),
            ("logs".to_string(), "app.log".to_string())
        );
    }
}
