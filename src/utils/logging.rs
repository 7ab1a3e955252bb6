/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `name`: 程序名称
/// - `log_file`: 日志文件路径
pub fn log_startup(name: &str, log_file: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 {} 启动 - {}", name, chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("📝 日志文件: {}", log_file);
    info!("{}", "=".repeat(60));
}

/// 记录一个阶段的标题
pub fn log_stage(title: &str) {
    info!("\n{}", "─".repeat(60));
    info!("{}", title);
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
