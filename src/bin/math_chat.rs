use anyhow::Result;
use question_reader::services::prompts::{EXAMPLE_LATEX, EXAMPLE_MATH_QUESTION, MATH_SYSTEM_PROMPT};
use question_reader::utils::{latex_to_text, logging::log_startup};
use question_reader::{logger, normalize, ChatInvoker, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志，guard 需持有到程序结束
    let _guard = logger::init(&config);
    log_startup("math_chat", &config.log_file);

    let invoker = ChatInvoker::from_config(&config);

    // 调用失败时打印 "Error: ..." 文本，不中断程序
    let answer = match invoker
        .invoke(EXAMPLE_MATH_QUESTION, Some(MATH_SYSTEM_PROMPT))
        .await
    {
        Ok(response) => normalize(&response),
        Err(e) => e.to_string(),
    };
    println!("{}", answer);

    println!("{}", latex_to_text(EXAMPLE_LATEX));

    Ok(())
}
