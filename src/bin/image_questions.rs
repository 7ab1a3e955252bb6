use anyhow::{Context, Result};
use question_reader::credentials::{CredentialSource, EnvCredential, PromptingCredential, StdinPrompt};
use question_reader::utils::logging::log_startup;
use question_reader::{logger, Config, QuestionFlow};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志，guard 需持有到程序结束
    let _guard = logger::init(&config);
    log_startup("image_questions", &config.log_file);

    // 环境变量里没有密钥时在终端询问，只在本进程内有效
    let credentials = PromptingCredential::new(
        EnvCredential::new(Config::OPENAI_KEY_VAR),
        StdinPrompt,
        "OpenAI",
    );
    let api_key = credentials.require()?;

    let flow = QuestionFlow::from_config(&config, &api_key);
    let output = flow
        .run(&config.image_path)
        .await
        .with_context(|| format!("处理图片 {} 失败", config.image_path))?;

    println!("{}", output.extracted_text);
    println!("{}", serde_json::to_string_pretty(&output.questions)?);

    Ok(())
}
