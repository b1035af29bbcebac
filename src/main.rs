use anyhow::Result;
use test_question_gen::utils::logging;
use test_question_gen::{App, Config, GenerateRequest};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 从命令行读取: <topic> <difficulty> [questionCount]
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        anyhow::bail!("用法: test_question_gen <topic> <difficulty> [questionCount]");
    }

    let request = GenerateRequest::new(
        args[0].clone(),
        args[1].clone(),
        args.get(2).and_then(|v| v.parse().ok()),
    );

    // 初始化并处理请求
    let app = App::initialize(config).await?;
    let payload = app.generate(&request).await?;

    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
