use anyhow::Result;
use problem_forge::utils::logging;
use problem_forge::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init(Config::from_env().verbose_logging);

    // 加载配置
    let config = Config::load().await?;

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
