use anyhow::Result;
use clap::Parser;

use question_paper_gen::app::App;
use question_paper_gen::cli::Cli;
use question_paper_gen::config::Config;
use question_paper_gen::logger;
use question_paper_gen::models::exam::ExamSpec;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 解析命令行并加载配置
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // 初始化并运行应用
    let spec = ExamSpec::from(&cli);
    let app = App::initialize(config);
    app.run(&spec, &cli.topics_csv, &cli.output).await?;

    Ok(())
}
