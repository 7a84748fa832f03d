/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `model_name`: 使用的 LLM 模型名称
pub fn log_startup(model_name: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 试卷生成模式");
    info!("📊 使用模型: {}", model_name);
    info!("{}", "=".repeat(60));
}

/// 打印生成任务的最终统计
///
/// # 参数
/// - `sections`: 生成的 SECTION 数量
/// - `questions`: 生成的题目总数
/// - `output_path`: PDF 输出路径
pub fn print_final_stats(sections: usize, questions: u32, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 试卷生成完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ SECTION 数量: {}", sections);
    info!("✅ 题目总数: {}", questions);
    info!("{}", "=".repeat(60));
    info!("\n试卷已保存至: {}", output_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
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
