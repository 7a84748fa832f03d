//! 命令行参数
//!
//! clap 的 derive 宏负责 --help、缺参报错和类型转换。
//! 参数在这里转换为业务层输入，业务层不接触 clap 类型。

use std::path::PathBuf;

use clap::Parser;

use crate::models::exam::{ExamSpec, QuestionTypeConfig, MIN_TOTAL_MARKS};
use crate::models::question_type::QuestionType;

/// 从主题 CSV 生成一份试卷 PDF
#[derive(Parser, Debug)]
#[command(name = "question_paper_gen", version)]
pub struct Cli {
    /// 主题 CSV 文件路径（需包含 topic 列）
    pub topics_csv: PathBuf,

    /// 试卷标题
    #[arg(long)]
    pub title: String,

    /// 考试时长（自由文本，如 "90 minutes" 或 "1.5 hours"）
    #[arg(long)]
    pub duration: String,

    /// 试卷总分
    #[arg(long, default_value_t = MIN_TOTAL_MARKS)]
    pub total_marks: u32,

    /// 考试说明，多条用换行分隔
    #[arg(long, default_value = "")]
    pub instructions: String,

    /// 启用选择题
    #[arg(long)]
    pub mcq: bool,

    /// 选择题每题分值
    #[arg(long, default_value_t = QuestionType::Mcq.default_marks())]
    pub mcq_marks: u32,

    /// 启用简答题
    #[arg(long)]
    pub short: bool,

    /// 简答题每题分值
    #[arg(long, default_value_t = QuestionType::ShortAnswer.default_marks())]
    pub short_marks: u32,

    /// 启用论述题
    #[arg(long)]
    pub long: bool,

    /// 论述题每题分值
    #[arg(long, default_value_t = QuestionType::LongAnswer.default_marks())]
    pub long_marks: u32,

    /// 生成备选题（每节额外生成 2 道供学生挑选）
    #[arg(long)]
    pub optional: bool,

    /// PDF 输出路径
    #[arg(long, default_value = "Question_Paper.pdf")]
    pub output: PathBuf,

    /// 配置文件路径（默认为当前目录的 config.toml）
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// 命令行参数到试卷输入的转换，这是 CLI 层和业务层的边界
impl From<&Cli> for ExamSpec {
    fn from(cli: &Cli) -> Self {
        ExamSpec {
            title: cli.title.clone(),
            duration: cli.duration.clone(),
            instructions: cli.instructions.clone(),
            total_marks: cli.total_marks,
            optional_questions: cli.optional,
            types: QuestionTypeConfig {
                mcq: cli.mcq.then_some(cli.mcq_marks),
                short_answer: cli.short.then_some(cli.short_marks),
                long_answer: cli.long.then_some(cli.long_marks),
            },
        }
    }
}
