//! # Question Paper Gen
//!
//! 一个从主题 CSV 自动生成试卷 PDF 的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 整条流水线分为四层：
//!
//! ### ① 输入层（Models / Loaders）
//! - `models/` - 试卷输入、题型、出题计划等领域类型
//! - `models/loaders/csv_loader` - 读取主题 CSV，只取 topic 列
//!
//! ### ② 业务能力层（Services）
//! - `services/distribution` - 总分拆分到各题型，推算题目数量
//! - `services/prompt` - 构建单个 SECTION 的出题提示词
//! - `services/llm_service` - 调用聊天补全接口取回生成文本
//!
//! ### ③ 输出层（Assembler / Renderer）
//! - `services/assembler` - 按处理顺序拼装 SECTION A、B、C
//! - `services/renderer` - 逐行分类排版，输出分页的 A4 PDF
//!
//! ### ④ 编排层（App）
//! - `app` - 串联全部步骤：校验 → 加载 → 分配 → 生成 → 渲染
//!
//! ## 模块结构

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use cli::Cli;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::exam::{ExamSpec, QuestionTypeConfig};
pub use models::paper::{GeneratedPaper, SectionPlan};
pub use models::question_type::QuestionType;
pub use models::topics::TopicSet;
pub use services::llm_service::LlmService;
pub use services::renderer::FontSource;
