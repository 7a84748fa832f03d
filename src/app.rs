use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::error::{AppResult, InputError};
use crate::models::exam::ExamSpec;
use crate::models::loaders::load_topics_from_csv;
use crate::models::paper::{GeneratedPaper, SectionPlan};
use crate::models::topics::TopicSet;
use crate::services::assembler::assemble_paper;
use crate::services::distribution::plan_sections;
use crate::services::llm_service::{check_question_count, LlmService};
use crate::services::prompt::build_prompt;
use crate::services::renderer::{render_paper_pdf, save_pdf, FontSource};
use crate::utils::logging::{log_startup, print_final_stats, truncate_text};

/// 应用主结构
pub struct App {
    config: Config,
    llm_service: LlmService,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(&config.llm_model_name);
        let llm_service = LlmService::new(&config);
        Self {
            config,
            llm_service,
        }
    }

    /// 生成一份完整试卷并渲染为 PDF 字节
    ///
    /// 库层入口：校验 → 分配分值 → 逐节生成 → 拼装 → 渲染。
    /// 只负责生成本身，不落盘也不打印；本地校验和分值分配
    /// 都在第一次网络请求之前完成。
    pub async fn generate(
        &self,
        spec: &ExamSpec,
        topics: &TopicSet,
    ) -> AppResult<(GeneratedPaper, Vec<u8>)> {
        spec.validate()?;
        if topics.is_empty() {
            return Err(InputError::NoTopics.into());
        }
        let fonts = FontSource::from_config(
            self.config.font_regular.clone(),
            self.config.font_bold.clone(),
        )?;

        let plans = plan_sections(spec)?;
        log_plan(&plans, spec.total_marks, topics.len());

        // ========== 逐节生成 ==========
        let mut sections = Vec::with_capacity(plans.len());
        for (index, plan) in plans.iter().enumerate() {
            let section_number = index + 1;
            info!(
                "📄 [{}/{}] 正在生成 {} SECTION（{} 道题，每题 {} 分）...",
                section_number,
                plans.len(),
                plan.qtype.label(),
                plan.total_questions(),
                plan.marks_per_question
            );

            let prompt = build_prompt(
                plan.qtype.label(),
                &topics.joined(),
                plan.total_questions(),
                plan.marks_per_question,
            );
            let body = self.llm_service.generate(&prompt).await?;

            // 核对题号数量，不一致只提示不拦截
            check_question_count(plan.qtype.label(), &body, plan.total_questions());
            info!("✓ 生成完成: {}", truncate_text(&body, 80));

            sections.push((*plan, body));
        }

        // ========== 拼装与渲染 ==========
        let paper = assemble_paper(sections);
        let pdf_bytes = render_paper_pdf(spec, &paper.to_text(), &fonts)?;
        Ok((paper, pdf_bytes))
    }

    /// 运行完整生成流程（命令行）
    ///
    /// 加载主题 CSV → 生成并渲染 → 终端预览 → 写入 PDF 文件。
    pub async fn run(&self, spec: &ExamSpec, topics_csv: &Path, output: &Path) -> AppResult<()> {
        let topics = load_topics_from_csv(topics_csv).await?;
        let (paper, pdf_bytes) = self.generate(spec, &topics).await?;

        // 终端预览完整试卷
        println!("{}", paper.to_text());

        save_pdf(output, &pdf_bytes).await?;

        let total_questions: u32 = paper
            .sections
            .iter()
            .map(|s| s.plan.total_questions())
            .sum();
        print_final_stats(
            paper.sections.len(),
            total_questions,
            &output.display().to_string(),
        );

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_plan(plans: &[SectionPlan], total_marks: u32, topic_count: usize) {
    info!("✓ 找到 {} 个主题", topic_count);
    info!("📋 总分 {} 分，共 {} 个 SECTION", total_marks, plans.len());
    for plan in plans {
        info!(
            "  {} - {} 分（{} 道必答题，每题 {} 分）",
            plan.qtype.label(),
            plan.section_marks,
            plan.required_questions,
            plan.marks_per_question
        );
    }
}
