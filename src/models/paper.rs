use crate::models::question_type::QuestionType;

/// 单个 SECTION 的出题计划
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPlan {
    /// 题型
    pub qtype: QuestionType,
    /// 该节分得的总分
    pub section_marks: u32,
    /// 每题分值
    pub marks_per_question: u32,
    /// 必答题数（section_marks / marks_per_question，向下取整）
    pub required_questions: u32,
    /// 额外生成的备选题数（选做模式为 2，否则为 0）
    pub extra_questions: u32,
}

impl SectionPlan {
    /// 实际需要生成的题目总数（必答 + 备选）
    pub fn total_questions(&self) -> u32 {
        self.required_questions + self.extra_questions
    }
}

/// 已生成的单个 SECTION
#[derive(Debug, Clone)]
pub struct SectionBlock {
    /// SECTION 字母，按处理顺序为 A、B、C
    pub letter: char,
    /// 出题计划
    pub plan: SectionPlan,
    /// LLM 生成的题目文本（已去除首尾空白）
    pub body: String,
}

impl SectionBlock {
    /// SECTION 标题行，如 "SECTION A – MCQ"
    pub fn header(&self) -> String {
        format!("SECTION {} – {}", self.letter, self.plan.qtype.label())
    }

    /// 选做说明行；非选做模式返回 None
    pub fn answer_any_line(&self) -> Option<String> {
        if self.plan.extra_questions > 0 {
            Some(format!(
                "Answer any {} questions.",
                self.plan.required_questions
            ))
        } else {
            None
        }
    }
}

/// 完整试卷
///
/// 各 SECTION 按生成顺序排列，`to_text` 的输出即渲染器的输入。
#[derive(Debug, Clone, Default)]
pub struct GeneratedPaper {
    pub sections: Vec<SectionBlock>,
}

impl GeneratedPaper {
    /// 拼接为线性试卷文本
    pub fn to_text(&self) -> String {
        let mut paper = String::new();
        for section in &self.sections {
            paper.push('\n');
            paper.push_str(&section.header());
            paper.push('\n');
            if let Some(line) = section.answer_any_line() {
                paper.push_str(&line);
                paper.push_str("\n\n");
            }
            paper.push_str(&section.body);
            paper.push('\n');
        }
        paper
    }
}
