//! 提示词构建
//!
//! 纯字符串模板，每个 SECTION 独立构建一条提示词。

/// 构建单个 SECTION 的出题提示词
///
/// 模板要求模型只输出题目本身：不带标题、解释和 Markdown，
/// 不复述主题名，题号从 Q1. 开始，每题以分值标注结尾。
///
/// # 参数
/// - `qtype_label`: 题型名称（如 "MCQ"）
/// - `topics`: 逗号连接的主题列表
/// - `num_questions`: 需要生成的题目总数（含备选题）
/// - `marks_per_question`: 每题分值
pub fn build_prompt(
    qtype_label: &str,
    topics: &str,
    num_questions: u32,
    marks_per_question: u32,
) -> String {
    format!(
        r#"
Generate ONLY questions.

Rules:
- No headings
- No explanations
- No markdown
- No topic names
- Start strictly as Q1., Q2., etc.
- End each question with ({} marks)

Question Type: {}
Topics: {}
Number of Questions: {}
"#,
        marks_per_question, qtype_label, topics, num_questions
    )
}
