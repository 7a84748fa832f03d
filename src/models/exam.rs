use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::models::question_type::QuestionType;

/// 总分下限
pub const MIN_TOTAL_MARKS: u32 = 20;

/// 单个题型的每题分值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMarks {
    /// 题型
    pub qtype: QuestionType,
    /// 每题分值
    pub marks_per_question: u32,
}

/// 题型选择
///
/// 字段为 None 表示未启用该题型，Some(n) 表示启用且每题 n 分。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTypeConfig {
    /// 选择题每题分值
    pub mcq: Option<u32>,
    /// 简答题每题分值
    pub short_answer: Option<u32>,
    /// 论述题每题分值
    pub long_answer: Option<u32>,
}

impl QuestionTypeConfig {
    /// 启用的题型，按固定顺序排列（选择 → 简答 → 论述）
    pub fn enabled(&self) -> Vec<TypeMarks> {
        let mut result = Vec::new();
        if let Some(marks) = self.mcq {
            result.push(TypeMarks {
                qtype: QuestionType::Mcq,
                marks_per_question: marks,
            });
        }
        if let Some(marks) = self.short_answer {
            result.push(TypeMarks {
                qtype: QuestionType::ShortAnswer,
                marks_per_question: marks,
            });
        }
        if let Some(marks) = self.long_answer {
            result.push(TypeMarks {
                qtype: QuestionType::LongAnswer,
                marks_per_question: marks,
            });
        }
        result
    }

    /// 是否一个题型都没启用
    pub fn is_empty(&self) -> bool {
        self.mcq.is_none() && self.short_answer.is_none() && self.long_answer.is_none()
    }
}

/// 一份试卷的完整输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSpec {
    /// 试卷标题
    pub title: String,
    /// 考试时长（自由文本，如 "90 minutes"）
    pub duration: String,
    /// 考试说明（可多行，允许为空）
    pub instructions: String,
    /// 总分
    pub total_marks: u32,
    /// 是否生成备选题（每节多生成 2 道供学生挑选）
    pub optional_questions: bool,
    /// 题型选择
    pub types: QuestionTypeConfig,
}

impl ExamSpec {
    /// 生成前的输入校验
    ///
    /// 全部在本地完成，校验失败时不会发起任何网络请求。
    pub fn validate(&self) -> Result<(), InputError> {
        if self.title.trim().is_empty() {
            return Err(InputError::TitleMissing);
        }
        if self.duration.trim().is_empty() {
            return Err(InputError::DurationMissing);
        }
        if self.types.is_empty() {
            return Err(InputError::NoQuestionTypes);
        }
        if self.total_marks < MIN_TOTAL_MARKS {
            return Err(InputError::TotalMarksTooLow {
                total: self.total_marks,
                min: MIN_TOTAL_MARKS,
            });
        }
        for tm in self.types.enabled() {
            let (min, max) = tm.qtype.marks_range();
            if tm.marks_per_question < min || tm.marks_per_question > max {
                return Err(InputError::MarksOutOfRange {
                    qtype: tm.qtype.label(),
                    marks: tm.marks_per_question,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}
