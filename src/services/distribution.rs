//! 分值分配计算器
//!
//! 把试卷总分拆分到各启用题型，并推算每节的出题数量。
//! 纯计算，不发起任何网络请求。

use crate::error::PlanError;
use crate::models::exam::{ExamSpec, TypeMarks};
use crate::models::paper::SectionPlan;

/// 三种题型全选时选择题的固定分值
const MCQ_FIXED_MARKS: u32 = 10;
/// 三种题型全选时简答题的固定分值
const SHORT_FIXED_MARKS: u32 = 20;
/// 选做模式下每节额外生成的备选题数
const EXTRA_OPTIONAL_QUESTIONS: u32 = 2;

/// 计算每个启用题型的出题计划
///
/// 分配策略：
/// - 一种题型：独占全部总分
/// - 两种题型：第一种取总分的一半（向下取整），第二种取剩余
/// - 三种题型：选择题固定 10 分，简答题固定 20 分，论述题取剩余
///
/// 必答题数为该节分值除以每题分值后向下取整。任何一节分值不为正、
/// 或连一道题都放不下时返回错误，此时不应继续生成。
pub fn plan_sections(spec: &ExamSpec) -> Result<Vec<SectionPlan>, PlanError> {
    let enabled = spec.types.enabled();
    let total = i64::from(spec.total_marks);

    let allocations: Vec<(TypeMarks, i64)> = match enabled.as_slice() {
        [] => return Err(PlanError::NoEnabledTypes),
        [only] => vec![(*only, total)],
        [first, second] => {
            let half = total / 2;
            vec![(*first, half), (*second, total - half)]
        }
        [mcq, short, long] => {
            let fixed = i64::from(MCQ_FIXED_MARKS + SHORT_FIXED_MARKS);
            vec![
                (*mcq, i64::from(MCQ_FIXED_MARKS)),
                (*short, i64::from(SHORT_FIXED_MARKS)),
                (*long, total - fixed),
            ]
        }
        _ => return Err(PlanError::NoEnabledTypes),
    };

    let mut plans = Vec::with_capacity(allocations.len());
    for (type_marks, marks) in allocations {
        if marks <= 0 {
            return Err(PlanError::InvalidSectionMarks {
                qtype: type_marks.qtype.label(),
                marks,
            });
        }
        let section_marks = marks as u32;
        let required_questions = section_marks / type_marks.marks_per_question;
        if required_questions == 0 {
            return Err(PlanError::NoQuestionsFit {
                qtype: type_marks.qtype.label(),
                section_marks,
                marks_per_question: type_marks.marks_per_question,
            });
        }
        let extra_questions = if spec.optional_questions {
            EXTRA_OPTIONAL_QUESTIONS
        } else {
            0
        };
        plans.push(SectionPlan {
            qtype: type_marks.qtype,
            section_marks,
            marks_per_question: type_marks.marks_per_question,
            required_questions,
            extra_questions,
        });
    }
    Ok(plans)
}
