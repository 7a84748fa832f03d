//! 试卷拼装
//!
//! 把各 SECTION 的出题计划和生成文本拼成一份完整试卷。

use crate::models::paper::{GeneratedPaper, SectionBlock, SectionPlan};

/// SECTION 编号的起始字母
const FIRST_SECTION_LETTER: u8 = b'A';

/// 按处理顺序拼装试卷
///
/// SECTION 字母从 A 开始依次递增，只取决于处理顺序，与题型无关。
pub fn assemble_paper(sections: Vec<(SectionPlan, String)>) -> GeneratedPaper {
    let blocks = sections
        .into_iter()
        .enumerate()
        .map(|(index, (plan, body))| SectionBlock {
            letter: (FIRST_SECTION_LETTER + index as u8) as char,
            plan,
            body,
        })
        .collect();
    GeneratedPaper { sections: blocks }
}
