/// 题型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum QuestionType {
    /// 选择题
    Mcq,
    /// 简答题
    ShortAnswer,
    /// 论述题
    LongAnswer,
}

impl QuestionType {
    /// 全部题型，按试卷固定顺序排列（选择 → 简答 → 论述）
    pub const ALL: [QuestionType; 3] = [
        QuestionType::Mcq,
        QuestionType::ShortAnswer,
        QuestionType::LongAnswer,
    ];

    /// 试卷和提示词中使用的题型名称
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::ShortAnswer => "Short Answer",
            QuestionType::LongAnswer => "Long Answer",
        }
    }

    /// 每题分值的允许范围（最小值, 最大值）
    pub fn marks_range(self) -> (u32, u32) {
        match self {
            QuestionType::Mcq => (1, 10),
            QuestionType::ShortAnswer => (2, 10),
            QuestionType::LongAnswer => (5, 20),
        }
    }

    /// 未显式指定时的每题默认分值
    pub fn default_marks(self) -> u32 {
        match self {
            QuestionType::Mcq => 1,
            QuestionType::ShortAnswer => 5,
            QuestionType::LongAnswer => 10,
        }
    }

    /// 从题型名称解析（精确匹配）
    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "MCQ" => Some(QuestionType::Mcq),
            "Short Answer" => Some(QuestionType::ShortAnswer),
            "Long Answer" => Some(QuestionType::LongAnswer),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
