/// 主题列表
///
/// 保持 CSV 中的行顺序，生成提示词时按顺序逗号连接。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicSet {
    topics: Vec<String>,
}

impl TopicSet {
    /// 创建主题列表
    pub fn new(topics: Vec<String>) -> Self {
        Self { topics }
    }

    /// 主题数量
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// 所有主题
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// 按 "A, B, C" 形式连接，供提示词使用
    pub fn joined(&self) -> String {
        self.topics.join(", ")
    }
}
