use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 输入数据错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 分值分配错误
    #[error("分值分配错误: {0}")]
    Plan(#[from] PlanError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 文档渲染错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// API Key 缺失
    #[error("未设置 API Key: 请设置环境变量 {var_name} 或在配置文件中填写 api_key")]
    ApiKeyMissing { var_name: &'static str },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 输入数据错误
#[derive(Debug, Error)]
pub enum InputError {
    /// 主题 CSV 文件不存在
    #[error("主题文件不存在: {path}")]
    TopicsFileNotFound { path: String },
    /// 读取主题 CSV 失败
    #[error("读取主题文件失败 ({path}): {source}")]
    TopicsReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// CSV 解析失败
    #[error("CSV解析失败: {0}")]
    CsvParseFailed(#[from] csv::Error),
    /// CSV 表头缺少 topic 列
    #[error("CSV文件缺少 topic 列")]
    TopicColumnMissing,
    /// CSV 中没有任何有效主题
    #[error("主题列表为空")]
    NoTopics,
    /// 试卷标题为空
    #[error("试卷标题不能为空")]
    TitleMissing,
    /// 考试时长为空
    #[error("考试时长不能为空")]
    DurationMissing,
    /// 未选择任何题型
    #[error("至少需要选择一种题型")]
    NoQuestionTypes,
    /// 每题分值超出允许范围
    #[error("{qtype} 每题分值 {marks} 超出允许范围 [{min}, {max}]")]
    MarksOutOfRange {
        qtype: &'static str,
        marks: u32,
        min: u32,
        max: u32,
    },
    /// 总分低于下限
    #[error("总分 {total} 低于下限 {min}")]
    TotalMarksTooLow { total: u32, min: u32 },
}

/// 分值分配错误
#[derive(Debug, Error)]
pub enum PlanError {
    /// 没有启用任何题型
    #[error("没有启用任何题型，无法分配分值")]
    NoEnabledTypes,
    /// 某一节分得的分值不为正
    #[error("{qtype} 分得 {marks} 分，无法组成有效的SECTION")]
    InvalidSectionMarks { qtype: &'static str, marks: i64 },
    /// 每题分值大于该节总分
    #[error("{qtype} 每题 {marks_per_question} 分超过该节总分 {section_marks}，题目数为 0")]
    NoQuestionsFit {
        qtype: &'static str,
        section_marks: u32,
        marks_per_question: u32,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 请求超时
    #[error("LLM请求超时 (模型: {model}, 超时: {seconds}秒)")]
    Timeout { model: String, seconds: u64 },
}

/// 文档渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 字体文件不存在
    #[error("字体文件不存在: {path}")]
    FontNotFound { path: String },
    /// 字体加载失败
    #[error("加载字体失败 ({path}): {message}")]
    FontLoadFailed { path: String, message: String },
    /// PDF 后端错误
    #[error("PDF生成失败: {0}")]
    Backend(String),
    /// 写入输出文件失败
    #[error("写入PDF文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl LlmError {
    /// 创建 API 调用失败错误
    pub fn api_call_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
