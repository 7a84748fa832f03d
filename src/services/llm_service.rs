//! LLM 服务 - 生成能力层
//!
//! 只负责"发送提示词、取回生成文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Groq、Azure 等）

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use regex::Regex;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;

/// 匹配行首题号（如 "Q1."、"Q12."）的正则
const QUESTION_MARKER_PATTERN: &str = r"(?m)^\s*Q\d+\.";

/// LLM 生成服务
///
/// 职责：
/// - 把一条提示词发给聊天补全接口，取回首条回复
/// - 不关心提示词内容，除去除首尾空白外不修改生成结果
/// - 单次调用有超时上限，失败不自动重试
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    timeout_secs: u64,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }

    /// 发送提示词并取回生成文本
    ///
    /// # 参数
    /// - `prompt`: 用户提示词
    ///
    /// # 返回
    /// 返回去除首尾空白后的生成文本
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| LlmError::api_call_failed(&self.model_name, e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .build()
            .map_err(|e| LlmError::api_call_failed(&self.model_name, e))?;

        // 调用 API，超时视为失败
        let chat = self.client.chat();
        let call = chat.create(request);
        let response = match timeout(Duration::from_secs(self.timeout_secs), call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("LLM API 调用失败: {}", e);
                return Err(LlmError::api_call_failed(&self.model_name, e));
            }
            Err(_) => {
                warn!("LLM API 调用超时（{} 秒）", self.timeout_secs);
                return Err(LlmError::Timeout {
                    model: self.model_name.clone(),
                    seconds: self.timeout_secs,
                });
            }
        };

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        let content = content.trim();
        if content.is_empty() {
            return Err(LlmError::EmptyContent {
                model: self.model_name.clone(),
            });
        }

        Ok(content.to_string())
    }
}

/// 统计生成文本中的行首题号数量
///
/// 用于生成后核对题目数量是否符合预期，只统计不修改。
pub fn count_question_markers(text: &str) -> usize {
    match Regex::new(QUESTION_MARKER_PATTERN) {
        Ok(re) => re.find_iter(text).count(),
        Err(_) => 0,
    }
}

/// 核对生成文本的题号数量是否符合预期
///
/// 数量不符只记录警告，生成文本仍按原样使用。返回是否相符。
pub fn check_question_count(qtype_label: &str, body: &str, expected: u32) -> bool {
    let markers = count_question_markers(body);
    let matched = markers == expected as usize;
    if !matched {
        warn!(
            "⚠️ {} SECTION 题号数量不符: 预期 {} 道，实际 {} 道",
            qtype_label, expected, markers
        );
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::prompt::build_prompt;

    /// 创建测试用的 LlmService（API Key 来自环境变量）
    fn create_test_service() -> LlmService {
        let config = Config {
            llm_api_key: std::env::var(crate::config::API_KEY_ENV).unwrap_or_default(),
            ..Config::default()
        };
        LlmService::new(&config)
    }

    #[test]
    fn test_count_question_markers_basic() {
        let text = "Q1. What is a limit? (5 marks)\nQ2. Define derivative. (5 marks)\nQ3. Evaluate. (5 marks)";
        assert_eq!(count_question_markers(text), 3);
    }

    #[test]
    fn test_count_question_markers_requires_line_start() {
        let text = "Q1. First question. See Q2. for details\nnot a marker Q3.";
        assert_eq!(count_question_markers(text), 1);
    }

    #[test]
    fn test_count_question_markers_allows_indentation() {
        let text = "  Q1. Indented question (2 marks)\nQ2. Second (2 marks)";
        assert_eq!(count_question_markers(text), 2);
    }

    #[test]
    fn test_count_question_markers_empty_text() {
        assert_eq!(count_question_markers(""), 0);
    }

    #[test]
    fn test_question_count_mismatch_only_warns() {
        let body = "Q1. First question? (1 marks)\nQ2. Second question? (1 marks)";
        // 数量不符不会中断流程，只是核对结果为不相符
        assert!(!check_question_count("MCQ", body, 3));
        assert!(check_question_count("MCQ", body, 2));
    }

    /// 测试真实的生成调用
    ///
    /// 运行方式：
    /// ```bash
    /// GROQ_API_KEY=... cargo test test_generate_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_generate_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let service = create_test_service();
        let prompt = build_prompt("MCQ", "Algebra, Geometry", 3, 1);

        println!("\n========== 测试生成调用 ==========");
        let result = service.generate(&prompt).await;

        match result {
            Ok(response) => {
                println!("\n========== LLM 响应 ==========");
                println!("{}", response);
                println!("==============================\n");
                println!("✅ 生成调用成功！题号数量: {}", count_question_markers(&response));
                assert!(!response.is_empty());
            }
            Err(e) => {
                println!("❌ 生成调用失败: {}", e);
                panic!("测试失败: {}", e);
            }
        }
    }
}
