use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// API Key 的环境变量名
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// 配置文件路径的环境变量名
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
/// 配置文件的默认路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    // --- LLM 配置 ---
    /// LLM API Key（必填，缺失时启动失败）
    pub llm_api_key: String,
    /// LLM API 基础地址（OpenAI 兼容端点）
    pub llm_api_base_url: String,
    /// LLM 模型名称
    pub llm_model_name: String,
    /// 单次生成请求的超时时间（秒）
    pub request_timeout_secs: u64,
    // --- PDF 字体配置 ---
    /// 自定义正文字体路径（留空使用内置 Helvetica）
    pub font_regular: Option<PathBuf>,
    /// 自定义粗体字体路径（留空使用内置 Helvetica-Bold）
    pub font_bold: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.groq.com/openai/v1".to_string(),
            llm_model_name: "llama-3.1-8b-instant".to_string(),
            request_timeout_secs: 60,
            font_regular: None,
            font_bold: None,
        }
    }
}

/// 配置文件的反序列化形式（所有字段可选，缺省走默认值）
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_key: Option<String>,
    api_base_url: Option<String>,
    model_name: Option<String>,
    request_timeout_secs: Option<u64>,
    font_regular: Option<PathBuf>,
    font_bold: Option<PathBuf>,
}

impl Config {
    /// 加载配置
    ///
    /// 优先级：默认值 < 配置文件 < 环境变量。
    /// 配置文件路径由 `config_path` 参数指定，否则取环境变量
    /// `CONFIG_PATH`，再否则为当前目录的 `config.toml`（允许不存在）。
    /// API Key 为必填项，三处都未提供时返回错误。
    pub fn load(config_path: Option<&Path>) -> AppResult<Self> {
        let env_path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let path = config_path
            .map(Path::to_path_buf)
            .or(env_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let file = Self::read_config_file(&path)?;
        let default = Self::default();

        let mut config = Self {
            llm_api_key: file.api_key.unwrap_or(default.llm_api_key),
            llm_api_base_url: file.api_base_url.unwrap_or(default.llm_api_base_url),
            llm_model_name: file.model_name.unwrap_or(default.llm_model_name),
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(default.request_timeout_secs),
            font_regular: file.font_regular,
            font_bold: file.font_bold,
        };
        config.apply_env_overrides()?;

        if config.llm_api_key.trim().is_empty() {
            return Err(ConfigError::ApiKeyMissing {
                var_name: API_KEY_ENV,
            }
            .into());
        }
        Ok(config)
    }

    /// 读取配置文件；文件不存在时返回空配置
    fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// 用环境变量覆盖已加载的配置
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            self.llm_api_key = key;
        }
        if let Ok(url) = std::env::var("LLM_API_BASE_URL") {
            self.llm_api_base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_MODEL_NAME") {
            self.llm_model_name = model;
        }
        if let Ok(value) = std::env::var("REQUEST_TIMEOUT_SECS") {
            let parsed = value.parse();
            self.request_timeout_secs = parsed.map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: "REQUEST_TIMEOUT_SECS".to_string(),
                value,
                expected_type: "u64".to_string(),
            })?;
        }
        if let Ok(path) = std::env::var("FONT_REGULAR") {
            self.font_regular = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("FONT_BOLD") {
            self.font_bold = Some(PathBuf::from(path));
        }
        Ok(())
    }
}
