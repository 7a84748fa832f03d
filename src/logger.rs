//! 日志初始化
//!
//! 基于 tracing 的全局日志订阅器

use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 日志级别由环境变量 `RUST_LOG` 控制，未设置时默认 `info`。
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
