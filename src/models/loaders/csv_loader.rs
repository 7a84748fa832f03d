use std::path::Path;

use serde::Deserialize;
use tokio::fs;
use tracing::info;

use crate::error::InputError;
use crate::models::topics::TopicSet;

/// CSV 中的主题列名（区分大小写）
const TOPIC_COLUMN: &str = "topic";

/// CSV 行的反序列化形式，`topic` 之外的列全部忽略
#[derive(Debug, Deserialize)]
struct TopicRow {
    topic: String,
}

/// 从 CSV 文件加载主题列表
///
/// 只读取 `topic` 列，其余列（如 unit）全部忽略，空单元格跳过。
///
/// # 参数
/// - `csv_file_path`: CSV 文件路径
///
/// # 返回
/// 返回按行序排列的主题列表
pub async fn load_topics_from_csv(csv_file_path: &Path) -> Result<TopicSet, InputError> {
    if !csv_file_path.exists() {
        return Err(InputError::TopicsFileNotFound {
            path: csv_file_path.display().to_string(),
        });
    }

    let content =
        fs::read_to_string(csv_file_path)
            .await
            .map_err(|e| InputError::TopicsReadFailed {
                path: csv_file_path.display().to_string(),
                source: e,
            })?;

    let topics = parse_topics(&content)?;
    info!(
        "✓ 已从 {} 加载 {} 个主题",
        csv_file_path.display(),
        topics.len()
    );
    Ok(topics)
}

/// 解析 CSV 文本，提取 topic 列
fn parse_topics(content: &str) -> Result<TopicSet, InputError> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    // 先核对表头，缺列报专门的错误而不是笼统的反序列化失败
    let has_topic_column = reader.headers()?.iter().any(|h| h == TOPIC_COLUMN);
    if !has_topic_column {
        return Err(InputError::TopicColumnMissing);
    }

    let mut topics = Vec::new();
    for row in reader.deserialize() {
        let row: TopicRow = row?;
        if !row.topic.trim().is_empty() {
            topics.push(row.topic);
        }
    }

    if topics.is_empty() {
        return Err(InputError::NoTopics);
    }
    Ok(TopicSet::new(topics))
}
