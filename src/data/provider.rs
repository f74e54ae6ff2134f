//! 数据提供者
//!
//! 抽象记录来源，支持内置模拟数据和 JSON 文件两种实现。
//! 数据获取发生在筛选之前，解析与评估内部不做任何 I/O。

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::AppConfig;
use crate::models::StockRecord;

use super::mock;

/// 模拟数据提供者
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    pub async fn load_records(&self) -> Result<Vec<StockRecord>> {
        Ok(mock::mock_records())
    }

    pub fn name(&self) -> &str {
        "Mock"
    }
}

/// JSON 文件数据提供者
///
/// 文件内容为 StockRecord 的 JSON 数组；timestamp 缺省时取读入时刻。
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load_records(&self) -> Result<Vec<StockRecord>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read records file: {}", self.path.display()))?;
        let records: Vec<StockRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse records JSON: {}", self.path.display()))?;
        Ok(records)
    }

    pub fn name(&self) -> &str {
        "JsonFile"
    }
}

/// 数据源类型（枚举分发，无需 async_trait）
pub enum DataProviderKind {
    Mock(MockProvider),
    JsonFile(JsonFileProvider),
}

impl DataProviderKind {
    /// 根据配置创建数据提供者
    pub fn from_config(config: &AppConfig) -> Self {
        match config.data.source.as_str() {
            "json" => {
                let path = config
                    .data
                    .json_path
                    .clone()
                    .unwrap_or_else(|| "stocks.json".to_string());
                info!(path = path.as_str(), "Using JSON file data source");
                DataProviderKind::JsonFile(JsonFileProvider::new(path))
            }
            _ => {
                info!("Using built-in mock data source");
                DataProviderKind::Mock(MockProvider::new())
            }
        }
    }

    pub async fn load_records(&self) -> Result<Vec<StockRecord>> {
        match self {
            DataProviderKind::Mock(p) => p.load_records().await,
            DataProviderKind::JsonFile(p) => p.load_records().await,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DataProviderKind::Mock(p) => p.name(),
            DataProviderKind::JsonFile(p) => p.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider() {
        let provider = MockProvider::new();
        let records = provider.load_records().await.unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(provider.name(), "Mock");
    }

    #[tokio::test]
    async fn test_json_file_provider() {
        let path = std::env::temp_dir().join("qscreen_provider_test.json");
        let json = r#"[
            {
                "symbol": "600519",
                "name": "贵州茅台",
                "current_price": 1680.0,
                "change_pct": -0.5,
                "volume": 15000,
                "market_cap": 2.1e12,
                "pe_ratio": 28.5,
                "pb_ratio": 12.8,
                "turnover_rate": 0.3,
                "industry": "消费股"
            }
        ]"#;
        std::fs::write(&path, json).unwrap();

        let provider = JsonFileProvider::new(&path);
        let records = provider.load_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "贵州茅台");
        // 可选字段缺省
        assert!(records[0].rsi.is_none());
        assert_eq!(records[0].industry.as_deref(), Some("消费股"));

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_json_file_provider_missing_file() {
        let provider = JsonFileProvider::new("/nonexistent/qscreen_records.json");
        assert!(provider.load_records().await.is_err());
    }
}
