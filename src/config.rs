use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 通用配置
    #[serde(default)]
    pub general: GeneralConfig,

    /// 数据源配置
    #[serde(default)]
    pub data: DataConfig,

    /// 筛选配置
    #[serde(default)]
    pub screener: ScreenerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 数据源类型: "mock" | "json"
    #[serde(default = "default_source")]
    pub source: String,

    /// JSON 数据源文件路径
    pub json_path: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            json_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// 筛选结果默认上限
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_source() -> String {
    "mock".to_string()
}

fn default_limit() -> usize {
    50
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// 从默认位置加载，如果不存在则使用默认配置
    pub fn load_or_default() -> Self {
        let candidates = [
            PathBuf::from("config/config.toml"),
            PathBuf::from("config.toml"),
            dirs_config_path(),
        ];

        for path in &candidates {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            data: DataConfig::default(),
            screener: ScreenerConfig::default(),
        }
    }
}

fn dirs_config_path() -> PathBuf {
    dirs_home().join(".config/qscreen/config.toml")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.data.source, "mock");
        assert_eq!(config.screener.default_limit, 50);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.data.source, "mock");
        assert_eq!(config.screener.default_limit, 50);
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [data]
            source = "json"
            json_path = "stocks.json"

            [screener]
            default_limit = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.data.source, "json");
        assert_eq!(config.data.json_path.as_deref(), Some("stocks.json"));
        assert_eq!(config.screener.default_limit, 10);
        // 未给出的段用默认值
        assert_eq!(config.general.log_level, "info");
    }
}
