use chrono::{DateTime, Local};
use std::fmt;

/// 筛选字段（与记录字段一一对应的固定枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    /// 现价
    CurrentPrice,
    /// 涨跌幅 (%)
    ChangePct,
    /// 成交量（手）
    Volume,
    /// 总市值（元）
    MarketCap,
    /// 市盈率
    PeRatio,
    /// 市净率
    PbRatio,
    /// 换手率 (%)
    TurnoverRate,
    /// RSI
    Rsi,
    /// 行业（伪字段，EQ 匹配）
    Industry,
    /// 均线信号（现价站上的最长均线周期）
    MaSignal,
}

impl FieldKey {
    /// 字段的规范键名
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::CurrentPrice => "current_price",
            FieldKey::ChangePct => "change_pct",
            FieldKey::Volume => "volume",
            FieldKey::MarketCap => "market_cap",
            FieldKey::PeRatio => "pe_ratio",
            FieldKey::PbRatio => "pb_ratio",
            FieldKey::TurnoverRate => "turnover_rate",
            FieldKey::Rsi => "rsi",
            FieldKey::Industry => "industry",
            FieldKey::MaSignal => "ma_signal",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 比较操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Gt,
    Lt,
    Gte,
    Lte,
    Eq,
    Between,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKind::Gt => write!(f, ">"),
            OperatorKind::Lt => write!(f, "<"),
            OperatorKind::Gte => write!(f, ">="),
            OperatorKind::Lte => write!(f, "<="),
            OperatorKind::Eq => write!(f, "="),
            OperatorKind::Between => write!(f, "between"),
        }
    }
}

/// 规则集的逻辑模式（全局单一，无分组/优先级）
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicMode {
    And,
    Or,
}

impl fmt::Display for LogicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicMode::And => write!(f, "AND"),
            LogicMode::Or => write!(f, "OR"),
        }
    }
}

/// 条件比较值：单值、闭区间或文本（仅行业 EQ 条件）
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CompareValue {
    Number(f64),
    Range(f64, f64),
    Text(String),
}

impl fmt::Display for CompareValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareValue::Number(n) => write!(f, "{}", n),
            CompareValue::Range(lo, hi) => write!(f, "[{}, {}]", lo, hi),
            CompareValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 解析出的单个筛选条件，创建后不再修改
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParsedCondition {
    /// 字段
    pub field: FieldKey,
    /// 操作符
    pub operator: OperatorKind,
    /// 比较值
    pub value: CompareValue,
    /// 置信度 [0, 1]（显式数值条件 1.0，模糊概念 0.8，行业概念 0.9）
    pub confidence: f64,
    /// 人类可读描述（UI 按条件顺序展示）
    pub description: String,
}

impl fmt::Display for ParsedCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {} {})",
            self.description, self.field, self.operator, self.value
        )
    }
}

/// 单条规则文本的完整解析结果
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParsedRuleSet {
    /// 原始输入文本
    pub original_text: String,
    /// 预处理后的文本
    pub normalized_text: String,
    /// 条件序列：显式模式条件在前（按目录声明顺序），其后模糊概念、行业概念
    pub conditions: Vec<ParsedCondition>,
    /// 逻辑模式
    pub logic: LogicMode,
    /// 整体置信度：各条件置信度的算术平均；无条件时为 0.0，
    /// 调用方必须将 0.0 视为解析失败而不是全通过的筛选
    pub confidence: f64,
}

impl ParsedRuleSet {
    /// 是否解析出了任何条件
    pub fn is_recognized(&self) -> bool {
        !self.conditions.is_empty()
    }
}

/// 记录字段的值（数值或文本）
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Num(f64),
    Text(String),
}

/// 股票记录（筛选的输入单元）
///
/// rsi / ma_signal / industry 为可选字段：缺失与取值为 0 是可区分的两种状态，
/// 评估器按"缺失不否决"处理。
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StockRecord {
    /// 股票代码
    pub symbol: String,
    /// 股票名称
    pub name: String,
    /// 现价
    pub current_price: f64,
    /// 涨跌幅 (%)
    pub change_pct: f64,
    /// 成交量（手）
    pub volume: u64,
    /// 总市值（元）
    pub market_cap: f64,
    /// 市盈率
    pub pe_ratio: f64,
    /// 市净率
    pub pb_ratio: f64,
    /// 换手率 (%)
    pub turnover_rate: f64,
    /// RSI（14 日，数据源没有时缺失）
    #[serde(default)]
    pub rsi: Option<f64>,
    /// 现价站上的最长均线周期（5/10/20/60），低于全部均线时为 0
    #[serde(default)]
    pub ma_signal: Option<u32>,
    /// 行业标签
    #[serde(default)]
    pub industry: Option<String>,
    /// 数据时间戳
    #[serde(default = "Local::now")]
    pub timestamp: DateTime<Local>,
}

impl StockRecord {
    /// 按字段键读取记录值；缺失字段返回 None，与取值为 0 区分
    pub fn field(&self, key: FieldKey) -> Option<FieldValue> {
        match key {
            FieldKey::CurrentPrice => Some(FieldValue::Num(self.current_price)),
            FieldKey::ChangePct => Some(FieldValue::Num(self.change_pct)),
            FieldKey::Volume => Some(FieldValue::Num(self.volume as f64)),
            FieldKey::MarketCap => Some(FieldValue::Num(self.market_cap)),
            FieldKey::PeRatio => Some(FieldValue::Num(self.pe_ratio)),
            FieldKey::PbRatio => Some(FieldValue::Num(self.pb_ratio)),
            FieldKey::TurnoverRate => Some(FieldValue::Num(self.turnover_rate)),
            FieldKey::Rsi => self.rsi.map(FieldValue::Num),
            FieldKey::MaSignal => self.ma_signal.map(|n| FieldValue::Num(n as f64)),
            FieldKey::Industry => self.industry.clone().map(FieldValue::Text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record() -> StockRecord {
        StockRecord {
            symbol: "600519".to_string(),
            name: "贵州茅台".to_string(),
            current_price: 1680.0,
            change_pct: -0.5,
            volume: 15000,
            market_cap: 2.1e12,
            pe_ratio: 28.5,
            pb_ratio: 12.8,
            turnover_rate: 0.8,
            rsi: None,
            ma_signal: Some(20),
            industry: Some("消费股".to_string()),
            timestamp: Local::now(),
        }
    }

    #[test]
    fn test_field_accessor() {
        let r = make_record();
        assert_eq!(
            r.field(FieldKey::CurrentPrice),
            Some(FieldValue::Num(1680.0))
        );
        assert_eq!(r.field(FieldKey::Volume), Some(FieldValue::Num(15000.0)));
        // 缺失字段返回 None 而不是 0
        assert_eq!(r.field(FieldKey::Rsi), None);
        assert_eq!(r.field(FieldKey::MaSignal), Some(FieldValue::Num(20.0)));
        assert_eq!(
            r.field(FieldKey::Industry),
            Some(FieldValue::Text("消费股".to_string()))
        );
    }

    #[test]
    fn test_field_key_str() {
        assert_eq!(FieldKey::CurrentPrice.as_str(), "current_price");
        assert_eq!(FieldKey::PeRatio.as_str(), "pe_ratio");
        assert_eq!(FieldKey::MaSignal.as_str(), "ma_signal");
    }

    #[test]
    fn test_rule_set_serialize() {
        let rule = ParsedRuleSet {
            original_text: "PE小于20".to_string(),
            normalized_text: "PE小于20".to_string(),
            conditions: vec![ParsedCondition {
                field: FieldKey::PeRatio,
                operator: OperatorKind::Lt,
                value: CompareValue::Number(20.0),
                confidence: 1.0,
                description: "PE小于20".to_string(),
            }],
            logic: LogicMode::And,
            confidence: 1.0,
        };
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"pe_ratio\""));
        assert!(json.contains("\"lt\""));
        assert!(json.contains("\"AND\""));
    }
}
