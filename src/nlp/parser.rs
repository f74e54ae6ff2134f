//! 规则解析器（编排层）
//!
//! 预处理 → 逻辑检测 → 模式提取 → 模糊概念 → 行业概念 → 置信度汇总。
//! 对无法识别的输入不报错：返回空条件序列、置信度 0.0。

use tracing::debug;

use crate::models::{CompareValue, FieldKey, LogicMode, OperatorKind, ParsedCondition, ParsedRuleSet};

use super::lexicon;
use super::patterns;
use super::preprocess;

/// 检测逻辑模式：文本出现任意 OR 连接词则整条规则按 OR，否则默认 AND。
/// 混合逻辑句子会被归并到 OR（只要出现一个 OR 连接词），已知简化。
pub fn detect_logic(text: &str) -> LogicMode {
    for connector in lexicon::OR_CONNECTORS {
        if text.contains(connector) {
            return LogicMode::Or;
        }
    }
    LogicMode::And
}

/// 规则解析器
#[derive(Debug, Default)]
pub struct RuleParser;

impl RuleParser {
    pub fn new() -> Self {
        Self
    }

    /// 解析规则文本
    ///
    /// 条件顺序：显式模式条件（按目录声明顺序）、模糊概念条件、行业概念
    /// 条件。下游 UI 按该顺序展示描述。
    pub fn parse_rule(&self, raw_text: &str) -> ParsedRuleSet {
        let normalized = preprocess::normalize(raw_text);
        let logic = detect_logic(&normalized);

        let mut conditions = self.extract_conditions(&normalized);
        conditions.extend(self.resolve_fuzzy(&normalized));
        conditions.extend(self.resolve_industry(&normalized));

        let confidence = overall_confidence(&conditions);
        debug!(
            original = raw_text,
            normalized = normalized.as_str(),
            %logic,
            count = conditions.len(),
            confidence,
            "规则解析完成"
        );

        ParsedRuleSet {
            original_text: raw_text.to_string(),
            normalized_text: normalized,
            conditions,
            logic,
            confidence,
        }
    }

    /// 按目录顺序运行所有模式；数字组解析失败的候选条件被丢弃，提取继续
    fn extract_conditions(&self, text: &str) -> Vec<ParsedCondition> {
        let mut conditions = Vec::new();
        for entry in patterns::PATTERNS.iter() {
            for caps in entry.regex.captures_iter(text) {
                if let Some(cond) = patterns::build_condition(entry.kind, &caps) {
                    debug!(kind = ?entry.kind, desc = cond.description.as_str(), "识别到条件");
                    conditions.push(cond);
                }
            }
        }
        conditions
    }

    /// 模糊概念：子串包含即触发，置信度 0.8
    fn resolve_fuzzy(&self, text: &str) -> Vec<ParsedCondition> {
        let mut conditions = Vec::new();
        for concept in lexicon::FUZZY_CONCEPTS {
            if text.contains(concept.phrase) {
                conditions.push(ParsedCondition {
                    field: concept.field,
                    operator: concept.operator,
                    value: concept.value.clone(),
                    confidence: 0.8,
                    description: format!("模糊概念: {}", concept.phrase),
                });
            }
        }
        conditions
    }

    /// 行业概念：组内首个命中关键词即产生该组的行业 EQ 条件并停止扫描该组；
    /// 多个行业组同时命中会各自产生一个条件（AND 下恒为假，保留不合并）
    fn resolve_industry(&self, text: &str) -> Vec<ParsedCondition> {
        let mut conditions = Vec::new();
        for group in lexicon::INDUSTRY_GROUPS {
            for keyword in group.keywords {
                if text.contains(keyword) {
                    conditions.push(ParsedCondition {
                        field: FieldKey::Industry,
                        operator: OperatorKind::Eq,
                        value: CompareValue::Text(group.label.to_string()),
                        confidence: 0.9,
                        description: format!("行业概念: {}", group.label),
                    });
                    break;
                }
            }
        }
        conditions
    }
}

/// 整体置信度：各条件置信度的算术平均，空序列为 0.0
fn overall_confidence(conditions: &[ParsedCondition]) -> f64 {
    if conditions.is_empty() {
        return 0.0;
    }
    let total: f64 = conditions.iter().map(|c| c.confidence).sum();
    total / conditions.len() as f64
}
