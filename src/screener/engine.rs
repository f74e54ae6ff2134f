//! 筛选引擎：解析规则 + 逐条记录评估 + 截断
//!
//! 记录之间相互独立，按输入顺序评估，命中数达到 limit 即提前停止。

use tracing::{info, warn};

use crate::models::{ParsedRuleSet, StockRecord};
use crate::nlp::parser::RuleParser;

use super::evaluator;

/// 筛选引擎
#[derive(Debug, Default)]
pub struct ScreenerEngine {
    parser: RuleParser,
}

impl ScreenerEngine {
    pub fn new() -> Self {
        Self {
            parser: RuleParser::new(),
        }
    }

    /// 按规则文本筛选记录
    ///
    /// 未解析出任何条件时返回空结果（置信度 0.0 的规则集在 AND 下
    /// 会恒真通过所有记录，这里统一拦截）。
    pub fn screen(
        &self,
        records: &[StockRecord],
        rule_text: &str,
        limit: usize,
    ) -> Vec<StockRecord> {
        let rule = self.parser.parse_rule(rule_text);
        self.screen_parsed(records, &rule, limit)
    }

    /// 用已解析的规则集筛选记录，保持输入顺序
    pub fn screen_parsed(
        &self,
        records: &[StockRecord],
        rule: &ParsedRuleSet,
        limit: usize,
    ) -> Vec<StockRecord> {
        if !rule.is_recognized() {
            warn!(text = rule.original_text.as_str(), "未能解析出有效的筛选条件");
            return Vec::new();
        }

        let mut matched = Vec::new();
        for record in records {
            if evaluator::match_record(record, &rule.conditions, rule.logic) {
                matched.push(record.clone());
                if matched.len() >= limit {
                    break;
                }
            }
        }

        info!(
            total = records.len(),
            matched = matched.len(),
            limit,
            "筛选完成"
        );
        matched
    }

    /// 解析规则（供调用方先解析后复用）
    pub fn parse(&self, rule_text: &str) -> ParsedRuleSet {
        self.parser.parse_rule(rule_text)
    }
}
