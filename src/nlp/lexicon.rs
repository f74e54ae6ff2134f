//! 词表目录：字段/操作符同义词、数值单位、模糊概念、行业关键词
//!
//! 进程启动后只读，解析期间不会变更。

use crate::models::{CompareValue, FieldKey, OperatorKind};

// ===== 字段同义词（正则片段，按声明顺序参与匹配） =====

pub const PRICE_WORDS: &str = "股价|价格|收盘价|现价|最新价";
pub const CHANGE_WORDS: &str = "涨幅|涨跌幅|涨幅度";
pub const DROP_WORDS: &str = "跌幅|跌幅度";
pub const MARKET_CAP_WORDS: &str = "市值|总市值|流通市值";
pub const PE_WORDS: &str = "PE|市盈率|动态市盈率|静态市盈率";
pub const PB_WORDS: &str = "PB|市净率";
pub const VOLUME_WORDS: &str = "成交量|交易量";
pub const TURNOVER_WORDS: &str = "换手率|流通率";
pub const RSI_WORDS: &str = "RSI|相对强弱指数|强弱指标";
pub const MA_WORDS: &str = "均线|MA";

// ===== 操作符同义词 =====

pub const GT_WORDS: &str = "大于|高于|超过|多于|超越|高出|>|＞";
pub const LT_WORDS: &str = "小于|低于|少于|不足|低过|<|＜";
pub const GTE_WORDS: &str = "大于等于|不少于|至少|不低于|>=|≥";
pub const LTE_WORDS: &str = "小于等于|不超过|至多|不高于|<=|≤";

// ===== 区间表达 =====

pub const RANGE_OPEN_WORDS: &str = "在|介于|从";
pub const RANGE_SEP_WORDS: &str = "到|至|-|~";
pub const RANGE_CLOSE_WORDS: &str = "之间|范围";

// ===== 数值单位 =====

/// 可出现在数字后的单位（正则片段，长单位在前）
pub const UNIT_WORDS: &str = "万亿|亿|万";

/// 单位 → 乘数，长单位在前，按首个精确匹配取值
const UNIT_MULTIPLIERS: &[(&str, f64)] = &[
    ("万亿", 1e12),
    ("千亿", 1e11),
    ("百亿", 1e10),
    ("十亿", 1e9),
    ("亿", 1e8),
    ("千万", 1e7),
    ("百万", 1e6),
    ("十万", 1e5),
    ("万", 1e4),
];

/// 查单位乘数，未知单位返回 1.0
pub fn unit_multiplier(unit: &str) -> f64 {
    UNIT_MULTIPLIERS
        .iter()
        .find(|(u, _)| *u == unit)
        .map(|(_, m)| *m)
        .unwrap_or(1.0)
}

// ===== 标点与中文数字 =====

/// 全角标点 → ASCII
pub const PUNCTUATION_MAP: &[(char, char)] =
    &[('，', ','), ('。', '.'), ('；', ';'), ('：', ':')];

/// 中文数字单字直替（十/百/千 由预处理的组合规则单独处理）
pub const CHINESE_DIGITS: &[(char, char)] = &[
    ('一', '1'),
    ('二', '2'),
    ('三', '3'),
    ('四', '4'),
    ('五', '5'),
    ('六', '6'),
    ('七', '7'),
    ('八', '8'),
    ('九', '9'),
];

// ===== 否定习语改写（固定短语查表，不是通用否定处理） =====

pub const NEGATION_REWRITES: &[(&str, &str)] = &[
    ("不要太高", "小于50"),
    ("不要太低", "大于5"),
    ("避免高价", "小于30"),
    ("排除低价", "大于10"),
];

// ===== 逻辑连接词 =====

/// OR 连接词；文本中出现任意一个则整条规则按 OR 处理，否则默认 AND
pub const OR_CONNECTORS: &[&str] = &["或者", "要么", "||", "或", "|"];

// ===== 模糊概念 =====

/// 定性短语 → 预定义条件模板
pub struct FuzzyConcept {
    pub phrase: &'static str,
    pub field: FieldKey,
    pub operator: OperatorKind,
    pub value: CompareValue,
}

/// 模糊概念表，子串包含即触发，置信度统一 0.8
pub const FUZZY_CONCEPTS: &[FuzzyConcept] = &[
    FuzzyConcept {
        phrase: "大盘股",
        field: FieldKey::MarketCap,
        operator: OperatorKind::Gt,
        value: CompareValue::Number(5e10),
    },
    FuzzyConcept {
        phrase: "中盘股",
        field: FieldKey::MarketCap,
        operator: OperatorKind::Between,
        value: CompareValue::Range(1e10, 5e10),
    },
    FuzzyConcept {
        phrase: "小盘股",
        field: FieldKey::MarketCap,
        operator: OperatorKind::Lt,
        value: CompareValue::Number(1e10),
    },
    FuzzyConcept {
        phrase: "高价股",
        field: FieldKey::CurrentPrice,
        operator: OperatorKind::Gt,
        value: CompareValue::Number(50.0),
    },
    FuzzyConcept {
        phrase: "中价股",
        field: FieldKey::CurrentPrice,
        operator: OperatorKind::Between,
        value: CompareValue::Range(10.0, 50.0),
    },
    FuzzyConcept {
        phrase: "低价股",
        field: FieldKey::CurrentPrice,
        operator: OperatorKind::Lt,
        value: CompareValue::Number(10.0),
    },
    FuzzyConcept {
        phrase: "活跃股",
        field: FieldKey::TurnoverRate,
        operator: OperatorKind::Gt,
        value: CompareValue::Number(5.0),
    },
    FuzzyConcept {
        phrase: "不错的",
        field: FieldKey::ChangePct,
        operator: OperatorKind::Gt,
        value: CompareValue::Number(2.0),
    },
    FuzzyConcept {
        phrase: "表现好",
        field: FieldKey::ChangePct,
        operator: OperatorKind::Gt,
        value: CompareValue::Number(3.0),
    },
    FuzzyConcept {
        phrase: "有潜力",
        field: FieldKey::PeRatio,
        operator: OperatorKind::Lt,
        value: CompareValue::Number(30.0),
    },
    FuzzyConcept {
        phrase: "价值股",
        field: FieldKey::PbRatio,
        operator: OperatorKind::Lt,
        value: CompareValue::Number(2.0),
    },
    FuzzyConcept {
        phrase: "成长股",
        field: FieldKey::PeRatio,
        operator: OperatorKind::Between,
        value: CompareValue::Range(15.0, 40.0),
    },
];

// ===== 行业概念 =====

/// 行业关键词组：组内首个命中的关键词产生一个行业 EQ 条件后即停止扫描该组
pub struct IndustryGroup {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

/// 行业概念表（简化版），置信度统一 0.9
pub const INDUSTRY_GROUPS: &[IndustryGroup] = &[
    IndustryGroup {
        label: "新能源",
        keywords: &["新能源", "电动车", "锂电池", "光伏", "风电", "储能"],
    },
    IndustryGroup {
        label: "科技股",
        keywords: &["科技", "互联网", "人工智能", "AI", "芯片", "半导体"],
    },
    IndustryGroup {
        label: "医药股",
        keywords: &["医药", "生物医药", "疫苗", "医疗器械", "中药"],
    },
    IndustryGroup {
        label: "金融股",
        keywords: &["银行", "保险", "证券", "信托", "基金"],
    },
    IndustryGroup {
        label: "地产股",
        keywords: &["房地产", "建筑", "装修", "物业"],
    },
    IndustryGroup {
        label: "消费股",
        keywords: &["白酒", "食品", "零售", "服装", "家电"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_multiplier() {
        assert_eq!(unit_multiplier("万"), 1e4);
        assert_eq!(unit_multiplier("亿"), 1e8);
        assert_eq!(unit_multiplier("万亿"), 1e12);
        assert_eq!(unit_multiplier("千万"), 1e7);
        // 未知单位不缩放
        assert_eq!(unit_multiplier(""), 1.0);
        assert_eq!(unit_multiplier("手"), 1.0);
    }

    #[test]
    fn test_fuzzy_table_shape() {
        // 大盘股模板：市值 > 500 亿
        let c = FUZZY_CONCEPTS
            .iter()
            .find(|c| c.phrase == "大盘股")
            .unwrap();
        assert_eq!(c.field, FieldKey::MarketCap);
        assert_eq!(c.operator, OperatorKind::Gt);
        assert_eq!(c.value, CompareValue::Number(5e10));
    }

    #[test]
    fn test_industry_groups_distinct() {
        let labels: Vec<_> = INDUSTRY_GROUPS.iter().map(|g| g.label).collect();
        let mut dedup = labels.clone();
        dedup.dedup();
        assert_eq!(labels, dedup);
    }
}
