//! 条件模式目录
//!
//! 每个条目 = 模式种类标签 + 一条由词表片段拼出的正则。目录按声明顺序
//! 逐条独立匹配；模式之间允许重叠、允许对同一段文本重复命中，产生的
//! 重复/冲突条件原样传给评估器，不做去重。

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::models::{CompareValue, FieldKey, OperatorKind, ParsedCondition};

use super::lexicon::{
    self, CHANGE_WORDS, DROP_WORDS, GTE_WORDS, GT_WORDS, LTE_WORDS, LT_WORDS, MARKET_CAP_WORDS,
    MA_WORDS, PB_WORDS, PE_WORDS, PRICE_WORDS, RANGE_CLOSE_WORDS, RANGE_OPEN_WORDS,
    RANGE_SEP_WORDS, RSI_WORDS, TURNOVER_WORDS, UNIT_WORDS, VOLUME_WORDS,
};

/// 模式种类（带标签的提取分发：每个种类对应一个条件构造器）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    PriceAbove,
    PriceBelow,
    PriceAtLeast,
    PriceAtMost,
    PriceRange,
    ChangeAbove,
    ChangeBelow,
    ChangePositive,
    MarketCapAbove,
    MarketCapBelow,
    PeBelow,
    PeAbove,
    PbBelow,
    PbAbove,
    VolumeAbove,
    TurnoverAbove,
    RsiAbove,
    RsiBelow,
    RsiRange,
    MaAbove,
    MaBelow,
}

/// 目录条目
pub struct PatternEntry {
    pub kind: PatternKind,
    pub regex: Regex,
}

/// 数字捕获组
const NUM: &str = r"(\d+(?:\.\d+)?)";
/// 可选的语气填充词
const FILLER: &str = "(?:要|需要|应该)?";

/// 模式目录，声明顺序即匹配顺序（条件描述的展示顺序依赖该顺序）
pub static PATTERNS: Lazy<Vec<PatternEntry>> = Lazy::new(|| {
    let defs: Vec<(PatternKind, String)> = vec![
        (
            PatternKind::PriceAbove,
            format!("(?:{PRICE_WORDS}){FILLER}(?:{GT_WORDS})\\s*{NUM}(?:元|块)?"),
        ),
        (
            PatternKind::PriceBelow,
            format!("(?:{PRICE_WORDS}){FILLER}(?:{LT_WORDS})\\s*{NUM}(?:元|块)?"),
        ),
        (
            PatternKind::PriceAtLeast,
            format!("(?:{PRICE_WORDS}){FILLER}(?:{GTE_WORDS})\\s*{NUM}(?:元|块)?"),
        ),
        (
            PatternKind::PriceAtMost,
            format!("(?:{PRICE_WORDS}){FILLER}(?:{LTE_WORDS})\\s*{NUM}(?:元|块)?"),
        ),
        (
            PatternKind::PriceRange,
            format!(
                "(?:{PRICE_WORDS})(?:{RANGE_OPEN_WORDS})\\s*{NUM}(?:元|块)?\
                 (?:{RANGE_SEP_WORDS})\\s*{NUM}(?:元|块)?(?:{RANGE_CLOSE_WORDS})?"
            ),
        ),
        (
            PatternKind::ChangeAbove,
            format!("(?:{CHANGE_WORDS}){FILLER}(?:{GT_WORDS})\\s*{NUM}(?:%|个百分点|百分点)?"),
        ),
        (
            PatternKind::ChangeBelow,
            format!("(?:{DROP_WORDS}){FILLER}(?:{GT_WORDS})\\s*{NUM}(?:%|个百分点|百分点)?"),
        ),
        (
            PatternKind::ChangePositive,
            "(?:上涨|正涨幅|涨幅为正)".to_string(),
        ),
        (
            PatternKind::MarketCapAbove,
            format!("(?:{MARKET_CAP_WORDS}){FILLER}(?:{GT_WORDS})\\s*{NUM}({UNIT_WORDS})?(?:元)?"),
        ),
        (
            PatternKind::MarketCapBelow,
            format!("(?:{MARKET_CAP_WORDS}){FILLER}(?:{LT_WORDS})\\s*{NUM}({UNIT_WORDS})?(?:元)?"),
        ),
        (
            PatternKind::PeBelow,
            format!("(?:{PE_WORDS}){FILLER}(?:{LT_WORDS})\\s*{NUM}(?:倍)?"),
        ),
        (
            PatternKind::PeAbove,
            format!("(?:{PE_WORDS}){FILLER}(?:{GT_WORDS})\\s*{NUM}(?:倍)?"),
        ),
        (
            PatternKind::PbBelow,
            format!("(?:{PB_WORDS}){FILLER}(?:{LT_WORDS})\\s*{NUM}(?:倍)?"),
        ),
        (
            PatternKind::PbAbove,
            format!("(?:{PB_WORDS}){FILLER}(?:{GT_WORDS})\\s*{NUM}(?:倍)?"),
        ),
        (
            PatternKind::VolumeAbove,
            format!("(?:{VOLUME_WORDS}){FILLER}(?:{GT_WORDS})\\s*{NUM}({UNIT_WORDS})?(?:手|股)?"),
        ),
        (
            PatternKind::TurnoverAbove,
            format!("(?:{TURNOVER_WORDS}){FILLER}(?:{GT_WORDS})\\s*{NUM}%?"),
        ),
        (
            PatternKind::RsiAbove,
            format!("(?:{RSI_WORDS})(?:{GT_WORDS})\\s*{NUM}"),
        ),
        (
            PatternKind::RsiBelow,
            format!("(?:{RSI_WORDS})(?:{LT_WORDS})\\s*{NUM}"),
        ),
        (
            PatternKind::RsiRange,
            format!(
                "(?:{RSI_WORDS})(?:{RANGE_OPEN_WORDS})\\s*{NUM}\
                 (?:{RANGE_SEP_WORDS})\\s*{NUM}(?:{RANGE_CLOSE_WORDS})?"
            ),
        ),
        (
            PatternKind::MaAbove,
            format!("(?:{PRICE_WORDS})?(?:站上|突破)\\s*(\\d+)(?:日)?(?:{MA_WORDS})"),
        ),
        (
            PatternKind::MaBelow,
            format!("(?:{PRICE_WORDS})?(?:跌破)\\s*(\\d+)(?:日)?(?:{MA_WORDS})"),
        ),
    ];

    defs.into_iter()
        .map(|(kind, re)| PatternEntry {
            kind,
            regex: Regex::new(&re).expect("内置模式必须可编译"),
        })
        .collect()
});

/// 从一次匹配构造条件
///
/// 数字组解析失败时丢弃该候选条件（返回 None），提取流程继续。
pub fn build_condition(kind: PatternKind, caps: &Captures) -> Option<ParsedCondition> {
    let cond = match kind {
        PatternKind::PriceAbove => numeric(
            caps,
            FieldKey::CurrentPrice,
            OperatorKind::Gt,
            |v| format!("股价大于{}元", v),
        )?,
        PatternKind::PriceBelow => numeric(
            caps,
            FieldKey::CurrentPrice,
            OperatorKind::Lt,
            |v| format!("股价小于{}元", v),
        )?,
        PatternKind::PriceAtLeast => numeric(
            caps,
            FieldKey::CurrentPrice,
            OperatorKind::Gte,
            |v| format!("股价不低于{}元", v),
        )?,
        PatternKind::PriceAtMost => numeric(
            caps,
            FieldKey::CurrentPrice,
            OperatorKind::Lte,
            |v| format!("股价不超过{}元", v),
        )?,
        PatternKind::PriceRange => range(caps, FieldKey::CurrentPrice, |lo, hi| {
            format!("股价在{}-{}元之间", lo, hi)
        })?,
        PatternKind::ChangeAbove => numeric(
            caps,
            FieldKey::ChangePct,
            OperatorKind::Gt,
            |v| format!("涨幅大于{}%", v),
        )?,
        PatternKind::ChangeBelow => {
            // 跌幅大于 N% 即涨跌幅小于 -N%
            let raw = caps.get(1)?.as_str();
            let n: f64 = raw.parse().ok()?;
            ParsedCondition {
                field: FieldKey::ChangePct,
                operator: OperatorKind::Lt,
                value: CompareValue::Number(-n),
                confidence: 1.0,
                description: format!("跌幅大于{}%", raw),
            }
        }
        PatternKind::ChangePositive => ParsedCondition {
            field: FieldKey::ChangePct,
            operator: OperatorKind::Gt,
            value: CompareValue::Number(0.0),
            confidence: 1.0,
            description: "涨幅为正".to_string(),
        },
        PatternKind::MarketCapAbove => {
            unit_scaled(caps, FieldKey::MarketCap, OperatorKind::Gt, "市值大于")?
        }
        PatternKind::MarketCapBelow => {
            unit_scaled(caps, FieldKey::MarketCap, OperatorKind::Lt, "市值小于")?
        }
        PatternKind::PeBelow => numeric(
            caps,
            FieldKey::PeRatio,
            OperatorKind::Lt,
            |v| format!("PE小于{}", v),
        )?,
        PatternKind::PeAbove => numeric(
            caps,
            FieldKey::PeRatio,
            OperatorKind::Gt,
            |v| format!("PE大于{}", v),
        )?,
        PatternKind::PbBelow => numeric(
            caps,
            FieldKey::PbRatio,
            OperatorKind::Lt,
            |v| format!("PB小于{}", v),
        )?,
        PatternKind::PbAbove => numeric(
            caps,
            FieldKey::PbRatio,
            OperatorKind::Gt,
            |v| format!("PB大于{}", v),
        )?,
        PatternKind::VolumeAbove => {
            unit_scaled(caps, FieldKey::Volume, OperatorKind::Gt, "成交量大于")?
        }
        PatternKind::TurnoverAbove => numeric(
            caps,
            FieldKey::TurnoverRate,
            OperatorKind::Gt,
            |v| format!("换手率大于{}%", v),
        )?,
        PatternKind::RsiAbove => numeric(
            caps,
            FieldKey::Rsi,
            OperatorKind::Gt,
            |v| format!("RSI大于{}", v),
        )?,
        PatternKind::RsiBelow => numeric(
            caps,
            FieldKey::Rsi,
            OperatorKind::Lt,
            |v| format!("RSI小于{}", v),
        )?,
        PatternKind::RsiRange => range(caps, FieldKey::Rsi, |lo, hi| {
            format!("RSI在{}-{}之间", lo, hi)
        })?,
        PatternKind::MaAbove => numeric(
            caps,
            FieldKey::MaSignal,
            OperatorKind::Gte,
            |v| format!("股价站上{}日均线", v),
        )?,
        PatternKind::MaBelow => numeric(
            caps,
            FieldKey::MaSignal,
            OperatorKind::Lt,
            |v| format!("股价跌破{}日均线", v),
        )?,
    };
    Some(cond)
}

/// 单数值条件（捕获组 1）
fn numeric(
    caps: &Captures,
    field: FieldKey,
    operator: OperatorKind,
    describe: impl Fn(&str) -> String,
) -> Option<ParsedCondition> {
    let raw = caps.get(1)?.as_str();
    let value: f64 = raw.parse().ok()?;
    Some(ParsedCondition {
        field,
        operator,
        value: CompareValue::Number(value),
        confidence: 1.0,
        description: describe(raw),
    })
}

/// 闭区间条件（捕获组 1、2）
fn range(
    caps: &Captures,
    field: FieldKey,
    describe: impl Fn(&str, &str) -> String,
) -> Option<ParsedCondition> {
    let raw_lo = caps.get(1)?.as_str();
    let raw_hi = caps.get(2)?.as_str();
    let lo: f64 = raw_lo.parse().ok()?;
    let hi: f64 = raw_hi.parse().ok()?;
    Some(ParsedCondition {
        field,
        operator: OperatorKind::Between,
        value: CompareValue::Range(lo, hi),
        confidence: 1.0,
        description: describe(raw_lo, raw_hi),
    })
}

/// 带单位后缀的数值条件（捕获组 1 数字、2 单位），描述保留原始单位文本
fn unit_scaled(
    caps: &Captures,
    field: FieldKey,
    operator: OperatorKind,
    desc_prefix: &str,
) -> Option<ParsedCondition> {
    let raw = caps.get(1)?.as_str();
    let base: f64 = raw.parse().ok()?;
    let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    let multiplier = lexicon::unit_multiplier(unit);
    let value = base * multiplier;
    debug!(field = %field, raw, unit, value, "单位换算");
    Some(ParsedCondition {
        field,
        operator,
        value: CompareValue::Number(value),
        confidence: 1.0,
        description: format!("{}{}{}", desc_prefix, raw, unit),
    })
}
