//! 条件评估器
//!
//! 对单条记录逐条评估条件。字段缺失或类型不匹配的条件"不可评估"：
//! AND 下按通过处理（不否决），OR 下不算命中。

use crate::models::{
    CompareValue, FieldValue, LogicMode, OperatorKind, ParsedCondition, StockRecord,
};

/// 评估单个条件
///
/// 返回 None 表示不可评估：记录缺失该字段，或条件值与字段类型不匹配。
pub fn eval_condition(record: &StockRecord, condition: &ParsedCondition) -> Option<bool> {
    let field_value = record.field(condition.field)?;

    match (&field_value, &condition.value) {
        (FieldValue::Num(actual), CompareValue::Number(expected)) => match condition.operator {
            OperatorKind::Gt => Some(actual > expected),
            OperatorKind::Lt => Some(actual < expected),
            OperatorKind::Gte => Some(actual >= expected),
            OperatorKind::Lte => Some(actual <= expected),
            OperatorKind::Eq => Some(actual == expected),
            // between 需要区间值
            OperatorKind::Between => None,
        },
        (FieldValue::Num(actual), CompareValue::Range(lo, hi)) => match condition.operator {
            // 两端闭区间
            OperatorKind::Between => Some(lo <= actual && actual <= hi),
            _ => None,
        },
        (FieldValue::Text(actual), CompareValue::Text(expected)) => match condition.operator {
            OperatorKind::Eq => Some(actual == expected),
            _ => None,
        },
        // 数值字段比文本、文本字段比数值：类型不匹配
        _ => None,
    }
}

/// 评估整条规则
///
/// AND：所有条件都通过才命中，空序列恒真；
/// OR：任一条件命中即命中，空序列恒假。
/// AND 空恒真与 OR 空恒假的不对称是既定行为，调用方需在筛选前
/// 检查条件数量（见 ScreenerEngine）。
pub fn match_record(
    record: &StockRecord,
    conditions: &[ParsedCondition],
    logic: LogicMode,
) -> bool {
    match logic {
        LogicMode::And => conditions
            .iter()
            .all(|c| eval_condition(record, c).unwrap_or(true)),
        LogicMode::Or => conditions
            .iter()
            .any(|c| eval_condition(record, c).unwrap_or(false)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldKey;
    use chrono::Local;

    fn make_record() -> StockRecord {
        StockRecord {
            symbol: "000001".to_string(),
            name: "平安银行".to_string(),
            current_price: 12.5,
            change_pct: 2.1,
            volume: 50000,
            market_cap: 2.4e11,
            pe_ratio: 6.5,
            pb_ratio: 0.8,
            turnover_rate: 1.2,
            rsi: Some(30.0),
            ma_signal: Some(20),
            industry: Some("金融股".to_string()),
            timestamp: Local::now(),
        }
    }

    fn cond(
        field: FieldKey,
        operator: OperatorKind,
        value: CompareValue,
    ) -> ParsedCondition {
        ParsedCondition {
            field,
            operator,
            value,
            confidence: 1.0,
            description: String::new(),
        }
    }

    #[test]
    fn test_numeric_operators() {
        let r = make_record();
        let gt = |v| cond(FieldKey::CurrentPrice, OperatorKind::Gt, CompareValue::Number(v));
        assert_eq!(eval_condition(&r, &gt(10.0)), Some(true));
        assert_eq!(eval_condition(&r, &gt(12.5)), Some(false));

        let gte = cond(FieldKey::CurrentPrice, OperatorKind::Gte, CompareValue::Number(12.5));
        assert_eq!(eval_condition(&r, &gte), Some(true));

        let lt = cond(FieldKey::PeRatio, OperatorKind::Lt, CompareValue::Number(10.0));
        assert_eq!(eval_condition(&r, &lt), Some(true));

        let lte = cond(FieldKey::PbRatio, OperatorKind::Lte, CompareValue::Number(0.8));
        assert_eq!(eval_condition(&r, &lte), Some(true));

        let eq = cond(FieldKey::ChangePct, OperatorKind::Eq, CompareValue::Number(2.1));
        assert_eq!(eval_condition(&r, &eq), Some(true));
    }

    #[test]
    fn test_between_inclusive_both_ends() {
        let r = make_record(); // rsi = 30.0
        let between =
            cond(FieldKey::Rsi, OperatorKind::Between, CompareValue::Range(20.0, 30.0));
        assert_eq!(eval_condition(&r, &between), Some(true));

        let mut r2 = make_record();
        r2.rsi = Some(30.0001);
        assert_eq!(eval_condition(&r2, &between), Some(false));

        let mut r3 = make_record();
        r3.rsi = Some(20.0);
        assert_eq!(eval_condition(&r3, &between), Some(true));
    }

    #[test]
    fn test_industry_eq() {
        let r = make_record();
        let hit = cond(
            FieldKey::Industry,
            OperatorKind::Eq,
            CompareValue::Text("金融股".to_string()),
        );
        assert_eq!(eval_condition(&r, &hit), Some(true));

        let miss = cond(
            FieldKey::Industry,
            OperatorKind::Eq,
            CompareValue::Text("新能源".to_string()),
        );
        assert_eq!(eval_condition(&r, &miss), Some(false));
    }

    #[test]
    fn test_missing_field_not_evaluable() {
        let mut r = make_record();
        r.rsi = None;
        let c = cond(FieldKey::Rsi, OperatorKind::Gt, CompareValue::Number(50.0));
        assert_eq!(eval_condition(&r, &c), None);

        // AND 下缺失字段不否决
        assert!(match_record(&r, &[c.clone()], LogicMode::And));
        // OR 下缺失字段不算命中
        assert!(!match_record(&r, &[c], LogicMode::Or));
    }

    #[test]
    fn test_type_mismatch_not_evaluable() {
        let r = make_record();
        // between 操作符配单值：不可评估
        let bad = cond(
            FieldKey::CurrentPrice,
            OperatorKind::Between,
            CompareValue::Number(5.0),
        );
        assert_eq!(eval_condition(&r, &bad), None);

        // 数值字段比文本：不可评估
        let bad2 = cond(
            FieldKey::CurrentPrice,
            OperatorKind::Eq,
            CompareValue::Text("金融股".to_string()),
        );
        assert_eq!(eval_condition(&r, &bad2), None);
    }

    #[test]
    fn test_empty_conditions() {
        let r = make_record();
        assert!(match_record(&r, &[], LogicMode::And));
        assert!(!match_record(&r, &[], LogicMode::Or));
    }

    #[test]
    fn test_and_or_combination() {
        let r = make_record();
        let pass = cond(FieldKey::PeRatio, OperatorKind::Lt, CompareValue::Number(10.0));
        let fail = cond(FieldKey::CurrentPrice, OperatorKind::Gt, CompareValue::Number(100.0));

        assert!(!match_record(&r, &[pass.clone(), fail.clone()], LogicMode::And));
        assert!(match_record(&r, &[pass.clone(), fail.clone()], LogicMode::Or));
        assert!(match_record(&r, &[pass], LogicMode::And));
        assert!(!match_record(&r, &[fail], LogicMode::Or));
    }
}
