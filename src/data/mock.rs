//! 内置模拟股票数据
//!
//! 固定的 A 股样本表，数值取自典型行情快照。确定性数据：
//! 不加随机扰动，便于测试与演示复现。

use chrono::Local;

use crate::models::StockRecord;

/// 模拟股票记录表
pub fn mock_records() -> Vec<StockRecord> {
    let rows: Vec<(
        &str,
        &str,
        f64,
        f64,
        u64,
        f64,
        f64,
        f64,
        f64,
        Option<f64>,
        Option<u32>,
        Option<&str>,
    )> = vec![
        // 代码, 名称, 现价, 涨跌幅, 成交量, 市值, PE, PB, 换手率, RSI, 均线信号, 行业
        ("000001", "平安银行", 12.50, 2.1, 50000, 2.4e11, 6.5, 0.8, 1.2, Some(55.0), Some(20), Some("金融股")),
        ("000002", "万科A", 18.30, -1.2, 80000, 2.0e11, 8.2, 1.1, 2.5, None, Some(5), Some("地产股")),
        ("000858", "五粮液", 168.50, 3.5, 30000, 6.5e11, 25.3, 4.2, 1.8, Some(62.0), Some(60), Some("消费股")),
        ("600036", "招商银行", 35.80, 1.8, 45000, 9.2e11, 7.8, 1.2, 0.9, Some(58.0), Some(20), Some("金融股")),
        ("600519", "贵州茅台", 1680.00, -0.5, 15000, 2.1e12, 28.5, 12.8, 0.3, Some(48.0), None, Some("消费股")),
        ("600887", "伊利股份", 32.40, 2.8, 35000, 2.1e11, 18.6, 3.5, 1.5, Some(60.0), Some(20), Some("消费股")),
        ("002415", "海康威视", 28.90, 4.2, 60000, 2.7e11, 15.2, 2.8, 3.2, Some(66.0), Some(60), Some("科技股")),
        ("300059", "东方财富", 15.60, 6.8, 120000, 2.4e11, 22.1, 3.2, 6.5, Some(72.0), Some(60), Some("金融股")),
        ("002594", "比亚迪", 245.80, 5.5, 40000, 7.1e11, 35.6, 6.8, 2.1, Some(68.0), Some(60), Some("新能源")),
        ("300750", "宁德时代", 185.20, 3.9, 55000, 8.1e11, 30.2, 5.1, 2.8, Some(64.0), Some(20), Some("新能源")),
    ];

    let now = Local::now();
    rows.into_iter()
        .map(
            |(symbol, name, price, change, volume, cap, pe, pb, turnover, rsi, ma, industry)| {
                StockRecord {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                    current_price: price,
                    change_pct: change,
                    volume,
                    market_cap: cap,
                    pe_ratio: pe,
                    pb_ratio: pb,
                    turnover_rate: turnover,
                    rsi,
                    ma_signal: ma,
                    industry: industry.map(str::to_string),
                    timestamp: now,
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_shape() {
        let records = mock_records();
        assert_eq!(records.len(), 10);

        // 代码唯一
        let mut symbols: Vec<&str> = records.iter().map(|r| r.symbol.as_str()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 10);
    }

    #[test]
    fn test_mock_records_deterministic() {
        let a = mock_records();
        let b = mock_records();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.symbol, y.symbol);
            assert_eq!(x.current_price, y.current_price);
            assert_eq!(x.market_cap, y.market_cap);
        }
    }

    #[test]
    fn test_mock_optional_fields() {
        let records = mock_records();
        // 万科A 缺 RSI，贵州茅台缺均线信号，用于覆盖缺失字段路径
        let wanke = records.iter().find(|r| r.symbol == "000002").unwrap();
        assert!(wanke.rsi.is_none());
        let maotai = records.iter().find(|r| r.symbol == "600519").unwrap();
        assert!(maotai.ma_signal.is_none());
    }
}
