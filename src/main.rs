mod config;
mod data;
mod models;
mod nlp;
mod screener;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::data::provider::DataProviderKind;
use crate::models::StockRecord;
use crate::nlp::parser::RuleParser;
use crate::screener::engine::ScreenerEngine;

#[derive(Parser)]
#[command(name = "qscreen", about = "自然语言选股系统")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件路径
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 解析规则文本并打印识别出的条件
    Parse {
        /// 规则文本，如 "市值大于100亿且PE小于20"
        rule: String,

        /// 以 JSON 输出解析结果
        #[arg(long)]
        json: bool,
    },
    /// 按规则筛选股票
    Screen {
        /// 规则文本
        rule: String,

        /// 结果上限（默认取配置 screener.default_limit）
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// 显示数据源中的股票列表
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = match &cli.config {
        Some(path) => AppConfig::load(std::path::Path::new(path))?,
        None => AppConfig::load_or_default(),
    };

    // 初始化日志
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.general.log_level.parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Parse { rule, json } => cmd_parse(&rule, json),
        Commands::Screen { rule, limit } => cmd_screen(config, &rule, limit).await,
        Commands::List => cmd_list(config).await,
    }
}

/// 解析规则并打印条件
fn cmd_parse(rule_text: &str, json: bool) -> Result<()> {
    let parser = RuleParser::new();
    let rule = parser.parse_rule(rule_text);

    if json {
        println!("{}", serde_json::to_string_pretty(&rule)?);
        return Ok(());
    }

    println!("原始文本: {}", rule.original_text);
    println!("预处理后: {}", rule.normalized_text);
    println!("逻辑关系: {}", rule.logic);
    println!("置信度:   {:.2}", rule.confidence);
    println!("识别条件: {} 个", rule.conditions.len());

    if !rule.is_recognized() {
        println!("未能解析出有效的筛选条件");
        return Ok(());
    }

    println!("{:-<70}", "");
    for (i, cond) in rule.conditions.iter().enumerate() {
        println!(
            "{:<4} {} [{} {} {}] (置信度: {:.2})",
            i + 1,
            cond.description,
            cond.field,
            cond.operator,
            cond.value,
            cond.confidence
        );
    }

    Ok(())
}

/// 按规则筛选股票
async fn cmd_screen(config: AppConfig, rule_text: &str, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(config.screener.default_limit);

    let provider = DataProviderKind::from_config(&config);
    let records = provider.load_records().await?;
    info!("数据源 [{}] 加载 {} 条记录", provider.name(), records.len());

    let engine = ScreenerEngine::new();
    let rule = engine.parse(rule_text);

    println!("筛选规则: {}", rule.original_text);
    println!("逻辑关系: {} | 置信度: {:.2} | 条件: {} 个", rule.logic, rule.confidence, rule.conditions.len());
    for cond in &rule.conditions {
        println!("  - {}", cond.description);
    }

    if !rule.is_recognized() {
        println!("未能解析出有效的筛选条件");
        return Ok(());
    }

    let matched = engine.screen_parsed(&records, &rule, limit);
    println!();
    println!("筛选结果 ({} / {} 只):", matched.len(), records.len());
    print_record_table(&matched);

    Ok(())
}

/// 显示数据源中的股票列表
async fn cmd_list(config: AppConfig) -> Result<()> {
    let provider = DataProviderKind::from_config(&config);
    let records = provider.load_records().await?;

    println!("股票列表 ({} 只, 数据源: {}):", records.len(), provider.name());
    print_record_table(&records);

    Ok(())
}

/// 打印记录表格
fn print_record_table(records: &[StockRecord]) {
    println!("{:-<78}", "");
    println!(
        "{:<8} {:<10} {:>10} {:>8} {:>10} {:>8} {:>6} {:>8}",
        "代码", "名称", "现价", "涨跌%", "市值(亿)", "PE", "PB", "换手%"
    );
    println!("{:-<78}", "");

    for r in records {
        println!(
            "{:<8} {:<10} {:>10.2} {:>+8.2} {:>10.0} {:>8.1} {:>6.1} {:>8.2}",
            r.symbol,
            r.name,
            r.current_price,
            r.change_pct,
            r.market_cap / 1e8,
            r.pe_ratio,
            r.pb_ratio,
            r.turnover_rate
        );
    }
}
