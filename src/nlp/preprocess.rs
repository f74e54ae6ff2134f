//! 文本预处理
//!
//! 全角标点转 ASCII、中文数字转阿拉伯数字、否定习语改写。
//! 纯函数：同一输入永远得到同一输出。
//!
//! 中文数字采用单字直替 + 两条组合规则（`N十M`、`N百M十L`）。
//! 超出这两条规则的写法（如 "三百五"、"五十亿" 的整十结尾）仍按
//! 单字直替展开，结果可能与口语含义不符——这是已知限制，不做修正。

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::lexicon;

/// 组合规则：N百M十L → N*100 + M*10 + L
static COMPOUND_HUNDRED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)百(\d+)十(\d+)").expect("内置正则必须可编译"));

/// 组合规则：N十M → N*10 + M
static COMPOUND_TEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)十(\d+)").expect("内置正则必须可编译"));

/// 规则文本预处理入口
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    // 统一标点
    for (cn, ascii) in lexicon::PUNCTUATION_MAP {
        text = text.replace(*cn, &ascii.to_string());
    }

    text = normalize_numbers(&text);
    text = rewrite_negations(&text);

    text.trim().to_string()
}

/// 中文数字标准化
fn normalize_numbers(text: &str) -> String {
    let mut text = text.to_string();

    // 单字直替（一..九）
    for (cn, digit) in lexicon::CHINESE_DIGITS {
        text = text.replace(*cn, &digit.to_string());
    }

    // 组合规则，先百十后十，此时 十/百 仍是字符
    text = COMPOUND_HUNDRED
        .replace_all(&text, |caps: &Captures| compose_hundred(caps))
        .into_owned();
    text = COMPOUND_TEN
        .replace_all(&text, |caps: &Captures| compose_ten(caps))
        .into_owned();

    // 剩余的 十/百/千 直替（"百亿" → "100亿" 等复合单位靠这一步落到 亿/万 上）
    text = text.replace('十', "10");
    text = text.replace('百', "100");
    text = text.replace('千', "1000");

    text
}

fn compose_hundred(caps: &Captures) -> String {
    match (
        caps[1].parse::<u64>(),
        caps[2].parse::<u64>(),
        caps[3].parse::<u64>(),
    ) {
        (Ok(h), Ok(t), Ok(u)) => (h * 100 + t * 10 + u).to_string(),
        // 数字组超长解析失败时保留原文
        _ => caps[0].to_string(),
    }
}

fn compose_ten(caps: &Captures) -> String {
    match (caps[1].parse::<u64>(), caps[2].parse::<u64>()) {
        (Ok(t), Ok(u)) => (t * 10 + u).to_string(),
        _ => caps[0].to_string(),
    }
}

/// 否定习语改写：固定短语查表替换，不是通用否定处理
fn rewrite_negations(text: &str) -> String {
    let mut text = text.to_string();
    for (phrase, replacement) in lexicon::NEGATION_REWRITES {
        text = text.replace(phrase, replacement);
    }
    text
}
