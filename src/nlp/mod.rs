//! 自然语言规则解析
//!
//! 中文选股短语 → 结构化筛选条件。固定短语目录匹配，不做分词模型。

pub mod lexicon;
pub mod parser;
pub mod patterns;
pub mod preprocess;
