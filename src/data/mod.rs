//! 记录来源：内置模拟数据与 JSON 文件

pub mod mock;
pub mod provider;
