//! 序号选择解析

use thiserror::Error;

/// 无效选择
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("输入为空")]
    Empty,

    #[error("输入无效: {0} 不是数字")]
    NotANumber(String),

    #[error("选择无效: {value} 不在 1 到 {max} 之间")]
    OutOfRange { value: i64, max: usize },
}

/// 将用户输入的 1 起始序号解析为零起始下标，范围为 `[1, count]`
pub fn parse_ordinal(input: &str, count: usize) -> Result<usize, SelectionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SelectionError::Empty);
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| SelectionError::NotANumber(trimmed.to_string()))?;

    if value < 1 || value as u64 > count as u64 {
        return Err(SelectionError::OutOfRange { value, max: count });
    }

    Ok((value - 1) as usize)
}

/// 生成 1 起始的编号列表，每行一项
pub fn numbered_list(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}
