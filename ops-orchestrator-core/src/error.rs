//! 核心错误类型

use thiserror::Error;

/// 核心层错误
#[derive(Debug, Error)]
pub enum CoreError {
    /// 并发上限必须 ≥ 1
    #[error("无效的并发上限: {0}（必须大于 0）")]
    InvalidConcurrency(usize),
}

/// 核心层 Result 别名
pub type CoreResult<T> = std::result::Result<T, CoreError>;
