//! Ops Orchestrator 核心库
//!
//! 提供有界并发的批量 API 操作执行器，以及逐条目的成功 / 失败报告。

mod error;
mod services;
mod traits;
mod types;

pub use error::{CoreError, CoreResult};
pub use services::{run_batch, BatchRunner, DEFAULT_MAX_CONCURRENCY};
pub use traits::BatchOperation;
pub use types::{BatchReport, BatchSummary, OperationResult, ReportEntry};
