//! 核心类型定义

mod report;

pub use report::{BatchReport, BatchSummary, OperationResult, ReportEntry};
