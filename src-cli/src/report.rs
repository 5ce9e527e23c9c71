//! 报告输出

use std::fmt::{Display, Write};

use ops_orchestrator_core::{BatchReport, BatchSummary, OperationResult};

/// 渲染报告：每个条目一行，最后一行为汇总
pub fn render<I: Display, D: Display>(title: &str, report: &BatchReport<I, D>) -> String {
    let mut out = format!("== {title}\n");
    for entry in report {
        // 写入 String 不会失败
        let _ = match &entry.result {
            OperationResult::Success(detail) => writeln!(out, "[OK] {}: {detail}", entry.item),
            OperationResult::Failure(reason) => writeln!(out, "[FAILED] {}: {reason}", entry.item),
        };
    }
    let _ = writeln!(out, "{}", report.summary());
    out
}

/// 打印报告到标准输出并返回汇总
pub fn print<I: Display, D: Display>(title: &str, report: &BatchReport<I, D>) -> BatchSummary {
    print!("{}", render(title, report));
    report.summary()
}
