//! 批量执行结果类型

use std::fmt;

use serde::Serialize;

/// 单个条目的执行结果
///
/// 远端拒绝（HTTP 4xx/5xx、`success: false`）与本地故障（网络、超时、解析失败）
/// 在这一层不做区分，统一为 `Failure(reason)`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum OperationResult<D = String> {
    Success(D),
    Failure(String),
}

impl<D> OperationResult<D> {
    /// 将操作返回值转换为结果，错误通过 `Display` 转为原因文本
    pub fn from_result<E: fmt::Display>(result: Result<D, E>) -> Self {
        match result {
            Ok(detail) => Self::Success(detail),
            Err(e) => Self::Failure(e.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// 成功时的详情
    pub fn detail(&self) -> Option<&D> {
        match self {
            Self::Success(detail) => Some(detail),
            Self::Failure(_) => None,
        }
    }

    /// 失败时的原因
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reason) => Some(reason),
        }
    }
}

/// 报告中的一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry<I, D = String> {
    pub item: I,
    pub result: OperationResult<D>,
}

/// 一次批量执行的完整报告
///
/// 每个提交的条目恰好对应一条记录，顺序为完成顺序（不保证与提交顺序一致）。
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport<I, D = String> {
    entries: Vec<ReportEntry<I, D>>,
}

impl<I, D> Default for BatchReport<I, D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<I, D> BatchReport<I, D> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, item: I, result: OperationResult<D>) {
        self.entries.push(ReportEntry { item, result });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ReportEntry<I, D>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReportEntry<I, D>> {
        self.entries.iter()
    }

    /// 按条目查找结果
    ///
    /// 同一条目被重复提交时返回最先完成的那一条。
    pub fn get(&self, item: &I) -> Option<&OperationResult<D>>
    where
        I: PartialEq,
    {
        self.entries
            .iter()
            .find(|entry| &entry.item == item)
            .map(|entry| &entry.result)
    }

    /// 所有成功条目
    pub fn successes(&self) -> impl Iterator<Item = (&I, &D)> {
        self.entries.iter().filter_map(|entry| match &entry.result {
            OperationResult::Success(detail) => Some((&entry.item, detail)),
            OperationResult::Failure(_) => None,
        })
    }

    /// 所有失败条目
    pub fn failures(&self) -> impl Iterator<Item = (&I, &str)> {
        self.entries.iter().filter_map(|entry| match &entry.result {
            OperationResult::Success(_) => None,
            OperationResult::Failure(reason) => Some((&entry.item, reason.as_str())),
        })
    }

    pub fn summary(&self) -> BatchSummary {
        let succeeded = self
            .entries
            .iter()
            .filter(|entry| entry.result.is_success())
            .count();
        BatchSummary {
            total: self.entries.len(),
            succeeded,
            failed: self.entries.len() - succeeded,
        }
    }

    pub fn is_all_success(&self) -> bool {
        self.entries.iter().all(|entry| entry.result.is_success())
    }
}

impl<I, D> IntoIterator for BatchReport<I, D> {
    type Item = ReportEntry<I, D>;
    type IntoIter = std::vec::IntoIter<ReportEntry<I, D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, I, D> IntoIterator for &'a BatchReport<I, D> {
    type Item = &'a ReportEntry<I, D>;
    type IntoIter = std::slice::Iter<'a, ReportEntry<I, D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// 报告汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} total, {} succeeded, {} failed",
            self.total, self.succeeded, self.failed
        )
    }
}
