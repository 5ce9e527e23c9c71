//! 批量操作执行器
//!
//! 对一组互不依赖的条目并发执行同一个远端操作，并为每个条目生成成功 / 失败结果。
//! 单个条目的错误或 panic 只影响该条目本身，不会中断整个批次。

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;
use std::panic::AssertUnwindSafe;

use futures::{stream, FutureExt, StreamExt};

use crate::error::{CoreError, CoreResult};
use crate::traits::BatchOperation;
use crate::types::{BatchReport, OperationResult};

/// 默认并发上限
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// 批量执行器
#[derive(Debug, Clone, Copy)]
pub struct BatchRunner {
    max_concurrency: NonZeroUsize,
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self {
            max_concurrency: NonZeroUsize::new(DEFAULT_MAX_CONCURRENCY).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl BatchRunner {
    /// 创建执行器
    ///
    /// # Arguments
    /// * `max_concurrency` - 同时执行的操作数上限，必须 ≥ 1
    pub fn new(max_concurrency: usize) -> CoreResult<Self> {
        NonZeroUsize::new(max_concurrency)
            .map(Self::with_concurrency)
            .ok_or(CoreError::InvalidConcurrency(max_concurrency))
    }

    #[must_use]
    pub const fn with_concurrency(max_concurrency: NonZeroUsize) -> Self {
        Self { max_concurrency }
    }

    pub const fn max_concurrency(&self) -> usize {
        self.max_concurrency.get()
    }

    /// 对每个条目执行 `operation`，等待全部完成后返回报告
    pub async fn run<I, F, Fut, D, E>(
        &self,
        items: impl IntoIterator<Item = I>,
        operation: F,
    ) -> BatchReport<I, D>
    where
        I: Clone,
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<D, E>>,
        E: fmt::Display,
    {
        run_batch(items, operation, self.max_concurrency).await
    }

    /// 执行一个 [`BatchOperation`]
    pub async fn run_operation<O>(
        &self,
        items: impl IntoIterator<Item = O::Item>,
        operation: &O,
    ) -> BatchReport<O::Item, O::Output>
    where
        O: BatchOperation + ?Sized,
        O::Item: Clone,
    {
        log::info!(
            "Running {} (max concurrency {})",
            operation.name(),
            self.max_concurrency
        );
        self.run(items, |item| operation.execute(item)).await
    }
}

/// 以有界并发执行一批操作
///
/// - 报告条目数恒等于提交的条目数
/// - `Err(e)` 与 panic 都被转换为该条目的 `Failure`
/// - 同时运行的操作数不超过 `max_concurrency`
/// - 不重试，不设批次级超时；超时由各操作自行处理
pub async fn run_batch<I, F, Fut, D, E>(
    items: impl IntoIterator<Item = I>,
    operation: F,
    max_concurrency: NonZeroUsize,
) -> BatchReport<I, D>
where
    I: Clone,
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<D, E>>,
    E: fmt::Display,
{
    let items: Vec<I> = items.into_iter().collect();
    let total = items.len();
    let mut report = BatchReport::with_capacity(total);

    if total == 0 {
        log::debug!("Empty batch, nothing to run");
        return report;
    }

    log::debug!("Starting batch: {total} item(s), max concurrency {max_concurrency}");

    let operation = &operation;
    let mut outcomes = stream::iter(items)
        .map(move |item| async move {
            let key = item.clone();
            // 在被捕获的 future 内部调用 operation，构造阶段的 panic 同样归入该条目
            let outcome = AssertUnwindSafe(async move { operation(item).await })
                .catch_unwind()
                .await;
            let result = match outcome {
                Ok(result) => OperationResult::from_result(result),
                Err(payload) => OperationResult::Failure(format!(
                    "operation panicked: {}",
                    panic_message(&*payload)
                )),
            };
            (key, result)
        })
        .buffer_unordered(max_concurrency.get());

    while let Some((item, result)) = outcomes.next().await {
        match &result {
            OperationResult::Success(_) => {
                log::debug!("Batch item {}/{total} succeeded", report.len() + 1);
            }
            OperationResult::Failure(reason) => {
                log::warn!("Batch item {}/{total} failed: {reason}", report.len() + 1);
            }
        }
        report.push(item, result);
    }

    log::info!("Batch finished: {}", report.summary());
    report
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
