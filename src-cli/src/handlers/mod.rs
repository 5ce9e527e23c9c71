//! 命令处理模块
//!
//! 每个命令：从配置构造条目 -> 包装为 `BatchOperation` -> 交给 `BatchRunner` -> 打印报告。

pub mod cloudflare;
pub mod namecheap;
pub mod ovh;
pub mod zabbix;

use anyhow::anyhow;
use ops_orchestrator_core::{BatchRunner, CoreResult};
use ops_orchestrator_provider::ProviderError;
use reqwest::Client;

use crate::config::AppConfig;

/// 命令执行上下文
pub struct HandlerContext {
    pub config: AppConfig,
    pub client: Client,
    /// 命令行 `--concurrency`
    pub concurrency_override: Option<usize>,
}

impl HandlerContext {
    /// 并发上限优先级：命令行 > 配置段 > `[runner]`
    pub fn runner(&self, section_limit: Option<usize>) -> CoreResult<BatchRunner> {
        BatchRunner::new(
            self.concurrency_override
                .or(section_limit)
                .unwrap_or(self.config.runner.max_concurrency),
        )
    }
}

/// 把单个条目的 Provider 错误转为失败原因
///
/// 本地故障（网络、超时、响应无法解析）加上 `local fault:` 前缀，与远端的明确拒绝区分开。
pub fn item_error(err: ProviderError) -> anyhow::Error {
    if err.is_local_fault() {
        tracing::debug!(provider = err.provider(), "request did not get a usable answer");
        anyhow!("local fault: {err}")
    } else {
        err.into()
    }
}
