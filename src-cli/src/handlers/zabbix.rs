//! Zabbix 命令处理

use anyhow::Context;
use async_trait::async_trait;
use ops_orchestrator_core::{BatchOperation, BatchSummary};
use ops_orchestrator_provider::ZabbixProvider;

use super::{HandlerContext, item_error};
use crate::report;

/// 按主机名删除主机（provider 需已登录）
pub struct DeleteHostByName {
    provider: ZabbixProvider,
}

#[async_trait]
impl BatchOperation for DeleteHostByName {
    type Item = String;
    type Output = String;
    type Error = anyhow::Error;

    fn name(&self) -> &str {
        "zabbix delete-hosts"
    }

    async fn execute(&self, hostname: String) -> anyhow::Result<String> {
        let host_id = self
            .provider
            .delete_host_by_name(&hostname)
            .await
            .map_err(item_error)?;
        Ok(format!("deleted (host ID {host_id})"))
    }
}

/// `zabbix delete-hosts`
///
/// 命令行给出的主机名优先于 `zabbix.hostnames`。登录失败直接返回错误。
pub async fn delete_hosts(
    ctx: &HandlerContext,
    hostnames: Vec<String>,
) -> anyhow::Result<BatchSummary> {
    let config = ctx.config.zabbix()?;
    let hostnames = if hostnames.is_empty() {
        config.hostnames.clone()
    } else {
        hostnames
    };
    if hostnames.is_empty() {
        tracing::warn!("No hostnames given and zabbix.hostnames is empty, nothing to delete");
    }

    let provider = ZabbixProvider::new(ctx.client.clone(), config.url.clone());
    provider
        .authenticate(&config.username, &config.password)
        .await
        .context("Zabbix 登录失败")?;

    let runner = ctx.runner(config.max_concurrency)?;
    let report = runner
        .run_operation(hostnames, &DeleteHostByName { provider })
        .await;
    Ok(report::print("Zabbix: delete hosts", &report))
}
