//! OVH 命令处理

use anyhow::Context;
use async_trait::async_trait;
use ops_orchestrator_core::{BatchOperation, BatchSummary};
use ops_orchestrator_provider::{AccessLevel, OvhCredentials, OvhProvider, resolve_endpoint};

use super::{HandlerContext, item_error};
use crate::config::{ConfigError, OvhConfig};
use crate::report;

/// 为同一个 NetApp 共享逐个添加 IP 访问规则
pub struct AddShareAcl {
    provider: OvhProvider,
    netapp_id: String,
    share_id: String,
    access_level: AccessLevel,
}

#[async_trait]
impl BatchOperation for AddShareAcl {
    type Item = String;
    type Output = String;
    type Error = anyhow::Error;

    fn name(&self) -> &str {
        "ovh share-acl"
    }

    async fn execute(&self, ip: String) -> anyhow::Result<String> {
        let acl = self
            .provider
            .add_share_acl(&self.netapp_id, &self.share_id, &ip, self.access_level)
            .await
            .map_err(item_error)?;

        let mut parts = vec![format!("ACL added ({})", acl.access_level)];
        if let Some(id) = &acl.id {
            parts.push(format!("id {id}"));
        }
        if let Some(status) = &acl.status {
            parts.push(format!("status {status}"));
        }
        Ok(parts.join(", "))
    }
}

/// `ovh share-acl`
pub async fn share_acl(
    ctx: &HandlerContext,
    access_level: Option<AccessLevel>,
) -> anyhow::Result<BatchSummary> {
    let config = ctx.config.ovh()?;
    if config.ip_addresses.is_empty() {
        tracing::warn!("ovh.ip_addresses is empty, nothing to add");
    }

    let provider = build_provider(ctx, config)?;
    // 校时失败时沿用本地时间，签名可能被拒，由各条目的结果体现
    if let Err(e) = provider.sync_time().await {
        tracing::warn!("Failed to sync OVH server time, using local clock: {e}");
    }

    let operation = AddShareAcl {
        provider,
        netapp_id: config.netapp_id.clone(),
        share_id: config.share_id.clone(),
        access_level: access_level.unwrap_or(config.access_level),
    };
    let runner = ctx.runner(config.max_concurrency)?;
    let report = runner
        .run_operation(config.ip_addresses.clone(), &operation)
        .await;
    Ok(report::print(
        &format!(
            "OVH: share ACL ({} / {}, {})",
            operation.netapp_id, operation.share_id, operation.access_level
        ),
        &report,
    ))
}

fn build_provider(ctx: &HandlerContext, config: &OvhConfig) -> anyhow::Result<OvhProvider> {
    let base_url = resolve_endpoint(&config.endpoint)
        .ok_or_else(|| ConfigError::Invalid("ovh.endpoint", config.endpoint.clone()))
        .context("未知的 OVH 入口")?;

    Ok(OvhProvider::new(
        ctx.client.clone(),
        base_url,
        OvhCredentials {
            application_key: config.application_key.clone(),
            application_secret: config.application_secret.clone(),
            consumer_key: config.consumer_key.clone(),
        },
    ))
}
