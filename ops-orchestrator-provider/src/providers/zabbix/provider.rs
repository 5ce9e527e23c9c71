//! Zabbix 主机操作

use serde_json::json;

use crate::error::{ProviderError, Result};
use crate::traits::{ErrorContext, ProviderErrorMapper};

use super::ZabbixProvider;
use super::types::{DeletedHosts, HostIdRow};

impl ZabbixProvider {
    /// 登录并保存 token
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        log::info!("Authenticating to Zabbix at {}", self.url);
        let token: String = self
            .call(
                "user.login",
                json!({ "username": username, "password": password }),
                ErrorContext::default(),
            )
            .await?;

        *self.auth_token.write().await = Some(token);
        log::info!("Authentication successful");
        Ok(())
    }

    /// 按主机名查询 host ID，不存在时返回 `None`
    pub async fn get_host_id(&self, hostname: &str) -> Result<Option<String>> {
        let rows: Vec<HostIdRow> = self
            .call(
                "host.get",
                json!({ "output": ["hostid"], "filter": { "host": [hostname] } }),
                ErrorContext::default().resource(hostname),
            )
            .await?;

        let host_id = rows.into_iter().next().map(|row| row.hostid);
        match &host_id {
            Some(id) => log::debug!("Host ID for {hostname} is {id}"),
            None => log::warn!("Host {hostname} not found"),
        }
        Ok(host_id)
    }

    /// 删除主机，返回被删除的 host ID
    pub async fn delete_host(&self, host_id: &str) -> Result<Vec<String>> {
        let deleted: DeletedHosts = self
            .call(
                "host.delete",
                json!([host_id]),
                ErrorContext::default().resource(host_id),
            )
            .await?;
        log::info!("Host {host_id} deleted");
        Ok(deleted.hostids)
    }

    /// 查询并删除主机
    pub async fn delete_host_by_name(&self, hostname: &str) -> Result<String> {
        let host_id = self
            .get_host_id(hostname)
            .await?
            .ok_or_else(|| ProviderError::HostNotFound {
                provider: self.provider_name().to_string(),
                host: hostname.to_string(),
            })?;
        self.delete_host(&host_id).await?;
        Ok(host_id)
    }
}
