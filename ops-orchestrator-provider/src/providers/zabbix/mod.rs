//! Zabbix Provider（JSON-RPC 2.0）

mod error;
mod http;
mod provider;
mod types;

use std::sync::atomic::AtomicU64;

use reqwest::Client;
use tokio::sync::RwLock;

/// Zabbix API Provider
///
/// 登录后 token 保存在实例内，之后的调用可以从多个任务并发发起。
pub struct ZabbixProvider {
    pub(crate) client: Client,
    pub(crate) url: String,
    pub(crate) auth_token: RwLock<Option<String>>,
    pub(crate) request_id: AtomicU64,
}

impl ZabbixProvider {
    /// # Arguments
    /// * `url` - `api_jsonrpc.php` 的完整地址
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            auth_token: RwLock::new(None),
            request_id: AtomicU64::new(1),
        }
    }
}

impl std::fmt::Debug for ZabbixProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZabbixProvider")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}
