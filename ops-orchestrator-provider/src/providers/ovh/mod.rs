//! OVHcloud Provider

mod error;
mod http;
mod provider;
mod sign;
mod types;

use std::sync::atomic::AtomicI64;

use reqwest::Client;
use serde::Deserialize;

pub use types::{AccessLevel, ShareAcl};

/// OVH API 入口
/// 参考: <https://github.com/ovh/python-ovh#2-configure-your-application>
pub const OVH_ENDPOINTS: &[(&str, &str)] = &[
    ("ovh-eu", "https://eu.api.ovh.com/1.0"),
    ("ovh-ca", "https://ca.api.ovh.com/1.0"),
    ("ovh-us", "https://api.us.ovhcloud.com/1.0"),
    ("kimsufi-eu", "https://eu.api.kimsufi.com/1.0"),
    ("kimsufi-ca", "https://ca.api.kimsufi.com/1.0"),
    ("soyoustart-eu", "https://eu.api.soyoustart.com/1.0"),
    ("soyoustart-ca", "https://ca.api.soyoustart.com/1.0"),
];

/// 解析入口名称；以 `http` 开头时视为完整 URL
pub fn resolve_endpoint(endpoint: &str) -> Option<String> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return Some(endpoint.trim_end_matches('/').to_string());
    }
    OVH_ENDPOINTS
        .iter()
        .find(|(name, _)| *name == endpoint)
        .map(|(_, url)| (*url).to_string())
}

/// OVH 应用凭证
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct OvhCredentials {
    pub application_key: String,
    pub application_secret: String,
    pub consumer_key: String,
}

impl std::fmt::Debug for OvhCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OvhCredentials")
            .field("application_key", &self.application_key)
            .field("application_secret", &"***")
            .field("consumer_key", &"***")
            .finish()
    }
}

/// OVHcloud Provider
pub struct OvhProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) credentials: OvhCredentials,
    /// 服务器时间与本地时间之差（秒），由 `sync_time` 写入
    pub(crate) time_delta: AtomicI64,
}

impl OvhProvider {
    pub fn new(client: Client, base_url: impl Into<String>, credentials: OvhCredentials) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            time_delta: AtomicI64::new(0),
        }
    }
}

impl std::fmt::Debug for OvhProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OvhProvider")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
