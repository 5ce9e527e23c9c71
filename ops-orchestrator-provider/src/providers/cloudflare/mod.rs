//! Cloudflare DNS Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

pub use types::{CloudflareDnsRecord, DeleteOutcome, DnsRecordRequest};
pub(crate) use types::{CloudflareDeletedRecord, CloudflareResponse, CloudflareZone};

pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// 列表接口每页条数
pub(crate) const CF_PAGE_SIZE: u32 = 100;

/// Cloudflare DNS Provider
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) base_url: String,
}

impl CloudflareProvider {
    pub fn new(client: Client, api_token: String) -> Self {
        Self {
            client,
            api_token,
            base_url: CF_API_BASE.to_string(),
        }
    }

    /// 替换 API 地址（测试或代理场景）
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("base_url", &self.base_url)
            .field("api_token", &"***")
            .finish_non_exhaustive()
    }
}
