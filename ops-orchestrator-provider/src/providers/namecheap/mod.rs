//! Namecheap Provider（XML API）

mod error;
mod http;
mod provider;
mod types;
mod xml;

use reqwest::Client;

pub use provider::expiring_within;
pub use types::{ExpiryWarning, NamecheapAccount, SslCertificate};

pub const NAMECHEAP_API_URL: &str = "https://api.namecheap.com/xml.response";
pub const NAMECHEAP_SANDBOX_API_URL: &str = "https://api.sandbox.namecheap.com/xml.response";

/// `namecheap.ssl.getList` 单页最大条数
pub(crate) const NC_PAGE_SIZE: u32 = 100;

/// Namecheap Provider
///
/// 请求必须来自白名单 IP，`client_ip` 即该 IP。
pub struct NamecheapProvider {
    pub(crate) client: Client,
    pub(crate) api_url: String,
    pub(crate) client_ip: String,
}

impl NamecheapProvider {
    pub fn new(client: Client, client_ip: String) -> Self {
        Self {
            client,
            api_url: NAMECHEAP_API_URL.to_string(),
            client_ip,
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl std::fmt::Debug for NamecheapProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamecheapProvider")
            .field("api_url", &self.api_url)
            .field("client_ip", &self.client_ip)
            .finish_non_exhaustive()
    }
}
