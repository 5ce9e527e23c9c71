//! Ops Orchestrator Provider 库
//!
//! 各运维平台 API 的客户端：
//! - Cloudflare：DNS 记录增删
//! - Namecheap：SSL 证书到期查询
//! - OVH：NetApp 共享 ACL
//! - Zabbix：主机删除
//!
//! 每个客户端只负责单次调用的构造、鉴权与错误映射，批量并发由 core 库负责。

mod error;
mod http_client;
mod providers;
mod traits;

pub use error::{ProviderError, Result};
pub use http_client::{DEFAULT_TIMEOUT_SECS, HttpClientConfig, HttpUtils};
pub use traits::{ErrorContext, ProviderErrorMapper, RawApiError};

#[cfg(feature = "cloudflare")]
pub use providers::cloudflare::{
    CF_API_BASE, CloudflareDnsRecord, CloudflareProvider, DeleteOutcome, DnsRecordRequest,
};
#[cfg(feature = "namecheap")]
pub use providers::namecheap::{
    ExpiryWarning, NAMECHEAP_API_URL, NAMECHEAP_SANDBOX_API_URL, NamecheapAccount,
    NamecheapProvider, SslCertificate, expiring_within,
};
#[cfg(feature = "ovh")]
pub use providers::ovh::{
    AccessLevel, OVH_ENDPOINTS, OvhCredentials, OvhProvider, ShareAcl, resolve_endpoint,
};
#[cfg(feature = "zabbix")]
pub use providers::zabbix::ZabbixProvider;
