//! 各平台 Provider 实现

#[cfg(feature = "cloudflare")]
pub mod cloudflare;
#[cfg(feature = "namecheap")]
pub mod namecheap;
#[cfg(feature = "ovh")]
pub mod ovh;
#[cfg(feature = "zabbix")]
pub mod zabbix;
