//! Cloudflare API 类型定义

use serde::{Deserialize, Serialize};

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    pub errors: Option<Vec<CloudflareError>>,
    pub result_info: Option<CloudflareResultInfo>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareResultInfo {
    #[allow(dead_code)]
    pub page: u32,
    #[allow(dead_code)]
    pub per_page: u32,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Cloudflare Zone 结构
#[derive(Debug, Deserialize)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
    #[allow(dead_code)]
    pub status: String,
}

/// 删除接口只返回记录 ID
#[derive(Debug, Deserialize)]
pub struct CloudflareDeletedRecord {
    pub id: String,
}

/// Cloudflare DNS Record 结构
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
}

/// 创建 DNS 记录的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecordRequest {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl DnsRecordRequest {
    /// A 记录：TTL 300，不走代理
    pub fn a(name: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            record_type: "A".to_string(),
            name: name.into(),
            content: ip.into(),
            ttl: 300,
            proxied: Some(false),
        }
    }

    /// CNAME 记录：TTL 为 1（自动）
    pub fn cname(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            record_type: "CNAME".to_string(),
            name: name.into(),
            content: target.into(),
            ttl: 1,
            proxied: None,
        }
    }
}

/// 按内容批量删除的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// 已删除的记录名
    pub deleted: Vec<String>,
    /// 删除失败的记录名及原因
    pub failed: Vec<(String, String)>,
}

impl DeleteOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
