//! OVH 类型定义

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 共享访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    Rw,
    Ro,
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rw => "rw",
            Self::Ro => "ro",
        })
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rw" => Ok(Self::Rw),
            "ro" => Ok(Self::Ro),
            other => Err(format!("无效的访问级别: {other}（可选 rw / ro）")),
        }
    }
}

/// 创建 ACL 的请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShareAclRequest<'a> {
    pub access_level: AccessLevel,
    pub access_to: &'a str,
}

/// NetApp 共享 ACL
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareAcl {
    #[serde(default)]
    pub id: Option<String>,
    pub access_level: AccessLevel,
    pub access_to: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// OVH 错误响应
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OvhErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
}
