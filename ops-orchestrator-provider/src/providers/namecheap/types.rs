//! Namecheap 类型定义

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Namecheap API 账户
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct NamecheapAccount {
    pub api_user: String,
    pub api_key: String,
    pub username: String,
}

impl fmt::Debug for NamecheapAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamecheapAccount")
            .field("api_user", &self.api_user)
            .field("api_key", &"***")
            .field("username", &self.username)
            .finish()
    }
}

impl fmt::Display for NamecheapAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.api_user)
    }
}

/// SSL 证书（`<SSL>` 元素）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SslCertificate {
    pub certificate_id: String,
    pub host_name: String,
    pub ssl_type: Option<String>,
    pub status: Option<String>,
    pub expire_date: Option<NaiveDate>,
}

/// 即将到期的证书
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiryWarning {
    pub certificate_id: String,
    pub host_name: String,
    pub expire_date: NaiveDate,
}

impl ExpiryWarning {
    /// 到期日，格式 `DD/MM/YYYY`
    pub fn formatted_expire_date(&self) -> String {
        self.expire_date.format("%d/%m/%Y").to_string()
    }
}

impl fmt::Display for ExpiryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Certificate ID: {}, Host: {}, Expires on: {}",
            self.certificate_id,
            self.host_name,
            self.formatted_expire_date()
        )
    }
}

/// 解析后的 API 响应
#[derive(Debug, Default)]
pub(crate) struct SslListDocument {
    pub status: String,
    /// `(Number, message)`
    pub errors: Vec<(String, String)>,
    pub certificates: Vec<SslCertificate>,
    pub total_items: Option<u32>,
}
