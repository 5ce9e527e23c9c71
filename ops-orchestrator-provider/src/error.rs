//! Provider 统一错误类型

use serde::Serialize;
use thiserror::Error;

/// 各 Provider 共用的错误类型
///
/// 远端拒绝（凭证无效、资源不存在、记录已存在等）与本地故障（网络、超时、解析）
/// 都归入这里，由调用方决定如何呈现。
#[derive(Debug, Clone, Error, Serialize)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum ProviderError {
    #[error("[{provider}] 网络错误: {detail}")]
    NetworkError { provider: String, detail: String },

    #[error("[{provider}] 请求超时: {detail}")]
    Timeout { provider: String, detail: String },

    #[error("[{provider}] 响应解析失败: {detail}")]
    ParseError { provider: String, detail: String },

    #[error("[{provider}] 请求序列化失败: {detail}")]
    SerializationError { provider: String, detail: String },

    #[error("[{provider}] 凭证无效{}", suffix(.raw_message))]
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] 尚未登录或会话已失效{}", suffix(.raw_message))]
    NotAuthenticated {
        provider: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] 记录已存在: {record_name}{}", suffix(.raw_message))]
    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] 记录不存在: {record_id}{}", suffix(.raw_message))]
    RecordNotFound {
        provider: String,
        record_id: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] 域名不存在: {domain}{}", suffix(.raw_message))]
    DomainNotFound {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] 主机不存在: {host}")]
    HostNotFound { provider: String, host: String },

    #[error("[{provider}] 资源不存在: {resource}{}", suffix(.raw_message))]
    ResourceNotFound {
        provider: String,
        resource: String,
        raw_message: Option<String>,
    },

    #[error("[{provider}] {}{raw_message}", code_prefix(.raw_code))]
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

impl ProviderError {
    /// 出错的 Provider 名称
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::SerializationError { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::NotAuthenticated { provider, .. }
            | Self::RecordExists { provider, .. }
            | Self::RecordNotFound { provider, .. }
            | Self::DomainNotFound { provider, .. }
            | Self::HostNotFound { provider, .. }
            | Self::ResourceNotFound { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }

    /// 是否为本地故障（请求未得到远端的明确答复）
    pub fn is_local_fault(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::Timeout { .. }
                | Self::ParseError { .. }
                | Self::SerializationError { .. }
        )
    }
}

fn suffix(raw_message: &Option<String>) -> String {
    raw_message
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default()
}

fn code_prefix(raw_code: &Option<String>) -> String {
    raw_code
        .as_deref()
        .map(|c| format!("错误码 {c}: "))
        .unwrap_or_default()
}

/// Provider Result 别名
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_raw_detail() {
        let err = ProviderError::InvalidCredentials {
            provider: "cloudflare".to_string(),
            raw_message: Some("Invalid API Token".to_string()),
        };
        assert_eq!(err.to_string(), "[cloudflare] 凭证无效 (Invalid API Token)");

        let err = ProviderError::Unknown {
            provider: "zabbix".to_string(),
            raw_code: Some("-32500".to_string()),
            raw_message: "Application error.".to_string(),
        };
        assert_eq!(err.to_string(), "[zabbix] 错误码 -32500: Application error.");
        assert!(!err.is_local_fault());
        assert_eq!(err.provider(), "zabbix");
    }

    #[test]
    fn test_local_fault_classification() {
        let err = ProviderError::Timeout {
            provider: "ovh".to_string(),
            detail: "operation timed out".to_string(),
        };
        assert!(err.is_local_fault());
    }
}
