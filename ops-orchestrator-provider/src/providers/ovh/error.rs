//! OVH 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::OvhProvider;

/// OVH 以 HTTP 状态码区分错误，`code` 为状态码
impl ProviderErrorMapper for OvhProvider {
    fn provider_name(&self) -> &'static str {
        "ovh"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // 认证错误 / 无权限
            Some("401" | "403") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            // 资源不存在
            Some("404") => ProviderError::ResourceNotFound {
                provider: self.provider_name().to_string(),
                resource: context.resource.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            // 已存在
            Some("409") => ProviderError::RecordExists {
                provider: self.provider_name().to_string(),
                record_name: context.record_name.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}
