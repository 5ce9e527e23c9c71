//! Namecheap 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::NamecheapProvider;

/// Namecheap 错误码映射
/// 参考: <https://www.namecheap.com/support/api/error-codes/>
impl ProviderErrorMapper for NamecheapProvider {
    fn provider_name(&self) -> &'static str {
        "namecheap"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ApiUser / ApiKey / 白名单 IP 无效
            Some("1010101" | "1011101" | "1011102" | "1011150" | "1017150") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }
            // 账户不存在
            Some("1010102" | "1011104") => ProviderError::ResourceNotFound {
                provider: self.provider_name().to_string(),
                resource: context.resource.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}
