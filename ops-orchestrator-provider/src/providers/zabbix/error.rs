//! Zabbix 错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::ZabbixProvider;

/// Zabbix 的错误码只区分参数错误 / 应用错误，具体原因在 `data` 文本里
/// 参考: <https://www.zabbix.com/documentation/current/en/manual/api#error-handling>
impl ProviderErrorMapper for ZabbixProvider {
    fn provider_name(&self) -> &'static str {
        "zabbix"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let message = raw.message.to_ascii_lowercase();
        match raw.code.as_deref() {
            // 登录失败
            Some("-32602" | "-32500")
                if message.contains("incorrect user name or password")
                    || message.contains("login name or password is incorrect") =>
            {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }
            // token 无效或会话过期
            Some("-32602" | "-32500")
                if message.contains("not authorised") || message.contains("session terminated") =>
            {
                ProviderError::NotAuthenticated {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }
            // 对象不存在或无权限
            Some("-32500" | "-32602") if message.contains("no permissions to referred object") => {
                ProviderError::ResourceNotFound {
                    provider: self.provider_name().to_string(),
                    resource: context.resource.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }
            _ => self.unknown_error(raw),
        }
    }
}
