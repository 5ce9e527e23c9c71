//! Provider 公共 Trait 与错误映射辅助类型

use std::fmt::Display;

use crate::error::ProviderError;

/// 远端返回的原始错误
#[derive(Debug, Clone, Default)]
pub struct RawApiError {
    pub code: Option<String>,
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误发生时的请求上下文，用于填充错误详情
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub record_name: Option<String>,
    pub record_id: Option<String>,
    pub domain: Option<String>,
    pub resource: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub fn record_name(mut self, name: impl Into<String>) -> Self {
        self.record_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn record_id(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }
}

/// 将各平台的错误码映射为统一的 [`ProviderError`]
pub trait ProviderErrorMapper {
    /// Provider 名称
    fn provider_name(&self) -> &'static str;

    /// 映射远端错误
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 无法识别的错误
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }

    fn network_error(&self, detail: impl Display) -> ProviderError {
        ProviderError::NetworkError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    fn parse_error(&self, detail: impl Display) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    fn serialization_error(&self, detail: impl Display) -> ProviderError {
        ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }
}
