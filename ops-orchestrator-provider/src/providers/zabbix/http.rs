//! Zabbix JSON-RPC 调用

use std::sync::atomic::Ordering;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::ZabbixProvider;
use super::types::{JsonRpcRequest, JsonRpcResponse};

/// 无需 token 的方法
const ANONYMOUS_METHODS: &[&str] = &["user.login", "apiinfo.version"];

impl ZabbixProvider {
    /// 发起一次 JSON-RPC 调用并反序列化 `result`
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
        ctx: ErrorContext,
    ) -> Result<T> {
        let auth = if ANONYMOUS_METHODS.contains(&method) {
            None
        } else {
            let token = self.auth_token.read().await.clone();
            Some(token.ok_or_else(|| ProviderError::NotAuthenticated {
                provider: self.provider_name().to_string(),
                raw_message: None,
            })?)
        };

        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            auth,
            id: self.request_id.fetch_add(1, Ordering::Relaxed),
        };
        // 请求体可能包含密码，不写日志
        let payload = serde_json::to_string(&body).map_err(|e| self.serialization_error(e))?;

        let request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json-rpc")
            .body(payload);

        // user.login 的响应即会话 token
        let sensitive = ANONYMOUS_METHODS.contains(&method);
        let (status, text) = if sensitive {
            HttpUtils::execute_sensitive_request(request, self.provider_name(), "POST", method)
                .await?
        } else {
            HttpUtils::execute_request(request, self.provider_name(), "POST", method).await?
        };

        if !HttpUtils::is_success(status) {
            return Err(self.unknown_error(RawApiError::new(format!("HTTP {status}: {text}"))));
        }

        let response: JsonRpcResponse = if sensitive {
            serde_json::from_str(&text).map_err(|e| self.parse_error(e))?
        } else {
            HttpUtils::parse_json(&text, self.provider_name())?
        };

        if let Some(error) = response.error {
            let message = match error.data {
                Some(data) if !data.is_empty() => format!("{} {data}", error.message),
                _ => error.message,
            };
            log::error!("API 错误: {} - {message}", error.code);
            return Err(self.map_error(
                RawApiError::with_code(error.code.to_string(), message),
                ctx,
            ));
        }

        let result = response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result"))?;
        serde_json::from_value(result).map_err(|e| self.parse_error(e))
    }
}
