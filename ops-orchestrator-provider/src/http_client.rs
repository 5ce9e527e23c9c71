//! 通用 HTTP 客户端工具
//!
//! 提供可复用的 HTTP 请求处理逻辑，减少各 Provider 的重复代码。
//! 各 Provider 自己构造 `RequestBuilder`（鉴权方式差异很大：Bearer、表单参数、签名头、
//! JSON-RPC token），这里只统一发送、日志与读取响应。

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP 客户端配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct HttpClientConfig {
    /// 单次请求超时（秒），超时在各条目内部上报为失败
    pub timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpClientConfig {
    /// 构建带超时的 reqwest 客户端
    pub fn build_client(&self) -> Result<Client, ProviderError> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(concat!("ops-orchestrator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::NetworkError {
                provider: "http".to_string(),
                detail: format!("创建 HTTP 客户端失败: {e}"),
            })
    }
}

/// HTTP 工具函数集
pub struct HttpUtils;

impl HttpUtils {
    /// 执行 HTTP 请求并返回响应文本
    ///
    /// # Arguments
    /// * `request_builder` - 已配置好的请求构造器（包含 URL、headers、body 等）
    /// * `provider_name` - Provider 名称（用于日志和错误）
    /// * `method_name` - 请求方法名（如 "GET", "POST"，用于日志）
    /// * `url_or_action` - URL 或 Action 名称（用于日志）
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - 收到响应（不论状态码）
    /// * `Err(ProviderError::Timeout)` - 请求超时
    /// * `Err(ProviderError::NetworkError)` - 其他网络错误
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ProviderError> {
        Self::send(request_builder, provider_name, method_name, url_or_action, true).await
    }

    /// 同 [`Self::execute_request`]，但不记录响应体（响应中含有 token 等凭证时使用）
    pub async fn execute_sensitive_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ProviderError> {
        Self::send(request_builder, provider_name, method_name, url_or_action, false).await
    }

    async fn send(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
        log_body: bool,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| Self::transport_error(provider_name, &e))?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| Self::transport_error(provider_name, &e))?;

        if log_body {
            log::debug!("[{provider_name}] Response Body: {response_text}");
        }

        Ok((status_code, response_text))
    }

    /// 解析 JSON 响应
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON 解析失败: {e}");
            log::error!("[{provider_name}] 原始响应: {response_text}");
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// 2xx 状态码
    pub fn is_success(status_code: u16) -> bool {
        (200..300).contains(&status_code)
    }

    fn transport_error(provider_name: &str, err: &reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                provider: provider_name.to_string(),
                detail: err.to_string(),
            }
        } else {
            ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: err.to_string(),
            }
        }
    }
}
