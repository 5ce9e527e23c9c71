//! Cloudflare HTTP 请求方法

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// 执行 GET 请求，返回完整响应（列表接口需要 `result_info` 分页）
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let url = format!("{}{path}", self.base_url);
        self.send(self.client.get(&url), "GET", &url, ctx).await
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = serde_json::to_string(body).map_err(|e| self.serialization_error(e))?;
        let url = format!("{}{path}", self.base_url);
        log::debug!("Request Body: {payload}");

        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(payload);
        let response = self.send(request, "POST", &url, ctx).await?;
        self.require_result(response)
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self.send(self.client.delete(&url), "DELETE", &url, ctx).await?;
        self.require_result(response)
    }

    pub(crate) fn require_result<T>(&self, response: CloudflareResponse<T>) -> Result<T> {
        response
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result"))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: &str,
        url: &str,
        ctx: ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let (status, text) = HttpUtils::execute_request(
            request.bearer_auth(&self.api_token),
            self.provider_name(),
            method,
            url,
        )
        .await?;

        let response: CloudflareResponse<T> = match serde_json::from_str(&text) {
            Ok(response) => response,
            // 非 JSON 的错误页（网关错误等）
            Err(_) if !HttpUtils::is_success(status) => {
                return Err(self.unknown_error(RawApiError::new(format!("HTTP {status}: {text}"))));
            }
            Err(e) => {
                log::error!("JSON 解析失败: {e}");
                log::error!("原始响应: {text}");
                return Err(self.parse_error(e));
            }
        };

        if !response.success {
            let first = response.errors.and_then(|errors| errors.into_iter().next());
            return Err(match first {
                Some(error) => {
                    log::error!("API 错误: {} - {}", error.code, error.message);
                    self.map_error(
                        RawApiError::with_code(error.code.to_string(), error.message),
                        ctx,
                    )
                }
                None => self.unknown_error(RawApiError::new(format!("HTTP {status}: {text}"))),
            });
        }

        Ok(response)
    }
}
