//! OVH HTTP 请求方法

use std::sync::atomic::Ordering;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::OvhProvider;
use super::types::OvhErrorResponse;

impl OvhProvider {
    /// 当前 OVH 时间戳（本地时间 + 校时偏移）
    pub(crate) fn timestamp(&self) -> i64 {
        Utc::now().timestamp() + self.time_delta.load(Ordering::Relaxed)
    }

    /// 不签名的 GET（仅 `/auth/time` 等公开接口）
    pub(crate) async fn get_unsigned<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let (status, text) = HttpUtils::execute_request(
            self.client.get(&url),
            self.provider_name(),
            "GET",
            &url,
        )
        .await?;
        self.handle_response(status, &text, ErrorContext::default())
    }

    /// 签名的 POST
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = serde_json::to_string(body).map_err(|e| self.serialization_error(e))?;
        let url = format!("{}{path}", self.base_url);
        let timestamp = self.timestamp();
        let signature = self.sign("POST", &url, &payload, timestamp);

        log::debug!("Request Body: {payload}");

        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("X-Ovh-Application", &self.credentials.application_key)
            .header("X-Ovh-Consumer", &self.credentials.consumer_key)
            .header("X-Ovh-Timestamp", timestamp.to_string())
            .header("X-Ovh-Signature", signature)
            .body(payload);

        let (status, text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", &url).await?;
        self.handle_response(status, &text, ctx)
    }

    fn handle_response<T: DeserializeOwned>(
        &self,
        status: u16,
        text: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        if !HttpUtils::is_success(status) {
            let message = match serde_json::from_str::<OvhErrorResponse>(text) {
                Ok(OvhErrorResponse {
                    message: Some(message),
                    class: Some(class),
                }) => format!("{class}: {message}"),
                Ok(OvhErrorResponse {
                    message: Some(message),
                    ..
                }) => message,
                _ => format!("HTTP {status}: {text}"),
            };
            log::error!("API 错误: {status} - {message}");
            return Err(self.map_error(RawApiError::with_code(status.to_string(), message), ctx));
        }

        HttpUtils::parse_json(text, self.provider_name())
    }
}
