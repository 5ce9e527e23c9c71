//! Namecheap HTTP 请求方法

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::types::SslListDocument;
use super::xml::parse_ssl_list;
use super::{NamecheapAccount, NamecheapProvider};

impl NamecheapProvider {
    /// 执行 Namecheap 命令（表单 POST），返回解析后的响应
    pub(crate) async fn request(
        &self,
        account: &NamecheapAccount,
        command: &str,
        extra: &[(&str, String)],
    ) -> Result<SslListDocument> {
        let mut params: Vec<(&str, String)> = vec![
            ("ApiUser", account.api_user.clone()),
            ("ApiKey", account.api_key.clone()),
            ("UserName", account.username.clone()),
            ("ClientIp", self.client_ip.clone()),
            ("Command", command.to_string()),
        ];
        params.extend(extra.iter().cloned());

        let request = self.client.post(&self.api_url).form(&params);
        let (status, text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", command).await?;

        if !HttpUtils::is_success(status) {
            return Err(self.unknown_error(RawApiError::new(format!("HTTP {status}: {text}"))));
        }

        let doc = parse_ssl_list(&text).map_err(|e| {
            log::error!("XML 解析失败: {e}");
            log::error!("原始响应: {text}");
            self.parse_error(e)
        })?;

        if doc.status != "OK" {
            let ctx = ErrorContext::default().resource(&account.username);
            let raw = doc.errors.first().map_or_else(
                || RawApiError::new(format!("Status={}", doc.status)),
                |(number, message)| RawApiError::with_code(number, message),
            );
            log::error!("API 错误: {:?} - {}", raw.code, raw.message);
            return Err(self.map_error(raw, ctx));
        }

        Ok(doc)
    }
}
