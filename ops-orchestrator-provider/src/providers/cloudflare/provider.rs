//! Cloudflare DNS 记录操作

use crate::error::{ProviderError, Result};
use crate::traits::{ErrorContext, ProviderErrorMapper};

use super::{
    CF_PAGE_SIZE, CloudflareDeletedRecord, CloudflareDnsRecord, CloudflareProvider,
    CloudflareZone, DeleteOutcome, DnsRecordRequest,
};

impl CloudflareProvider {
    /// 根据域名查询 Zone ID
    pub async fn find_zone_id(&self, zone_name: &str) -> Result<String> {
        let path = format!("/zones?name={}", urlencoding::encode(zone_name));
        let response = self
            .get::<Vec<CloudflareZone>>(&path, ErrorContext::default().domain(zone_name))
            .await?;

        let zone = self
            .require_result(response)?
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: zone_name.to_string(),
                raw_message: None,
            })?;

        log::debug!("Zone {} -> {}", zone.name, zone.id);
        Ok(zone.id)
    }

    /// 创建 DNS 记录
    pub async fn create_record(
        &self,
        zone_id: &str,
        request: &DnsRecordRequest,
    ) -> Result<CloudflareDnsRecord> {
        let ctx = ErrorContext::default()
            .domain(zone_id)
            .record_name(&request.name);
        self.post(&format!("/zones/{zone_id}/dns_records"), request, ctx)
            .await
    }

    /// 按类型和内容列出记录（自动翻页）
    pub async fn list_records(
        &self,
        zone_id: &str,
        record_type: &str,
        content: Option<&str>,
    ) -> Result<Vec<CloudflareDnsRecord>> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let mut path = format!(
                "/zones/{zone_id}/dns_records?type={}&page={page}&per_page={CF_PAGE_SIZE}",
                urlencoding::encode(record_type)
            );
            if let Some(content) = content {
                path.push_str("&content=");
                path.push_str(&urlencoding::encode(content));
            }

            let response = self
                .get::<Vec<CloudflareDnsRecord>>(&path, ErrorContext::default().domain(zone_id))
                .await?;
            let total_pages = response
                .result_info
                .as_ref()
                .and_then(|info| info.total_pages)
                .unwrap_or(1);

            let batch = self.require_result(response)?;
            let fetched = batch.len();
            records.extend(batch);

            // 以本地页码推进，不信任响应中回显的页码
            if fetched == 0 || page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    /// 删除单条记录
    pub async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let ctx = ErrorContext::default().domain(zone_id).record_id(record_id);
        let deleted: CloudflareDeletedRecord = self
            .delete(&format!("/zones/{zone_id}/dns_records/{record_id}"), ctx)
            .await?;
        log::debug!("Deleted record {}", deleted.id);
        Ok(())
    }

    /// 删除 Zone 内所有指定类型且内容匹配的记录
    ///
    /// 列表查询失败直接返回错误；单条删除失败记录在 `DeleteOutcome::failed` 中，
    /// 不影响其余记录的删除。
    pub async fn delete_records_by_content(
        &self,
        zone_id: &str,
        record_type: &str,
        content: &str,
    ) -> Result<DeleteOutcome> {
        let records = self.list_records(zone_id, record_type, Some(content)).await?;
        let mut outcome = DeleteOutcome::default();

        for record in records {
            match self.delete_record(zone_id, &record.id).await {
                Ok(()) => {
                    log::info!(
                        "Deleted {} record: {} with content {content} in zone {zone_id}",
                        record.record_type,
                        record.name
                    );
                    outcome.deleted.push(record.name);
                }
                Err(e) => {
                    log::warn!(
                        "Failed to delete {} record: {} in zone {zone_id}: {e}",
                        record.record_type,
                        record.name
                    );
                    outcome.failed.push((record.name, e.to_string()));
                }
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> CloudflareProvider {
        CloudflareProvider::new(Client::new(), "cf-token".to_string()).with_base_url(server.uri())
    }

    fn record(id: &str, name: &str, content: &str) -> serde_json::Value {
        json!({"id": id, "type": "A", "name": name, "content": content, "ttl": 300, "proxied": false})
    }

    #[tokio::test]
    async fn test_find_zone_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones"))
            .and(query_param("name", "example.com"))
            .and(header("Authorization", "Bearer cf-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{"id": "zone-1", "name": "example.com", "status": "active"}]
            })))
            .mount(&server)
            .await;

        let cf = provider(&server);
        assert_eq!(cf.find_zone_id("example.com").await.unwrap(), "zone-1");
    }

    #[tokio::test]
    async fn test_find_zone_id_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": []
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .find_zone_id("missing.org")
            .await
            .unwrap_err();
        assert!(
            matches!(err, ProviderError::DomainNotFound { ref domain, .. } if domain == "missing.org")
        );
    }

    #[tokio::test]
    async fn test_create_a_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/zones/zone-1/dns_records"))
            .and(body_partial_json(json!({
                "type": "A", "name": "www", "content": "10.0.0.1", "ttl": 300, "proxied": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": record("rec-1", "www.example.com", "10.0.0.1")
            })))
            .mount(&server)
            .await;

        let created = provider(&server)
            .create_record("zone-1", &DnsRecordRequest::a("www", "10.0.0.1"))
            .await
            .unwrap();
        assert_eq!(created.id, "rec-1");
        assert_eq!(created.content, "10.0.0.1");
    }

    #[tokio::test]
    async fn test_create_record_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/zones/zone-1/dns_records"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "errors": [{"code": 81057, "message": "Record already exists."}],
                "result": null
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .create_record("zone-1", &DnsRecordRequest::a("www", "10.0.0.1"))
            .await
            .unwrap_err();
        match err {
            ProviderError::RecordExists {
                record_name,
                raw_message,
                ..
            } => {
                assert_eq!(record_name, "www");
                assert_eq!(raw_message.as_deref(), Some("Record already exists."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = provider(&server)
            .find_zone_id("example.com")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "[cloudflare] HTTP 502: Bad Gateway");
    }

    #[tokio::test]
    async fn test_list_records_follows_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .and(query_param("page", "1"))
            .and(query_param("content", "10.0.0.9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [record("rec-1", "a.example.com", "10.0.0.9")],
                "result_info": {"page": 1, "per_page": 100, "total_pages": 2}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [record("rec-2", "b.example.com", "10.0.0.9")],
                "result_info": {"page": 2, "per_page": 100, "total_pages": 2}
            })))
            .mount(&server)
            .await;

        let records = provider(&server)
            .list_records("zone-1", "A", Some("10.0.0.9"))
            .await
            .unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a.example.com", "b.example.com"]);
    }

    #[tokio::test]
    async fn test_list_records_stops_when_page_is_not_echoed() {
        let server = MockServer::start().await;
        // 无论请求哪一页都返回第 1 页
        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [record("rec-1", "a.example.com", "10.0.0.9")],
                "result_info": {"page": 1, "per_page": 100, "total_pages": 2}
            })))
            .expect(2)
            .mount(&server)
            .await;

        let records = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            provider(&server).list_records("zone-1", "A", Some("10.0.0.9")),
        )
        .await
        .expect("pagination must terminate")
        .unwrap();

        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_list_records_stops_on_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [],
                "result_info": {"page": 1, "per_page": 100, "total_pages": 50}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let records = provider(&server)
            .list_records("zone-1", "A", None)
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_delete_records_by_content_reports_partial_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [
                    record("rec-1", "a.example.com", "10.0.0.9"),
                    record("rec-2", "b.example.com", "10.0.0.9")
                ],
                "result_info": {"page": 1, "per_page": 100, "total_pages": 1}
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/zones/zone-1/dns_records/rec-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": {"id": "rec-1"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/zones/zone-1/dns_records/rec-2"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "errors": [{"code": 81044, "message": "Record does not exist."}],
                "result": null
            })))
            .mount(&server)
            .await;

        let outcome = provider(&server)
            .delete_records_by_content("zone-1", "A", "10.0.0.9")
            .await
            .unwrap();

        assert_eq!(outcome.deleted, vec!["a.example.com".to_string()]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, "b.example.com");
        assert!(outcome.failed[0].1.contains("rec-2"));
        assert!(!outcome.is_complete());
    }
}
