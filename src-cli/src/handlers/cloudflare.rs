//! Cloudflare 命令处理

use std::fmt;

use anyhow::anyhow;
use async_trait::async_trait;
use ops_orchestrator_core::{BatchOperation, BatchSummary};
use ops_orchestrator_provider::{CloudflareProvider, DnsRecordRequest};
use reqwest::Client;

use super::{HandlerContext, item_error};
use crate::config::CloudflareConfig;
use crate::report;

// ============ 条目类型 ============

/// 在某个 Zone 中创建 A 记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ARecordTarget {
    pub zone_id: String,
    pub name: String,
    pub ip: String,
}

impl fmt::Display for ARecordTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} (zone {})", self.name, self.ip, self.zone_id)
    }
}

/// 在某个 Zone 中删除指向该 IP 的 A 记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpInZone {
    pub ip: String,
    pub zone_id: String,
}

impl fmt::Display for IpInZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in zone {}", self.ip, self.zone_id)
    }
}

/// 按站点域名创建 CNAME
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnameTarget {
    pub site: String,
    pub name: String,
    pub target: String,
}

impl fmt::Display for CnameTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.name, self.target, self.site)
    }
}

// ============ 操作实现 ============

pub struct AddARecord {
    provider: CloudflareProvider,
}

#[async_trait]
impl BatchOperation for AddARecord {
    type Item = ARecordTarget;
    type Output = String;
    type Error = anyhow::Error;

    fn name(&self) -> &str {
        "cloudflare add-a-records"
    }

    async fn execute(&self, item: ARecordTarget) -> anyhow::Result<String> {
        let record = self
            .provider
            .create_record(&item.zone_id, &DnsRecordRequest::a(&item.name, &item.ip))
            .await
            .map_err(item_error)?;
        Ok(format!("created A record {} (id {})", record.name, record.id))
    }
}

pub struct DeleteARecords {
    provider: CloudflareProvider,
}

#[async_trait]
impl BatchOperation for DeleteARecords {
    type Item = IpInZone;
    type Output = String;
    type Error = anyhow::Error;

    fn name(&self) -> &str {
        "cloudflare delete-a-records"
    }

    async fn execute(&self, item: IpInZone) -> anyhow::Result<String> {
        let outcome = self
            .provider
            .delete_records_by_content(&item.zone_id, "A", &item.ip)
            .await
            .map_err(item_error)?;

        if !outcome.is_complete() {
            let failed: Vec<String> = outcome
                .failed
                .iter()
                .map(|(name, reason)| format!("{name}: {reason}"))
                .collect();
            return Err(anyhow!(
                "deleted {} record(s), {} failed: {}",
                outcome.deleted.len(),
                outcome.failed.len(),
                failed.join("; ")
            ));
        }

        if outcome.deleted.is_empty() {
            Ok("no matching A records".to_string())
        } else {
            Ok(format!(
                "deleted {} record(s): {}",
                outcome.deleted.len(),
                outcome.deleted.join(", ")
            ))
        }
    }
}

pub struct CreateCname {
    provider: CloudflareProvider,
}

#[async_trait]
impl BatchOperation for CreateCname {
    type Item = CnameTarget;
    type Output = String;
    type Error = anyhow::Error;

    fn name(&self) -> &str {
        "cloudflare create-cname"
    }

    async fn execute(&self, item: CnameTarget) -> anyhow::Result<String> {
        let zone_id = self
            .provider
            .find_zone_id(&item.site)
            .await
            .map_err(item_error)?;
        let record = self
            .provider
            .create_record(&zone_id, &DnsRecordRequest::cname(&item.name, &item.target))
            .await
            .map_err(item_error)?;
        Ok(format!(
            "created CNAME {} -> {} (id {})",
            record.name, record.content, record.id
        ))
    }
}

// ============ 命令入口 ============

/// `cloudflare add-a-records`
pub async fn add_a_records(ctx: &HandlerContext) -> anyhow::Result<BatchSummary> {
    let config = ctx.config.cloudflare()?;
    let targets = a_record_targets(config);
    if targets.is_empty() {
        tracing::warn!("cloudflare.zones or cloudflare.records is empty, nothing to create");
    }

    let runner = ctx.runner(config.max_concurrency)?;
    let operation = AddARecord {
        provider: build_provider(ctx.client.clone(), config),
    };
    let report = runner.run_operation(targets, &operation).await;
    Ok(report::print("Cloudflare: add A records", &report))
}

/// `cloudflare delete-a-records`
pub async fn delete_a_records(ctx: &HandlerContext) -> anyhow::Result<BatchSummary> {
    let config = ctx.config.cloudflare()?;
    let targets = ip_zone_targets(config);
    if targets.is_empty() {
        tracing::warn!("cloudflare.zones or cloudflare.delete_ips is empty, nothing to delete");
    }

    let runner = ctx.runner(config.max_concurrency)?;
    let operation = DeleteARecords {
        provider: build_provider(ctx.client.clone(), config),
    };
    let report = runner.run_operation(targets, &operation).await;
    Ok(report::print("Cloudflare: delete A records", &report))
}

/// `cloudflare create-cname`
pub async fn create_cname(
    ctx: &HandlerContext,
    target: CnameTarget,
) -> anyhow::Result<BatchSummary> {
    let config = ctx.config.cloudflare()?;
    let runner = ctx.runner(config.max_concurrency)?;
    let operation = CreateCname {
        provider: build_provider(ctx.client.clone(), config),
    };
    let report = runner.run_operation([target], &operation).await;
    Ok(report::print("Cloudflare: create CNAME", &report))
}

fn build_provider(client: Client, config: &CloudflareConfig) -> CloudflareProvider {
    let provider = CloudflareProvider::new(client, config.api_token.clone());
    match &config.base_url {
        Some(base_url) => provider.with_base_url(base_url),
        None => provider,
    }
}

/// 每个 Zone × 每条记录
fn a_record_targets(config: &CloudflareConfig) -> Vec<ARecordTarget> {
    config
        .zones
        .iter()
        .flat_map(|zone_id| {
            config.records.iter().map(move |(name, ip)| ARecordTarget {
                zone_id: zone_id.clone(),
                name: name.clone(),
                ip: ip.clone(),
            })
        })
        .collect()
}

/// 每个 IP × 每个 Zone
fn ip_zone_targets(config: &CloudflareConfig) -> Vec<IpInZone> {
    config
        .delete_ips
        .iter()
        .flat_map(|ip| {
            config.zones.iter().map(move |zone_id| IpInZone {
                ip: ip.clone(),
                zone_id: zone_id.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::AppConfig;

    fn context(server: &MockServer) -> HandlerContext {
        let toml = format!(
            r#"
[cloudflare]
api_token = "cf-token"
base_url = "{}"
zones = ["zone-a", "zone-b"]
delete_ips = ["203.0.113.9"]

[cloudflare.records]
www = "203.0.113.10"
"#,
            server.uri()
        );
        HandlerContext {
            config: AppConfig::parse(&toml).unwrap(),
            client: Client::new(),
            concurrency_override: None,
        }
    }

    #[test]
    fn test_targets_are_cartesian() {
        let config: CloudflareConfig = toml::from_str(
            r#"
zones = ["z1", "z2"]
delete_ips = ["1.1.1.1", "2.2.2.2", "3.3.3.3"]
[records]
a = "10.0.0.1"
b = "10.0.0.2"
"#,
        )
        .unwrap();

        let adds = a_record_targets(&config);
        assert_eq!(adds.len(), 4);
        assert_eq!(adds[0].to_string(), "a -> 10.0.0.1 (zone z1)");

        let deletes = ip_zone_targets(&config);
        assert_eq!(deletes.len(), 6);
        assert_eq!(deletes[1].to_string(), "1.1.1.1 in zone z2");
    }

    #[tokio::test]
    async fn test_add_a_records_reports_each_zone() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/zones/zone-a/dns_records"))
            .and(body_partial_json(json!({"type": "A", "name": "www", "content": "203.0.113.10"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": {"id": "rec-1", "type": "A", "name": "www.a.example", "content": "203.0.113.10", "ttl": 300}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/zones/zone-b/dns_records"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "success": false,
                "errors": [{"code": 10000, "message": "Authentication error"}],
                "result": null
            })))
            .mount(&server)
            .await;

        let summary = add_a_records(&context(&server)).await.unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn test_unparseable_answer_is_a_local_fault() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let ctx = context(&server);
        let operation = AddARecord {
            provider: build_provider(ctx.client.clone(), ctx.config.cloudflare().unwrap()),
        };
        let report = ctx
            .runner(None)
            .unwrap()
            .run_operation(
                [ARecordTarget {
                    zone_id: "zone-a".to_string(),
                    name: "www".to_string(),
                    ip: "203.0.113.10".to_string(),
                }],
                &operation,
            )
            .await;

        let (_, reason) = report.failures().next().unwrap();
        assert!(reason.starts_with("local fault: [cloudflare]"), "{reason}");
    }

    #[tokio::test]
    async fn test_delete_operation_without_matches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones/zone-a/dns_records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [],
                "result_info": {"page": 1, "per_page": 100, "total_pages": 1}
            })))
            .mount(&server)
            .await;

        let ctx = context(&server);
        let operation = DeleteARecords {
            provider: build_provider(ctx.client.clone(), ctx.config.cloudflare().unwrap()),
        };
        let detail = operation
            .execute(IpInZone {
                ip: "203.0.113.9".to_string(),
                zone_id: "zone-a".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(detail, "no matching A records");
    }

    #[tokio::test]
    async fn test_create_cname_resolves_zone() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{"id": "zone-a", "name": "example.com", "status": "active"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/zones/zone-a/dns_records"))
            .and(body_partial_json(json!({"type": "CNAME", "name": "docs", "content": "example.github.io"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": {"id": "rec-9", "type": "CNAME", "name": "docs.example.com", "content": "example.github.io", "ttl": 1}
            })))
            .mount(&server)
            .await;

        let summary = create_cname(
            &context(&server),
            CnameTarget {
                site: "example.com".to_string(),
                name: "docs".to_string(),
                target: "example.github.io".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(summary.succeeded, 1);
    }
}
