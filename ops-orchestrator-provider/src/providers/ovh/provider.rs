//! OVH NetApp 共享 ACL 操作

use std::sync::atomic::Ordering;

use chrono::Utc;

use crate::error::Result;
use crate::traits::ErrorContext;

use super::types::ShareAclRequest;
use super::{AccessLevel, OvhProvider, ShareAcl};

impl OvhProvider {
    /// 与 OVH 服务器校时，后续请求的时间戳使用服务器时间
    pub async fn sync_time(&self) -> Result<i64> {
        let server_time: i64 = self.get_unsigned("/auth/time").await?;
        let delta = server_time - Utc::now().timestamp();
        self.time_delta.store(delta, Ordering::Relaxed);
        log::debug!("OVH time delta: {delta}s");
        Ok(delta)
    }

    /// 为 NetApp 共享添加一条 IP 访问规则
    pub async fn add_share_acl(
        &self,
        netapp_id: &str,
        share_id: &str,
        access_to: &str,
        access_level: AccessLevel,
    ) -> Result<ShareAcl> {
        let path = format!("/storage/netapp/{netapp_id}/share/{share_id}/acl");
        let ctx = ErrorContext::default()
            .resource(format!("netapp {netapp_id} / share {share_id}"))
            .record_name(access_to);
        self.post(
            &path,
            &ShareAclRequest {
                access_level,
                access_to,
            },
            ctx,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use reqwest::Client;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::OvhCredentials;
    use crate::error::ProviderError;

    fn provider(server: &MockServer) -> OvhProvider {
        OvhProvider::new(
            Client::new(),
            server.uri(),
            OvhCredentials {
                application_key: "app-key".to_string(),
                application_secret: "secret-as".to_string(),
                consumer_key: "consumer-ck".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_sync_time_sets_delta() {
        let server = MockServer::start().await;
        let server_time = Utc::now().timestamp() + 120;
        Mock::given(method("GET"))
            .and(path("/auth/time"))
            .respond_with(ResponseTemplate::new(200).set_body_string(server_time.to_string()))
            .mount(&server)
            .await;

        let ovh = provider(&server);
        let delta = ovh.sync_time().await.unwrap();

        assert!((118..=122).contains(&delta), "delta {delta}");
        assert!((ovh.timestamp() - server_time).abs() <= 2);
    }

    #[tokio::test]
    async fn test_add_share_acl_signed_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/storage/netapp/n1/share/s1/acl"))
            .and(header("X-Ovh-Application", "app-key"))
            .and(header("X-Ovh-Consumer", "consumer-ck"))
            .and(header_exists("X-Ovh-Signature"))
            .and(header_exists("X-Ovh-Timestamp"))
            .and(body_json(json!({"accessLevel": "rw", "accessTo": "10.0.0.1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "acl-1",
                "accessLevel": "rw",
                "accessTo": "10.0.0.1",
                "status": "queued_to_apply"
            })))
            .mount(&server)
            .await;

        let acl = provider(&server)
            .add_share_acl("n1", "s1", "10.0.0.1", AccessLevel::Rw)
            .await
            .unwrap();

        assert_eq!(acl.id.as_deref(), Some("acl-1"));
        assert_eq!(acl.access_level, AccessLevel::Rw);
        assert_eq!(acl.status.as_deref(), Some("queued_to_apply"));
    }

    #[tokio::test]
    async fn test_add_share_acl_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "class": "Client::Forbidden",
                "message": "This call has not been granted"
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .add_share_acl("n1", "s1", "10.0.0.1", AccessLevel::Rw)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "[ovh] 凭证无效 (Client::Forbidden: This call has not been granted)"
        );
    }

    #[tokio::test]
    async fn test_add_share_acl_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "message": "ACL already exists"
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .add_share_acl("n1", "s1", "10.0.0.1", AccessLevel::Ro)
            .await
            .unwrap_err();

        assert!(
            matches!(err, ProviderError::RecordExists { ref record_name, .. } if record_name == "10.0.0.1"),
            "{err:?}"
        );
    }

    #[test]
    fn test_access_level_parse() {
        assert_eq!("RW".parse::<AccessLevel>(), Ok(AccessLevel::Rw));
        assert_eq!("ro".parse::<AccessLevel>(), Ok(AccessLevel::Ro));
        assert!("admin".parse::<AccessLevel>().is_err());
    }
}
