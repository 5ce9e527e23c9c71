//! OVH 请求签名

use sha1::{Digest, Sha1};

use super::OvhProvider;

impl OvhProvider {
    /// 生成 `X-Ovh-Signature`
    ///
    /// `"$1$" + hex(SHA1(AS+CK+METHOD+URL+BODY+TIMESTAMP))`，各段以 `+` 连接，
    /// URL 为包含查询串的完整地址。
    pub(crate) fn sign(&self, method: &str, url: &str, body: &str, timestamp: i64) -> String {
        let to_sign = format!(
            "{}+{}+{method}+{url}+{body}+{timestamp}",
            self.credentials.application_secret, self.credentials.consumer_key
        );
        format!("$1${}", hex::encode(Sha1::digest(to_sign.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Client;

    use super::super::OvhCredentials;
    use super::*;

    fn provider(base_url: &str) -> OvhProvider {
        OvhProvider::new(
            Client::new(),
            base_url,
            OvhCredentials {
                application_key: "app-key".to_string(),
                application_secret: "secret-as".to_string(),
                consumer_key: "consumer-ck".to_string(),
            },
        )
    }

    #[test]
    fn test_sign_without_body() {
        let ovh = provider("https://eu.api.ovh.com/1.0");
        assert_eq!(
            ovh.sign("GET", "https://eu.api.ovh.com/1.0/me", "", 1_366_560_945),
            "$1$3e56154f78ef7290b49ee30d195762fdf6134555"
        );
    }

    #[test]
    fn test_sign_with_body() {
        let ovh = provider("https://ca.api.ovh.com/1.0");
        assert_eq!(
            ovh.sign(
                "POST",
                "https://ca.api.ovh.com/1.0/storage/netapp/n1/share/s1/acl",
                r#"{"accessLevel":"rw","accessTo":"10.0.0.1"}"#,
                1_700_000_000
            ),
            "$1$0cdf081e56b09a545b3d040a6755174818a2c6bf"
        );
    }
}
