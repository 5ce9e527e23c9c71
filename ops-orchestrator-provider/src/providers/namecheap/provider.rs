//! Namecheap SSL 证书查询

use chrono::{Days, NaiveDate};

use crate::error::Result;

use super::{ExpiryWarning, NC_PAGE_SIZE, NamecheapAccount, NamecheapProvider, SslCertificate};

impl NamecheapProvider {
    /// 列出账户下所有 SSL 证书（自动翻页）
    pub async fn list_ssl_certificates(
        &self,
        account: &NamecheapAccount,
    ) -> Result<Vec<SslCertificate>> {
        let mut certificates = Vec::new();
        let mut page: u32 = 1;

        loop {
            let doc = self
                .request(
                    account,
                    "namecheap.ssl.getList",
                    &[
                        ("PageSize", NC_PAGE_SIZE.to_string()),
                        ("Page", page.to_string()),
                    ],
                )
                .await?;

            let fetched = doc.certificates.len();
            certificates.extend(doc.certificates);

            let total = doc.total_items.unwrap_or(0) as usize;
            if fetched == 0 || certificates.len() >= total {
                break;
            }
            page += 1;
        }

        log::debug!(
            "Account {}: {} certificate(s)",
            account.api_user,
            certificates.len()
        );
        Ok(certificates)
    }
}

/// 筛选在 `[today, today + days]` 区间内到期的证书（两端包含）
///
/// 按日期而不是时刻比较：今天到期的证书仍会告警，不会因为已过零点被漏掉。
/// 没有到期日的证书被跳过。
pub fn expiring_within(
    certificates: &[SslCertificate],
    today: NaiveDate,
    days: u64,
) -> Vec<ExpiryWarning> {
    let horizon = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);

    certificates
        .iter()
        .filter_map(|cert| {
            let expire_date = cert.expire_date?;
            (today <= expire_date && expire_date <= horizon).then(|| ExpiryWarning {
                certificate_id: cert.certificate_id.clone(),
                host_name: cert.host_name.clone(),
                expire_date,
            })
        })
        .collect()
}
