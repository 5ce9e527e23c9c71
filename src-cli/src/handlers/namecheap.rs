//! Namecheap 命令处理

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use ops_orchestrator_core::{BatchOperation, BatchSummary};
use ops_orchestrator_provider::{
    ExpiryWarning, NAMECHEAP_API_URL, NAMECHEAP_SANDBOX_API_URL, NamecheapAccount,
    NamecheapProvider, expiring_within,
};

use super::{HandlerContext, item_error};
use crate::config::NamecheapConfig;
use crate::report;

/// 默认预警天数
pub const DEFAULT_WARNING_DAYS: u64 = 30;

/// 单个账户的检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryReport {
    pub days: u64,
    pub checked: usize,
    pub warnings: Vec<ExpiryWarning>,
}

impl fmt::Display for ExpiryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.warnings.is_empty() {
            return write!(
                f,
                "{} certificate(s) checked, none expiring within {} days",
                self.checked, self.days
            );
        }

        write!(
            f,
            "{} of {} certificate(s) expiring within {} days",
            self.warnings.len(),
            self.checked,
            self.days
        )?;
        for warning in &self.warnings {
            write!(f, "\n    {warning}")?;
        }
        Ok(())
    }
}

pub struct CheckSslExpiry {
    provider: NamecheapProvider,
    today: NaiveDate,
    days: u64,
}

#[async_trait]
impl BatchOperation for CheckSslExpiry {
    type Item = NamecheapAccount;
    type Output = ExpiryReport;
    type Error = anyhow::Error;

    fn name(&self) -> &str {
        "namecheap ssl-expiry"
    }

    async fn execute(&self, account: NamecheapAccount) -> anyhow::Result<ExpiryReport> {
        let certificates = self
            .provider
            .list_ssl_certificates(&account)
            .await
            .map_err(item_error)?;
        let warnings = expiring_within(&certificates, self.today, self.days);

        for warning in &warnings {
            tracing::warn!(account = %account, "{warning}");
        }

        Ok(ExpiryReport {
            days: self.days,
            checked: certificates.len(),
            warnings,
        })
    }
}

/// `namecheap ssl-expiry`
///
/// 预警天数优先级：命令行 > `namecheap.warning_days` > 30。
pub async fn ssl_expiry(ctx: &HandlerContext, days: Option<u64>) -> anyhow::Result<BatchSummary> {
    let config = ctx.config.namecheap()?;
    if config.accounts.is_empty() {
        tracing::warn!("namecheap.accounts is empty, nothing to check");
    }

    let provider = NamecheapProvider::new(ctx.client.clone(), config.client_ip.clone())
        .with_api_url(api_url(config));

    let operation = CheckSslExpiry {
        provider,
        today: chrono::Local::now().date_naive(),
        days: days.or(config.warning_days).unwrap_or(DEFAULT_WARNING_DAYS),
    };
    let runner = ctx.runner(config.max_concurrency)?;
    let report = runner
        .run_operation(config.accounts.clone(), &operation)
        .await;
    Ok(report::print("Namecheap: SSL certificate expiry", &report))
}

/// 接口地址：显式 `api_url` > 沙箱 > 正式环境
fn api_url(config: &NamecheapConfig) -> &str {
    match &config.api_url {
        Some(api_url) => api_url,
        None if config.sandbox => NAMECHEAP_SANDBOX_API_URL,
        None => NAMECHEAP_API_URL,
    }
}
