//! 配置加载
//!
//! TOML 文件提供目标列表与非敏感参数，密钥可以写在文件里，也可以由环境变量覆盖
//! （`.env` 文件会先被加载）。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ops_orchestrator_provider::{AccessLevel, HttpClientConfig, NamecheapAccount};
use serde::Deserialize;

/// 默认配置文件
pub const DEFAULT_CONFIG_PATH: &str = "ops-orchestrator.toml";

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("读取配置文件 {path} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析配置文件 {path} 失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("缺少配置段 [{0}]")]
    MissingSection(&'static str),

    #[error("缺少配置项 {section}.{key}（或环境变量 {env}）")]
    MissingValue {
        section: &'static str,
        key: &'static str,
        env: &'static str,
    },

    #[error("配置项 {0} 无效: {1}")]
    Invalid(&'static str, String),
}

/// 应用配置
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub runner: RunnerConfig,
    pub http: HttpClientConfig,
    pub cloudflare: Option<CloudflareConfig>,
    pub namecheap: Option<NamecheapConfig>,
    pub ovh: Option<OvhConfig>,
    pub zabbix: Option<ZabbixConfig>,
}

/// 批量执行配置
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub max_concurrency: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: ops_orchestrator_core::DEFAULT_MAX_CONCURRENCY,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CloudflareConfig {
    pub api_token: String,
    pub base_url: Option<String>,
    pub max_concurrency: Option<usize>,
    /// Zone ID 列表
    pub zones: Vec<String>,
    /// 待创建的 A 记录：记录名 -> IP
    pub records: BTreeMap<String, String>,
    /// 待删除 A 记录的 IP
    pub delete_ips: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NamecheapConfig {
    pub client_ip: String,
    pub api_url: Option<String>,
    /// 未指定 `api_url` 时改用沙箱环境
    pub sandbox: bool,
    pub max_concurrency: Option<usize>,
    pub warning_days: Option<u64>,
    pub accounts: Vec<NamecheapAccount>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OvhConfig {
    pub endpoint: String,
    pub application_key: String,
    pub application_secret: String,
    pub consumer_key: String,
    pub max_concurrency: Option<usize>,
    pub netapp_id: String,
    pub share_id: String,
    pub access_level: AccessLevel,
    pub ip_addresses: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ZabbixConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub max_concurrency: Option<usize>,
    pub hostnames: Vec<String>,
}

impl AppConfig {
    /// 加载配置
    ///
    /// 未指定路径且默认文件不存在时，从空配置开始（仅靠环境变量也能运行）。
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let mut config = if !explicit && !path.exists() {
            tracing::debug!("{} not found, using environment only", path.display());
            Self::default()
        } else {
            let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            Self::parse(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?
        };

        config.apply_env(|key| std::env::var(key).ok().filter(|v| !v.is_empty()));
        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖密钥与地址
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup("CLOUDFLARE_API_TOKEN") {
            self.cloudflare.get_or_insert_with(Default::default).api_token = token;
        }

        if let Some(ip) = lookup("NAMECHEAP_CLIENT_IP") {
            self.namecheap.get_or_insert_with(Default::default).client_ip = ip;
        }

        for (env, field) in [
            ("OVH_ENDPOINT", OvhField::Endpoint),
            ("OVH_APPLICATION_KEY", OvhField::ApplicationKey),
            ("OVH_APPLICATION_SECRET", OvhField::ApplicationSecret),
            ("OVH_CONSUMER_KEY", OvhField::ConsumerKey),
        ] {
            if let Some(value) = lookup(env) {
                let ovh = self.ovh.get_or_insert_with(Default::default);
                match field {
                    OvhField::Endpoint => ovh.endpoint = value,
                    OvhField::ApplicationKey => ovh.application_key = value,
                    OvhField::ApplicationSecret => ovh.application_secret = value,
                    OvhField::ConsumerKey => ovh.consumer_key = value,
                }
            }
        }

        for (env, field) in [
            ("ZABBIX_URL", ZabbixField::Url),
            ("ZABBIX_USERNAME", ZabbixField::Username),
            ("ZABBIX_PASSWORD", ZabbixField::Password),
        ] {
            if let Some(value) = lookup(env) {
                let zabbix = self.zabbix.get_or_insert_with(Default::default);
                match field {
                    ZabbixField::Url => zabbix.url = value,
                    ZabbixField::Username => zabbix.username = value,
                    ZabbixField::Password => zabbix.password = value,
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.runner.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "runner.max_concurrency",
                "必须大于 0".to_string(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http.timeout_secs",
                "必须大于 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn cloudflare(&self) -> Result<&CloudflareConfig, ConfigError> {
        let section = self
            .cloudflare
            .as_ref()
            .ok_or(ConfigError::MissingSection("cloudflare"))?;
        require(&section.api_token, "cloudflare", "api_token", "CLOUDFLARE_API_TOKEN")?;
        Ok(section)
    }

    pub fn namecheap(&self) -> Result<&NamecheapConfig, ConfigError> {
        let section = self
            .namecheap
            .as_ref()
            .ok_or(ConfigError::MissingSection("namecheap"))?;
        require(&section.client_ip, "namecheap", "client_ip", "NAMECHEAP_CLIENT_IP")?;
        Ok(section)
    }

    pub fn ovh(&self) -> Result<&OvhConfig, ConfigError> {
        let section = self.ovh.as_ref().ok_or(ConfigError::MissingSection("ovh"))?;
        require(&section.endpoint, "ovh", "endpoint", "OVH_ENDPOINT")?;
        require(&section.application_key, "ovh", "application_key", "OVH_APPLICATION_KEY")?;
        require(
            &section.application_secret,
            "ovh",
            "application_secret",
            "OVH_APPLICATION_SECRET",
        )?;
        require(&section.consumer_key, "ovh", "consumer_key", "OVH_CONSUMER_KEY")?;
        if section.netapp_id.is_empty() || section.share_id.is_empty() {
            return Err(ConfigError::Invalid(
                "ovh.netapp_id / ovh.share_id",
                "不能为空".to_string(),
            ));
        }
        Ok(section)
    }

    pub fn zabbix(&self) -> Result<&ZabbixConfig, ConfigError> {
        let section = self
            .zabbix
            .as_ref()
            .ok_or(ConfigError::MissingSection("zabbix"))?;
        require(&section.url, "zabbix", "url", "ZABBIX_URL")?;
        require(&section.username, "zabbix", "username", "ZABBIX_USERNAME")?;
        require(&section.password, "zabbix", "password", "ZABBIX_PASSWORD")?;
        Ok(section)
    }
}

#[derive(Clone, Copy)]
enum OvhField {
    Endpoint,
    ApplicationKey,
    ApplicationSecret,
    ConsumerKey,
}

#[derive(Clone, Copy)]
enum ZabbixField {
    Url,
    Username,
    Password,
}

fn require(
    value: &str,
    section: &'static str,
    key: &'static str,
    env: &'static str,
) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingValue { section, key, env });
    }
    Ok(())
}
