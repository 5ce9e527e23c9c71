//! 命令行定义

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ops_orchestrator_provider::AccessLevel;

#[derive(Parser, Debug)]
#[command(name = "ops-orchestrator", version)]
#[command(about = "Batch operations against Cloudflare, Namecheap, OVH and Zabbix APIs")]
pub struct Cli {
    /// 配置文件路径（默认 ./ops-orchestrator.toml）
    #[arg(long, global = true, env = "OPS_ORCHESTRATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// 覆盖配置中的并发上限
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// 任一条目失败时以状态码 1 退出
    #[arg(long, global = true, default_value_t = false)]
    pub fail_on_error: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cloudflare DNS records
    #[command(subcommand)]
    Cloudflare(CloudflareCommand),

    /// Namecheap SSL certificates
    #[command(subcommand)]
    Namecheap(NamecheapCommand),

    /// OVHcloud NetApp shares
    #[command(subcommand)]
    Ovh(OvhCommand),

    /// Zabbix hosts
    #[command(subcommand)]
    Zabbix(ZabbixCommand),
}

#[derive(Debug, Subcommand)]
pub enum CloudflareCommand {
    /// Create every configured A record in every configured zone
    AddARecords,

    /// Delete A records pointing at the configured IPs in every configured zone
    DeleteARecords,

    /// Create a CNAME record in the zone of the given site
    CreateCname(CnameArgs),
}

#[derive(Debug, Args)]
pub struct CnameArgs {
    /// Zone 域名，例如 example.com
    #[arg(long)]
    pub site: String,

    /// 记录名
    #[arg(long)]
    pub name: String,

    /// 指向的目标主机名
    #[arg(long)]
    pub target: String,
}

#[derive(Debug, Subcommand)]
pub enum NamecheapCommand {
    /// Report SSL certificates expiring soon, per account
    SslExpiry {
        /// 预警天数（默认取 namecheap.warning_days，未配置时为 30）
        #[arg(long)]
        days: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum OvhCommand {
    /// Add an ACL entry for every configured IP
    ShareAcl {
        /// rw 或 ro（默认取 ovh.access_level）
        #[arg(long)]
        access_level: Option<AccessLevel>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ZabbixCommand {
    /// Delete hosts by name
    DeleteHosts {
        /// 主机名；为空时使用 zabbix.hostnames
        hostnames: Vec<String>,
    },
}
