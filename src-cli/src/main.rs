//! Ops Orchestrator 命令行
//!
//! 读取配置，把各平台的批量任务交给 `BatchRunner` 执行并打印逐条结果。

mod cli;
mod config;
mod handlers;
mod report;

use std::process::ExitCode;

use clap::Parser;
use ops_orchestrator_core::BatchSummary;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, CloudflareCommand, Command, NamecheapCommand, OvhCommand, ZabbixCommand};
use config::AppConfig;
use handlers::HandlerContext;
use handlers::cloudflare::CnameTarget;

async fn dispatch(ctx: &HandlerContext, command: Command) -> anyhow::Result<BatchSummary> {
    match command {
        Command::Cloudflare(CloudflareCommand::AddARecords) => {
            handlers::cloudflare::add_a_records(ctx).await
        }
        Command::Cloudflare(CloudflareCommand::DeleteARecords) => {
            handlers::cloudflare::delete_a_records(ctx).await
        }
        Command::Cloudflare(CloudflareCommand::CreateCname(args)) => {
            let target = CnameTarget {
                site: args.site,
                name: args.name,
                target: args.target,
            };
            handlers::cloudflare::create_cname(ctx, target).await
        }
        Command::Namecheap(NamecheapCommand::SslExpiry { days }) => {
            handlers::namecheap::ssl_expiry(ctx, days).await
        }
        Command::Ovh(OvhCommand::ShareAcl { access_level }) => {
            handlers::ovh::share_acl(ctx, access_level).await
        }
        Command::Zabbix(ZabbixCommand::DeleteHosts { hostnames }) => {
            handlers::zabbix::delete_hosts(ctx, hostnames).await
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<BatchSummary> {
    let config = AppConfig::load(cli.config.as_deref())?;
    tracing::debug!("配置加载完成");

    let client = config.http.build_client()?;
    let ctx = HandlerContext {
        config,
        client,
        concurrency_override: cli.concurrency,
    };

    dispatch(&ctx, cli.command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // 本地 .env 可选
    let _ = dotenvy::dotenv();

    // 初始化日志（输出到 stderr，stdout 留给报告）
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let fail_on_error = cli.fail_on_error;

    match run(cli).await {
        Ok(summary) if fail_on_error && summary.failed > 0 => {
            tracing::warn!("{} item(s) failed", summary.failed);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
