//! Runs one banking workflow against the gateway and prints its report.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

use gateway_workflows::config::WorkflowConfig;
use gateway_workflows::{deposit_account, documents, operation_receipt, Gateway};

/// Banking gateway workflows
#[derive(Parser, Debug)]
#[command(name = "gateway-workflow", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Gateway base URL, overrides the config file and GATEWAY_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Open a credit card account and fetch its tariff and contract
    Documents,
    /// Open a deposit account and show the raw gateway response
    DepositAccount,
    /// Make a purchase and fetch its receipt
    OperationReceipt,
}

fn to_pretty<T: Serialize>(report: anyhow::Result<T>) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&report?)?)
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut config = WorkflowConfig::load(args.config.as_deref());
    config.apply_base_url_override(args.base_url);
    info!(
        base_url = %config.gateway.base_url,
        timeout_ms = config.gateway.timeout_ms,
        workflow = ?args.command,
        "workflow_starting"
    );

    let gateway = Gateway::from_config(&config);
    let output = match args.command {
        Command::Documents => to_pretty(documents(&gateway)),
        Command::DepositAccount => to_pretty(deposit_account(&gateway)),
        Command::OperationReceipt => to_pretty(operation_receipt(&gateway)),
    };

    match output {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "workflow_failed");
            ExitCode::FAILURE
        }
    }
}
