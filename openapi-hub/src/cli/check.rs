//! check subcommand
//!
//! Runs one discovery pass and prints the status of every endpoint.

use super::SourceArgs;
use crate::bootstrap;
use crate::config::HubConfig;
use crate::types::endpoint::NamedEndpoint;
use clap::Args;

/// Arguments for the check subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Exit with an error if any endpoint is down
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Endpoint source
    #[command(flatten)]
    pub source: SourceArgs,
}

/// 1行分の表示（NAME STATUS RTT URL）
pub fn format_row(endpoint: &NamedEndpoint) -> String {
    let rtt = endpoint
        .record
        .rtt_ms()
        .map(|rtt| format!("{:.1} ms", rtt))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}\t{}\t{}\t{}",
        endpoint.name,
        endpoint.record.status.as_str(),
        rtt,
        endpoint.record.url
    )
}

/// Execute the check command
pub async fn execute(args: &CheckArgs, config: HubConfig) -> Result<(), anyhow::Error> {
    let config = args.source.apply(config);
    let hub = bootstrap::build(&config)?;
    let snapshot = hub.registry.load().await;

    if snapshot.endpoints.is_empty() {
        println!("No valid endpoints configured");
        return Ok(());
    }

    println!("NAME\tSTATUS\tRTT\tURL");
    for endpoint in &snapshot.endpoints {
        println!("{}", format_row(endpoint));
    }

    let down = snapshot.endpoints.len() - snapshot.up_count();
    if args.strict && down > 0 {
        anyhow::bail!("{} endpoint(s) down", down);
    }
    Ok(())
}
