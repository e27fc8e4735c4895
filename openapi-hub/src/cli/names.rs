//! names サブコマンド
//!
//! 設定されたURLから導出される名前の一覧を表示します（ネットワークアクセスなし）。

use super::SourceArgs;
use crate::config::HubConfig;
use crate::naming::derive_names;
use clap::Args;

/// Arguments for the names subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct NamesArgs {
    /// Endpoint source
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Execute the names command
pub fn execute(args: &NamesArgs, config: HubConfig) -> Result<(), anyhow::Error> {
    let config = args.source.apply(config);
    let names = derive_names(&config.urls);

    if names.is_empty() {
        println!("No valid endpoints configured");
        return Ok(());
    }

    println!("NAME\tURL");
    for (name, url) in names.iter() {
        println!("{}\t{}", name, url);
    }
    Ok(())
}
