//! Storm CLI - fetch storm classifications and export timeline structures.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "storm-cli",
    version,
    about = "Storm event timeline toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: storm_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    storm_cmd::run(cli.command).await
}
