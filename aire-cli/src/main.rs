//! aire CLI - Command line tool for downloading SINAICA air-quality data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "aire-cli",
    version,
    about = "SINAICA air-quality data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: aire_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    aire_cmd::run(cli.command).await
}
