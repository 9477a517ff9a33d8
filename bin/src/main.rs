//! The `ClubChain` node.

mod cli;
mod gateway;
mod logger;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logger::init(cli.log_level)?;
    cli.exec().await
}
