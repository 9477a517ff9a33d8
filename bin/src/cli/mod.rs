//! CLI interpreter for the service

mod build_info;
mod chain;
mod read;
mod serve;
mod tx;

use build_info::BUILD_INFO;
use clap::{Parser, Subcommand};

use crate::logger::LogLevel;

/// `ClubChain`
///
/// Campus club management on Sui. Running `./clubchain` without a command starts the
/// JSON API node. The other commands perform one read or build one transaction and
/// print the result as JSON.
#[derive(Parser)]
#[clap(version = BUILD_INFO)]
pub(crate) struct Cli {
    /// Logging verbosity
    #[clap(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub(crate) log_level: LogLevel,

    /// Chain connection and package settings
    #[clap(flatten)]
    chain: chain::ChainArgs,

    /// JSON API settings
    #[clap(flatten)]
    serve: serve::Serve,

    /// `ClubChain` cli subcommand
    #[clap(subcommand)]
    command: Option<Commands>,
}

/// `ClubChain` cli commands
#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve,
    /// Read clubs, events and authorization from chain
    #[clap(flatten)]
    Read(read::ReadCommand),
    /// Build an unsigned transaction for a wallet to sign
    Tx(tx::TxCommand),
    /// Submit a wallet signed transaction
    Execute(tx::Execute),
}

impl Cli {
    /// Execute cli commands of the clubchain node
    pub(crate) async fn exec(self) -> anyhow::Result<()> {
        let chain = self.chain;
        match self.command {
            None | Some(Commands::Serve) => self.serve.exec(chain).await,
            Some(Commands::Read(cmd)) => cmd.exec(chain).await,
            Some(Commands::Tx(cmd)) => cmd.exec(chain).await,
            Some(Commands::Execute(cmd)) => cmd.exec(chain).await,
        }
    }
}

/// Print a value as pretty JSON on stdout.
fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
