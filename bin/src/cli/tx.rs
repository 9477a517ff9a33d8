//! Transaction building and submission commands

use clap::{Args, Subcommand};
use clubchain_sui::{
    contracts::{self, MoveCall, NewEvent},
    wallet_error::friendly_error,
    ChainConfig,
};
use console::Emoji;
use serde_json::json;

use super::{chain::ChainArgs, print_json};

/// Build an unsigned transaction
#[derive(Args)]
pub(crate) struct TxCommand {
    /// Address that will sign and pay for the transaction
    #[clap(long)]
    sender: String,

    /// Action to build
    #[clap(subcommand)]
    action: TxAction,
}

/// On-chain actions of the `ClubChain` package
#[derive(Subcommand)]
enum TxAction {
    /// Create a club, the sender receives its owner badge
    CreateClub {
        /// Club name
        name: String,
        /// Club description
        #[clap(long, default_value = "")]
        description: String,
    },
    /// Rename or describe a club
    UpdateClub {
        /// Club object id
        club_id: String,
        /// Owner badge of the club
        owner_badge_id: String,
        /// New name
        name: String,
        /// New description
        #[clap(long, default_value = "")]
        description: String,
    },
    /// Delete a club
    DeleteClub {
        /// Club object id
        club_id: String,
        /// Owner badge of the club
        owner_badge_id: String,
    },
    /// Create an event in a club
    CreateEvent {
        /// Club object id
        club_id: String,
        /// Owner badge or admin cap of the club
        owner_badge_id: String,
        /// Event title
        title: String,
        /// Start time, unix milliseconds
        #[clap(long)]
        date: u64,
        /// Event description
        #[clap(long, default_value = "")]
        description: String,
    },
    /// Join an event
    JoinEvent {
        /// Event object id
        event_id: String,
    },
    /// Leave an event
    LeaveEvent {
        /// Event object id
        event_id: String,
    },
    /// Register the sender as a member under an Intra login
    RegisterMember {
        /// Intra login
        intra_login: String,
    },
    /// Donate a coin to a club
    Donate {
        /// Club object id
        club_id: String,
        /// Coin object holding the donation
        coin_id: String,
        /// Amount in MIST
        amount_mist: u64,
    },
}

impl TxAction {
    /// The Move call for this action.
    fn build(self, config: &ChainConfig) -> clubchain_sui::Result<MoveCall> {
        match self {
            Self::CreateClub { name, description } => {
                contracts::create_club(config, &name, &description)
            },
            Self::UpdateClub {
                club_id,
                owner_badge_id,
                name,
                description,
            } => contracts::update_club(config, &club_id, &owner_badge_id, &name, &description),
            Self::DeleteClub {
                club_id,
                owner_badge_id,
            } => contracts::delete_club(config, &club_id, &owner_badge_id),
            Self::CreateEvent {
                club_id,
                owner_badge_id,
                title,
                date,
                description,
            } => {
                contracts::create_event(config, &NewEvent {
                    club_id,
                    owner_badge_id,
                    title,
                    description,
                    date,
                })
            },
            Self::JoinEvent { event_id } => contracts::join_event(config, &event_id),
            Self::LeaveEvent { event_id } => contracts::leave_event(config, &event_id),
            Self::RegisterMember { intra_login } => {
                contracts::register_member(config, &intra_login)
            },
            Self::Donate {
                club_id,
                coin_id,
                amount_mist,
            } => contracts::donate(config, &club_id, &coin_id, amount_mist),
        }
    }
}

impl TxCommand {
    /// Build the call and ask the fullnode for the unsigned transaction bytes
    pub(crate) async fn exec(self, chain: ChainArgs) -> anyhow::Result<()> {
        let reader = chain.reader()?;
        let call = self.action.build(reader.config())?;
        tracing::info!(call = %call.target(), sender = %self.sender, "building transaction");

        let tx = reader
            .rpc()
            .move_call(&self.sender, &call, chain.gas_budget)
            .await?;

        eprintln!(
            "{} Unsigned transaction for {}, sign it with the sender wallet",
            Emoji::new("✍️", ""),
            call.target()
        );
        print_json(&json!({ "call": call, "transaction": tx }))
    }
}

/// Submit a signed transaction
#[derive(Args)]
pub(crate) struct Execute {
    /// Base64 transaction bytes
    #[clap(long)]
    tx_bytes: String,

    /// Base64 serialized signature, repeat for multisig or sponsored transactions
    #[clap(long = "signature", required = true)]
    signatures: Vec<String>,
}

impl Execute {
    /// Execute the transaction and wait for local execution
    pub(crate) async fn exec(self, chain: ChainArgs) -> anyhow::Result<()> {
        let reader = chain.reader()?;
        let executed = reader
            .rpc()
            .execute_transaction_block(&self.tx_bytes, &self.signatures)
            .await
            .map_err(|err| anyhow::anyhow!(friendly_error(&err.to_string())))?;

        eprintln!("{} Transaction {} executed", Emoji::new("🚀", ""), executed.digest);
        print_json(&executed)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use clubchain_sui::Network;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[clap(subcommand)]
        action: TxAction,
    }

    fn config() -> ChainConfig {
        ChainConfig::new(Network::Testnet, "0xpkg")
    }

    #[test]
    fn create_event_from_arguments() {
        let cli = TestCli::try_parse_from([
            "tx",
            "create-event",
            "0xc1",
            "0xb1",
            "Hackathon",
            "--date",
            "1767225600000",
        ])
        .unwrap();

        let call = cli.action.build(&config()).unwrap();
        assert_eq!(call.target(), "0xpkg::event::create_event");
        assert_eq!(call.arguments.len(), 6);
    }

    #[test]
    fn donate_rejects_zero() {
        let cli = TestCli::try_parse_from(["tx", "donate", "0xc1", "0xc0", "0"]).unwrap();
        assert!(cli.action.build(&config()).is_err());
    }

    #[test]
    fn register_member_needs_registry() {
        let cli = TestCli::try_parse_from(["tx", "register-member", "jdoe"]).unwrap();
        let err = cli.action.build(&config()).unwrap_err();
        assert!(err.to_string().contains("MEMBER_REGISTRY_ID"));
    }
}
