//! One-shot chain reads

use clap::Subcommand;
use clubchain_sui::{authorize, now_ms};
use serde_json::json;

use super::{chain::ChainArgs, print_json};

/// Read commands, printed as JSON
#[derive(Subcommand)]
pub(crate) enum ReadCommand {
    /// List every club
    Clubs,
    /// Show one club
    Club {
        /// Club object id
        club_id: String,
    },
    /// List the events of a club, ordered by date
    Events {
        /// Club object id
        club_id: String,
    },
    /// Show one event
    Event {
        /// Event object id
        event_id: String,
    },
    /// Derive the roles of a wallet from its badges
    Auth {
        /// Wallet address
        address: String,
    },
}

impl ReadCommand {
    /// Run the read against the configured fullnode
    pub(crate) async fn exec(self, chain: ChainArgs) -> anyhow::Result<()> {
        let reader = chain.reader()?;
        match self {
            Self::Clubs => print_json(&json!({ "clubs": reader.clubs().await? })),
            Self::Club { club_id } => {
                let club = reader
                    .club(&club_id)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Club `{club_id}` not found"))?;
                print_json(&json!({ "club": club }))
            },
            Self::Events { club_id } => {
                print_json(&json!({ "events": reader.events(&club_id).await? }))
            },
            Self::Event { event_id } => {
                let event = reader
                    .event(&event_id)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Event `{event_id}` not found"))?;
                print_json(&json!({ "event": event }))
            },
            Self::Auth { address } => {
                let auth = authorize(
                    reader.rpc().as_ref(),
                    reader.config(),
                    Some(address.as_str()),
                    now_ms(),
                )
                .await;
                print_json(&json!({ "authorization": auth }))
            },
        }
    }
}
