//! Serve cli command

use std::{net::SocketAddr, sync::Arc};

use clap::Args;
use console::Emoji;
use tracing::warn;

use super::chain::ChainArgs;
use crate::gateway::{self, Gateway};

/// Default address of the JSON API.
const DEFAULT_LISTEN: &str = "127.0.0.1:5000";

/// Serve the JSON API
#[derive(Args)]
pub(crate) struct Serve {
    /// Address the JSON API listens on
    #[clap(long, env = "CLUBCHAIN_LISTEN", global = true, default_value = DEFAULT_LISTEN)]
    pub(crate) listen: SocketAddr,
}

impl Serve {
    /// Run the node until interrupted
    pub(crate) async fn exec(self, chain: ChainArgs) -> anyhow::Result<()> {
        let reader = chain.reader()?;
        if let Err(err) = reader.config().validate() {
            warn!(%err, "configuration incomplete, affected routes will fail");
        }

        println!(
            "{} Serving ClubChain on {} ({} network)",
            Emoji::new("🚀", ""),
            self.listen,
            reader.config().network
        );
        let gateway = Arc::new(Gateway::new(reader, chain.gas_budget));
        gateway::serve(self.listen, gateway).await
    }
}
