//! Chain connection arguments shared by every command.

use std::{sync::Arc, time::Duration};

use clap::Args;
use clubchain_sui::{
    config::{DEFAULT_CLOCK_OBJECT_ID, DEFAULT_GAS_BUDGET, DEFAULT_MAX_PAGES},
    ChainConfig, ClubReader, JsonRpcClient, Network,
};
use url::Url;

/// Where the `ClubChain` package lives and how to reach it.
#[derive(Args, Debug, Clone)]
pub(crate) struct ChainArgs {
    /// Sui network the package is deployed to
    #[clap(long, env = "SUI_NETWORK", global = true, default_value_t = Network::Testnet)]
    network: Network,

    /// Fullnode JSON-RPC URL, overrides the network default
    #[clap(long, env = "SUI_RPC_URL", global = true)]
    rpc_url: Option<Url>,

    /// Published `ClubChain` package id
    #[clap(long, env = "PACKAGE_ID", global = true)]
    package_id: Option<String>,

    /// Shared club registry object id
    #[clap(long, env = "CLUB_REGISTRY_OBJECT_ID", global = true)]
    club_registry_id: Option<String>,

    /// Shared member registry object id
    #[clap(long, env = "MEMBER_REGISTRY_ID", global = true)]
    member_registry_id: Option<String>,

    /// Clock object passed to time dependent calls
    #[clap(long, env = "CLOCK_OBJECT_ID", global = true, default_value = DEFAULT_CLOCK_OBJECT_ID)]
    clock_object_id: String,

    /// Pages walked per owned object or transaction query
    #[clap(long, global = true, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// Timeout of every fullnode request, in seconds
    #[clap(long, global = true, default_value_t = 30)]
    rpc_timeout_secs: u64,

    /// Gas budget of built transactions, in MIST
    #[clap(long, global = true, default_value_t = DEFAULT_GAS_BUDGET)]
    pub(crate) gas_budget: u64,
}

impl ChainArgs {
    /// Library configuration from the arguments. Not validated.
    pub(crate) fn config(&self) -> ChainConfig {
        ChainConfig {
            network: self.network,
            rpc_url: self.rpc_url.clone(),
            package_id: self.package_id.clone(),
            club_registry_id: self.club_registry_id.clone(),
            member_registry_id: self.member_registry_id.clone(),
            clock_object_id: self.clock_object_id.clone(),
            max_pages: self.max_pages,
            rpc_timeout: Duration::from_secs(self.rpc_timeout_secs),
        }
    }

    /// Reader talking to the configured fullnode.
    pub(crate) fn reader(&self) -> anyhow::Result<ClubReader> {
        let config = self.config();
        let client = JsonRpcClient::from_config(&config)?;
        tracing::debug!(url = %client.url(), network = %config.network, "fullnode client ready");
        Ok(ClubReader::new(Arc::new(client), config))
    }
}
