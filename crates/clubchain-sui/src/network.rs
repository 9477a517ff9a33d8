//! Enum of possible Sui networks.

/// Enum of possible Sui networks.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::VariantNames,
    strum::EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Network {
    /// Sui mainnet.
    Mainnet,
    /// Sui public testnet.
    #[default]
    Testnet,
    /// Sui devnet, wiped regularly.
    Devnet,
    /// A local `sui start` network.
    Localnet,
}

/// Mainnet public fullnode.
const DEFAULT_MAINNET_FULLNODE: &str = "https://fullnode.mainnet.sui.io:443";
/// Testnet public fullnode.
const DEFAULT_TESTNET_FULLNODE: &str = "https://fullnode.testnet.sui.io:443";
/// Devnet public fullnode.
const DEFAULT_DEVNET_FULLNODE: &str = "https://fullnode.devnet.sui.io:443";
/// Fullnode started by `sui start`.
const DEFAULT_LOCALNET_FULLNODE: &str = "http://127.0.0.1:9000";

impl Network {
    /// Get the default JSON-RPC fullnode URL for the network.
    #[must_use]
    pub fn default_fullnode_url(self) -> &'static str {
        match self {
            Network::Mainnet => DEFAULT_MAINNET_FULLNODE,
            Network::Testnet => DEFAULT_TESTNET_FULLNODE,
            Network::Devnet => DEFAULT_DEVNET_FULLNODE,
            Network::Localnet => DEFAULT_LOCALNET_FULLNODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use test_case::test_case;

    use super::*;

    #[test_case("mainnet", Network::Mainnet ; "lowercase mainnet")]
    #[test_case("TESTNET", Network::Testnet ; "uppercase testnet")]
    #[test_case("Devnet", Network::Devnet ; "mixed case devnet")]
    #[test_case("localnet", Network::Localnet ; "localnet")]
    fn parses_network_names(name: &str, expected: Network) {
        assert_eq!(Network::from_str(name).ok(), Some(expected));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        use strum::IntoEnumIterator;

        for network in Network::iter() {
            assert_eq!(Network::from_str(&network.to_string()).ok(), Some(network));
        }
    }

    #[test]
    fn default_is_testnet() {
        assert_eq!(Network::default(), Network::Testnet);
        assert_eq!(
            Network::default().default_fullnode_url(),
            "https://fullnode.testnet.sui.io:443"
        );
    }

    #[test]
    fn unknown_network_is_rejected() {
        assert!(Network::from_str("preprod").is_err());
    }
}
