//! Chain configuration shared by the reader, the authorization check and the Move call
//! builders.

use std::time::Duration;

use url::Url;

use crate::{
    error::{Error, Result},
    network::Network,
};

/// The Sui system clock shared object.
pub const DEFAULT_CLOCK_OBJECT_ID: &str = "0x6";

/// Largest page the fullnode serves for owned object and transaction queries.
pub const RPC_PAGE_LIMIT: usize = 50;

/// Default number of pages walked per query.
pub const DEFAULT_MAX_PAGES: usize = 4;

/// Default timeout applied to every RPC request.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Default gas budget, in MIST, for built transactions.
pub const DEFAULT_GAS_BUDGET: u64 = 50_000_000;

/// Configuration of the ClubChain deployment on a Sui network.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Network the package is deployed to.
    pub network: Network,
    /// Fullnode URL override. Falls back to the network default.
    pub rpc_url: Option<Url>,
    /// Published ClubChain Move package.
    pub package_id: Option<String>,
    /// Shared club registry object, if the deployment has one.
    pub club_registry_id: Option<String>,
    /// Shared member registry object.
    pub member_registry_id: Option<String>,
    /// Clock object passed to time dependent calls.
    pub clock_object_id: String,
    /// Pages of [`RPC_PAGE_LIMIT`] items walked per query.
    pub max_pages: usize,
    /// Timeout for every RPC request.
    pub rpc_timeout: Duration,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            rpc_url: None,
            package_id: None,
            club_registry_id: None,
            member_registry_id: None,
            clock_object_id: DEFAULT_CLOCK_OBJECT_ID.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
        }
    }
}

impl ChainConfig {
    /// Config for a network with the given package.
    #[must_use]
    pub fn new(network: Network, package_id: impl Into<String>) -> Self {
        Self {
            network,
            package_id: Some(package_id.into()),
            ..Self::default()
        }
    }

    /// Set the club registry object.
    #[must_use]
    pub fn with_club_registry(mut self, id: impl Into<String>) -> Self {
        self.club_registry_id = Some(id.into());
        self
    }

    /// Set the member registry object.
    #[must_use]
    pub fn with_member_registry(mut self, id: impl Into<String>) -> Self {
        self.member_registry_id = Some(id.into());
        self
    }

    /// Fullnode to talk to.
    ///
    /// # Errors
    ///
    /// Only if the built in default for the network is not a valid URL.
    pub fn fullnode_url(&self) -> Result<Url> {
        match &self.rpc_url {
            Some(url) => Ok(url.clone()),
            None => {
                Url::parse(self.network.default_fullnode_url()).map_err(|e| {
                    Error::InvalidConfig {
                        name: "SUI_RPC_URL",
                        reason: e.to_string(),
                    }
                })
            },
        }
    }

    /// The package id, required for anything touching Move types.
    ///
    /// # Errors
    ///
    /// `MissingConfig` when `PACKAGE_ID` is not set.
    pub fn package_id(&self) -> Result<&str> {
        non_empty(self.package_id.as_deref()).ok_or(Error::MissingConfig("PACKAGE_ID"))
    }

    /// The member registry id, required to register members.
    ///
    /// # Errors
    ///
    /// `MissingConfig` when `MEMBER_REGISTRY_ID` is not set.
    pub fn member_registry_id(&self) -> Result<&str> {
        non_empty(self.member_registry_id.as_deref())
            .ok_or(Error::MissingConfig("MEMBER_REGISTRY_ID"))
    }

    /// The club registry id, if configured.
    #[must_use]
    pub fn club_registry_id(&self) -> Option<&str> {
        non_empty(self.club_registry_id.as_deref())
    }

    /// Check the whole configuration, reporting every problem found.
    ///
    /// # Errors
    ///
    /// `Error::Config` listing each missing or malformed value.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        match self.package_id() {
            Ok(id) => {
                if let Err(e) = check_object_id("PACKAGE_ID", id) {
                    errors.push(e);
                }
            },
            Err(e) => errors.push(e),
        }

        let optional_ids = [
            ("CLUB_REGISTRY_OBJECT_ID", self.club_registry_id()),
            (
                "MEMBER_REGISTRY_ID",
                non_empty(self.member_registry_id.as_deref()),
            ),
            ("CLOCK_OBJECT_ID", Some(self.clock_object_id.as_str())),
        ];
        for (name, id) in optional_ids {
            if let Some(id) = id {
                if let Err(e) = check_object_id(name, id) {
                    errors.push(e);
                }
            }
        }

        if self.max_pages == 0 {
            errors.push(Error::InvalidConfig {
                name: "max_pages",
                reason: "must be at least 1".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(errors))
        }
    }
}

/// Treat empty strings as unset, the way env files leave them.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Whether `id` is a `0x` prefixed hex object id or address.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    check_object_id("id", id).is_ok()
}

/// Object ids and addresses are `0x` prefixed hex.
pub(crate) fn check_object_id(name: &'static str, id: &str) -> Result<()> {
    let hex = id.strip_prefix("0x").ok_or_else(|| {
        Error::InvalidConfig {
            name,
            reason: format!("`{id}` is not 0x prefixed"),
        }
    })?;
    if hex.is_empty() || hex.len() > 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::InvalidConfig {
            name,
            reason: format!("`{id}` is not a hex object id"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn package_id_is_required() {
        let cfg = ChainConfig::default();
        assert!(matches!(
            cfg.package_id(),
            Err(Error::MissingConfig("PACKAGE_ID"))
        ));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let cfg = ChainConfig {
            package_id: Some("  ".to_string()),
            club_registry_id: Some(String::new()),
            ..ChainConfig::default()
        };
        assert!(cfg.package_id().is_err());
        assert_eq!(cfg.club_registry_id(), None);
    }

    #[test]
    fn validate_reports_all_problems() {
        let cfg = ChainConfig {
            club_registry_id: Some("registry".to_string()),
            max_pages: 0,
            ..ChainConfig::default()
        };

        let Err(Error::Config(errors)) = cfg.validate() else {
            panic!("expected a config error");
        };
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_config_passes() {
        let cfg = ChainConfig::new(Network::Testnet, "0xabc").with_club_registry("0x1234");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.clock_object_id, DEFAULT_CLOCK_OBJECT_ID);
    }

    #[test]
    fn rpc_url_override_wins() {
        let mut cfg = ChainConfig::default();
        assert_eq!(
            cfg.fullnode_url().ok().map(String::from),
            Some("https://fullnode.testnet.sui.io/".to_string())
        );

        cfg.rpc_url = Url::parse("http://localhost:9000").ok();
        assert_eq!(
            cfg.fullnode_url().ok().map(String::from),
            Some("http://localhost:9000/".to_string())
        );
    }

    #[test_case("0x6", true ; "short id")]
    #[test_case("0xDEADbeef", true ; "mixed case hex")]
    #[test_case("6", false ; "missing prefix")]
    #[test_case("0x", false ; "empty hex")]
    #[test_case("0xzz", false ; "not hex")]
    fn object_id_format(id: &str, ok: bool) {
        assert_eq!(check_object_id("ID", id).is_ok(), ok);
    }
}
