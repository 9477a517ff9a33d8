//! Library Crates Defined Errors

use thiserror::Error;

/// Crate error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport level failure talking to the fullnode.
    #[error("HTTP error talking to {url}: {source}")]
    Http {
        /// Endpoint the request was sent to.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The fullnode answered with a JSON-RPC error object.
    #[error("RPC error {code} from `{method}`: {message}")]
    Rpc {
        /// JSON-RPC method that failed.
        method: String,
        /// JSON-RPC error code.
        code: i64,
        /// Error message reported by the node.
        message: String,
    },
    /// The response could not be decoded into the expected shape.
    #[error("Failed to decode `{method}` response: {reason}")]
    Decode {
        /// JSON-RPC method whose response was malformed.
        method: String,
        /// What went wrong.
        reason: String,
    },
    /// A required configuration value is not set.
    #[error("Missing configuration value `{0}`")]
    MissingConfig(&'static str),
    /// A configuration value is set but unusable.
    #[error("Invalid configuration value `{name}`: {reason}")]
    InvalidConfig {
        /// Name of the configuration value.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// Caller supplied argument was rejected before reaching the chain.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// The requested object does not exist on chain.
    #[error("Object `{0}` not found")]
    ObjectNotFound(String),
    /// Several configuration problems found at once.
    #[error("Invalid configuration:{}", .0.iter().map(|e| format!("\n- {e}")).collect::<String>())]
    Config(Vec<Error>),
}

impl Error {
    /// Shortcut for [`Error::InvalidArgument`].
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Shortcut for [`Error::Decode`].
    pub(crate) fn decode(method: &str, reason: impl ToString) -> Self {
        Self::Decode {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_lists_every_problem() {
        let err = Error::Config(vec![
            Error::MissingConfig("PACKAGE_ID"),
            Error::MissingConfig("MEMBER_REGISTRY_ID"),
        ]);

        assert_eq!(
            err.to_string(),
            "Invalid configuration:\n- Missing configuration value `PACKAGE_ID`\n- Missing \
             configuration value `MEMBER_REGISTRY_ID`"
        );
    }
}
