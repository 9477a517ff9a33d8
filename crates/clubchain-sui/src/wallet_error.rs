//! Translation of wallet and node failure messages into something a user can act on.

use serde::Serialize;

/// Broad cause of a failed signing or execution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, strum::Display)]
pub enum WalletErrorKind {
    /// The user closed or denied the signing prompt.
    Rejected,
    /// Not enough SUI to pay for gas.
    InsufficientGas,
    /// The Move code aborted.
    MoveAbort,
    /// An input object no longer exists or changed version.
    ObjectNotFound,
    /// Anything else.
    Other,
}

/// Substrings, lowercase, identifying each kind. Checked in order.
const PATTERNS: &[(WalletErrorKind, &[&str])] = &[
    (WalletErrorKind::Rejected, &[
        "rejected",
        "user denied",
        "cancelled",
        "canceled",
        "closed the popup",
    ]),
    (WalletErrorKind::InsufficientGas, &[
        "insufficientgas",
        "insufficient gas",
        "no valid gas coins",
        "insufficientcoinbalance",
        "gas balance",
    ]),
    (WalletErrorKind::MoveAbort, &["moveabort", "move abort"]),
    (WalletErrorKind::ObjectNotFound, &[
        "objectnotfound",
        "object not found",
        "notexists",
        "is not available for consumption",
    ]),
];

impl WalletErrorKind {
    /// Classify a raw error message.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();
        PATTERNS
            .iter()
            .find(|(_, needles)| needles.iter().any(|n| message.contains(n)))
            .map_or(WalletErrorKind::Other, |(kind, _)| *kind)
    }

    /// Message shown to the user.
    #[must_use]
    pub fn friendly_message(self) -> &'static str {
        match self {
            WalletErrorKind::Rejected => "Transaction was rejected in your wallet.",
            WalletErrorKind::InsufficientGas => {
                "Not enough SUI to pay for gas. Top up your wallet and try again."
            },
            WalletErrorKind::MoveAbort => {
                "The contract refused the transaction. Check that you hold the required badge."
            },
            WalletErrorKind::ObjectNotFound => {
                "An object used by this transaction changed or no longer exists. Refresh and \
                 try again."
            },
            WalletErrorKind::Other => "Transaction failed.",
        }
    }
}

/// Friendly text for a raw message. Unrecognised messages are passed through after the
/// generic prefix so no detail is lost.
#[must_use]
pub fn friendly_error(message: &str) -> String {
    match WalletErrorKind::classify(message) {
        WalletErrorKind::Other => format!("{} {message}", WalletErrorKind::Other.friendly_message()),
        kind => kind.friendly_message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("User rejected the request." => WalletErrorKind::Rejected ; "wallet standard rejection")]
    #[test_case("InsufficientGas" => WalletErrorKind::InsufficientGas ; "execution status")]
    #[test_case("No valid gas coins found for the transaction." => WalletErrorKind::InsufficientGas ; "gas selection")]
    #[test_case("MoveAbort(MoveLocation { module: club }, 3) in command 0" => WalletErrorKind::MoveAbort ; "move abort")]
    #[test_case("Object 0x12 is not available for consumption" => WalletErrorKind::ObjectNotFound ; "stale object")]
    #[test_case("connection reset by peer" => WalletErrorKind::Other ; "unknown")]
    fn classifies(message: &str) -> WalletErrorKind {
        WalletErrorKind::classify(message)
    }

    #[test]
    fn unknown_messages_keep_their_detail() {
        assert_eq!(
            friendly_error("connection reset"),
            "Transaction failed. connection reset"
        );
        assert_eq!(
            friendly_error("user REJECTED"),
            "Transaction was rejected in your wallet."
        );
    }
}
