//! Sui chain client for ClubChain.
//!
//! Reads clubs, events and authorization badges from a Sui fullnode and builds the Move
//! calls of the ClubChain package. All state lives on chain; this crate only reads it and
//! describes transactions for a wallet to sign.

pub mod auth;
pub mod badge;
pub mod club;
pub mod config;
pub mod contracts;
mod error;
pub mod fields;
mod network;
pub mod object;
pub mod reader;
pub mod registry;
pub mod rpc;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod wallet_error;

pub use auth::{authorize, Authorization, ClubRole};
pub use badge::{badge_validity, Badge, BadgeKind, BadgeValidity};
pub use club::{Club, Event};
pub use config::ChainConfig;
pub use error::{Error, Result};
pub use network::Network;
pub use reader::ClubReader;
pub use registry::extract_clubs_from_registry;
pub use rpc::{JsonRpcClient, SuiRpc};

/// Current time as unix milliseconds, the unit of every on-chain timestamp.
#[must_use]
pub fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
