//! HTTP gateway serving the `ClubChain` JSON API.

mod response;
mod routing;
mod server;

use clubchain_sui::ClubReader;
pub(crate) use server::serve;

/// State shared by every request. Immutable once the server starts.
pub(crate) struct Gateway {
    /// Chain reads and the RPC used to build transactions.
    reader: ClubReader,
    /// Gas budget of built transactions, in MIST.
    gas_budget: u64,
}

impl Gateway {
    /// Gateway over `reader`.
    pub(crate) fn new(reader: ClubReader, gas_budget: u64) -> Self {
        Self { reader, gas_budget }
    }
}
