//! The JSON-RPC collaborator contract (§6).
//!
//! Expressed as an object-safe `async` trait so the driver can be injected
//! with any implementation — a real JSON-RPC-over-HTTP client, a firmware
//! transport, or a fixed-fixture test double — rather than reaching for a
//! process-wide singleton (§9).

use async_trait::async_trait;

/// RPC commitment level requested for `getLatestBlockhash`/`getAccountInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commitment {
    /// The node has not yet confirmed the block is finalized.
    Processed,
    /// A supermajority of the cluster has voted on the block.
    Confirmed,
    /// The block is finalized and will not be rolled back.
    #[default]
    Finalized,
}

impl Commitment {
    /// The JSON-RPC wire string for this commitment level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

/// A single account-info lookup result, narrowed to the one field C7 needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    /// Base58-encoded public key of the account's owning program.
    pub owner: String,
}

/// The two JSON-RPC primitives the core consumes, per §6.
#[async_trait]
pub trait RpcCollaborator: Send + Sync {
    /// Fetches a recent blockhash at the given commitment level.
    ///
    /// # Errors
    ///
    /// Returns a boxed error on any transport or RPC-level failure.
    async fn get_latest_blockhash(
        &self,
        commitment: Commitment,
    ) -> Result<[u8; 32], Box<dyn std::error::Error + Send + Sync>>;

    /// Fetches jsonParsed account info for `pubkey`.
    ///
    /// # Errors
    ///
    /// Returns a boxed error on any transport or RPC-level failure, or if
    /// the account does not exist.
    async fn get_account_info(
        &self,
        pubkey: &str,
    ) -> Result<AccountInfo, Box<dyn std::error::Error + Send + Sync>>;
}
