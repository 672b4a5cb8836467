//! Fetches a recent blockhash for transaction freshness (C8).

use crate::rpc::{Commitment, RpcCollaborator};
use crate::types::Blockhash;

/// Errors from the blockhash fetcher.
#[derive(Debug, thiserror::Error)]
pub enum BlockhashFetchError {
    /// The RPC collaborator itself failed (transport or protocol error).
    #[error("blockhash fetch failed: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

/// Fetches the latest blockhash at `commitment`.
///
/// # Errors
///
/// Returns [`BlockhashFetchError::Transport`] if the RPC collaborator fails.
pub async fn fetch_blockhash(
    rpc: &dyn RpcCollaborator,
    commitment: Commitment,
) -> Result<Blockhash, BlockhashFetchError> {
    let bytes = rpc
        .get_latest_blockhash(commitment)
        .await
        .map_err(BlockhashFetchError::Transport)?;
    Ok(Blockhash(bytes))
}
