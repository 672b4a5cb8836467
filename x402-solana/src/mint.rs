//! Resolves which SPL token program (classic or 2022) owns a given mint.

use std::sync::LazyLock;

use crate::base58;
use crate::error::MintError;
use crate::rpc::RpcCollaborator;
use crate::types::Pubkey;

/// The classic SPL Token program ID.
pub static TOKEN_PROGRAM_CLASSIC: LazyLock<Pubkey> = LazyLock::new(|| {
    decode_const("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA")
});

/// The SPL Token-2022 program ID.
pub static TOKEN_PROGRAM_2022: LazyLock<Pubkey> = LazyLock::new(|| {
    decode_const("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb")
});

fn decode_const(s: &str) -> Pubkey {
    let bytes = base58::decode(s).expect("hardcoded program id is valid base58");
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Pubkey(arr)
}

/// Which SPL token program owns a mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenProgram {
    /// The original, "classic" SPL Token program.
    Classic,
    /// The SPL Token-2022 program (Token Extensions).
    Token2022,
}

impl TokenProgram {
    /// Returns this token program's on-chain address.
    #[must_use]
    pub fn program_id(self) -> Pubkey {
        match self {
            Self::Classic => *TOKEN_PROGRAM_CLASSIC,
            Self::Token2022 => *TOKEN_PROGRAM_2022,
        }
    }

    /// Resolves a mint's owning token program from the Base58 `owner` field
    /// returned by a `getAccountInfo` JSON-RPC call with `jsonParsed`
    /// encoding.
    ///
    /// # Errors
    ///
    /// Returns [`MintError::UnsupportedOwner`] if `owner` is neither the
    /// classic nor the 2022 token program.
    pub fn from_owner(owner: &str) -> Result<Self, MintError> {
        if owner == TOKEN_PROGRAM_CLASSIC.to_base58() {
            Ok(Self::Classic)
        } else if owner == TOKEN_PROGRAM_2022.to_base58() {
            Ok(Self::Token2022)
        } else {
            Err(MintError::UnsupportedOwner(owner.to_string()))
        }
    }
}

/// Errors from the mint program probe, distinguishing transport failures
/// from a resolved-but-unrecognized owner.
#[derive(Debug, thiserror::Error)]
pub enum MintProbeError {
    /// The RPC collaborator itself failed.
    #[error("mint probe failed: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
    /// The mint's owner was not a recognized token program.
    #[error(transparent)]
    Unsupported(#[from] MintError),
}

/// Resolves which SPL token program owns `mint` via `getAccountInfo` with
/// `jsonParsed` encoding (C7).
///
/// # Errors
///
/// Returns [`MintProbeError::Transport`] on RPC failure, or
/// [`MintProbeError::Unsupported`] if the mint's owner is neither the
/// classic nor the 2022 token program.
pub async fn probe_token_program(
    rpc: &dyn RpcCollaborator,
    mint: &Pubkey,
) -> Result<TokenProgram, MintProbeError> {
    let info = rpc
        .get_account_info(&mint.to_base58())
        .await
        .map_err(MintProbeError::Transport)?;
    Ok(TokenProgram::from_owner(&info.owner)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_classic_owner() {
        let owner = TOKEN_PROGRAM_CLASSIC.to_base58();
        assert_eq!(TokenProgram::from_owner(&owner).unwrap(), TokenProgram::Classic);
    }

    #[test]
    fn resolves_2022_owner() {
        let owner = TOKEN_PROGRAM_2022.to_base58();
        assert_eq!(TokenProgram::from_owner(&owner).unwrap(), TokenProgram::Token2022);
    }

    #[test]
    fn rejects_unrecognized_owner() {
        let err = TokenProgram::from_owner("11111111111111111111111111111111").unwrap_err();
        assert!(matches!(err, MintError::UnsupportedOwner(_)));
    }
}
