//! Solana legacy-transaction assembly, Ed25519 signing, and Base58 codec.
//!
//! This crate implements the three tightly coupled subsystems at the heart
//! of an x402 Solana "exact" payment: the Base58 codec and Ed25519
//! primitives that bind a device identity to transaction bytes ([`ed25519`],
//! [`base58`], [`wallet`]), program-derived-address search for Associated
//! Token Accounts ([`pda`]), and the byte-exact assembly of a legacy
//! transaction carrying one SPL token `Transfer` instruction ([`transfer`]).
//! [`mint`] and [`blockhash`] resolve the two pieces of on-chain state the
//! assembler needs, through an injected RPC collaborator rather than a
//! concrete client.

pub mod base58;
pub mod blockhash;
pub mod ed25519;
pub mod error;
pub mod mint;
pub mod pda;
pub mod rpc;
pub mod transfer;
pub mod types;
pub mod wallet;
pub mod wire;

pub use error::{Base58Error, BuildError, CryptoError, MintError, PdaError};
pub use mint::TokenProgram;
pub use rpc::{Commitment, RpcCollaborator};
pub use transfer::{build_transfer, TransactionBuffer};
pub use types::{Blockhash as BlockhashValue, Pubkey, Signature};
pub use wallet::Wallet;
