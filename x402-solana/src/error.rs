//! Error types for Solana transaction assembly and cryptography.

/// Errors from the Base58 codec.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Base58Error {
    /// A character outside the Bitcoin alphabet was encountered while decoding.
    #[error("invalid base58 character {0:?} at position {1}")]
    InvalidCharacter(char, usize),
}

/// Errors from Ed25519 signing, verification, and on-curve checks.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The supplied secret key blob did not encode a valid Ed25519 signing key.
    #[error("invalid secret key bytes: {0}")]
    InvalidSecretKey(String),
    /// The public key embedded in a 64-byte wallet blob did not match the key
    /// derived from its leading 32-byte seed.
    #[error("public key mismatch: wallet blob is internally inconsistent")]
    PublicKeyMismatch,
    /// A signature failed to verify against the given message and public key.
    #[error("signature verification failed")]
    VerificationFailed,
    /// A 32-byte value did not decode to a valid public key for verification.
    #[error("invalid public key bytes: {0}")]
    InvalidPublicKey(String),
}

/// Errors from program-derived-address search.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum PdaError {
    /// All 256 bump seeds produced an on-curve hash. Vanishingly unlikely;
    /// surfaced rather than silently looping forever.
    #[error("no off-curve bump seed found in [0, 255]")]
    BumpSearchExhausted,
}

/// Errors from transaction assembly.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// A fixed-size output buffer was too small for the data being written.
    #[error("output buffer overflow: needed {needed} bytes, had {available}")]
    Overflow {
        /// Bytes required to complete the write.
        needed: usize,
        /// Bytes actually available in the buffer.
        available: usize,
    },
}

/// Errors resolving which SPL token program owns a mint.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum MintError {
    /// The mint account's owner was neither the classic nor the 2022 token program.
    #[error("mint owner {0} is not a recognized SPL token program")]
    UnsupportedOwner(String),
}
