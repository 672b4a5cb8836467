//! Device wallet identity: owns the expanded Ed25519 secret for the lifetime
//! of a payment session and zeroizes it on drop.

use zeroize::Zeroize;

use crate::ed25519;
use crate::error::CryptoError;
use crate::types::{Pubkey, Signature};

/// The device's signing identity.
///
/// Constructed from an externally supplied 64-byte blob in the conventional
/// Solana keypair layout: a 32-byte secret scalar seed followed by its
/// 32-byte derived public key. The secret half is zeroized when the wallet
/// is dropped.
pub struct Wallet {
    secret_seed: [u8; 32],
    public: Pubkey,
}

impl Wallet {
    /// Builds a wallet from a 64-byte `[secret_seed || public_key]` blob.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::PublicKeyMismatch`] if the trailing 32 bytes do
    /// not equal the public key derived from the leading 32 bytes.
    pub fn from_bytes(blob: &[u8; 64]) -> Result<Self, CryptoError> {
        let mut secret_seed = [0u8; 32];
        secret_seed.copy_from_slice(&blob[0..32]);
        let mut claimed_public = [0u8; 32];
        claimed_public.copy_from_slice(&blob[32..64]);

        let signing_key = ed25519_dalek::SigningKey::from_bytes(&secret_seed);
        let derived_public = signing_key.verifying_key().to_bytes();
        if derived_public != claimed_public {
            return Err(CryptoError::PublicKeyMismatch);
        }

        Ok(Self {
            secret_seed,
            public: Pubkey(derived_public),
        })
    }

    /// Generates a new wallet from a caller-supplied cryptographic random
    /// source. Not used on the core payment path (§4.4): provisioning a
    /// device is the embedder's responsibility, but test fixtures and
    /// first-boot flows need a constructor.
    #[must_use]
    pub fn from_seed(secret_seed: [u8; 32]) -> Self {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&secret_seed);
        let public = Pubkey(signing_key.verifying_key().to_bytes());
        Self {
            secret_seed,
            public,
        }
    }

    /// Returns the wallet's public key.
    #[must_use]
    pub const fn pubkey(&self) -> Pubkey {
        self.public
    }

    /// Returns the wallet's address in Base58 form.
    #[must_use]
    pub fn address(&self) -> String {
        self.public.to_base58()
    }

    /// Signs `message`, returning a detached 64-byte Ed25519 signature.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError`] if the underlying signing operation fails.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, CryptoError> {
        ed25519::sign(&self.secret_seed, message)
    }
}

impl Drop for Wallet {
    fn drop(&mut self) {
        self.secret_seed.zeroize();
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_accepts_a_consistent_blob() {
        let wallet = Wallet::from_seed([5u8; 32]);
        let mut blob = [0u8; 64];
        blob[0..32].copy_from_slice(&[5u8; 32]);
        blob[32..64].copy_from_slice(&wallet.pubkey().0);

        let reconstructed = Wallet::from_bytes(&blob).expect("consistent blob");
        assert_eq!(reconstructed.pubkey(), wallet.pubkey());
    }

    #[test]
    fn from_bytes_rejects_mismatched_public_key() {
        let mut blob = [0u8; 64];
        blob[0..32].copy_from_slice(&[5u8; 32]);
        blob[32..64].copy_from_slice(&[0xAAu8; 32]); // wrong public key
        let err = Wallet::from_bytes(&blob).unwrap_err();
        assert_eq!(err, CryptoError::PublicKeyMismatch);
    }

    #[test]
    fn sign_produces_a_verifiable_signature() {
        let wallet = Wallet::from_seed([3u8; 32]);
        let msg = b"transaction message bytes";
        let sig = wallet.sign(msg).unwrap();
        crate::ed25519::verify(&wallet.pubkey(), msg, &sig).expect("must verify");
    }
}
