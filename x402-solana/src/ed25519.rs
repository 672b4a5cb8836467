//! Ed25519 signing, verification, and the on-curve test that underlies PDA
//! derivation.
//!
//! Curve arithmetic (scalar multiplication, Edwards point decompression) is
//! delegated to `ed25519-dalek`/`curve25519-dalek`, the same pair
//! `solana-program` itself uses internally for the identical on-curve check
//! inside `Pubkey::find_program_address`.

use curve25519_dalek::edwards::CompressedEdwardsY;
use ed25519_dalek::{Signer as _, Verifier as _};

use crate::error::CryptoError;
use crate::types::{Pubkey, Signature};

/// Produces a detached Ed25519 signature over `message` using the 32-byte
/// secret scalar seed `secret_seed`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidSecretKey`] if `secret_seed` cannot be used
/// to construct a signing key (it cannot — `SigningKey` accepts any 32 bytes
/// — but the error is retained for symmetry with the other fallible crypto
/// entry points and for forward compatibility).
pub fn sign(secret_seed: &[u8; 32], message: &[u8]) -> Result<Signature, CryptoError> {
    let signing_key = ed25519_dalek::SigningKey::from_bytes(secret_seed);
    let sig = signing_key.sign(message);
    Ok(Signature(sig.to_bytes()))
}

/// Verifies a detached Ed25519 signature. Not called on the payment path —
/// used in tests and by callers who want to double-check a signed envelope
/// before transmitting it.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidPublicKey`] if `public` is not a valid
/// Ed25519 verifying key, or [`CryptoError::VerificationFailed`] if the
/// signature does not verify.
pub fn verify(public: &Pubkey, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
    let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&public.0)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key
        .verify(message, &sig)
        .map_err(|_| CryptoError::VerificationFailed)
}

/// Returns `true` if `bytes` decompress to a valid point on the Ed25519
/// curve.
///
/// This is the precondition inversion PDA derivation depends on: a program
/// derived address is only valid once this returns `false`, guaranteeing no
/// private key exists for it.
#[must_use]
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    CompressedEdwardsY(*bytes).decompress().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_verify_round_trips() {
        let seed = [42u8; 32];
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
        let public = Pubkey(signing_key.verifying_key().to_bytes());

        let msg = b"x402 settlement transaction bytes";
        let sig = sign(&seed, msg).unwrap();

        verify(&public, msg, &sig).expect("signature must verify");
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let seed = [1u8; 32];
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
        let public = Pubkey(signing_key.verifying_key().to_bytes());

        let sig = sign(&seed, b"original").unwrap();
        let err = verify(&public, b"tampered", &sig).unwrap_err();
        assert_eq!(err, CryptoError::VerificationFailed);
    }

    #[test]
    fn on_curve_accepts_a_real_public_key() {
        let seed = [9u8; 32];
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&seed);
        let valid_point = signing_key.verifying_key().to_bytes();
        assert!(is_on_curve(&valid_point));
    }

    #[test]
    fn on_curve_rejects_some_arbitrary_hashes() {
        // Roughly half of arbitrary 32-byte strings fail to decompress to a
        // curve point; across a handful of SHA-256 outputs at least one must.
        use sha2::{Digest, Sha256};
        let found_off_curve = (0u8..8).map(|i| Sha256::digest([i]).into()).any(|h: [u8; 32]| !is_on_curve(&h));
        assert!(found_off_curve);
    }
}
