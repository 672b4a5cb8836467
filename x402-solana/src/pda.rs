//! Program-derived-address search and Associated Token Account derivation.

use sha2::{Digest, Sha256};
use std::sync::LazyLock;

use crate::error::PdaError;
use crate::types::Pubkey;
use crate::{base58, ed25519};

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// The Associated Token Account program ID, the same on mainnet, devnet,
/// and testnet.
pub static ATA_PROGRAM: LazyLock<Pubkey> = LazyLock::new(|| {
    let bytes = base58::decode("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL")
        .expect("ATA program id is a valid base58 literal");
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&bytes);
    Pubkey(arr)
});

/// Finds the canonical program-derived address for `seeds` under
/// `program_id`.
///
/// Searches bumps from 255 down to 0; the first bump whose hash is *not* a
/// valid Ed25519 curve point wins. This is the precondition inversion that
/// guarantees no private key exists for the resulting address.
///
/// # Errors
///
/// Returns [`PdaError::BumpSearchExhausted`] if every bump in `[0, 255]`
/// produces an on-curve hash — vanishingly unlikely for real inputs.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), PdaError> {
    for bump in (0u8..=255).rev() {
        let mut hasher = Sha256::new();
        for seed in seeds {
            hasher.update(seed);
        }
        hasher.update([bump]);
        hasher.update(program_id.as_bytes());
        hasher.update(PDA_MARKER);
        let hash: [u8; 32] = hasher.finalize().into();

        if !ed25519::is_on_curve(&hash) {
            return Ok((Pubkey(hash), bump));
        }
    }
    Err(PdaError::BumpSearchExhausted)
}

/// Derives the Associated Token Account address for `(wallet, mint,
/// token_program)`.
///
/// Seeds are hashed in the order named — `wallet`, then `mint`, then
/// `token_program` — as one PDA of the Associated Token Account program.
///
/// # Errors
///
/// Returns [`PdaError::BumpSearchExhausted`] in the same vanishingly
/// unlikely case as [`find_program_address`].
pub fn derive_ata(wallet: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Result<Pubkey, PdaError> {
    let seeds: [&[u8]; 3] = [wallet.as_bytes(), mint.as_bytes(), token_program.as_bytes()];
    let (ata, _bump) = find_program_address(&seeds, &ATA_PROGRAM)?;
    Ok(ata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_pubkey(fill: u8) -> Pubkey {
        Pubkey([fill; 32])
    }

    #[test]
    fn derived_ata_is_off_curve() {
        let wallet = fixture_pubkey(1);
        let mint = fixture_pubkey(2);
        let token_program = fixture_pubkey(3);

        let ata = derive_ata(&wallet, &mint, &token_program).expect("derivation succeeds");
        assert!(!ed25519::is_on_curve(ata.as_bytes()));
    }

    #[test]
    fn different_token_programs_yield_different_atas() {
        let wallet = fixture_pubkey(10);
        let mint = fixture_pubkey(20);
        let classic = fixture_pubkey(30);
        let token2022 = fixture_pubkey(31);

        let ata_classic = derive_ata(&wallet, &mint, &classic).unwrap();
        let ata_2022 = derive_ata(&wallet, &mint, &token2022).unwrap();
        assert_ne!(ata_classic, ata_2022);
    }

    #[test]
    fn derivation_is_deterministic() {
        let wallet = fixture_pubkey(7);
        let mint = fixture_pubkey(8);
        let program = fixture_pubkey(9);

        let a = derive_ata(&wallet, &mint, &program).unwrap();
        let b = derive_ata(&wallet, &mint, &program).unwrap();
        assert_eq!(a, b);
    }
}
