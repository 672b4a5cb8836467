//! Opaque fixed-size wire types shared across the crate: public keys,
//! signatures, and blockhashes. Binary form is canonical; Base58 is the
//! textual form used at every protocol boundary.

use std::fmt;
use std::str::FromStr;

use crate::base58;
use crate::error::Base58Error;

/// A 32-byte Solana public key (wallet address, mint, program ID, or PDA).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pubkey(pub [u8; 32]);

/// A 64-byte detached Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

/// A 32-byte recent blockhash.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Blockhash(pub [u8; 32]);

macro_rules! base58_wire_type {
    ($ty:ty, $len:expr) => {
        impl $ty {
            /// Returns the raw bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns the Base58 textual form.
            #[must_use]
            pub fn to_base58(&self) -> String {
                base58::encode(&self.0)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_base58())
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($ty), self.to_base58())
            }
        }

        impl FromStr for $ty {
            type Err = Base58Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let decoded = base58::decode(s)?;
                let mut bytes = [0u8; $len];
                if decoded.len() == $len {
                    bytes.copy_from_slice(&decoded);
                } else if decoded.len() < $len {
                    // left-pad: base58 drops leading zero bytes on decode only
                    // via leading '1' characters, which round-trips already,
                    // but defend against short decodes from malformed input.
                    bytes[$len - decoded.len()..].copy_from_slice(&decoded);
                } else {
                    return Err(Base58Error::InvalidCharacter('?', decoded.len()));
                }
                Ok(Self(bytes))
            }
        }
    };
}

base58_wire_type!(Pubkey, 32);
base58_wire_type!(Signature, 64);
base58_wire_type!(Blockhash, 32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pubkey_base58_round_trip() {
        let key = Pubkey([7u8; 32]);
        let text = key.to_base58();
        let parsed: Pubkey = text.parse().unwrap();
        assert_eq!(parsed, key);
    }
}
