//! Base58 (Bitcoin alphabet) encoding, used for every textual Solana address,
//! blockhash, and signature.
//!
//! Implemented directly against the big-endian/mod-58 algorithm rather than
//! delegated to a general-purpose crate: the exact handling of leading zero
//! bytes here is one of the core subjects this crate exists to pin down.

use crate::error::Base58Error;

const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Encodes `input` as a Base58 string.
///
/// Treats `input` as a big-endian integer and emits digits by repeated
/// mod-58 reduction; each leading zero byte becomes a leading `'1'`.
#[must_use]
pub fn encode(input: &[u8]) -> String {
    let leading_zeros = input.iter().take_while(|&&b| b == 0).count();

    // big-endian base-256 -> base-58 via repeated division, working on a
    // little-endian scratch copy of the non-zero-prefix bytes.
    let mut digits: Vec<u8> = Vec::new();
    let mut input_digits: Vec<u8> = input[leading_zeros..].to_vec();

    while !input_digits.is_empty() {
        let mut remainder: u32 = 0;
        let mut next_digits: Vec<u8> = Vec::with_capacity(input_digits.len());
        let mut leading = true;
        for &byte in &input_digits {
            let acc = remainder * 256 + u32::from(byte);
            let quotient = acc / 58;
            remainder = acc % 58;
            if quotient != 0 || !leading {
                next_digits.push(quotient as u8);
                leading = false;
            }
        }
        digits.push(remainder as u8);
        input_digits = next_digits;
    }

    let mut out = String::with_capacity(leading_zeros + digits.len());
    out.push_str(&"1".repeat(leading_zeros));
    out.extend(digits.iter().rev().map(|&d| ALPHABET[d as usize] as char));
    out
}

/// Decodes a Base58 string back into raw bytes.
///
/// # Errors
///
/// Returns [`Base58Error::InvalidCharacter`] if any character falls outside
/// the Bitcoin alphabet.
pub fn decode(input: &str) -> Result<Vec<u8>, Base58Error> {
    let leading_ones = input.chars().take_while(|&c| c == '1').count();

    let mut bytes: Vec<u8> = Vec::new();
    for (pos, ch) in input.chars().enumerate() {
        let digit = ALPHABET
            .iter()
            .position(|&a| a as char == ch)
            .ok_or(Base58Error::InvalidCharacter(ch, pos))?;

        let mut carry = digit as u32;
        for byte in &mut bytes {
            carry += u32::from(*byte) * 58;
            *byte = carry as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push(carry as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; leading_ones];
    out.extend(bytes.iter().rev());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_32_byte_keys() {
        let cases: [[u8; 32]; 3] = [
            [0u8; 32],
            [0xff; 32],
            {
                let mut k = [0u8; 32];
                for (i, b) in k.iter_mut().enumerate() {
                    *b = (i as u8).wrapping_mul(37).wrapping_add(11);
                }
                k
            },
        ];
        for key in cases {
            let encoded = encode(&key);
            let decoded = decode(&encoded).expect("valid base58");
            assert_eq!(decoded, key.to_vec());
        }
    }

    #[test]
    fn leading_zero_bytes_become_leading_ones() {
        let input = [0u8, 0u8, 1u8, 2u8];
        let encoded = encode(&input);
        assert!(encoded.starts_with("11"));
        assert_eq!(decode(&encoded).unwrap(), input.to_vec());
    }

    #[test]
    fn known_vector() {
        // The well-known Solana System Program ID is all zero bytes.
        let zero = [0u8; 32];
        assert_eq!(encode(&zero), "1".repeat(32));
    }

    #[test]
    fn rejects_invalid_characters() {
        let err = decode("0OIl").unwrap_err();
        assert!(matches!(err, Base58Error::InvalidCharacter('0', 0)));
    }

    #[test]
    fn empty_input_round_trips() {
        assert_eq!(encode(&[]), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }
}
