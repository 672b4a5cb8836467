//! Assembles a legacy Solana transaction containing a single SPL token
//! `Transfer` instruction, with both signature slots zeroed and ready for
//! signing.

use crate::mint::TokenProgram;
use crate::types::{Blockhash, Pubkey, Signature};
use crate::wire::Writer;

/// SPL Token program instruction opcode for `Transfer`.
const SPL_TRANSFER_OPCODE: u8 = 0x03;

const NUM_REQUIRED_SIGNATURES: u8 = 2;
const NUM_READONLY_SIGNED: u8 = 1;
const NUM_READONLY_UNSIGNED: u8 = 1;
const NUM_ACCOUNTS: usize = 5;

/// A fully-assembled legacy Solana transaction, signature slots zeroed.
///
/// Layout exactly matches §3 of the specification: a one-byte shortvec
/// signature count, two 64-byte signature slots, the message header, the
/// account table, the recent blockhash, and the single `Transfer`
/// instruction.
#[derive(Debug, Clone)]
pub struct TransactionBuffer {
    bytes: Vec<u8>,
    /// Byte offset where the message (everything after the signature
    /// slots) begins. Signing covers `[message_offset, end)`.
    message_offset: usize,
}

impl TransactionBuffer {
    /// Returns the full transaction bytes, including the (possibly still
    /// zeroed) signature slots.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the byte range that must be signed: everything from the
    /// message header onward.
    #[must_use]
    pub fn message_bytes(&self) -> &[u8] {
        &self.bytes[self.message_offset..]
    }

    /// Writes `signature` into slot 1 (the device/payer slot). Slot 0 (the
    /// fee payer) is left zeroed for the facilitator to fill during
    /// settlement.
    pub fn set_payer_signature(&mut self, signature: &Signature) {
        let start = 1 + 64; // shortvec count byte + fee-payer slot
        self.bytes[start..start + 64].copy_from_slice(&signature.0);
    }

    /// Returns the bytes currently occupying signature slot 1, whether or
    /// not they have been filled yet.
    #[must_use]
    pub fn payer_signature_slot(&self) -> &[u8] {
        let start = 1 + 64;
        &self.bytes[start..start + 64]
    }
}

/// Builds a [`TransactionBuffer`] for an SPL token transfer.
///
/// The account table is exactly `[fee_payer, payer, source_ata, dest_ata,
/// token_program]`; the single instruction moves `amount` base units of the
/// mint from `source_ata` to `dest_ata`, authorized by `payer`.
///
/// Both signature slots are zeroed on return; the caller is responsible for
/// signing `message_bytes()` and writing the result into slot 1 via
/// [`TransactionBuffer::set_payer_signature`].
#[must_use]
pub fn build_transfer(
    fee_payer: &Pubkey,
    payer: &Pubkey,
    source_ata: &Pubkey,
    dest_ata: &Pubkey,
    token_program: TokenProgram,
    amount: u64,
    blockhash: &Blockhash,
) -> TransactionBuffer {
    let mut w = Writer::with_capacity(256);

    // Signature count + two zeroed 64-byte slots.
    w.put_shortvec_len(usize::from(NUM_REQUIRED_SIGNATURES))
        .expect("constant signature count always fits in one shortvec byte");
    w.put_bytes(&[0u8; 64]); // slot 0: fee payer
    w.put_bytes(&[0u8; 64]); // slot 1: payer/device

    let message_offset = w.len();

    // Message header.
    w.put_u8(NUM_REQUIRED_SIGNATURES);
    w.put_u8(NUM_READONLY_SIGNED);
    w.put_u8(NUM_READONLY_UNSIGNED);

    // Account table.
    w.put_shortvec_len(NUM_ACCOUNTS)
        .expect("constant account count always fits in one shortvec byte");
    w.put_bytes(fee_payer.as_bytes());
    w.put_bytes(payer.as_bytes());
    w.put_bytes(source_ata.as_bytes());
    w.put_bytes(dest_ata.as_bytes());
    w.put_bytes(token_program.program_id().as_bytes());

    // Recent blockhash.
    w.put_bytes(blockhash.as_bytes());

    // Single instruction: Transfer.
    w.put_shortvec_len(1)
        .expect("single instruction always fits in one shortvec byte");
    w.put_u8(4); // program index: token program is account table entry 4
    w.put_shortvec_len(3)
        .expect("three account indices always fit in one shortvec byte");
    w.put_bytes(&[2, 3, 1]); // source ATA, destination ATA, payer

    let mut data = Writer::with_capacity(9);
    data.put_u8(SPL_TRANSFER_OPCODE);
    data.put_u64_le(amount);
    let data = data.into_bytes();

    w.put_shortvec_len(data.len())
        .expect("nine-byte instruction data always fits in one shortvec byte");
    w.put_bytes(&data);

    TransactionBuffer {
        bytes: w.into_bytes(),
        message_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::read_shortvec_len;

    fn fixture_pubkey(fill: u8) -> Pubkey {
        Pubkey([fill; 32])
    }

    #[test]
    fn signature_count_matches_header_required_signatures() {
        let tx = build_transfer(
            &fixture_pubkey(1),
            &fixture_pubkey(2),
            &fixture_pubkey(3),
            &fixture_pubkey(4),
            TokenProgram::Classic,
            100,
            &Blockhash([9u8; 32]),
        );

        let bytes = tx.as_bytes();
        let (sig_count, consumed) = read_shortvec_len(bytes).unwrap();
        assert_eq!(sig_count, 2);

        let header_required_signatures = bytes[consumed + 64 + 64];
        assert_eq!(sig_count as u8, header_required_signatures);
        assert_eq!(header_required_signatures, 2);
    }

    #[test]
    fn instruction_data_is_nine_bytes_opcode_then_amount() {
        let tx = build_transfer(
            &fixture_pubkey(1),
            &fixture_pubkey(2),
            &fixture_pubkey(3),
            &fixture_pubkey(4),
            TokenProgram::Classic,
            1_000_000,
            &Blockhash([0u8; 32]),
        );

        let data_start = tx.as_bytes().len() - 9;
        let data = &tx.as_bytes()[data_start..];
        assert_eq!(data[0], 0x03);
        assert_eq!(u64::from_le_bytes(data[1..9].try_into().unwrap()), 1_000_000);
    }

    #[test]
    fn set_payer_signature_writes_only_slot_one() {
        let mut tx = build_transfer(
            &fixture_pubkey(1),
            &fixture_pubkey(2),
            &fixture_pubkey(3),
            &fixture_pubkey(4),
            TokenProgram::Token2022,
            50,
            &Blockhash([1u8; 32]),
        );

        let sig = Signature([0x42u8; 64]);
        tx.set_payer_signature(&sig);

        // slot 0 (fee payer) still zeroed
        assert_eq!(&tx.as_bytes()[1..65], &[0u8; 64]);
        // slot 1 (device) now holds the signature
        assert_eq!(tx.payer_signature_slot(), &sig.0);
    }

    #[test]
    fn message_bytes_excludes_signature_slots() {
        let tx = build_transfer(
            &fixture_pubkey(1),
            &fixture_pubkey(2),
            &fixture_pubkey(3),
            &fixture_pubkey(4),
            TokenProgram::Classic,
            1,
            &Blockhash([2u8; 32]),
        );

        let message = tx.message_bytes();
        // first three bytes of the message are the header
        assert_eq!(message[0], 2); // num_required_signatures
        assert_eq!(message[1], 1); // num_readonly_signed
        assert_eq!(message[2], 1); // num_readonly_unsigned
    }
}
