//! The value returned by a completed [`crate::driver::X402Driver::fetch`] call.

use x402_proto::SettlementReceipt;

/// The outcome of a `fetch` call, paid or not.
///
/// Every dynamically sized field here is owned exclusively by this struct;
/// dropping it releases the body, headers, and receipt together.
#[derive(Debug, Clone)]
pub struct PaidResponse {
    /// The final HTTP status code (of the paid retry, if one was made).
    pub status: u16,
    /// The final response body.
    pub body: Vec<u8>,
    /// The final response headers, CRLF-joined.
    pub headers: String,
    /// Whether a payment was signed and submitted on this call.
    pub payment_made: bool,
    /// The decoded settlement receipt, if `X-PAYMENT-RESPONSE` was present
    /// and decoded successfully on a paid 2xx retry.
    ///
    /// `payment_made && receipt.is_none()` means the retry succeeded but
    /// the server did not return a verifiable settlement header — an
    /// "unverified" outcome, not an error (§7).
    pub receipt: Option<SettlementReceipt>,
}
