//! Parses a 402 challenge body into a typed requirements record.

use serde_json::Value;
use x402_solana::Pubkey;

use crate::error::RequirementsError;

/// The payment requirements extracted from `accepts[0]` of a 402 body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequirements {
    /// `payTo` — the merchant's public key, binary in memory.
    pub recipient: Pubkey,
    /// `network` — e.g. `"solana-devnet"`, `"solana-mainnet"`.
    pub network: String,
    /// True if `network` was absent from the body and filled in from the
    /// caller-supplied default rather than read off the wire.
    pub network_defaulted: bool,
    /// `asset` — the token mint's public key, binary in memory.
    pub asset: Pubkey,
    /// `maxAmountRequired`, parsed to the token's smallest denomination.
    pub max_amount_required: u64,
    /// `extra.feePayer`, if the 402 body supplied one directly.
    pub fee_payer: Option<String>,
}

impl PaymentRequirements {
    /// Parses the first entry of `accepts` out of a 402 response body.
    ///
    /// `default_network` is substituted, with [`Self::network_defaulted`]
    /// set, when the body omits `network`. A missing `extra.feePayer` is
    /// not a parse failure: the caller resolves it through the
    /// facilitator capability probe before building a transaction.
    ///
    /// `payTo` and `asset` are decoded to [`Pubkey`] here, not deferred to
    /// transaction assembly, so a malformed key fails the parse step
    /// before any further network exchange is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`RequirementsError::Json`] if `body` is not valid JSON,
    /// [`RequirementsError::MissingField`] if `accepts`, `accepts[0]`,
    /// `payTo`, `asset`, or `maxAmountRequired` is absent or the wrong
    /// type, [`RequirementsError::InvalidPublicKey`] if `payTo` or
    /// `asset` is not valid Base58, and [`RequirementsError::InvalidAmount`]
    /// if `maxAmountRequired` does not parse to a non-zero `u64`.
    pub fn parse(body: &[u8], default_network: &str) -> Result<Self, RequirementsError> {
        let value: Value = serde_json::from_slice(body)?;

        let first = value
            .get("accepts")
            .and_then(Value::as_array)
            .and_then(|entries| entries.first())
            .ok_or(RequirementsError::MissingField("accepts[0]"))?;

        let pay_to = first
            .get("payTo")
            .and_then(Value::as_str)
            .ok_or(RequirementsError::MissingField("payTo"))?;
        let recipient = pay_to
            .parse()
            .map_err(|source| RequirementsError::InvalidPublicKey {
                field: "payTo",
                source,
            })?;

        let asset_str = first
            .get("asset")
            .and_then(Value::as_str)
            .ok_or(RequirementsError::MissingField("asset"))?;
        let asset = asset_str
            .parse()
            .map_err(|source| RequirementsError::InvalidPublicKey {
                field: "asset",
                source,
            })?;

        let (network, network_defaulted) = match first.get("network").and_then(Value::as_str) {
            Some(network) => (network.to_owned(), false),
            None => (default_network.to_owned(), true),
        };

        let amount_str = first
            .get("maxAmountRequired")
            .and_then(Value::as_str)
            .ok_or(RequirementsError::MissingField("maxAmountRequired"))?;
        let max_amount_required: u64 = amount_str
            .parse()
            .ok()
            .filter(|&amount| amount != 0)
            .ok_or_else(|| RequirementsError::InvalidAmount(amount_str.to_owned()))?;

        let fee_payer = first
            .get("extra")
            .and_then(|extra| extra.get("feePayer"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(Self {
            recipient,
            network,
            network_defaulted,
            asset,
            max_amount_required,
            fee_payer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{"accepts":[{"payTo":"HVnsW7xz1VkXEySxvXuMj6jUa3aewQbbCUkYis1DEh6Q","network":"solana-devnet","asset":"4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU","maxAmountRequired":"100","extra":{"feePayer":"KoraFeePayer111111111111111111111111111111111"}}]}"#;

    #[test]
    fn parses_full_requirements() {
        let req = PaymentRequirements::parse(BODY.as_bytes(), "solana-devnet").unwrap();
        assert_eq!(
            req.recipient.to_base58(),
            "HVnsW7xz1VkXEySxvXuMj6jUa3aewQbbCUkYis1DEh6Q"
        );
        assert_eq!(
            req.asset.to_base58(),
            "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU"
        );
        assert_eq!(req.network, "solana-devnet");
        assert!(!req.network_defaulted);
        assert_eq!(req.max_amount_required, 100);
        assert_eq!(req.fee_payer.as_deref(), Some("KoraFeePayer111111111111111111111111111111111"));
    }

    #[test]
    fn invalid_pay_to_is_rejected_at_parse_time() {
        let body = r#"{"accepts":[{"payTo":"0OIl","network":"solana-devnet","asset":"y","maxAmountRequired":"1"}]}"#;
        let err = PaymentRequirements::parse(body.as_bytes(), "solana-devnet").unwrap_err();
        assert!(matches!(
            err,
            RequirementsError::InvalidPublicKey { field: "payTo", .. }
        ));
    }

    #[test]
    fn defaults_missing_network() {
        let body = r#"{"accepts":[{"payTo":"x","asset":"y","maxAmountRequired":"1"}]}"#;
        let req = PaymentRequirements::parse(body.as_bytes(), "solana-devnet").unwrap();
        assert_eq!(req.network, "solana-devnet");
        assert!(req.network_defaulted);
    }

    #[test]
    fn missing_fee_payer_is_not_fatal() {
        let body = r#"{"accepts":[{"payTo":"x","network":"solana-devnet","asset":"y","maxAmountRequired":"1"}]}"#;
        let req = PaymentRequirements::parse(body.as_bytes(), "solana-devnet").unwrap();
        assert!(req.fee_payer.is_none());
    }

    #[test]
    fn zero_amount_is_invalid() {
        let body = r#"{"accepts":[{"payTo":"x","network":"solana-devnet","asset":"y","maxAmountRequired":"0"}]}"#;
        let err = PaymentRequirements::parse(body.as_bytes(), "solana-devnet").unwrap_err();
        assert!(matches!(err, RequirementsError::InvalidAmount(_)));
    }

    #[test]
    fn non_digit_amount_is_invalid() {
        let body = r#"{"accepts":[{"payTo":"x","network":"solana-devnet","asset":"y","maxAmountRequired":"abc"}]}"#;
        let err = PaymentRequirements::parse(body.as_bytes(), "solana-devnet").unwrap_err();
        assert!(matches!(err, RequirementsError::InvalidAmount(_)));
    }

    #[test]
    fn missing_accepts_is_missing_field() {
        let err = PaymentRequirements::parse(b"{}", "solana-devnet").unwrap_err();
        assert!(matches!(err, RequirementsError::MissingField("accepts[0]")));
    }
}
