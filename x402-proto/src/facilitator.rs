//! Parses a facilitator's `/supported` response into a capability table.

use serde::Deserialize;
use serde_json::Value;

use crate::error::EnvelopeError;

#[derive(Debug, Deserialize)]
struct RawSupportedResponse {
    kinds: Vec<RawKind>,
}

#[derive(Debug, Deserialize)]
struct RawKind {
    #[serde(rename = "x402Version")]
    x402_version: u32,
    scheme: String,
    network: String,
    #[serde(default)]
    extra: Option<Value>,
}

/// A single `(version, scheme, network)` capability a facilitator
/// advertises, with its fee payer if one is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilitatorKind {
    /// Protocol version this entry supports.
    pub x402_version: u32,
    /// Payment scheme this entry supports (expected: `"exact"`).
    pub scheme: String,
    /// Network tag this entry supports.
    pub network: String,
    /// The fee payer this facilitator will use for `network`, if given.
    pub fee_payer: Option<String>,
}

/// The decoded body of a facilitator's `GET /supported` response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacilitatorCapability {
    kinds: Vec<FacilitatorKind>,
}

impl FacilitatorCapability {
    /// Parses a `{"kinds": [...]}` response body.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Json`] if `body` is not the expected
    /// shape.
    pub fn parse(body: &[u8]) -> Result<Self, EnvelopeError> {
        let raw: RawSupportedResponse = serde_json::from_slice(body)?;
        let kinds = raw
            .kinds
            .into_iter()
            .map(|kind| FacilitatorKind {
                x402_version: kind.x402_version,
                scheme: kind.scheme,
                network: kind.network,
                fee_payer: kind
                    .extra
                    .as_ref()
                    .and_then(|extra| extra.get("feePayer"))
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            })
            .collect();
        Ok(Self { kinds })
    }

    /// Returns the fee payer advertised for `network`, if any entry
    /// matches and carries one.
    #[must_use]
    pub fn fee_payer_for_network(&self, network: &str) -> Option<&str> {
        self.kinds
            .iter()
            .find(|kind| kind.network == network)
            .and_then(|kind| kind.fee_payer.as_deref())
    }
}
