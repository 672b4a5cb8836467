//! Facilitator capability probe (C10).

use x402_proto::FacilitatorCapability;

use crate::http::HttpCollaborator;

/// Errors from probing a facilitator's `/supported` endpoint.
#[derive(Debug, thiserror::Error)]
pub enum FacilitatorProbeError {
    /// The HTTP collaborator itself failed.
    #[error("facilitator probe request failed: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The response body was not the expected `{"kinds": [...]}` shape.
    #[error("facilitator probe response did not decode: {0}")]
    Decode(#[from] x402_proto::EnvelopeError),

    /// The facilitator responded with a non-2xx status.
    #[error("facilitator probe returned status {0}")]
    BadStatus(u16),
}

/// Issues `GET <facilitator_url>/supported` and parses the capability table.
///
/// # Errors
///
/// Returns [`FacilitatorProbeError::Transport`] on collaborator failure,
/// [`FacilitatorProbeError::BadStatus`] on a non-2xx response, and
/// [`FacilitatorProbeError::Decode`] if the body does not parse.
pub async fn probe_supported(
    http: &dyn HttpCollaborator,
    facilitator_url: &str,
) -> Result<FacilitatorCapability, FacilitatorProbeError> {
    let url = format!("{}/supported", facilitator_url.trim_end_matches('/'));
    let response = http
        .request(&url, "GET", "", b"")
        .await
        .map_err(FacilitatorProbeError::Transport)?;

    if !(200..300).contains(&response.status) {
        return Err(FacilitatorProbeError::BadStatus(response.status));
    }

    Ok(FacilitatorCapability::parse(&response.body)?)
}
