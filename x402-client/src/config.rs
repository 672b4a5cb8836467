//! Driver configuration (C15).
//!
//! Corresponds to the resource-level configuration pattern in
//! `r402::config::ResourceConfig`: a plain, `serde`-free-of-env struct with
//! a documented default, no file or environment loader bundled into the
//! library itself.

use std::time::Duration;

use x402_solana::rpc::Commitment;

/// Default per-exchange timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default network tag substituted when a 402 body omits `network`.
pub const DEFAULT_NETWORK: &str = "solana-devnet";

/// Immutable configuration for an [`crate::driver::X402Driver`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use x402_client::config::DriverConfig;
/// use x402_solana::rpc::Commitment;
///
/// let config = DriverConfig::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_commitment(Commitment::Confirmed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    timeout: Duration,
    commitment: Commitment,
    default_network: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            commitment: Commitment::default(),
            default_network: DEFAULT_NETWORK.to_owned(),
        }
    }
}

impl DriverConfig {
    /// Sets the per-exchange timeout applied independently to each of the
    /// three HTTP exchanges and the two RPC exchanges (§5).
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the RPC commitment level requested from `getLatestBlockhash`
    /// and `getAccountInfo`.
    #[must_use]
    pub const fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }

    /// Sets the network tag substituted when a 402 body omits `network`.
    #[must_use]
    pub fn with_default_network(mut self, network: impl Into<String>) -> Self {
        self.default_network = network.into();
        self
    }

    /// The configured per-exchange timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured RPC commitment level.
    #[must_use]
    pub const fn commitment(&self) -> Commitment {
        self.commitment
    }

    /// The network tag substituted when a 402 body omits `network`.
    #[must_use]
    pub fn default_network(&self) -> &str {
        &self.default_network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let config = DriverConfig::default();
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.commitment(), Commitment::Finalized);
        assert_eq!(config.default_network(), DEFAULT_NETWORK);
    }

    #[test]
    fn builder_overrides_apply() {
        let config = DriverConfig::default()
            .with_timeout(Duration::from_secs(1))
            .with_commitment(Commitment::Processed);
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert_eq!(config.commitment(), Commitment::Processed);
    }
}
