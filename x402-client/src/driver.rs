//! The x402 driver (C12): the two-phase challenge/retry state machine of
//! §4.12, composing C6-C11 around an injected HTTP and RPC collaborator.

use std::str::FromStr;
use std::time::Instant;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::time::timeout;
use x402_proto::{PaymentEnvelope, PaymentRequirements, SettlementReceipt};
use x402_solana::blockhash::{fetch_blockhash, BlockhashFetchError};
use x402_solana::mint::{probe_token_program, MintProbeError};
use x402_solana::pda::derive_ata;
use x402_solana::rpc::RpcCollaborator;
use x402_solana::{build_transfer, Pubkey, Wallet};

use crate::config::DriverConfig;
use crate::error::DriverError;
use crate::facilitator::{probe_supported, FacilitatorProbeError};
use crate::http::{append_header, find_header, HttpCollaborator};
use crate::response::PaidResponse;

/// Drives a single x402 "exact"/Solana payment exchange end to end.
///
/// Holds the device wallet and the two collaborators for its whole
/// lifetime; each [`Self::fetch`] call is independent (§5) and mutates no
/// shared state beyond reading the wallet's secret to sign.
pub struct X402Driver {
    wallet: Wallet,
    http: Box<dyn HttpCollaborator>,
    rpc: Box<dyn RpcCollaborator>,
    facilitator_url: String,
    config: DriverConfig,
}

impl std::fmt::Debug for X402Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("X402Driver")
            .field("wallet", &self.wallet)
            .field("facilitator_url", &self.facilitator_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl X402Driver {
    /// Builds a driver over the given wallet, collaborators, and facilitator.
    ///
    /// `facilitator_url` is the base URL the C10 capability probe issues
    /// `GET {facilitator_url}/supported` against; it is deployment-time
    /// configuration, not per-call state, so it lives on the driver rather
    /// than in [`DriverConfig`] or the `fetch` call itself.
    pub fn new(
        wallet: Wallet,
        http: Box<dyn HttpCollaborator>,
        rpc: Box<dyn RpcCollaborator>,
        facilitator_url: impl Into<String>,
        config: DriverConfig,
    ) -> Self {
        Self {
            wallet,
            http,
            rpc,
            facilitator_url: facilitator_url.into(),
            config,
        }
    }

    /// Issues `method url` with `headers`/`body`, paying for it with an SPL
    /// transfer if the server answers with a 402 challenge.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] variant matching the §7 error table if any
    /// step of the challenge/build/retry pipeline fails. No automatic
    /// retries are performed; each HTTP exchange is issued at most once.
    pub async fn fetch(
        &self,
        url: &str,
        method: &str,
        headers: &str,
        body: &[u8],
    ) -> Result<PaidResponse, DriverError> {
        let started = Instant::now();
        tracing::debug!(elapsed_ms = started.elapsed().as_millis(), state = "INIT");

        let initial = self.http_request(url, method, headers, body, "initial request").await?;

        if initial.status != 402 {
            tracing::info!(
                status = initial.status,
                payment_made = false,
                "unpaid response returned to caller"
            );
            return Ok(PaidResponse {
                status: initial.status,
                body: initial.body,
                headers: initial.headers,
                payment_made: false,
                receipt: None,
            });
        }

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis(),
            state = "PARSE_CHALLENGE"
        );
        let requirements = PaymentRequirements::parse(&initial.body, self.config.default_network())
            .map_err(|e| {
                let err = map_requirements_error(e);
                tracing::error!(error = %err, "failed to parse payment challenge");
                err
            })?;
        if requirements.network_defaulted {
            tracing::warn!(
                default_network = self.config.default_network(),
                "402 body omitted network, substituted default"
            );
        }

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis(),
            state = "RESOLVE_FEE_PAYER"
        );
        let fee_payer_str = match &requirements.fee_payer {
            Some(fee_payer) => fee_payer.clone(),
            None => {
                let capability = timeout(
                    self.config.timeout(),
                    probe_supported(self.http.as_ref(), &self.facilitator_url),
                )
                .await
                .map_err(|_| timeout_error("facilitator capability probe"))?
                .map_err(|e| {
                    let err = map_facilitator_probe_error(e);
                    tracing::error!(error = %err, "facilitator capability probe failed");
                    err
                })?;
                capability
                    .fee_payer_for_network(&requirements.network)
                    .ok_or_else(|| {
                        let err = DriverError::FacilitatorUnsupported(format!(
                            "no entry for network {:?}",
                            requirements.network
                        ));
                        tracing::error!(error = %err, "facilitator cannot resolve a fee payer");
                        err
                    })?
                    .to_owned()
            }
        };

        tracing::debug!(elapsed_ms = started.elapsed().as_millis(), state = "BUILD_TX");
        let envelope_b64 = self.build_and_sign(&requirements, &fee_payer_str).await?;

        tracing::debug!(elapsed_ms = started.elapsed().as_millis(), state = "ENVELOPE");
        let envelope = PaymentEnvelope::new(requirements.network.clone(), envelope_b64);
        let payment_header = envelope.encode().map_err(|e| {
            let err = DriverError::BuildOverflow(e.to_string());
            tracing::error!(error = %err, "payment envelope exceeds the header budget");
            err
        })?;

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis(),
            state = "RETRY_WITH_PAYMENT"
        );
        let retry_headers = append_header(headers, "X-PAYMENT", &payment_header);
        let retry = self
            .http_request(url, method, &retry_headers, body, "paid retry")
            .await?;

        match retry.status {
            200..=299 => self.decode_receipt(started, retry),
            402 => {
                tracing::error!(status = 402, "payment rejected on retry");
                Err(DriverError::PaymentRejected(
                    "facilitator/resource server returned 402 again on the paid retry".to_owned(),
                ))
            }
            other => {
                tracing::info!(
                    status = other,
                    payment_made = true,
                    "paid retry returned a non-2xx, non-402 status"
                );
                Ok(PaidResponse {
                    status: retry.status,
                    body: retry.body,
                    headers: retry.headers,
                    payment_made: true,
                    receipt: None,
                })
            }
        }
    }

    fn decode_receipt(
        &self,
        started: Instant,
        retry: crate::http::HttpResponse,
    ) -> Result<PaidResponse, DriverError> {
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis(),
            state = "DECODE_RECEIPT"
        );
        let receipt = match find_header(&retry.headers, "X-PAYMENT-RESPONSE") {
            Some(header_value) => {
                let receipt = SettlementReceipt::decode(header_value).map_err(|e| {
                    let err = DriverError::ReceiptDecode(e.to_string());
                    tracing::error!(error = %err, "failed to decode settlement receipt");
                    err
                })?;
                tracing::info!(
                    status = retry.status,
                    payment_made = true,
                    transaction = %receipt.transaction,
                    "payment settled"
                );
                Some(receipt)
            }
            None => {
                tracing::warn!("paid retry succeeded without an X-PAYMENT-RESPONSE header");
                tracing::info!(
                    status = retry.status,
                    payment_made = true,
                    "payment made but settlement unverified"
                );
                None
            }
        };
        Ok(PaidResponse {
            status: retry.status,
            body: retry.body,
            headers: retry.headers,
            payment_made: true,
            receipt,
        })
    }

    async fn build_and_sign(
        &self,
        requirements: &PaymentRequirements,
        fee_payer_str: &str,
    ) -> Result<String, DriverError> {
        let mint = requirements.asset;
        let recipient = requirements.recipient;
        let fee_payer = parse_pubkey(fee_payer_str, "extra.feePayer")?;

        let token_program = timeout(
            self.config.timeout(),
            probe_token_program(self.rpc.as_ref(), &mint),
        )
        .await
        .map_err(|_| timeout_error("mint program probe"))?
        .map_err(|e| {
            let err = map_mint_probe_error(e);
            tracing::error!(error = %err, "mint program probe failed");
            err
        })?;
        tracing::info!(token_program = ?token_program, "resolved mint's token program");

        let source_ata = derive_ata(&self.wallet.pubkey(), &mint, &token_program.program_id())
            .map_err(|e| {
                let err = DriverError::Crypto(e.to_string());
                tracing::error!(error = %err, "failed to derive source ATA");
                err
            })?;
        let dest_ata = derive_ata(&recipient, &mint, &token_program.program_id()).map_err(|e| {
            let err = DriverError::Crypto(e.to_string());
            tracing::error!(error = %err, "failed to derive destination ATA");
            err
        })?;

        let blockhash = timeout(
            self.config.timeout(),
            fetch_blockhash(self.rpc.as_ref(), self.config.commitment()),
        )
        .await
        .map_err(|_| timeout_error("blockhash fetch"))?
        .map_err(|BlockhashFetchError::Transport(source)| {
            let err = DriverError::transport("blockhash fetch", source);
            tracing::error!(error = %err, "blockhash fetch failed");
            err
        })?;

        let mut buffer = build_transfer(
            &fee_payer,
            &self.wallet.pubkey(),
            &source_ata,
            &dest_ata,
            token_program,
            requirements.max_amount_required,
            &blockhash,
        );

        let signature = self.wallet.sign(buffer.message_bytes()).map_err(|e| {
            let err = DriverError::Crypto(e.to_string());
            tracing::error!(error = %err, "failed to sign the payment transaction");
            err
        })?;
        buffer.set_payer_signature(&signature);

        Ok(STANDARD.encode(buffer.as_bytes()))
    }

    async fn http_request(
        &self,
        url: &str,
        method: &str,
        headers: &str,
        body: &[u8],
        context: &str,
    ) -> Result<crate::http::HttpResponse, DriverError> {
        timeout(self.config.timeout(), self.http.request(url, method, headers, body))
            .await
            .map_err(|_| timeout_error(context))?
            .map_err(|e| {
                let err = DriverError::transport(context, e);
                tracing::error!(error = %err, context, "http request failed");
                err
            })
    }
}

fn timeout_error(context: &str) -> DriverError {
    let err = DriverError::transport(
        context.to_owned(),
        Box::new(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            format!("{context} exceeded its configured timeout"),
        )),
    );
    tracing::error!(error = %err, context, "operation timed out");
    err
}

fn parse_pubkey(value: &str, field: &str) -> Result<Pubkey, DriverError> {
    Pubkey::from_str(value).map_err(|e| {
        let err = DriverError::ChallengeParse(format!("{field} is not a valid pubkey: {e}"));
        tracing::error!(error = %err, "failed to parse a pubkey field");
        err
    })
}

fn map_requirements_error(error: x402_proto::RequirementsError) -> DriverError {
    match error {
        x402_proto::RequirementsError::InvalidAmount(amount) => {
            DriverError::AmountInvalid(amount)
        }
        other => DriverError::ChallengeParse(other.to_string()),
    }
}

fn map_facilitator_probe_error(error: FacilitatorProbeError) -> DriverError {
    match error {
        FacilitatorProbeError::Transport(source) => {
            DriverError::transport("facilitator capability probe", source)
        }
        FacilitatorProbeError::BadStatus(status) => {
            DriverError::FacilitatorUnsupported(format!("probe returned status {status}"))
        }
        FacilitatorProbeError::Decode(source) => {
            DriverError::FacilitatorUnsupported(source.to_string())
        }
    }
}

fn map_mint_probe_error(error: MintProbeError) -> DriverError {
    match error {
        MintProbeError::Transport(source) => DriverError::transport("mint program probe", source),
        MintProbeError::Unsupported(source) => DriverError::MintUnsupported(source.to_string()),
    }
}
