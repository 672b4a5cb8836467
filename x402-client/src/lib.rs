//! The x402 payment driver: a two-phase challenge/retry state machine that
//! sits between a resource-constrained device and the HTTP resource server
//! it pays, settling via an SPL token transfer on Solana.
//!
//! The driver never opens a socket or holds an RPC client itself ([`http`],
//! [`config`]): every I/O boundary is an injected collaborator trait, so the
//! same [`driver::X402Driver`] runs unmodified behind a firmware HTTP stack
//! or behind `reqwest` in a test harness.

pub mod config;
pub mod driver;
pub mod error;
pub mod facilitator;
pub mod http;
pub mod response;

pub use config::DriverConfig;
pub use driver::X402Driver;
pub use error::DriverError;
pub use facilitator::{probe_supported, FacilitatorProbeError};
pub use http::{append_header, find_header, HttpCollaborator, HttpResponse};
pub use response::PaidResponse;
