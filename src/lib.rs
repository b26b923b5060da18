//! Client for the proxycheck.io v2 API.
//!
//! Looks up IP addresses for proxy/VPN detection, risk scores and
//! geolocation, and turns the loosely-typed API response into typed results.
//!
//! # Features
//!
//! - **Typed flags** - VPN, ASN, risk and other query flags as enums
//! - **Canonical queries** - Options are encoded once into a sorted query string
//! - **Batch lookups** - Check many addresses in one request
//! - **Status classification** - `denied`/`error` answers surface as errors
//! - **Cancellation** - In-flight lookups abort when the caller's token fires
//!
//! # Example
//!
//! ```no_run
//! use proxycheck_client::{Client, Options, RiskMode, Toggle, VpnMode};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), proxycheck_client::Error> {
//! let client = Client::new(Options {
//!     vpn: Some(VpnMode::Both),
//!     asn: Some(Toggle::Active),
//!     risk: Some(RiskMode::Full),
//!     ..Default::default()
//! })?;
//!
//! let response = client
//!     .lookup(&["8.8.8.8", "8.8.4.4"], &CancellationToken::new())
//!     .await?;
//! for (address, result) in &response.data {
//!     println!("{}: proxy={} risk={}", address, result.proxy, result.risk);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```yaml
//! api_key: "${PROXYCHECK_API_KEY}"
//! vpn: both
//! asn: active
//! risk: full
//! days: "30"
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod response;

pub use client::{check_addresses, Client};
pub use config::{Options, RiskMode, Toggle, VpnMode};
pub use error::Error;
pub use response::{AddressResult, ApiResponse, AttackHistory, Currency, EmailValidationResult};
