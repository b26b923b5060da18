//! proxycheck HTTP client.

use crate::config::Options;
use crate::error::Error;
use crate::response::{self, ApiResponse};
use bytes::Bytes;
use reqwest::StatusCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Characters that would change the meaning of the request path.
const RESERVED_ADDRESS_CHARS: &[char] = &[',', '/', '\\', '?', '#', '%', '&'];

/// Reusable proxycheck client.
///
/// Options are resolved and the query string is built once, so a single
/// client can serve any number of concurrent lookups.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_address: String,
    timeout: Duration,
    query: String,
}

impl Client {
    /// Create a new client.
    pub fn new(options: Options) -> Result<Self, Error> {
        let timeout = options.timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            http,
            api_address: options.api_address().to_string(),
            timeout,
            query: options.query(),
        })
    }

    /// Base address requests are sent to.
    pub fn api_address(&self) -> &str {
        &self.api_address
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Encoded query string sent with every request.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Check a batch of addresses.
    ///
    /// Succeeds only when the service answers `ok` with at least one
    /// address result.
    pub async fn lookup<S: AsRef<str>>(
        &self,
        addresses: &[S],
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, Error> {
        let body = self.fetch(addresses, cancel).await?;
        let response = response::decode(&body)?;

        debug!(
            addresses = addresses.len(),
            results = response.data.len(),
            status = %response.status,
            node = %response.node,
            "proxycheck response decoded"
        );

        response.classify().map_err(|e| {
            if matches!(e, Error::RequestDenied(_) | Error::RequestError(_)) {
                warn!(error = %e, "proxycheck rejected the request");
            }
            e
        })
    }

    /// Send the request and return the raw body of a 200 response.
    pub async fn fetch<S: AsRef<str>>(
        &self,
        addresses: &[S],
        cancel: &CancellationToken,
    ) -> Result<Bytes, Error> {
        let url = self.request_url(addresses)?;

        debug!(addresses = addresses.len(), "Querying proxycheck");

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            result = self.http.get(url).send() => result.map_err(Error::RequestFailed)?,
        };

        if response.status() != StatusCode::OK {
            let status = response.status();
            warn!(status = status.as_u16(), "proxycheck returned unexpected status");
            return Err(Error::BadHttpStatus(status.as_u16()));
        }

        tokio::select! {
            _ = cancel.cancelled() => Err(Error::Cancelled),
            body = response.bytes() => body.map_err(Error::ResponseRead),
        }
    }

    /// Build the request URL: base address, comma-joined addresses, query.
    fn request_url<S: AsRef<str>>(&self, addresses: &[S]) -> Result<url::Url, Error> {
        if addresses.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut path = Vec::with_capacity(addresses.len());
        for address in addresses {
            let address = address.as_ref();
            if !is_valid_address(address) {
                return Err(Error::InvalidAddress(address.to_string()));
            }
            path.push(address);
        }

        let target = format!("{}{}?{}", self.api_address, path.join(","), self.query);
        Ok(url::Url::parse(&target)?)
    }
}

/// Dot-only addresses are path segments the URL parser would resolve away.
fn is_valid_address(address: &str) -> bool {
    !address.is_empty()
        && !address.chars().all(|c| c == '.')
        && !address
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || RESERVED_ADDRESS_CHARS.contains(&c))
}

/// Check a batch of addresses with a one-off client.
///
/// Fine for a single check (even of many addresses at once). For repeated
/// checks build a [`Client`] and reuse it.
pub async fn check_addresses<S: AsRef<str>>(
    addresses: &[S],
    options: Options,
    cancel: &CancellationToken,
) -> Result<ApiResponse, Error> {
    Client::new(options)?.lookup(addresses, cancel).await
}
