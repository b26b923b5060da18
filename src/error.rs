//! Error types for proxycheck lookups.

use std::fmt;

/// Error from a proxycheck lookup.
///
/// Every variant is a distinct failure class. Lower-level causes are kept
/// and exposed through [`std::error::Error::source`].
#[derive(Debug)]
pub enum Error {
    /// No addresses were given.
    EmptyInput,
    /// An address cannot be placed in the request path as-is.
    InvalidAddress(String),
    /// The HTTP client could not be initialised.
    ClientBuild(reqwest::Error),
    /// The request URL could not be assembled.
    RequestPreparation(url::ParseError),
    /// Connection, DNS, TLS or timeout failure while sending.
    RequestFailed(reqwest::Error),
    /// The caller cancelled the lookup while the request was in flight.
    Cancelled,
    /// The service answered with something other than 200.
    BadHttpStatus(u16),
    /// The response body could not be read.
    ResponseRead(reqwest::Error),
    /// The body is not a JSON object.
    Unmarshal(serde_json::Error),
    /// The JSON object does not have the expected shape.
    Decode(serde_json::Error),
    /// Status "denied", with the service message.
    RequestDenied(String),
    /// Status "error", with the service message.
    RequestError(String),
    /// Any other status value, including a missing one.
    UnexpectedStatus(String),
    /// Status "ok" but no per-address results.
    NoValidationData,
}

impl Error {
    /// Returns true for failures on the way to or from the service.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::RequestFailed(_) | Error::Cancelled | Error::ResponseRead(_)
        )
    }

    /// Returns true if the configured timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::RequestFailed(e) | Error::ResponseRead(e) => e.is_timeout(),
            _ => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty values"),
            Error::InvalidAddress(addr) => write!(f, "invalid address: {:?}", addr),
            Error::ClientBuild(e) => write!(f, "error building HTTP client: {}", e),
            Error::RequestPreparation(e) => write!(f, "error preparing request: {}", e),
            Error::RequestFailed(e) => write!(f, "error sending request: {}", e),
            Error::Cancelled => write!(f, "error sending request: lookup cancelled"),
            Error::BadHttpStatus(code) => write!(f, "unexpected status code: {}", code),
            Error::ResponseRead(e) => write!(f, "error reading response body: {}", e),
            Error::Unmarshal(e) => write!(f, "error unmarshalling response: {}", e),
            Error::Decode(e) => write!(f, "error decoding response: {}", e),
            Error::RequestDenied(msg) => write!(f, "request denied: {}", msg),
            Error::RequestError(msg) => write!(f, "request error: {}", msg),
            Error::UnexpectedStatus(status) => write!(f, "unexpected status: {:?}", status),
            Error::NoValidationData => write!(f, "no validation data found in response"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ClientBuild(e) | Error::RequestFailed(e) | Error::ResponseRead(e) => Some(e),
            Error::RequestPreparation(e) => Some(e),
            Error::Unmarshal(e) | Error::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::RequestPreparation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_carries_details() {
        assert_eq!(Error::BadHttpStatus(500).to_string(), "unexpected status code: 500");
        assert_eq!(
            Error::RequestDenied("bad key".to_string()).to_string(),
            "request denied: bad key"
        );
        assert_eq!(
            Error::UnexpectedStatus("warning".to_string()).to_string(),
            "unexpected status: \"warning\""
        );
        assert_eq!(Error::EmptyInput.to_string(), "empty values");
    }

    #[test]
    fn test_source_is_kept() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::Unmarshal(cause);
        assert!(err.source().is_some());

        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::RequestPreparation(_)));
        assert!(err.source().is_some());

        assert!(Error::NoValidationData.source().is_none());
    }

    #[test]
    fn test_transport_classification() {
        assert!(Error::Cancelled.is_transport());
        assert!(!Error::Cancelled.is_timeout());
        assert!(!Error::BadHttpStatus(502).is_transport());
        assert!(!Error::EmptyInput.is_transport());
    }
}
