//! proxycheck API response models and decoding.
//!
//! The v2 API answers with a single JSON object where a few fixed keys
//! (`status`, `message`, `query time`, `node`) sit next to one key per
//! queried address. Decoding happens in two passes: the body is parsed into a
//! generic JSON map, then the reserved keys are taken out and every remaining
//! key is bound to an [`AddressResult`].

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const STATUS_OK: &str = "ok";
pub const STATUS_DENIED: &str = "denied";
pub const STATUS_ERROR: &str = "error";

/// Top-level keys that are not address results.
pub const RESERVED_FIELDS: [&str; 4] = ["status", "message", "query time", "node"];

/// Decoded proxycheck API response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,

    #[serde(rename = "query time", skip_serializing_if = "String::is_empty")]
    pub query_time: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub node: String,

    /// Results keyed by the queried address.
    #[serde(flatten)]
    pub data: BTreeMap<String, AddressResult>,
}

impl ApiResponse {
    /// Turn the service status into a result.
    ///
    /// Only `ok` with at least one address result is a success.
    pub fn classify(self) -> Result<Self, Error> {
        match self.status.as_str() {
            STATUS_OK if self.data.is_empty() => Err(Error::NoValidationData),
            STATUS_OK => Ok(self),
            STATUS_DENIED => Err(Error::RequestDenied(self.message)),
            STATUS_ERROR => Err(Error::RequestError(self.message)),
            _ => Err(Error::UnexpectedStatus(self.status)),
        }
    }

    /// Result for a single address.
    pub fn get(&self, address: &str) -> Option<&AddressResult> {
        self.data.get(address)
    }
}

/// Result for a single queried address.
///
/// When the service could not check the address only `error` is set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AddressResult {
    pub error: String,
    pub asn: String,
    pub range: String,
    pub hostname: String,
    pub provider: String,
    pub organisation: String,
    pub continent: String,
    #[serde(rename = "continentcode")]
    pub continent_code: String,
    pub country: String,
    #[serde(rename = "isocode")]
    pub iso_code: String,
    pub region: String,
    #[serde(rename = "regioncode")]
    pub region_code: String,
    pub timezone: String,
    pub city: String,
    pub postcode: String,
    pub latitude: f64,
    pub longitude: f64,
    pub currency: Currency,
    /// "yes" or "no".
    pub proxy: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Risk score, 0-100.
    pub risk: f64,
    #[serde(rename = "attack history")]
    pub attack_history: AttackHistory,
    #[serde(rename = "last seen human")]
    pub last_seen_human: String,
    #[serde(rename = "last seen unix", deserialize_with = "string_or_number")]
    pub last_seen_unix: String,
}

impl AddressResult {
    /// Returns true if the service reported an error for this address.
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Returns true if the address was detected as a proxy or VPN.
    pub fn is_proxy(&self) -> bool {
        self.proxy.eq_ignore_ascii_case("yes")
    }
}

/// Currency used in the address's country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

/// Attack counters, only present with `risk` set to full.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttackHistory {
    #[serde(rename = "Total", deserialize_with = "string_or_number")]
    pub total: String,
    #[serde(rename = "Vulnerability Probing", deserialize_with = "string_or_number")]
    pub vulnerability_probing: String,
    #[serde(rename = "Forum Spam", deserialize_with = "string_or_number")]
    pub forum_spam: String,
    #[serde(rename = "Login Attempt", deserialize_with = "string_or_number")]
    pub login_attempt: String,
    #[serde(rename = "Registration Attempt", deserialize_with = "string_or_number")]
    pub registration_attempt: String,
    #[serde(rename = "Comment Spam", deserialize_with = "string_or_number")]
    pub comment_spam: String,
    #[serde(rename = "Denial of Service", deserialize_with = "string_or_number")]
    pub denial_of_service: String,
    #[serde(rename = "Form Submission", deserialize_with = "string_or_number")]
    pub form_submission: String,
}

/// Result of an email check.
///
/// The API can check email addresses for disposable providers; no lookup in
/// this crate issues such checks yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailValidationResult {
    pub error: String,
    pub disposable: String,
}

/// Decode a response body into an [`ApiResponse`].
///
/// A body that is not a JSON object fails with [`Error::Unmarshal`]; an
/// object whose fields have the wrong types fails with [`Error::Decode`].
/// Status is not checked here, see [`ApiResponse::classify`].
pub fn decode(body: &[u8]) -> Result<ApiResponse, Error> {
    let mut raw: Map<String, Value> = serde_json::from_slice(body).map_err(Error::Unmarshal)?;

    let status = take_string(&mut raw, "status")?;
    let message = take_string(&mut raw, "message")?;
    let query_time = take_string(&mut raw, "query time")?;
    let node = take_string(&mut raw, "node")?;

    let data = raw
        .into_iter()
        .map(|(address, value)| {
            AddressResult::deserialize(value)
                .map(|result| (address, result))
                .map_err(Error::Decode)
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    Ok(ApiResponse {
        status,
        message,
        query_time,
        node,
        data,
    })
}

fn take_string(raw: &mut Map<String, Value>, key: &str) -> Result<String, Error> {
    match raw.remove(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(value) => String::deserialize(value).map_err(Error::Decode),
    }
}

/// The API is inconsistent about quoting counters and timestamps.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct StringOrNumberVisitor;

    impl<'de> Visitor<'de> for StringOrNumberVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(StringOrNumberVisitor)
}
