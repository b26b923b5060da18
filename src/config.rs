//! Lookup options and query flag types.
//!
//! Full list of flags: <https://proxycheck.io/api/#query_flags>.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hosted proxycheck v2 endpoint.
pub const DEFAULT_API_ADDRESS: &str = "https://proxycheck.io/v2/";

/// Timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for proxycheck lookups.
///
/// Unset flags are left out of the query entirely so the service applies its
/// own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Options {
    /// API base address. Leave unset for the hosted service; override to
    /// point at a mock.
    #[serde(default)]
    pub api_address: Option<String>,

    /// Request timeout in milliseconds. Unset or zero means 30 seconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// API key (supports ${ENV_VAR} syntax in config files).
    #[serde(default)]
    pub api_key: Option<String>,

    /// VPN detection depth.
    #[serde(default)]
    pub vpn: Option<VpnMode>,

    /// Include ASN data.
    #[serde(default)]
    pub asn: Option<Toggle>,

    /// Include currency data.
    #[serde(default)]
    pub currency: Option<Toggle>,

    /// Include the answering node name.
    #[serde(default)]
    pub node: Option<Toggle>,

    /// Include query time.
    #[serde(default)]
    pub time: Option<Toggle>,

    /// Risk score detail.
    #[serde(default)]
    pub risk: Option<RiskMode>,

    /// Include port of detected proxies.
    #[serde(default)]
    pub port: Option<Toggle>,

    /// Include last seen timestamps.
    #[serde(default)]
    pub seen: Option<Toggle>,

    /// Restrict detections to the last N days.
    #[serde(default)]
    pub days: Option<String>,

    /// Tag shown in the proxycheck dashboard.
    #[serde(default)]
    pub tag: Option<String>,
}

/// VPN detection mode (`vpn` flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VpnMode {
    /// Proxies only.
    ProxyOnly,
    /// Proxies and VPNs reported together.
    Any,
    /// VPNs only.
    VpnOnly,
    /// Proxies and VPNs reported separately.
    Both,
}

impl VpnMode {
    /// Wire value of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            VpnMode::ProxyOnly => "0",
            VpnMode::Any => "1",
            VpnMode::VpnOnly => "2",
            VpnMode::Both => "3",
        }
    }
}

/// On/off flag used by asn, cur, node, time, port and seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    /// Feature off ("0").
    Inactive,
    /// Feature on ("1").
    Active,
}

impl Toggle {
    /// Wire value of this toggle.
    pub fn as_str(&self) -> &'static str {
        match self {
            Toggle::Inactive => "0",
            Toggle::Active => "1",
        }
    }
}

impl From<bool> for Toggle {
    fn from(active: bool) -> Self {
        if active {
            Toggle::Active
        } else {
            Toggle::Inactive
        }
    }
}

/// Risk score mode (`risk` flag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskMode {
    /// No risk score.
    Inactive,
    /// Risk score only.
    ScoreOnly,
    /// Risk score plus attack history.
    Full,
}

impl RiskMode {
    /// Wire value of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskMode::Inactive => "0",
            RiskMode::ScoreOnly => "1",
            RiskMode::Full => "2",
        }
    }
}

impl Options {
    /// Load options from a YAML file.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let expanded = expand_env_vars(&content);
        let options: Options = serde_yaml::from_str(&expanded)?;
        options.validate()?;
        Ok(options)
    }

    /// Validate options.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(address) = non_empty(&self.api_address) {
            let url = url::Url::parse(address)
                .map_err(|e| anyhow::anyhow!("Invalid api_address '{}': {}", address, e))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                anyhow::bail!("api_address must use http or https: {}", address);
            }
        }

        if let Some(days) = non_empty(&self.days) {
            if days.parse::<u32>().is_err() {
                anyhow::bail!("days must be a whole number of days, got '{}'", days);
            }
        }

        Ok(())
    }

    /// API base address with the default applied.
    pub fn api_address(&self) -> &str {
        non_empty(&self.api_address).unwrap_or(DEFAULT_API_ADDRESS)
    }

    /// Request timeout with the default applied.
    pub fn timeout(&self) -> Duration {
        match self.timeout_ms {
            Some(ms) if ms > 0 => Duration::from_millis(ms),
            _ => DEFAULT_TIMEOUT,
        }
    }

    /// Encoded query string for these options.
    pub fn query(&self) -> String {
        crate::query::build(self)
    }

    /// Generate example configuration YAML.
    pub fn example() -> String {
        r#"# proxycheck client configuration

# api_address: "http://127.0.0.1:8080/v2/"   # Override to use a mock
timeout_ms: 30000
api_key: "${PROXYCHECK_API_KEY}"   # Use environment variable

vpn: both            # proxy_only, any, vpn_only or both
asn: active          # active or inactive
currency: active
node: active
time: active
risk: full           # inactive, score_only or full
port: active
seen: active
days: "30"           # Only consider detections from the last 30 days
tag: "my-service"
"#
        .to_string()
    }
}

/// Treat empty strings the same as unset.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Expand environment variables in the format ${VAR_NAME}.
fn expand_env_vars(content: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid");

    re.replace_all(content, |caps: &regex::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_default()
    })
    .into_owned()
}
