//! Query string construction.

use crate::config::{non_empty, Options};
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Build the URL-encoded query string for a set of options.
///
/// Parameters are sorted by name so equal options always produce the same
/// string. `p=0` (no pretty printing) is always present; unset or empty
/// options are left out.
pub fn build(options: &Options) -> String {
    let mut params: BTreeMap<&'static str, &str> = BTreeMap::new();
    params.insert("p", "0");

    if let Some(key) = non_empty(&options.api_key) {
        params.insert("key", key);
    }
    if let Some(vpn) = options.vpn {
        params.insert("vpn", vpn.as_str());
    }

    let toggles = [
        ("asn", options.asn),
        ("cur", options.currency),
        ("node", options.node),
        ("time", options.time),
        ("port", options.port),
        ("seen", options.seen),
    ];
    for (name, toggle) in toggles {
        if let Some(toggle) = toggle {
            params.insert(name, toggle.as_str());
        }
    }

    if let Some(risk) = options.risk {
        params.insert("risk", risk.as_str());
    }
    if let Some(days) = non_empty(&options.days) {
        params.insert("days", days);
    }
    if let Some(tag) = non_empty(&options.tag) {
        params.insert("tag", tag);
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RiskMode, Toggle, VpnMode};

    fn full_options() -> Options {
        Options {
            vpn: Some(VpnMode::Both),
            asn: Some(Toggle::Active),
            currency: Some(Toggle::Active),
            node: Some(Toggle::Active),
            time: Some(Toggle::Active),
            risk: Some(RiskMode::Full),
            port: Some(Toggle::Active),
            seen: Some(Toggle::Active),
            days: Some("30".to_string()),
            tag: Some("test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_options() {
        assert_eq!(build(&Options::default()), "p=0");
    }

    #[test]
    fn test_all_options() {
        assert_eq!(
            build(&full_options()),
            "asn=1&cur=1&days=30&node=1&p=0&port=1&risk=2&seen=1&tag=test&time=1&vpn=3"
        );
    }

    #[test]
    fn test_vpn_modes() {
        let cases = [
            (VpnMode::ProxyOnly, "p=0&vpn=0"),
            (VpnMode::Any, "p=0&vpn=1"),
            (VpnMode::VpnOnly, "p=0&vpn=2"),
            (VpnMode::Both, "p=0&vpn=3"),
        ];
        for (mode, want) in cases {
            let options = Options {
                vpn: Some(mode),
                ..Default::default()
            };
            assert_eq!(build(&options), want, "vpn mode {:?}", mode);
        }
    }

    #[test]
    fn test_inactive_toggles_are_sent() {
        let options = Options {
            asn: Some(Toggle::Inactive),
            currency: Some(Toggle::Inactive),
            ..Default::default()
        };
        assert_eq!(build(&options), "asn=0&cur=0&p=0");

        let options = Options {
            asn: Some(Toggle::Active),
            ..Default::default()
        };
        assert_eq!(build(&options), "asn=1&p=0");
    }

    #[test]
    fn test_empty_strings_are_omitted() {
        let options = Options {
            api_key: Some(String::new()),
            days: Some(String::new()),
            tag: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(build(&options), "p=0");
    }

    #[test]
    fn test_api_key_and_tag_are_encoded() {
        let options = Options {
            api_key: Some("abc-123".to_string()),
            tag: Some("sign up&form".to_string()),
            ..Default::default()
        };
        assert_eq!(build(&options), "key=abc-123&p=0&tag=sign+up%26form");
    }

    #[test]
    fn test_transport_settings_do_not_affect_query() {
        let mut options = full_options();
        let before = build(&options);
        options.api_address = Some("http://localhost/".to_string());
        options.timeout_ms = Some(10);
        assert_eq!(build(&options), before);
        assert_eq!(options.query(), before);
    }
}
