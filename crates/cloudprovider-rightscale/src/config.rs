//! Configuration loader for the RightScale provider
//!
//! The provider needs two values to reach the RightLink agent's local API
//! proxy: the shared secret sent in the `RLL_SECRET` header and the port the
//! proxy listens on. Both live in the `[rll]` section of a git-config style
//! INI file:
//!
//! ```ini
//! [rll]
//! secret = 0123abcd
//! port = 8080
//! ```
//!
//! Section and key names match case-insensitively. Values may be quoted.

use cloudprovider_core::{Error, Result};
use ini::{Ini, ParseOption};
use std::io::Read;

use crate::PROVIDER_NAME;

/// Section holding the proxy settings
const RLL_SECTION: &str = "rll";

/// Loaded RightScale provider configuration
///
/// Immutable once loaded. The `Debug` implementation does not expose the
/// secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Auth secret for local API proxy requests
    /// ⚠️ NEVER log this value
    secret: String,

    /// Port of the local API proxy, as a decimal string
    port: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("secret", &"<REDACTED>")
            .field("port", &self.port)
            .finish()
    }
}

/// Last value of `key` in every `[rll]` section, ignoring case
fn rll_value<'a>(ini: &'a Ini, key: &str) -> Option<&'a str> {
    ini.iter()
        .filter(|(section, _)| section.is_some_and(|name| name.eq_ignore_ascii_case(RLL_SECTION)))
        .flat_map(|(_, properties)| properties.iter())
        .filter(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value)
        .last()
}

impl ProviderConfig {
    /// Create a configuration from its two values
    ///
    /// # Returns
    ///
    /// - `Err(Error::ConfigParse)`: `port` is not a TCP port number (1-65535)
    pub fn new(secret: impl Into<String>, port: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        let port = port.into();

        match port.parse::<u16>() {
            Ok(0) | Err(_) => {
                return Err(Error::config_parse(format!(
                    "rll.port must be a TCP port number, got '{}'",
                    port
                )));
            }
            Ok(_) => {}
        }

        if secret.is_empty() {
            tracing::warn!("rll.secret is empty; local proxy requests will not authenticate");
        }

        Ok(Self { secret, port })
    }

    /// Load the configuration from an optional source
    ///
    /// # Returns
    ///
    /// - `Err(Error::MissingConfiguration)`: No source, or an empty one
    /// - `Err(Error::ConfigParse)`: The source is unreadable or not of the
    ///   expected shape
    pub fn from_source(source: Option<&mut dyn Read>) -> Result<Self> {
        let contents = cloudprovider_core::read_source(PROVIDER_NAME, source)?;
        Self::parse(&contents)
    }

    /// Parse the configuration from INI text
    pub fn parse(contents: &str) -> Result<Self> {
        let mut options = ParseOption::default();
        options.enabled_quote = true;

        let ini = Ini::load_from_str_opt(contents, options).map_err(|e| {
            Error::config_parse(format!("invalid {} configuration: {}", PROVIDER_NAME, e))
        })?;

        let has_section = ini
            .sections()
            .flatten()
            .any(|name| name.eq_ignore_ascii_case(RLL_SECTION));
        if !has_section {
            return Err(Error::config_parse(format!(
                "invalid {} configuration: missing [{}] section",
                PROVIDER_NAME, RLL_SECTION
            )));
        }

        let secret = rll_value(&ini, "secret")
            .ok_or_else(|| Error::config_parse("missing rll.secret"))?;
        let port = rll_value(&ini, "port").ok_or_else(|| Error::config_parse("missing rll.port"))?;

        Self::new(secret, port.trim())
    }

    /// The shared secret for the `RLL_SECRET` header
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// The local proxy port
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Base URL of the local API proxy
    pub fn proxy_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_valid_config() {
        let config = ProviderConfig::parse("[rll]\nsecret = \"s3cr3t\"\nport = \"8080\"\n").unwrap();
        assert_eq!(config.secret(), "s3cr3t");
        assert_eq!(config.port(), "8080");
        assert_eq!(config.proxy_url(), "http://localhost:8080");
    }

    #[test]
    fn test_integer_port_accepted() {
        let config = ProviderConfig::parse("[rll]\nsecret = \"s\"\nport = 9000\n").unwrap();
        assert_eq!(config.port(), "9000");
    }

    #[test]
    fn test_capitalized_section_accepted() {
        let config = ProviderConfig::parse("[Rll]\nsecret = \"s\"\nport = \"1234\"\n").unwrap();
        assert_eq!(config.port(), "1234");
    }

    #[test]
    fn test_unquoted_values_accepted() {
        let config = ProviderConfig::parse("[rll]\nsecret = abc123\nport = 8080\n").unwrap();
        assert_eq!(config.secret(), "abc123");
        assert_eq!(config.port(), "8080");
    }

    #[test]
    fn test_names_match_case_insensitively() {
        let contents = "; RightLink proxy\n[RLL]\nSecret = abc123\nPORT = 8080\n";
        let config = ProviderConfig::parse(contents).unwrap();
        assert_eq!(config.secret(), "abc123");
        assert_eq!(config.port(), "8080");
    }

    #[test]
    fn test_other_sections_ignored() {
        let contents = "[global]\nport = 1\n[rll]\nsecret = s\nport = 4242\n";
        let config = ProviderConfig::parse(contents).unwrap();
        assert_eq!(config.port(), "4242");
    }

    #[test]
    fn test_absent_source_is_missing() {
        let err = ProviderConfig::from_source(None).unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration(_)));
    }

    #[test]
    fn test_empty_source_is_missing() {
        let mut source = Cursor::new("");
        let err = ProviderConfig::from_source(Some(&mut source)).unwrap_err();
        assert!(matches!(err, Error::MissingConfiguration(_)));
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let err = ProviderConfig::parse("[other]\nsecret = \"s\"\nport = \"1\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_missing_port_is_parse_error() {
        let err = ProviderConfig::parse("[rll]\nsecret = \"s\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_invalid_syntax_is_parse_error() {
        let err = ProviderConfig::parse("[rll\nsecret = s").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_bad_port_is_parse_error() {
        for port in ["\"http\"", "\"0\"", "70000", "-1"] {
            let contents = format!("[rll]\nsecret = \"s\"\nport = {}\n", port);
            let err = ProviderConfig::parse(&contents).unwrap_err();
            assert!(matches!(err, Error::ConfigParse(_)), "port {} accepted", port);
        }
    }

    #[test]
    fn test_secret_not_exposed_in_debug() {
        let config = ProviderConfig::new("secret_token_12345", "8080").unwrap();
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("secret_token_12345"));
        assert!(debug_str.contains("8080"));
    }
}
