//! Configuration source handling shared by all providers
//!
//! Providers are handed an optional readable source by the registry. This
//! module turns that source into text, rejecting absent and empty sources
//! uniformly so individual providers only deal with their own format.

use crate::error::{Error, Result};
use std::io::Read;

/// Read a provider configuration source to a string
///
/// # Parameters
///
/// - `provider`: Provider name, used in error messages
/// - `source`: The configuration source, if one was supplied
///
/// # Returns
///
/// - `Ok(String)`: The full, non-blank contents of the source
/// - `Err(Error::MissingConfiguration)`: No source, or only whitespace
/// - `Err(Error::ConfigParse)`: The source could not be read as UTF-8 text
pub fn read_source(provider: &str, source: Option<&mut dyn Read>) -> Result<String> {
    let source = source.ok_or_else(|| {
        Error::missing_configuration(format!(
            "missing configuration file for {} cloud provider",
            provider
        ))
    })?;

    let mut contents = String::new();
    source.read_to_string(&mut contents).map_err(|e| {
        Error::config_parse(format!(
            "failed to read configuration for {} cloud provider: {}",
            provider, e
        ))
    })?;

    if contents.trim().is_empty() {
        return Err(Error::missing_configuration(format!(
            "empty configuration for {} cloud provider",
            provider
        )));
    }

    Ok(contents)
}
