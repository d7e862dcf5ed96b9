//! Wire schema of the RightScale `servers` resource
//!
//! Only the fields the provider reads are modeled; everything else in the
//! response is ignored.

use cloudprovider_core::{Error, Result};
use serde::Deserialize;
use std::net::IpAddr;

/// Path of the servers index, relative to the proxy base URL
pub const SERVERS_PATH: &str = "/api/servers";

/// Header carrying the shared secret on every proxy request
pub const SECRET_HEADER: &str = "RLL_SECRET";

/// One element of the `GET /api/servers` response array
#[derive(Debug, Clone, Deserialize)]
pub struct ServerRecord {
    /// Server name
    pub name: String,

    /// Running instance, present with `view=instance_detail`
    #[serde(default)]
    pub current_instance: Option<CurrentInstance>,
}

/// The running instance of a server
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentInstance {
    /// Private addresses of the instance, in API order
    #[serde(default)]
    pub private_ip_addresses: Option<Vec<String>>,
}

impl ServerRecord {
    /// The first private IP address of the running instance
    ///
    /// # Returns
    ///
    /// - `Err(Error::MalformedResponse)`: No current instance, no private
    ///   addresses, or a first address that is not an IP address
    pub fn first_private_ip(&self) -> Result<IpAddr> {
        let instance = self.current_instance.as_ref().ok_or_else(|| {
            Error::malformed(format!("failed to retrieve current instance of {}", self.name))
        })?;

        let first = instance
            .private_ip_addresses
            .as_deref()
            .and_then(|addresses| addresses.first())
            .ok_or_else(|| {
                Error::malformed(format!("failed to retrieve private IPs of {}", self.name))
            })?;

        first
            .parse()
            .map_err(|_| Error::malformed(format!("invalid network IP for {}: {}", self.name, first)))
    }
}

/// Decode a `GET /api/servers` response body
///
/// # Returns
///
/// - `Err(Error::Decode)`: The body is not JSON, or not a JSON array
/// - `Err(Error::MalformedResponse)`: An element is not a server object,
///   e.g. `name` is missing or a field has the wrong type
pub fn decode_servers(body: &[u8]) -> Result<Vec<ServerRecord>> {
    let values: Vec<serde_json::Value> = serde_json::from_slice(body)?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value)
                .map_err(|e| Error::malformed(format!("server record {}: {}", index, e)))
        })
        .collect()
}

/// Query pair filtering servers by name
pub fn name_filter(value: &str) -> (&'static str, String) {
    ("filter[]", format!("name=={}", value))
}

/// Query pair requesting instance details with each server
pub fn instance_detail_view() -> (&'static str, String) {
    ("view", "instance_detail".to_string())
}
