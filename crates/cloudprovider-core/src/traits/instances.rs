// # Instances Trait
//
// Defines the interface for discovering compute instances.
//
// ## Usage
//
// ```rust,ignore
// use cloudprovider_core::Instances;
//
// let ip = instances.resolve_ip_address("web-1").await?;
// let names = instances.list_instances("web").await?;
// ```

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for querying the instances managed by a provider
///
/// Each call is a single, independent request against the provider's API.
/// Implementations keep no state between calls and never retry; errors are
/// returned to the caller as they occur.
#[async_trait]
pub trait Instances: Send + Sync {
    /// Resolve an instance name to its private IP address
    ///
    /// # Parameters
    ///
    /// - `name`: Exact instance name
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: The first private address of the instance
    /// - `Err(Error::NotFound)`: No instance has this name
    /// - `Err(Error::AmbiguousMatch)`: Several instances have this name
    /// - `Err(Error::MalformedResponse)`: The address is missing or invalid
    async fn resolve_ip_address(&self, name: &str) -> Result<IpAddr, crate::Error>;

    /// List the names of instances matching a filter
    ///
    /// # Parameters
    ///
    /// - `filter`: Name filter passed to the provider API
    ///
    /// # Returns
    ///
    /// Instance names in the order the provider returned them (may be empty)
    async fn list_instances(&self, filter: &str) -> Result<Vec<String>, crate::Error>;
}
