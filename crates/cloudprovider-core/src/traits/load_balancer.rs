// # TCP Load Balancer Trait
//
// Defines the interface for managing external TCP load balancers.

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for providers that can manage external TCP load balancers
#[async_trait]
pub trait TcpLoadBalancer: Send + Sync {
    /// Check whether a load balancer with this name exists in the region
    async fn exists(&self, name: &str, region: &str) -> Result<bool, crate::Error>;

    /// Create a load balancer forwarding `port` on `external_ip` to `hosts`
    async fn create(
        &self,
        name: &str,
        region: &str,
        external_ip: IpAddr,
        port: u16,
        hosts: &[String],
    ) -> Result<(), crate::Error>;

    /// Replace the set of hosts behind an existing load balancer
    async fn update(&self, name: &str, region: &str, hosts: &[String]) -> Result<(), crate::Error>;

    /// Delete a load balancer
    async fn delete(&self, name: &str, region: &str) -> Result<(), crate::Error>;
}
