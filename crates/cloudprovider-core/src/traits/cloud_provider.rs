// # Cloud Provider Trait
//
// Defines the entry point the orchestrator holds for a configured provider.
//
// A provider answers for each capability whether it supports it. Callers
// must check the returned `Option` before issuing capability calls.
//
// ## Implementations
//
// - RightScale: `cloudprovider-rightscale` crate
//
// ## Usage
//
// ```rust,ignore
// use cloudprovider_core::CloudProvider;
//
// let provider: Box<dyn CloudProvider> = registry.create_provider("rightscale", Some(&mut file))?;
// if let Some(instances) = provider.instances() {
//     let names = instances.list_instances("").await?;
// }
// ```

use std::io::Read;

use super::{Instances, TcpLoadBalancer, Zones};

/// Trait for cloud provider implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe: the orchestrator may query one
/// provider from several threads at once.
pub trait CloudProvider: Send + Sync {
    /// The instances capability, or `None` if not supported
    fn instances(&self) -> Option<&dyn Instances>;

    /// The zones capability, or `None` if not supported
    fn zones(&self) -> Option<&dyn Zones>;

    /// The TCP load balancer capability, or `None` if not supported
    fn tcp_load_balancer(&self) -> Option<&dyn TcpLoadBalancer>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

/// Helper trait for constructing cloud providers from configuration
///
/// Any function or closure with the signature of [`create`](Self::create)
/// is a factory.
pub trait CloudProviderFactory: Send + Sync {
    /// Create a CloudProvider instance from an optional configuration source
    ///
    /// # Parameters
    ///
    /// - `config`: Provider-specific configuration source, if one was given
    ///
    /// # Returns
    ///
    /// A boxed CloudProvider trait object
    fn create(
        &self,
        config: Option<&mut dyn Read>,
    ) -> Result<Box<dyn CloudProvider>, crate::Error>;
}

impl<F> CloudProviderFactory for F
where
    F: Fn(Option<&mut dyn Read>) -> Result<Box<dyn CloudProvider>, crate::Error> + Send + Sync,
{
    fn create(
        &self,
        config: Option<&mut dyn Read>,
    ) -> Result<Box<dyn CloudProvider>, crate::Error> {
        self(config)
    }
}
