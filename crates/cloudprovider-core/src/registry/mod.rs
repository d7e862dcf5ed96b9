//! Plugin-based provider registry
//!
//! The registry maps provider names to factories. It replaces process-wide
//! registration at load time with an explicit value the application owns.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cloudprovider_core::ProviderRegistry;
//!
//! // Create a registry and register providers once, at startup
//! let registry = ProviderRegistry::new();
//! cloudprovider_rightscale::register(&registry)?;
//!
//! // Create a provider from its configuration source
//! let mut file = std::fs::File::open("/etc/cloud.conf")?;
//! let provider = registry.create_provider("rightscale", Some(&mut file))?;
//! ```
//!
//! ## Registration
//!
//! Provider crates expose a `register` function:
//!
//! ```rust,ignore
//! pub fn register(registry: &ProviderRegistry) -> Result<()> {
//!     registry.register_provider("rightscale", Box::new(RightScaleFactory))
//! }
//! ```

use crate::error::{Error, Result};
use crate::traits::{CloudProvider, CloudProviderFactory};
use std::collections::HashMap;
use std::io::Read;
use std::sync::{PoisonError, RwLock};

/// Provider registry for plugin-based cloud provider creation
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ProviderRegistry {
    /// Registered cloud provider factories
    providers: RwLock<HashMap<String, Box<dyn CloudProviderFactory>>>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.list_providers())
            .finish()
    }
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cloud provider factory
    ///
    /// # Parameters
    ///
    /// - `name`: Provider name (e.g., "rightscale")
    /// - `factory`: Factory object for creating provider instances
    ///
    /// # Returns
    ///
    /// - `Err(Error::DuplicateProvider)`: A factory already uses this name;
    ///   the existing registration is kept
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use cloudprovider_core::registry::ProviderRegistry;
    /// # use cloudprovider_core::traits::{CloudProvider, CloudProviderFactory};
    /// # struct MyFactory;
    /// # impl CloudProviderFactory for MyFactory {
    /// #     fn create(&self, config: Option<&mut dyn std::io::Read>) -> cloudprovider_core::Result<Box<dyn CloudProvider>> { unimplemented!() }
    /// # }
    /// let registry = ProviderRegistry::new();
    /// registry.register_provider("myprovider", Box::new(MyFactory)).unwrap();
    /// ```
    pub fn register_provider(
        &self,
        name: impl Into<String>,
        factory: Box<dyn CloudProviderFactory>,
    ) -> Result<()> {
        let name = name.into();
        let mut providers = self.providers.write().unwrap_or_else(PoisonError::into_inner);

        if providers.contains_key(&name) {
            return Err(Error::DuplicateProvider(name));
        }

        tracing::info!("Registered cloud provider: {}", name);
        providers.insert(name, factory);
        Ok(())
    }

    /// Create a cloud provider from its configuration source
    ///
    /// # Parameters
    ///
    /// - `name`: Registered provider name
    /// - `config`: Configuration source handed to the factory, if any
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn CloudProvider>)`: Created provider instance
    /// - `Err(Error::UnknownProvider)`: No factory uses this name
    /// - `Err(Error)`: Whatever the factory reports
    pub fn create_provider(
        &self,
        name: &str,
        config: Option<&mut dyn Read>,
    ) -> Result<Box<dyn CloudProvider>> {
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);

        let factory = providers
            .get(name)
            .ok_or_else(|| Error::UnknownProvider(name.to_string()))?;

        tracing::debug!("Creating cloud provider: {}", name);
        factory.create(config)
    }

    /// List all registered provider names, sorted
    pub fn list_providers(&self) -> Vec<String> {
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a provider name is registered
    pub fn has_provider(&self, name: &str) -> bool {
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);
        providers.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Instances, TcpLoadBalancer, Zone, Zones};
    use async_trait::async_trait;
    use std::io::Cursor;
    use std::net::IpAddr;

    /// Provider that only offers zones, read from its config source
    struct ZoneOnlyProvider {
        zone: Zone,
    }

    #[async_trait]
    impl Zones for ZoneOnlyProvider {
        async fn get_zone(&self) -> Result<Zone> {
            Ok(self.zone.clone())
        }
    }

    impl CloudProvider for ZoneOnlyProvider {
        fn instances(&self) -> Option<&dyn Instances> {
            None
        }

        fn zones(&self) -> Option<&dyn Zones> {
            Some(self)
        }

        fn tcp_load_balancer(&self) -> Option<&dyn TcpLoadBalancer> {
            None
        }

        fn provider_name(&self) -> &'static str {
            "zone-only"
        }
    }

    fn zone_only_factory(config: Option<&mut dyn Read>) -> Result<Box<dyn CloudProvider>> {
        let region = crate::config::read_source("zone-only", config)?;
        Ok(Box::new(ZoneOnlyProvider {
            zone: Zone {
                failure_domain: "a".to_string(),
                region: region.trim().to_string(),
            },
        }))
    }

    /// Load balancer stand-in that only knows one name
    struct SingleBalancer;

    #[async_trait]
    impl TcpLoadBalancer for SingleBalancer {
        async fn exists(&self, name: &str, _region: &str) -> Result<bool> {
            Ok(name == "front")
        }

        async fn create(
            &self,
            name: &str,
            _region: &str,
            _external_ip: IpAddr,
            _port: u16,
            _hosts: &[String],
        ) -> Result<()> {
            Err(Error::unsupported(format!("create {}", name)))
        }

        async fn update(&self, _name: &str, _region: &str, _hosts: &[String]) -> Result<()> {
            Ok(())
        }

        async fn delete(&self, _name: &str, _region: &str) -> Result<()> {
            Ok(())
        }
    }

    struct FailingFactory;

    impl CloudProviderFactory for FailingFactory {
        fn create(&self, _config: Option<&mut dyn Read>) -> Result<Box<dyn CloudProvider>> {
            Err(Error::not_found("Mock provider not implemented"))
        }
    }

    #[test]
    fn test_registry_registration() {
        let registry = ProviderRegistry::new();

        assert!(!registry.has_provider("mock"));

        registry
            .register_provider("mock", Box::new(FailingFactory))
            .unwrap();

        assert!(registry.has_provider("mock"));
        assert_eq!(registry.list_providers(), vec!["mock".to_string()]);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let registry = ProviderRegistry::new();
        registry
            .register_provider("mock", Box::new(FailingFactory))
            .unwrap();

        let err = registry
            .register_provider("mock", Box::new(zone_only_factory))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateProvider(ref name) if name == "mock"));

        // The first factory is still the one used
        let err = registry
            .create_provider("mock", None)
            .err()
            .expect("failing factory is kept");
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_unknown_provider() {
        let registry = ProviderRegistry::new();
        let err = registry
            .create_provider("nope", None)
            .err()
            .expect("nothing registered");
        assert!(matches!(err, Error::UnknownProvider(ref name) if name == "nope"));
    }

    #[test]
    fn test_list_providers_sorted() {
        let registry = ProviderRegistry::new();
        registry
            .register_provider("zeta", Box::new(FailingFactory))
            .unwrap();
        registry
            .register_provider("alpha", Box::new(zone_only_factory))
            .unwrap();

        assert_eq!(registry.list_providers(), vec!["alpha", "zeta"]);
        assert!(format!("{:?}", registry).contains("alpha"));
    }

    #[test]
    fn test_function_factory_receives_source() {
        let registry = ProviderRegistry::new();
        registry
            .register_provider("zone-only", Box::new(zone_only_factory))
            .unwrap();

        let err = registry
            .create_provider("zone-only", None)
            .err()
            .expect("source is required");
        assert!(matches!(err, Error::MissingConfiguration(_)));

        let mut source = Cursor::new("us-east-1\n");
        let provider = registry
            .create_provider("zone-only", Some(&mut source))
            .unwrap();
        assert_eq!(provider.provider_name(), "zone-only");
        assert!(provider.instances().is_none());
        assert!(provider.tcp_load_balancer().is_none());
    }

    #[tokio::test]
    async fn test_capability_calls() {
        let mut source = Cursor::new("eu-west-1");
        let provider = zone_only_factory(Some(&mut source)).unwrap();

        let zone = provider.zones().expect("zones offered").get_zone().await.unwrap();
        assert_eq!(zone.region, "eu-west-1");
        assert_eq!(zone.failure_domain, "a");

        let balancer: &dyn TcpLoadBalancer = &SingleBalancer;
        assert!(balancer.exists("front", "eu-west-1").await.unwrap());
        assert!(!balancer.exists("back", "eu-west-1").await.unwrap());
        let err = balancer
            .create("back", "eu-west-1", IpAddr::from([10, 0, 0, 1]), 80, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
    }
}
