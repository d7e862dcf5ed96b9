// # RightScale Cloud Provider
//
// This crate provides the RightScale cloud provider for orchestrators built
// on `cloudprovider-core`.
//
// ## How it reaches RightScale
//
// The provider never talks to the RightScale API directly. The RightLink
// agent (RLL) on every instance runs an authenticated proxy on localhost;
// the provider sends plain HTTP GETs to that proxy with the shared secret
// in the `RLL_SECRET` header, and the agent forwards them to the API.
//
// ## Capabilities
//
// - Instances: list server names, resolve a server's private IP
// - Zones: not supported
// - TCP load balancer: not supported
//
// ## Request model
//
// - One HTTP request per query, no retry, no caching
// - Transport errors and non-2xx statuses are returned, never masked
// - The secret never appears in logs or `Debug` output
//
// ## API Reference
//
// - List servers: GET `/api/servers?filter[]=name==<name>`
// - With instance details: GET `/api/servers?filter[]=name==<name>&view=instance_detail`

pub mod api;
pub mod config;

pub use api::{CurrentInstance, ServerRecord};
pub use config::ProviderConfig;

use async_trait::async_trait;
use cloudprovider_core::traits::{CloudProvider, CloudProviderFactory, Instances, TcpLoadBalancer, Zones};
use cloudprovider_core::{Error, ProviderRegistry, Result};
use std::io::Read;
use std::net::IpAddr;

/// Name under which the provider registers
pub const PROVIDER_NAME: &str = "rightscale";

/// RightScale cloud provider
///
/// Holds its configuration read-only and a connection-pooled HTTP client,
/// so one instance can serve concurrent queries.
pub struct RightScaleCloud {
    /// Secret and proxy port
    config: ProviderConfig,

    /// Base URL of the local API proxy
    base_url: String,

    /// HTTP client for proxy requests
    client: reqwest::Client,
}

impl std::fmt::Debug for RightScaleCloud {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RightScaleCloud")
            .field("config", &self.config)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl RightScaleCloud {
    /// Create a provider talking to the proxy on `localhost:<port>`
    pub fn new(config: ProviderConfig) -> Self {
        let base_url = config.proxy_url();
        Self::with_base_url(config, base_url)
    }

    /// Create a provider talking to the proxy at `base_url`
    ///
    /// Used when the proxy is reachable under another address than
    /// `localhost`, e.g. from a sidecar.
    pub fn with_base_url(config: ProviderConfig, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            config,
            base_url,
            // The proxy is local; never route through HTTP(S)_PROXY
            client: reqwest::Client::builder()
                .no_proxy()
                .build()
                .unwrap_or_else(|e| {
                    tracing::warn!(
                        "Failed to build proxy-less HTTP client, falling back to defaults \
                         (HTTP(S)_PROXY will be honored): {}",
                        e
                    );
                    reqwest::Client::new()
                }),
        }
    }

    /// Create a provider from an optional configuration source
    pub fn from_source(source: Option<&mut dyn Read>) -> Result<Self> {
        let config = ProviderConfig::from_source(source)?;
        Ok(Self::new(config))
    }

    /// Base URL of the local API proxy
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The loaded configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Send one GET to the servers index and decode the response
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /api/servers?<query>
    /// RLL_SECRET: <secret>
    /// ```
    async fn get_servers(&self, query: &[(&str, String)]) -> Result<Vec<ServerRecord>> {
        let url = format!("{}{}", self.base_url, api::SERVERS_PATH);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header(api::SECRET_HEADER, self.config.secret())
            .query(query)
            .send()
            .await
            .map_err(|e| Error::transport(format!("request to local proxy failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(Error::transport(format!(
                "local proxy returned {}: {}",
                status,
                error_text.trim()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("failed to read response body: {}", e)))?;

        let servers = api::decode_servers(&body)?;
        tracing::debug!("Decoded {} server record(s)", servers.len());
        Ok(servers)
    }
}

#[async_trait]
impl Instances for RightScaleCloud {
    async fn resolve_ip_address(&self, name: &str) -> Result<IpAddr> {
        let servers = self
            .get_servers(&[api::name_filter(name), api::instance_detail_view()])
            .await?;

        let server = match servers.as_slice() {
            [] => {
                return Err(Error::not_found(format!(
                    "could not retrieve server with name {}",
                    name
                )));
            }
            [server] => server,
            _ => {
                tracing::warn!("{} servers share the name {}", servers.len(), name);
                return Err(Error::ambiguous(name, servers.len()));
            }
        };

        let ip = server.first_private_ip().inspect_err(|e| {
            tracing::warn!("Unusable instance details for {}: {}", name, e);
        })?;

        tracing::debug!("Resolved {} to {}", name, ip);
        Ok(ip)
    }

    async fn list_instances(&self, filter: &str) -> Result<Vec<String>> {
        let servers = self.get_servers(&[api::name_filter(filter)]).await?;
        Ok(servers.into_iter().map(|server| server.name).collect())
    }
}

impl CloudProvider for RightScaleCloud {
    fn instances(&self) -> Option<&dyn Instances> {
        Some(self)
    }

    // Zones not supported
    fn zones(&self) -> Option<&dyn Zones> {
        None
    }

    // External load balancer not supported
    fn tcp_load_balancer(&self) -> Option<&dyn TcpLoadBalancer> {
        None
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating RightScale providers
pub struct RightScaleFactory;

impl CloudProviderFactory for RightScaleFactory {
    fn create(&self, config: Option<&mut dyn Read>) -> Result<Box<dyn CloudProvider>> {
        let cloud = RightScaleCloud::from_source(config)?;
        tracing::info!("RightScale provider using local proxy at {}", cloud.base_url());
        Ok(Box::new(cloud))
    }
}

/// Register the RightScale provider with a registry
///
/// Call once during startup.
///
/// # Example
///
/// ```rust
/// use cloudprovider_core::ProviderRegistry;
///
/// let registry = ProviderRegistry::new();
/// cloudprovider_rightscale::register(&registry).unwrap();
/// assert!(registry.has_provider("rightscale"));
/// ```
pub fn register(registry: &ProviderRegistry) -> Result<()> {
    registry.register_provider(PROVIDER_NAME, Box::new(RightScaleFactory))
}
