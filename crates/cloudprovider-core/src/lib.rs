// # cloudprovider-core
//
// Core library for orchestrator cloud providers.
//
// ## Architecture Overview
//
// This library provides the provider-neutral pieces every cloud provider
// plugin builds on:
// - **CloudProvider**: Trait exposing the optional capabilities of a provider
// - **Instances**: Trait for listing instances and resolving their addresses
// - **Zones** / **TcpLoadBalancer**: Capabilities a provider may decline
// - **ProviderRegistry**: Explicit, name-keyed registry of provider factories
// - **read_source**: Shared handling of absent or empty configuration sources
//
// ## Design Principles
//
// 1. **Plugin-Based**: Providers register a factory under a name at startup
// 2. **Stateless Queries**: Every query is one independent request/response
// 3. **Library-First**: The registry is a value, not process-global state

pub mod config;
pub mod error;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::read_source;
pub use error::{Error, Result};
pub use registry::ProviderRegistry;
pub use traits::{CloudProvider, CloudProviderFactory, Instances, TcpLoadBalancer, Zone, Zones};
