//! Core traits for cloud providers
//!
//! This module defines the abstract interfaces that all providers implement.
//!
//! - [`CloudProvider`]: Entry point exposing the optional capabilities
//! - [`Instances`]: List instances and resolve their addresses
//! - [`Zones`]: Report the failure domain and region of the local node
//! - [`TcpLoadBalancer`]: Manage external TCP load balancers

pub mod cloud_provider;
pub mod instances;
pub mod load_balancer;
pub mod zones;

pub use cloud_provider::{CloudProvider, CloudProviderFactory};
pub use instances::Instances;
pub use load_balancer::TcpLoadBalancer;
pub use zones::{Zone, Zones};
