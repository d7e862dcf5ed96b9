// # Zones Trait
//
// Defines the interface for reporting where the local node runs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Placement of a node within a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Failure domain (availability zone) of the node
    pub failure_domain: String,
    /// Region of the node
    pub region: String,
}

/// Trait for providers that expose zone information
#[async_trait]
pub trait Zones: Send + Sync {
    /// Get the zone of the node this process runs on
    async fn get_zone(&self) -> Result<Zone, crate::Error>;
}
