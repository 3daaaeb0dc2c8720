// Capability endpoints.
//
// Capabilities are keyed by (id, version); the CLI always operates on
// version 1 for custom capabilities, matching platform behavior.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Capability, CapabilityNamespace, CapabilitySummary, ItemsList};

impl ApiClient {
    /// List standard capabilities.
    ///
    /// `GET /v1/capabilities`
    pub async fn list_capabilities(&self) -> Result<Vec<CapabilitySummary>, Error> {
        let list: ItemsList<CapabilitySummary> = self.get("capabilities").await?;
        Ok(list.items)
    }

    /// List custom capabilities under a namespace.
    ///
    /// `GET /v1/capabilities/namespaces/{namespace}`
    pub async fn list_namespaced_capabilities(
        &self,
        namespace: &str,
    ) -> Result<Vec<CapabilitySummary>, Error> {
        let list: ItemsList<CapabilitySummary> = self
            .get(&format!("capabilities/namespaces/{namespace}"))
            .await?;
        Ok(list.items)
    }

    /// List capability namespaces owned by the token's principal.
    ///
    /// `GET /v1/capabilities/namespaces`
    pub async fn list_capability_namespaces(&self) -> Result<Vec<CapabilityNamespace>, Error> {
        let list: ItemsList<CapabilityNamespace> = self.get("capabilities/namespaces").await?;
        Ok(list.items)
    }

    /// Get a capability at a specific version.
    ///
    /// `GET /v1/capabilities/{capabilityId}/{version}`
    pub async fn get_capability(
        &self,
        capability_id: &str,
        version: u32,
    ) -> Result<Capability, Error> {
        self.get(&format!("capabilities/{capability_id}/{version}"))
            .await
    }

    /// Create a custom capability.
    ///
    /// `POST /v1/capabilities`
    pub async fn create_capability(&self, capability: &Value) -> Result<Capability, Error> {
        self.post("capabilities", capability).await
    }

    /// Update a custom capability.
    ///
    /// `PUT /v1/capabilities/{capabilityId}/{version}`
    pub async fn update_capability(
        &self,
        capability_id: &str,
        version: u32,
        capability: &Value,
    ) -> Result<Capability, Error> {
        self.put(
            &format!("capabilities/{capability_id}/{version}"),
            capability,
        )
        .await
    }

    /// Delete a custom capability.
    ///
    /// `DELETE /v1/capabilities/{capabilityId}/{version}`
    pub async fn delete_capability(&self, capability_id: &str, version: u32) -> Result<(), Error> {
        self.delete(&format!("capabilities/{capability_id}/{version}"))
            .await
    }
}
