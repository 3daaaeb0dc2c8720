// Location endpoints.

use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{ItemsList, Location, LocationItem};

impl ApiClient {
    /// List locations visible to the token.
    ///
    /// `GET /v1/locations`
    pub async fn list_locations(&self) -> Result<Vec<LocationItem>, Error> {
        let list: ItemsList<LocationItem> = self.get("locations").await?;
        Ok(list.items)
    }

    /// Get a single location.
    ///
    /// `GET /v1/locations/{locationId}`
    pub async fn get_location(&self, location_id: &str) -> Result<Location, Error> {
        self.get(&format!("locations/{location_id}")).await
    }

    /// Create a location. The payload is user-supplied JSON/YAML.
    ///
    /// `POST /v1/locations`
    pub async fn create_location(&self, location: &Value) -> Result<Location, Error> {
        self.post("locations", location).await
    }

    /// Update a location.
    ///
    /// `PUT /v1/locations/{locationId}`
    pub async fn update_location(
        &self,
        location_id: &str,
        location: &Value,
    ) -> Result<Location, Error> {
        self.put(&format!("locations/{location_id}"), location)
            .await
    }

    /// Delete a location.
    ///
    /// `DELETE /v1/locations/{locationId}`
    pub async fn delete_location(&self, location_id: &str) -> Result<(), Error> {
        self.delete(&format!("locations/{location_id}")).await
    }
}
