// Device endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Device, ItemsList};

impl ApiClient {
    /// List devices, optionally scoped to a location.
    ///
    /// `GET /v1/devices[?locationId=…]`
    pub async fn list_devices(&self, location_id: Option<&str>) -> Result<Vec<Device>, Error> {
        let list: ItemsList<Device> = match location_id {
            Some(location_id) => {
                self.get_with_params("devices", &[("locationId", location_id.to_owned())])
                    .await?
            }
            None => self.get("devices").await?,
        };
        Ok(list.items)
    }

    /// Get a single device.
    ///
    /// `GET /v1/devices/{deviceId}`
    pub async fn get_device(&self, device_id: &str) -> Result<Device, Error> {
        self.get(&format!("devices/{device_id}")).await
    }

    /// Delete a device.
    ///
    /// `DELETE /v1/devices/{deviceId}`
    pub async fn delete_device(&self, device_id: &str) -> Result<(), Error> {
        self.delete(&format!("devices/{device_id}")).await
    }
}
