// Virtual device endpoints.
//
// Virtual devices are regular devices with `type = VIRTUAL`; listing uses
// the devices endpoint with a type filter, while creation has dedicated
// prototype-based endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Device, ItemsList, VirtualDeviceCreateRequest};

impl ApiClient {
    /// List virtual devices, optionally scoped to a location.
    ///
    /// `GET /v1/devices?type=VIRTUAL[&locationId=…]`
    pub async fn list_virtual_devices(
        &self,
        location_id: Option<&str>,
    ) -> Result<Vec<Device>, Error> {
        let mut params = vec![("type", "VIRTUAL".to_owned())];
        if let Some(location_id) = location_id {
            params.push(("locationId", location_id.to_owned()));
        }
        let list: ItemsList<Device> = self.get_with_params("devices", &params).await?;
        Ok(list.items)
    }

    /// Create a virtual device from a standard prototype.
    ///
    /// `POST /v1/virtualdevices/standard`
    pub async fn create_virtual_device_standard(
        &self,
        request: &VirtualDeviceCreateRequest,
    ) -> Result<Device, Error> {
        self.post("virtualdevices/standard", request).await
    }

    /// Create a virtual device from a device profile prototype.
    ///
    /// `POST /v1/virtualdevices/prototypes`
    pub async fn create_virtual_device_prototype(
        &self,
        request: &VirtualDeviceCreateRequest,
    ) -> Result<Device, Error> {
        self.post("virtualdevices/prototypes", request).await
    }
}
