//! Device endpoints.

use sensit_core::error::{SensitError, SensitResult};
use sensit_models::{Device, DeviceDetail};

use crate::api::SensitApi;

impl SensitApi {
    /// List the devices of the account.
    pub async fn list_devices(&self) -> SensitResult<Vec<Device>> {
        let resp = self.get_accepted("/devices").await?;
        let list = resp
            .data()?
            .as_array()
            .ok_or_else(|| SensitError::Serialization("device list is not an array".into()))?;
        list.iter().map(Device::from_server_map).collect()
    }

    /// Get the sensor map and mode of one device.
    pub async fn device_detail(&self, device_id: &str) -> SensitResult<DeviceDetail> {
        let resp = self.get_accepted(&format!("/devices/{device_id}/")).await?;
        DeviceDetail::from_server_map(resp.data()?)
    }
}
