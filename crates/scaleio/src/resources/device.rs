//! Storage devices attached to SDS nodes.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client::Client;
use crate::error::Error;
use crate::types::Link;

use super::{Resource, StoragePool, first_match, relationship_path};

/// A raw disk of an SDS contributing capacity to a storage pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Path of the device on its SDS, e.g. `/dev/sdb`.
    #[serde(default)]
    pub device_current_pathname: Option<String>,
    #[serde(default)]
    pub device_original_pathname: Option<String>,
    #[serde(default)]
    pub device_state: Option<String>,
    #[serde(default)]
    pub error_state: Option<String>,
    #[serde(default)]
    pub capacity_limit_in_kb: Option<u64>,
    #[serde(default)]
    pub max_capacity_in_kb: Option<u64>,
    #[serde(default)]
    pub storage_pool_id: Option<String>,
    #[serde(default)]
    pub sds_id: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Whether the gateway tests a device before adding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeviceTestMode {
    /// Test the device, then start using it.
    #[default]
    TestAndActivate,
    /// Test the device only; activation is a separate step.
    TestOnly,
    /// Add the device without testing it.
    NoTest,
}

/// Body of the device add call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceParam {
    pub name: String,
    pub device_current_pathname: String,
    pub storage_pool_id: String,
    pub sds_id: String,
    pub test_mode: DeviceTestMode,
}

impl DeviceParam {
    /// Add the device at `path` on an SDS to a storage pool, named after
    /// its path.
    pub fn new(
        path: impl Into<String>,
        storage_pool_id: impl Into<String>,
        sds_id: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self {
            name: path.clone(),
            device_current_pathname: path,
            storage_pool_id: storage_pool_id.into(),
            sds_id: sds_id.into(),
            test_mode: DeviceTestMode::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_test_mode(mut self, test_mode: DeviceTestMode) -> Self {
        self.test_mode = test_mode;
        self
    }
}

impl Resource for Device {
    const KIND: &'static str = "Device";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn links(&self) -> &[Link] {
        &self.links
    }
}

impl Client {
    /// Attach the device at `path` on an SDS to a storage pool, returning
    /// the new device identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the device.
    pub async fn attach_device(
        &self,
        pool: &StoragePool,
        path: &str,
        sds_id: &str,
    ) -> Result<String, Error> {
        self.add_device(&DeviceParam::new(path, &pool.id, sds_id))
            .await
    }

    /// Add a device described by `param`, returning its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway rejects the device.
    #[instrument(skip(self, param), fields(path = %param.device_current_pathname, sds = %param.sds_id))]
    pub async fn add_device(&self, param: &DeviceParam) -> Result<String, Error> {
        self.create(Device::KIND, param).await
    }

    /// Fetch a device by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn device(&self, id: &str) -> Result<Device, Error> {
        self.instance(id).await
    }

    /// Devices of the storage pool with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn pool_devices(&self, storage_pool_id: &str) -> Result<Vec<Device>, Error> {
        self.get(&relationship_path(
            StoragePool::KIND,
            storage_pool_id,
            Device::KIND,
        ))
        .await
    }

    /// First device of a storage pool matching `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing matches.
    pub async fn find_device<F>(&self, storage_pool_id: &str, predicate: F) -> Result<Device, Error>
    where
        F: Fn(&Device) -> bool,
    {
        let all = self.pool_devices(storage_pool_id).await?;
        first_match(all, predicate, Device::KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_param_defaults_to_path_name_and_activation() {
        let param = DeviceParam::new("/dev/sdb", "sp1", "sds1");
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            serde_json::json!({
                "name": "/dev/sdb",
                "deviceCurrentPathname": "/dev/sdb",
                "storagePoolId": "sp1",
                "sdsId": "sds1",
                "testMode": "testAndActivate"
            })
        );
    }

    #[test]
    fn device_param_overrides() {
        let param = DeviceParam::new("/dev/sdc", "sp1", "sds1")
            .with_name("fast-disk")
            .with_test_mode(DeviceTestMode::NoTest);
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value["name"], "fast-disk");
        assert_eq!(value["testMode"], "noTest");
    }

    #[test]
    fn decodes_device() {
        let device: Device = serde_json::from_str(
            r#"{"id":"a0e1b23c00000000","name":"/dev/sdb","deviceCurrentPathname":"/dev/sdb",
                "deviceState":"Normal","capacityLimitInKb":104857600,
                "storagePoolId":"sp1","sdsId":"sds1","links":[]}"#,
        )
        .unwrap();
        assert_eq!(device.device_state.as_deref(), Some("Normal"));
        assert_eq!(device.capacity_limit_in_kb, Some(104_857_600));
        assert_eq!(device.sds_id.as_deref(), Some("sds1"));
    }
}
