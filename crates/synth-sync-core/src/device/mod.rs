//! Connected devices and the bridge used to reach them

mod adb;
mod error;
mod parse;

pub use adb::AdbBridge;
pub use error::DeviceError;
pub use parse::{parse_device_list, parse_folder_listing};

use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// A device reported by the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub serial: String,
    pub model: String,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Serial: {}, Model: {}", self.serial, self.model)
    }
}

/// Operations the sync pipeline needs from a device bridge.
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    /// Devices that are connected and authorized
    async fn list_devices(&self) -> Result<Vec<Device>, DeviceError>;

    /// Names of the entries in `path` on the device
    async fn list_folder(&self, path: &str, serial: &str) -> Result<Vec<String>, DeviceError>;

    /// Copy `local_path` to `remote_path` on the device
    async fn push(&self, local_path: &Path, remote_path: &str, serial: &str)
        -> Result<(), DeviceError>;
}

/// The one connection to the selected device.
///
/// Pushes take `&mut self`, so a session can only ever have a single
/// transfer in flight.
pub struct DeviceSession<B: DeviceBridge> {
    bridge: B,
    device: Device,
}

impl<B: DeviceBridge> DeviceSession<B> {
    pub fn new(bridge: B, device: Device) -> Self {
        Self { bridge, device }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub async fn list_folder(&self, path: &str) -> Result<Vec<String>, DeviceError> {
        self.bridge.list_folder(path, &self.device.serial).await
    }

    pub async fn push(&mut self, local_path: &Path, remote_path: &str) -> Result<(), DeviceError> {
        self.bridge
            .push(local_path, remote_path, &self.device.serial)
            .await
    }
}

/// Join a device folder and a file name with exactly one `/` between them
pub fn remote_path(folder: &str, name: &str) -> String {
    format!("{}/{}", folder.trim_end_matches('/'), name)
}
