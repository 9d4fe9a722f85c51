//! `adb` backed device bridge

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::process::Command;

use super::error::DeviceError;
use super::parse::{parse_device_list, parse_folder_listing};
use super::{Device, DeviceBridge};
use crate::config::DEFAULT_ADB_SERVER_ADDR;

const SERVER_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Device bridge that shells out to the Android Debug Bridge
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: PathBuf,
    server_addr: String,
}

impl AdbBridge {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            server_addr: DEFAULT_ADB_SERVER_ADDR.to_string(),
        }
    }

    pub fn with_server_addr(mut self, addr: impl Into<String>) -> Self {
        self.server_addr = addr.into();
        self
    }

    /// Whether something is listening on the adb server port
    pub async fn is_server_running(&self) -> bool {
        matches!(
            tokio::time::timeout(SERVER_PROBE_TIMEOUT, TcpStream::connect(&self.server_addr)).await,
            Ok(Ok(_))
        )
    }

    /// Start the adb server unless it is already up.
    ///
    /// Returns `true` if the server had to be started.
    pub async fn ensure_server(&self) -> Result<bool, DeviceError> {
        if self.is_server_running().await {
            tracing::info!("ADB server is already running");
            return Ok(false);
        }

        tracing::info!("Starting ADB server");
        let output = self.run(&["start-server"]).await?;
        tracing::debug!(
            "adb start-server output: {}",
            combined_output(&output).trim()
        );
        Ok(true)
    }

    async fn run(&self, args: &[&str]) -> Result<Output, DeviceError> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|source| DeviceError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(DeviceError::CommandFailed {
                command: format!("adb {}", args.join(" ")),
                status: output.status.to_string(),
                output: combined_output(&output).trim().to_string(),
            });
        }

        Ok(output)
    }
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

#[async_trait]
impl DeviceBridge for AdbBridge {
    async fn list_devices(&self) -> Result<Vec<Device>, DeviceError> {
        let output = self.run(&["devices", "-l"]).await?;
        Ok(parse_device_list(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn list_folder(&self, path: &str, serial: &str) -> Result<Vec<String>, DeviceError> {
        let output = self.run(&["-s", serial, "shell", "ls", path]).await?;
        Ok(parse_folder_listing(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn push(
        &self,
        local_path: &Path,
        remote_path: &str,
        serial: &str,
    ) -> Result<(), DeviceError> {
        let local = local_path.to_string_lossy().into_owned();
        let output = self
            .run(&["-s", serial, "push", local.as_str(), remote_path])
            .await?;
        tracing::debug!("adb push: {}", combined_output(&output).trim());
        Ok(())
    }
}
