//! Interactive device selection

use std::io::{BufRead, Write};

use synth_sync_core::{Device, DeviceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("Invalid choice: {0:?}")]
    InvalidChoice(String),

    #[error("Device {0} is not connected")]
    UnknownSerial(String),

    #[error("Failed to read selection: {0}")]
    Io(#[from] std::io::Error),
}

/// Print the device list and read a 1-based index from `input`.
///
/// There is no re-prompt: anything other than a listed index is an error.
pub fn select_device<'a, R: BufRead, W: Write>(
    devices: &'a [Device],
    mut input: R,
    mut out: W,
) -> Result<&'a Device, SelectError> {
    if devices.is_empty() {
        return Err(DeviceError::NoDevices.into());
    }

    writeln!(out, "Available devices:")?;
    for (i, device) in devices.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, device)?;
    }
    write!(out, "Enter the number of the device you want to select: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let choice = line.trim();

    choice
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=devices.len()).contains(n))
        .map(|n| &devices[n - 1])
        .ok_or_else(|| SelectError::InvalidChoice(choice.to_string()))
}

/// Pick a device by serial without prompting
pub fn find_device<'a>(devices: &'a [Device], serial: &str) -> Result<&'a Device, SelectError> {
    if devices.is_empty() {
        return Err(DeviceError::NoDevices.into());
    }
    devices
        .iter()
        .find(|d| d.serial == serial)
        .ok_or_else(|| SelectError::UnknownSerial(serial.to_string()))
}
