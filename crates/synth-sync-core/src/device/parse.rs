//! Parsing of adb's text output

use super::Device;

const UNKNOWN_MODEL: &str = "(unknown)";

/// Parse `adb devices -l` output.
///
/// Only rows in the `device` state are kept; `unauthorized`, `offline`
/// and similar rows cannot be pushed to.
pub fn parse_device_list(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter(|line| !line.starts_with("List of devices") && !line.trim().is_empty())
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 2 || fields[1] != "device" {
                return None;
            }
            let model = fields
                .iter()
                .find_map(|f| f.strip_prefix("model:"))
                .unwrap_or(UNKNOWN_MODEL);
            Some(Device {
                serial: fields[0].to_string(),
                model: model.to_string(),
            })
        })
        .collect()
}

/// Parse `adb shell ls <dir>` output into file names
pub fn parse_folder_listing(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
