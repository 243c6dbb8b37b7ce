//! Device identity derived from the ESP32 factory MAC address.
//!
//! Used when no device ID was configured at build time. Produces a
//! stable ID in the form `node-xxyyzz` (last 3 bytes of the 6-byte MAC,
//! lowercase hex), deterministic across reboots.

use core::fmt::Write;

use crate::config::DeviceIdString;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Read the factory MAC address from eFuse.
#[cfg(target_os = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    // SAFETY: writes exactly 6 bytes into `mac`.
    unsafe {
        esp_idf_sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: returns a deterministic fake MAC.
#[cfg(not(target_os = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE]
}

/// Derive the device ID from the last 3 MAC bytes.
pub fn device_id(mac: &MacAddress) -> DeviceIdString {
    let mut id = DeviceIdString::new();
    let _ = write!(id, "node-{:02x}{:02x}{:02x}", mac[3], mac[4], mac[5]);
    id
}
