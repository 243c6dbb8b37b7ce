//! Node configuration.
//!
//! Network credentials and the server URL are compile-time constants.
//! Each can be overridden when building the firmware by exporting the
//! matching `THERMOPOST_*` environment variable, so secrets stay out of
//! the source tree.

use core::fmt;

use serde::Serialize;

/// Device identifier carried in every record. Sized so the test-mode
/// suffix always fits behind a maximum-length configured ID.
pub type DeviceIdString = heapless::String<40>;

/// Longest device ID accepted from configuration.
pub const MAX_DEVICE_ID_LEN: usize = 32;

/// Suffix appended to the device ID in test-mode payloads.
pub const TEST_ID_SUFFIX: &str = "_test";

// ---------------------------------------------------------------------------
// Build-time constants
// ---------------------------------------------------------------------------

pub const WIFI_SSID: &str = match option_env!("THERMOPOST_WIFI_SSID") {
    Some(v) => v,
    None => "thermopost-ap",
};

pub const WIFI_PASSWORD: &str = match option_env!("THERMOPOST_WIFI_PASSWORD") {
    Some(v) => v,
    None => "change-me-please",
};

/// Must include the scheme and port.
pub const SERVER_URL: &str = match option_env!("THERMOPOST_SERVER_URL") {
    Some(v) => v,
    None => "http://172.31.208.1:8080/data",
};

/// Empty means "derive from the factory MAC at boot".
pub const DEVICE_ID: &str = match option_env!("THERMOPOST_DEVICE_ID") {
    Some(v) => v,
    None => "",
};

// ---------------------------------------------------------------------------
// Payload mode
// ---------------------------------------------------------------------------

/// Which record the node sends each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadMode {
    /// Sensor-backed record, status `active`.
    Live,
    /// Fixed dummy record, status `testing`. The sensor is not read.
    Test,
}

// ---------------------------------------------------------------------------
// NodeConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct NodeConfig {
    /// Identifier reported as `device_id`.
    pub device_id: DeviceIdString,
    pub wifi_ssid: &'static str,
    #[serde(skip_serializing)]
    pub wifi_password: &'static str,
    /// Endpoint receiving the JSON POST.
    pub server_url: &'static str,
    pub payload_mode: PayloadMode,

    /// Reported humidity (%); the node has no humidity sensor.
    pub default_humidity_percent: f32,

    // --- Timing ---
    /// Pause after every delivered or failed send (seconds).
    pub send_interval_secs: u32,
    /// Pause after an unexpected cycle error (seconds).
    pub error_backoff_secs: u32,
    /// Link-status polls before the join is declared failed.
    pub wifi_max_attempts: u32,
    /// Delay between link-status polls (milliseconds).
    pub wifi_poll_interval_ms: u32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let mut device_id = DeviceIdString::new();
        // An over-long override stays empty here; boot checks
        // `device_id_override()` and refuses to start.
        if let Ok(Some(id)) = device_id_override() {
            let _ = device_id.push_str(id);
        }
        Self {
            device_id,
            wifi_ssid: WIFI_SSID,
            wifi_password: WIFI_PASSWORD,
            server_url: SERVER_URL,
            payload_mode: if cfg!(feature = "test-payload") {
                PayloadMode::Test
            } else {
                PayloadMode::Live
            },

            default_humidity_percent: 50.0,

            send_interval_secs: 10,
            error_backoff_secs: 5,
            wifi_max_attempts: 10,
            wifi_poll_interval_ms: 1000,
        }
    }
}

/// The build-time device ID override, if one was given.
pub fn device_id_override() -> Result<Option<&'static str>, ConfigError> {
    check_device_id_override(DEVICE_ID)
}

fn check_device_id_override(raw: &str) -> Result<Option<&str>, ConfigError> {
    match raw.len() {
        0 => Ok(None),
        n if n > MAX_DEVICE_ID_LEN => Err(ConfigError::DeviceIdTooLong),
        _ => Ok(Some(raw)),
    }
}

impl NodeConfig {
    /// Replace the device ID. Rejects IDs longer than [`MAX_DEVICE_ID_LEN`].
    pub fn set_device_id(&mut self, id: &str) -> Result<(), ConfigError> {
        if id.len() > MAX_DEVICE_ID_LEN {
            return Err(ConfigError::DeviceIdTooLong);
        }
        self.device_id.clear();
        self.device_id
            .push_str(id)
            .map_err(|_| ConfigError::DeviceIdTooLong)
    }

    /// Check every field the telemetry loop depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_id.is_empty() {
            return Err(ConfigError::MissingDeviceId);
        }
        if self.device_id.len() > MAX_DEVICE_ID_LEN {
            return Err(ConfigError::DeviceIdTooLong);
        }
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl);
        }
        if host_of(self.server_url).is_empty() {
            return Err(ConfigError::InvalidUrl);
        }
        if self.send_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval("send_interval_secs"));
        }
        if self.error_backoff_secs == 0 {
            return Err(ConfigError::ZeroInterval("error_backoff_secs"));
        }
        if self.wifi_max_attempts == 0 {
            return Err(ConfigError::ZeroInterval("wifi_max_attempts"));
        }
        if self.wifi_poll_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("wifi_poll_interval_ms"));
        }
        if !self.default_humidity_percent.is_finite()
            || !(0.0..=100.0).contains(&self.default_humidity_percent)
        {
            return Err(ConfigError::HumidityOutOfRange);
        }
        validate_ssid(self.wifi_ssid)?;
        validate_password(self.wifi_password)?;
        Ok(())
    }

    /// The server's health route: the data URL with its path replaced by `/health`.
    pub fn health_url(&self) -> Option<String> {
        let scheme_end = self.server_url.find("://")? + 3;
        let rest = &self.server_url[scheme_end..];
        let authority_end = rest.find('/').unwrap_or(rest.len());
        Some(format!(
            "{}{}/health",
            &self.server_url[..scheme_end],
            &rest[..authority_end]
        ))
    }
}

fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or("", |(_, r)| r);
    let authority = rest.split('/').next().unwrap_or("");
    authority.split(':').next().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Credential validation
// ---------------------------------------------------------------------------

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// SSID: 1-32 printable ASCII bytes.
pub fn validate_ssid(ssid: &str) -> Result<(), ConfigError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConfigError::InvalidSsid);
    }
    Ok(())
}

/// Password: empty (open network) or 8-64 bytes (WPA2).
pub fn validate_password(password: &str) -> Result<(), ConfigError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConfigError::InvalidPassword);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    MissingDeviceId,
    DeviceIdTooLong,
    InvalidUrl,
    InvalidSsid,
    InvalidPassword,
    HumidityOutOfRange,
    /// The named timing field is zero.
    ZeroInterval(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDeviceId => write!(f, "device ID is empty"),
            Self::DeviceIdTooLong => {
                write!(f, "device ID longer than {MAX_DEVICE_ID_LEN} bytes")
            }
            Self::InvalidUrl => write!(f, "server URL must be http:// or https:// with a host"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::HumidityOutOfRange => write!(f, "default humidity must be within 0-100%"),
            Self::ZeroInterval(field) => write!(f, "{field} must be non-zero"),
        }
    }
}

impl core::error::Error for ConfigError {}
