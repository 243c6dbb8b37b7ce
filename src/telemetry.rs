//! Telemetry record and its JSON wire format.
//!
//! One record is built per send cycle and POSTed as a flat JSON object:
//!
//! ```json
//! {"device_id":"pico_001","temperature":72.3,"humidity":50.0,
//!  "timestamp":1718000000,"status":"active"}
//! ```
//!
//! Test-mode records add `light_level`; live records omit it.

use serde::{Deserialize, Serialize};

use crate::config::{DeviceIdString, TEST_ID_SUFFIX};
use crate::error::CycleError;
use crate::sensors::Reading;

/// Values carried by the test-mode dummy record.
pub const TEST_TEMPERATURE: f32 = 23.5;
pub const TEST_HUMIDITY: f32 = 45.2;
pub const TEST_LIGHT_LEVEL: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
    Testing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub device_id: DeviceIdString,
    /// Degrees Fahrenheit, one decimal place.
    pub temperature: f32,
    /// Relative humidity, percent.
    pub humidity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_level: Option<u8>,
    /// Unix seconds.
    pub timestamp: u64,
    pub status: DeviceStatus,
}

impl TelemetryRecord {
    /// A sensor-backed record with status `active`.
    pub fn live(device_id: &DeviceIdString, reading: Reading, timestamp: u64) -> Self {
        Self {
            device_id: device_id.clone(),
            temperature: reading.temperature_f,
            humidity: reading.humidity_percent,
            light_level: None,
            timestamp,
            status: DeviceStatus::Active,
        }
    }

    /// The fixed dummy record used to exercise the server path.
    pub fn test_pattern(device_id: &DeviceIdString, timestamp: u64) -> Self {
        let mut id = device_id.clone();
        // DeviceIdString leaves room for the suffix behind any valid configured ID.
        let _ = id.push_str(TEST_ID_SUFFIX);
        Self {
            device_id: id,
            temperature: TEST_TEMPERATURE,
            humidity: TEST_HUMIDITY,
            light_level: Some(TEST_LIGHT_LEVEL),
            timestamp,
            status: DeviceStatus::Testing,
        }
    }

    /// Serialise to the JSON body sent to the server.
    ///
    /// Non-finite floats are refused: JSON has no representation for them
    /// and the server would receive `null`.
    pub fn encode(&self) -> Result<String, CycleError> {
        if !self.temperature.is_finite() || !self.humidity.is_finite() {
            return Err(CycleError::Encode);
        }
        serde_json::to_string(self).map_err(|_| CycleError::Encode)
    }

    pub fn decode(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ---------------------------------------------------------------------------
// Server acknowledgement
// ---------------------------------------------------------------------------

/// Body returned by the collector on `/data`.
///
/// Parsed only for the log line; a missing or malformed ack never changes
/// the outcome of a send.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerAck {
    pub status: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ServerAck {
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status.as_deref(), Some("success" | "ok"))
    }

    /// Human-readable summary: message, else error, else status.
    pub fn summary(&self) -> &str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .or(self.status.as_deref())
            .unwrap_or("")
    }
}
