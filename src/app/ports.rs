//! Port traits: the hexagonal boundary between the telemetry loop and the
//! platform.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TelemetryService (domain)
//! ```
//!
//! Adapters (ESP-IDF drivers or host simulations) implement these traits.
//! The [`TelemetryService`](super::service::TelemetryService) consumes them
//! via generics, so the loop never touches hardware directly and runs
//! unchanged under test with mocks.

use core::net::Ipv4Addr;

use crate::error::{JoinError, SendError, SensorError};
use crate::sensors::Reading;

// ───────────────────────────────────────────────────────────────
// Sensor port (hardware → domain)
// ───────────────────────────────────────────────────────────────

pub trait SensorPort {
    /// Read the temperature (°F, 0.1 resolution) and humidity.
    fn read(&mut self) -> Result<Reading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (domain → status LED)
// ───────────────────────────────────────────────────────────────

pub trait IndicatorPort {
    fn set_led(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Connectivity port (domain ↔ WiFi station)
// ───────────────────────────────────────────────────────────────

/// Association state as reported by the WiFi driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Idle,
    Connecting,
    /// Associated and holding an IP address.
    Connected,
    /// Terminal failure for this attempt (wrong password, AP not found).
    Failed,
}

impl LinkStatus {
    /// `true` once polling can stop.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Connected | Self::Failed)
    }
}

pub trait ConnectivityPort {
    /// Configure the station and start associating. Does not wait.
    fn begin_join(&mut self, ssid: &str, password: &str) -> Result<(), JoinError>;

    /// Current association state.
    fn link_status(&mut self) -> LinkStatus;

    /// Station IPv4 address, once connected.
    fn ip_address(&self) -> Option<Ipv4Addr>;
}

// ───────────────────────────────────────────────────────────────
// Uplink port (domain → HTTP server)
// ───────────────────────────────────────────────────────────────

/// Whatever the server answered. Any status counts as delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Truncated response body.
    pub body: Vec<u8>,
}

pub trait UplinkPort {
    /// POST `body` with `Content-Type: application/json`.
    fn post_json(&mut self, url: &str, body: &str) -> Result<HttpResponse, SendError>;

    /// Plain GET, used for the one-off health probe.
    fn get(&mut self, url: &str) -> Result<HttpResponse, SendError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

pub trait ClockPort {
    /// Block the calling thread.
    fn sleep_ms(&mut self, ms: u32);

    /// Wall-clock Unix seconds. Seconds since boot if the clock was never set.
    fn unix_time_secs(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The service emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port; adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
