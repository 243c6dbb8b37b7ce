//! ESP32 time adapter.
//!
//! Implements [`ClockPort`] for the telemetry loop.
//!
//! - **`target_os = "espidf"`**: uptime from `esp_timer_get_time()`; sleeps
//!   block the FreeRTOS task through `std::thread::sleep`.
//! - **`not(target_os = "espidf")`**: `std::time::Instant` for host runs.
//!
//! Wall-clock time comes from `SystemTime` on both targets. Without an
//! SNTP sync the ESP32 RTC starts at the epoch, so timestamps are then
//! seconds since boot.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::app::ports::ClockPort;

pub struct Esp32TimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Seconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_secs(&self) -> u64 {
        (unsafe { esp_idf_sys::esp_timer_get_time() }) as u64 / 1_000_000
    }

    /// Seconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}

impl ClockPort for Esp32TimeAdapter {
    fn sleep_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }

    fn unix_time_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or_else(|_| self.uptime_secs(), |d| d.as_secs())
    }
}
