//! Hardware adapter: bridges the sensor hub and status LED to the port traits.
//!
//! Owns the [`SensorHub`] and the [`StatusLed`], exposing them through
//! [`SensorPort`] and [`IndicatorPort`]. On non-espidf targets the
//! underlying drivers use simulation stubs.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{IndicatorPort, SensorPort};
use crate::drivers::status_led::StatusLed;
use crate::error::SensorError;
use crate::sensors::{Reading, SensorHub};

pub struct HardwareAdapter<P: OutputPin> {
    sensor_hub: SensorHub,
    led: StatusLed<P>,
}

impl<P: OutputPin> HardwareAdapter<P> {
    pub fn new(sensor_hub: SensorHub, led: StatusLed<P>) -> Self {
        Self { sensor_hub, led }
    }

    pub fn led(&self) -> &StatusLed<P> {
        &self.led
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: OutputPin> SensorPort for HardwareAdapter<P> {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.sensor_hub.read()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl<P: OutputPin> IndicatorPort for HardwareAdapter<P> {
    fn set_led(&mut self, on: bool) {
        self.led.set(on);
    }
}
