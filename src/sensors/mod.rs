//! Sensor subsystem: the temperature driver and the aggregating [`SensorHub`].
//!
//! The hub produces one [`Reading`] per send cycle. The board carries no
//! humidity sensor, so humidity is the configured constant.

pub mod temperature;

use crate::error::SensorError;
use temperature::TemperatureSensor;

/// One point-in-time sensor reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Degrees Fahrenheit, rounded to 0.1.
    pub temperature_f: f32,
    pub humidity_percent: f32,
}

pub struct SensorHub {
    pub temperature: TemperatureSensor,
    humidity_percent: f32,
}

impl SensorHub {
    pub fn new(temperature: TemperatureSensor, humidity_percent: f32) -> Self {
        Self {
            temperature,
            humidity_percent,
        }
    }

    pub fn read(&mut self) -> Result<Reading, SensorError> {
        let t = self.temperature.read()?;
        log::debug!("ADC raw={} -> {:.2}°C / {:.1}°F", t.raw, t.celsius, t.fahrenheit);
        Ok(Reading {
            temperature_f: t.fahrenheit,
            humidity_percent: self.humidity_percent,
        })
    }
}
