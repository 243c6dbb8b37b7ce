//! Analog temperature sensor on ADC1.
//!
//! Linear sensor: 0.706 V at 27 °C, slope −1.721 mV/°C. The reading is
//! reported in Fahrenheit rounded to 0.1 °F, which is the resolution the
//! collector stores.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

/// Mid-scale code: ~1.65 V, roughly 77 °F.
static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(2048);

/// Inject the raw ADC code returned by the next host-side reads.
pub fn sim_set_temp_adc(raw: u16) {
    SIM_TEMP_ADC.store(raw, Ordering::Relaxed);
}

pub const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;
const V_AT_27C: f32 = 0.706;
const SLOPE_V_PER_C: f32 = 0.001_721;

#[derive(Debug, Clone, Copy)]
pub struct TemperatureReading {
    pub raw: u16,
    pub celsius: f32,
    pub fahrenheit: f32,
}

pub struct TemperatureSensor {
    _adc_gpio: i32,
}

impl TemperatureSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self { _adc_gpio: adc_gpio }
    }

    pub fn read(&self) -> Result<TemperatureReading, SensorError> {
        let raw = self.read_adc()?;
        let celsius = adc_to_celsius(raw);
        let fahrenheit = round_tenth(celsius_to_fahrenheit(celsius));
        if !fahrenheit.is_finite() {
            return Err(SensorError::OutOfRange);
        }
        Ok(TemperatureReading { raw, celsius, fahrenheit })
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(hw_init::ADC1_CH_TEMP).ok_or(SensorError::AdcReadFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        Ok(SIM_TEMP_ADC.load(Ordering::Relaxed))
    }
}

pub fn adc_to_celsius(raw: u16) -> f32 {
    let volts = (f32::from(raw) / ADC_MAX) * V_REF;
    27.0 - (volts - V_AT_27C) / SLOPE_V_PER_C
}

pub fn celsius_to_fahrenheit(c: f32) -> f32 {
    c * 9.0 / 5.0 + 32.0
}

/// Round to one decimal place.
pub fn round_tenth(x: f32) -> f32 {
    (x * 10.0).round() / 10.0
}
