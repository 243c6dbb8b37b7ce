//! GPIO / peripheral pin assignments for the ESP32-S3 node board.
//!
//! Single source of truth: drivers and `main()` reference this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors: Analog (ADC1)
// ---------------------------------------------------------------------------

/// Analog temperature sensor output.
/// ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// Single-colour status LED, active HIGH.
pub const STATUS_LED_GPIO: i32 = 2;
