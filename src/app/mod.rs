//! Application core: the telemetry loop as pure logic, zero I/O.
//!
//! All interaction with the radio, the sensor, the LED and the clock
//! happens through **port traits** defined in [`ports`], keeping this
//! layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
