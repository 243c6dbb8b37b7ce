//! LED driver, blink patterns, and hardware initialisation.

pub mod hw_init;
pub mod led_patterns;
pub mod status_led;
