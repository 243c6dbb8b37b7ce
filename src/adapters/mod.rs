//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                  | Connects to               |
//! |-------------|-----------------------------|---------------------------|
//! | `hardware`  | SensorPort, IndicatorPort   | ESP32 ADC, status LED GPIO|
//! | `http`      | UplinkPort                  | ESP-IDF HTTP client       |
//! | `log_sink`  | EventSink                   | Serial log output         |
//! | `time`      | ClockPort                   | ESP32 system timer / RTC  |
//! | `wifi`      | ConnectivityPort            | ESP-IDF WiFi STA          |
//!
//! `device_id` derives the fallback device ID from the factory MAC.

pub mod device_id;
pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod time;
pub mod wifi;
