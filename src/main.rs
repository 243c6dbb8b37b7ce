//! Thermopost Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter      WifiAdapter      HttpAdapter       │
//! │  (Sensor+Indicator)   (Connectivity)   (Uplink)          │
//! │  Esp32TimeAdapter     LogEventSink                       │
//! │  (Clock)              (EventSink)                        │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ─────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │       TelemetryService (join · read · POST)        │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;

use thermopost::adapters::device_id;
use thermopost::adapters::hardware::HardwareAdapter;
use thermopost::adapters::http::HttpAdapter;
use thermopost::adapters::log_sink::LogEventSink;
use thermopost::adapters::time::Esp32TimeAdapter;
use thermopost::adapters::wifi::WifiAdapter;
use thermopost::app::service::TelemetryService;
use thermopost::config::{self, NodeConfig};
use thermopost::drivers::hw_init;
use thermopost::drivers::status_led::StatusLed;
use thermopost::pins;
use thermopost::sensors::temperature::TemperatureSensor;
use thermopost::sensors::SensorHub;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Thermopost v{}                   ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}, halting", e);
        halt();
    }
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ── 3. Configuration ──────────────────────────────────────
    if let Err(e) = config::device_id_override() {
        error!("THERMOPOST_DEVICE_ID rejected: {}, halting", e);
        halt();
    }
    let mut config = NodeConfig::default();
    if config.device_id.is_empty() {
        let id = device_id::device_id(&device_id::read_mac());
        config.set_device_id(&id)?;
    }
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}, halting", e);
        halt();
    }
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config not printable: {}", e),
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let sensor_hub = SensorHub::new(
        TemperatureSensor::new(pins::TEMP_ADC_GPIO),
        config.default_humidity_percent,
    );
    // The HAL hands out pins as typed fields; keep this one in step with pins.rs.
    const _: () = assert!(pins::STATUS_LED_GPIO == 2);
    let led = StatusLed::new(PinDriver::output(peripherals.pins.gpio2)?);
    let mut hw = HardwareAdapter::new(sensor_hub, led);

    let wifi = EspWifi::new(peripherals.modem, sysloop, Some(nvs))?;
    let mut net = WifiAdapter::new(wifi);
    let mut uplink = HttpAdapter::new();
    let mut clock = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();

    // ── 5. Run ────────────────────────────────────────────────
    info!("Starting telemetry loop for '{}'", config.device_id);
    let mut service = TelemetryService::new(config);
    match service.run(&mut hw, &mut net, &mut uplink, &mut clock, &mut sink) {
        Ok(never) => match never {},
        Err(e) => {
            error!("Cannot continue without network ({}), halting", e);
            halt();
        }
    }
}

/// Park the main task; the node needs a reset to recover.
fn halt() -> ! {
    loop {
        std::thread::sleep(std::time::Duration::from_secs(60));
    }
}
