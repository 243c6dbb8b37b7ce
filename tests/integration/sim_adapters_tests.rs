//! The service wired to the real host-side adapters: simulated radio,
//! simulated HTTP client, sim ADC and an in-memory LED pin.

use crate::mock_hw::{test_config, MockClock};

use thermopost::adapters::hardware::HardwareAdapter;
use thermopost::adapters::http::HttpAdapter;
use thermopost::adapters::log_sink::LogEventSink;
use thermopost::adapters::wifi::WifiAdapter;
use thermopost::app::service::{LoopStats, TelemetryService};
use thermopost::drivers::status_led::{SimPin, StatusLed};
use thermopost::error::{JoinError, SendError};
use thermopost::pins;
use thermopost::sensors::temperature::TemperatureSensor;
use thermopost::sensors::SensorHub;
use thermopost::telemetry::TelemetryRecord;

fn hardware() -> HardwareAdapter<SimPin> {
    HardwareAdapter::new(
        SensorHub::new(TemperatureSensor::new(pins::TEMP_ADC_GPIO), 50.0),
        StatusLed::new(SimPin::default()),
    )
}

#[test]
fn simulated_node_sends_sensor_records() {
    let mut service = TelemetryService::new(test_config());
    let mut hw = hardware();
    let mut net = WifiAdapter::simulated(Some(2));
    let mut uplink = HttpAdapter::new();
    uplink.sim_push(Err(SendError::Connect));
    let mut clock = MockClock::new(1_718_000_000);
    let mut sink = LogEventSink::new();

    let stats = service
        .run_cycles(2, &mut hw, &mut net, &mut uplink, &mut clock, &mut sink)
        .unwrap();

    assert_eq!(
        stats,
        LoopStats {
            sent: 1,
            failed: 1,
            backoffs: 0
        }
    );
    assert!(hw.led().is_on());

    let requests = uplink.sim_requests();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "http://192.168.1.10:8080/health");
    let posts: Vec<_> = requests.iter().filter(|r| r.method == "POST").collect();
    assert_eq!(posts.len(), 2);
    let record = TelemetryRecord::decode(&posts[1].body).unwrap();
    assert_eq!(record.device_id.as_str(), "pico_001");
    assert!(record.temperature.is_finite());
    assert!((record.humidity - 50.0).abs() < f32::EPSILON);
}

#[test]
fn simulated_rejection_halts_before_sending() {
    let mut service = TelemetryService::new(test_config());
    let mut hw = hardware();
    let mut net = WifiAdapter::simulated_reject();
    let mut uplink = HttpAdapter::new();
    let mut clock = MockClock::new(0);
    let mut sink = LogEventSink::new();

    let err = service
        .run_cycles(1, &mut hw, &mut net, &mut uplink, &mut clock, &mut sink)
        .unwrap_err();

    assert_eq!(err, JoinError::Rejected);
    assert!(uplink.sim_requests().is_empty());
    assert!(!hw.led().is_on());
}
