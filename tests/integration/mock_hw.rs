//! Mock adapters for integration tests.
//!
//! Each mock records every call so tests can assert on the full history
//! (LED levels, sleeps, requests) without touching real hardware.

use std::collections::VecDeque;
use std::net::Ipv4Addr;

use thermopost::app::events::AppEvent;
use thermopost::app::ports::{
    ClockPort, ConnectivityPort, EventSink, HttpResponse, IndicatorPort, LinkStatus, SensorPort,
    UplinkPort,
};
use thermopost::config::NodeConfig;
use thermopost::error::{JoinError, SendError, SensorError};
use thermopost::sensors::Reading;

pub const DEFAULT_READING: Reading = Reading {
    temperature_f: 72.3,
    humidity_percent: 50.0,
};

pub const ACK: &[u8] = br#"{"status":"success","message":"Data received successfully"}"#;

/// Configuration with valid credentials and a fixed device ID.
pub fn test_config() -> NodeConfig {
    let mut config = NodeConfig {
        wifi_ssid: "lab-net",
        wifi_password: "correct-horse",
        server_url: "http://192.168.1.10:8080/data",
        ..NodeConfig::default()
    };
    config.set_device_id("pico_001").unwrap();
    config
}

// ── MockHardware (SensorPort + IndicatorPort) ─────────────────

pub struct MockHardware {
    /// Scripted reads; [`DEFAULT_READING`] once exhausted.
    pub readings: VecDeque<Result<Reading, SensorError>>,
    pub reads: u32,
    /// Every LED level written, in order.
    pub led_log: Vec<bool>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            readings: VecDeque::new(),
            reads: 0,
            led_log: Vec::new(),
        }
    }

    pub fn led_on(&self) -> bool {
        self.led_log.last().copied().unwrap_or(false)
    }
}

impl SensorPort for MockHardware {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.reads += 1;
        self.readings.pop_front().unwrap_or(Ok(DEFAULT_READING))
    }
}

impl IndicatorPort for MockHardware {
    fn set_led(&mut self, on: bool) {
        self.led_log.push(on);
    }
}

// ── MockNet (ConnectivityPort) ────────────────────────────────

pub struct MockNet {
    /// Status returned by successive polls; the last entry repeats.
    pub script: VecDeque<LinkStatus>,
    pub begin_result: Result<(), JoinError>,
    pub began_with: Option<(String, String)>,
    pub polls: u32,
    pub ip: Ipv4Addr,
}

#[allow(dead_code)]
impl MockNet {
    pub fn with_script(script: &[LinkStatus]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            begin_result: Ok(()),
            began_with: None,
            polls: 0,
            ip: Ipv4Addr::new(192, 168, 1, 42),
        }
    }

    pub fn connects_after(polls: usize) -> Self {
        let mut script = vec![LinkStatus::Connecting; polls];
        script.push(LinkStatus::Connected);
        Self::with_script(&script)
    }

    pub fn never_connects() -> Self {
        Self::with_script(&[LinkStatus::Connecting])
    }
}

impl ConnectivityPort for MockNet {
    fn begin_join(&mut self, ssid: &str, password: &str) -> Result<(), JoinError> {
        self.began_with = Some((ssid.to_owned(), password.to_owned()));
        self.begin_result
    }

    fn link_status(&mut self) -> LinkStatus {
        self.polls += 1;
        if self.script.len() > 1 {
            self.script.pop_front().unwrap_or(LinkStatus::Idle)
        } else {
            self.script.front().copied().unwrap_or(LinkStatus::Idle)
        }
    }

    fn ip_address(&self) -> Option<Ipv4Addr> {
        Some(self.ip)
    }
}

// ── MockUplink (UplinkPort) ───────────────────────────────────

pub struct MockUplink {
    /// Scripted POST outcomes; `200` + [`ACK`] once exhausted.
    pub script: VecDeque<Result<HttpResponse, SendError>>,
    /// `(url, body)` of every POST.
    pub posts: Vec<(String, String)>,
    /// Scripted GET outcomes; `200` once exhausted.
    pub get_script: VecDeque<Result<HttpResponse, SendError>>,
    pub gets: Vec<String>,
}

#[allow(dead_code)]
impl MockUplink {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            posts: Vec::new(),
            get_script: VecDeque::new(),
            gets: Vec::new(),
        }
    }

    pub fn push_status(&mut self, status: u16, body: &[u8]) {
        self.script.push_back(Ok(HttpResponse {
            status,
            body: body.to_vec(),
        }));
    }

    pub fn push_error(&mut self, e: SendError) {
        self.script.push_back(Err(e));
    }
}

impl UplinkPort for MockUplink {
    fn post_json(&mut self, url: &str, body: &str) -> Result<HttpResponse, SendError> {
        self.posts.push((url.to_owned(), body.to_owned()));
        self.script.pop_front().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 200,
                body: ACK.to_vec(),
            })
        })
    }

    fn get(&mut self, url: &str) -> Result<HttpResponse, SendError> {
        self.gets.push(url.to_owned());
        self.get_script.pop_front().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 200,
                body: br#"{"status":"healthy"}"#.to_vec(),
            })
        })
    }
}

// ── MockClock (ClockPort) ─────────────────────────────────────

pub struct MockClock {
    pub now_secs: u64,
    /// Every sleep requested, in order.
    pub sleeps: Vec<u32>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new(now_secs: u64) -> Self {
        Self {
            now_secs,
            sleeps: Vec::new(),
        }
    }

    pub fn total_slept_ms(&self) -> u64 {
        self.sleeps.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl ClockPort for MockClock {
    fn sleep_ms(&mut self, ms: u32) {
        self.sleeps.push(ms);
    }

    fn unix_time_secs(&self) -> u64 {
        self.now_secs
    }
}

// ── RecordingSink (EventSink) ─────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
