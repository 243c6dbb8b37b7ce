//! Telemetry service: the hexagonal core.
//!
//! [`TelemetryService`] owns the configuration and loop counters and runs
//! the node's one data flow:
//!
//! ```text
//!  join ──▶ loop { read ─▶ encode ─▶ POST ─▶ blink ─▶ sleep }
//! ```
//!
//! All I/O flows through port traits injected at call sites, so the whole
//! loop is testable with mock adapters.

use core::convert::Infallible;
use core::net::Ipv4Addr;

use log::{debug, error, info, warn};

use crate::config::{validate_password, validate_ssid, NodeConfig, PayloadMode};
use crate::drivers::led_patterns::{self, BlinkPattern};
use crate::error::{CycleError, JoinError};
use crate::telemetry::{ServerAck, TelemetryRecord};

use super::events::{AppEvent, Delivery};
use super::ports::{
    ClockPort, ConnectivityPort, EventSink, IndicatorPort, LinkStatus, SensorPort, UplinkPort,
};

// ───────────────────────────────────────────────────────────────
// Results
// ───────────────────────────────────────────────────────────────

/// Outcome of a successful join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinInfo {
    pub ip: Option<Ipv4Addr>,
    /// Link-status checks performed, including the final one.
    pub polls: u32,
}

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Server answered; success blink, then the send interval.
    Sent,
    /// Transport error; failure blink, then the send interval.
    SendFailed,
    /// Unexpected error; no blink, then the error backoff.
    Backoff,
}

/// Running totals since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub sent: u64,
    pub failed: u64,
    pub backoffs: u64,
}

// ───────────────────────────────────────────────────────────────
// TelemetryService
// ───────────────────────────────────────────────────────────────

pub struct TelemetryService {
    config: NodeConfig,
    stats: LoopStats,
}

impl TelemetryService {
    pub fn new(config: NodeConfig) -> Self {
        Self {
            config,
            stats: LoopStats::default(),
        }
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    // ── Network join ──────────────────────────────────────────

    /// Join the configured network with a bounded number of status polls.
    ///
    /// On success the LED is held solid on. On failure the join-failed
    /// pattern is played and the LED left off; the caller must not enter
    /// the send loop.
    pub fn join(
        &mut self,
        net: &mut impl ConnectivityPort,
        led: &mut impl IndicatorPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<JoinInfo, JoinError> {
        match self.try_join(net, clock) {
            Ok(joined) => {
                info!("Connected to WiFi '{}'", self.config.wifi_ssid);
                match joined.ip {
                    Some(ip) => info!("IP address: {}", ip),
                    None => warn!("IP address: unknown"),
                }
                led.set_led(true);
                sink.emit(&AppEvent::Joined {
                    ip: joined.ip,
                    polls: joined.polls,
                });
                Ok(joined)
            }
            Err(e) => {
                error!("Network connection failed: {}", e);
                sink.emit(&AppEvent::JoinFailed(e));
                play(led_patterns::JOIN_FAILED, led, clock);
                led.set_led(false);
                Err(e)
            }
        }
    }

    fn try_join(
        &self,
        net: &mut impl ConnectivityPort,
        clock: &mut impl ClockPort,
    ) -> Result<JoinInfo, JoinError> {
        let ssid = self.config.wifi_ssid;
        let password = self.config.wifi_password;
        validate_ssid(ssid).map_err(|_| JoinError::InvalidCredentials)?;
        validate_password(password).map_err(|_| JoinError::InvalidCredentials)?;

        net.begin_join(ssid, password)?;

        let max = self.config.wifi_max_attempts;
        let mut polls = 0;
        for attempt in 1..=max {
            polls += 1;
            if net.link_status().is_settled() {
                break;
            }
            info!("Waiting for connection... ({}/{})", attempt, max);
            clock.sleep_ms(self.config.wifi_poll_interval_ms);
        }

        polls += 1;
        match net.link_status() {
            LinkStatus::Connected => Ok(JoinInfo {
                ip: net.ip_address(),
                polls,
            }),
            LinkStatus::Failed => Err(JoinError::Rejected),
            LinkStatus::Idle | LinkStatus::Connecting => Err(JoinError::Timeout { attempts: max }),
        }
    }

    // ── Health probe ──────────────────────────────────────────

    /// One GET of the server's `/health` route. Informational only.
    pub fn probe_health(
        &mut self,
        uplink: &mut impl UplinkPort,
        sink: &mut impl EventSink,
    ) -> Option<u16> {
        let url = self.config.health_url()?;
        let status = match uplink.get(&url) {
            Ok(resp) => {
                info!("Health check {} -> {}", url, resp.status);
                Some(resp.status)
            }
            Err(e) => {
                warn!("Health check {} failed: {}", url, e);
                None
            }
        };
        sink.emit(&AppEvent::HealthChecked { status });
        status
    }

    // ── One send cycle ────────────────────────────────────────

    /// Build this cycle's record with the current timestamp.
    pub fn build_record(
        &self,
        sensor: &mut impl SensorPort,
        clock: &impl ClockPort,
    ) -> Result<TelemetryRecord, CycleError> {
        let timestamp = clock.unix_time_secs();
        match self.config.payload_mode {
            PayloadMode::Live => {
                let reading = sensor.read()?;
                Ok(TelemetryRecord::live(&self.config.device_id, reading, timestamp))
            }
            PayloadMode::Test => Ok(TelemetryRecord::test_pattern(&self.config.device_id, timestamp)),
        }
    }

    /// Read, serialise and POST one record.
    ///
    /// Any HTTP status is a delivery; only a transport failure is a
    /// [`CycleError::Send`].
    pub fn send_once(
        &mut self,
        sensor: &mut impl SensorPort,
        uplink: &mut impl UplinkPort,
        clock: &impl ClockPort,
    ) -> Result<Delivery, CycleError> {
        let record = self.build_record(sensor, clock)?;
        let body = record.encode()?;
        debug!("POST {} {}", self.config.server_url, body);

        let resp = uplink.post_json(self.config.server_url, &body)?;
        info!("Response status: {}", resp.status);

        info!("Response text: {}", String::from_utf8_lossy(&resp.body));

        let ack = ServerAck::parse(&resp.body).map(|a| {
            if !a.is_success() {
                warn!("Server ack: {}", a.summary());
            }
            a.summary().to_owned()
        });

        Ok(Delivery {
            status: resp.status,
            bytes: body.len(),
            temperature_f: record.temperature,
            ack,
        })
    }

    /// One full loop iteration, including its trailing sleep.
    pub fn cycle(
        &mut self,
        hw: &mut (impl SensorPort + IndicatorPort),
        uplink: &mut impl UplinkPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        let outcome = match self.send_once(hw, uplink, &*clock) {
            Ok(delivery) => {
                self.stats.sent += 1;
                info!("Data sent successfully ({} bytes)", delivery.bytes);
                sink.emit(&AppEvent::Sent(delivery));
                play(led_patterns::SENT, hw, clock);
                CycleOutcome::Sent
            }
            Err(CycleError::Send(e)) => {
                self.stats.failed += 1;
                warn!("Failed to send data: {}", e);
                sink.emit(&AppEvent::SendFailed(e));
                play(led_patterns::SEND_FAILED, hw, clock);
                CycleOutcome::SendFailed
            }
            Err(e) => {
                self.stats.backoffs += 1;
                error!("Error in main loop: {}", e);
                sink.emit(&AppEvent::CycleAborted(e));
                CycleOutcome::Backoff
            }
        };

        // Back to the steady connected indication.
        hw.set_led(true);

        let pause_secs = match outcome {
            CycleOutcome::Sent | CycleOutcome::SendFailed => self.config.send_interval_secs,
            CycleOutcome::Backoff => self.config.error_backoff_secs,
        };
        debug!(
            "stats: sent={} failed={} backoffs={}; sleeping {}s",
            self.stats.sent, self.stats.failed, self.stats.backoffs, pause_secs
        );
        clock.sleep_ms(pause_secs.saturating_mul(1000));
        outcome
    }

    // ── Whole run ─────────────────────────────────────────────

    /// Join, then send forever. Returns only if the join fails.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + IndicatorPort),
        net: &mut impl ConnectivityPort,
        uplink: &mut impl UplinkPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<Infallible, JoinError> {
        self.join(net, hw, clock, sink)?;
        self.probe_health(uplink, sink);
        loop {
            self.cycle(hw, uplink, clock, sink);
        }
    }

    /// [`run`](Self::run) bounded to `cycles` iterations.
    pub fn run_cycles(
        &mut self,
        cycles: usize,
        hw: &mut (impl SensorPort + IndicatorPort),
        net: &mut impl ConnectivityPort,
        uplink: &mut impl UplinkPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<LoopStats, JoinError> {
        self.join(net, hw, clock, sink)?;
        self.probe_health(uplink, sink);
        for _ in 0..cycles {
            self.cycle(hw, uplink, clock, sink);
        }
        Ok(self.stats)
    }
}

/// Play `pattern` to completion, blocking on the clock.
fn play(pattern: BlinkPattern, led: &mut impl IndicatorPort, clock: &mut impl ClockPort) {
    for (on, hold_ms) in pattern.steps() {
        led.set_led(on);
        clock.sleep_ms(hold_ms);
    }
}
