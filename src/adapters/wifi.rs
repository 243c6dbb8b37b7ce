//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`]. Association is started by
//! [`begin_join`](ConnectivityPort::begin_join) and observed through
//! [`link_status`](ConnectivityPort::link_status); the bounded wait lives
//! in the service, not here.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver calls via `esp_idf_svc::wifi`.
//! - **all other targets**: a scripted simulation for host-side runs.

use core::net::Ipv4Addr;

use log::info;

use crate::app::ports::{ConnectivityPort, LinkStatus};
use crate::error::JoinError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    #[cfg(target_os = "espidf")]
    wifi: EspWifi<'static>,
    /// Simulation: status polls still needed before the link comes up
    /// (`None` = never connects).
    #[cfg(not(target_os = "espidf"))]
    sim_polls_to_connect: Option<u32>,
    #[cfg(not(target_os = "espidf"))]
    sim_reject: bool,
    started: bool,
    join_failed: bool,
}

#[cfg(target_os = "espidf")]
impl WifiAdapter {
    pub fn new(wifi: EspWifi<'static>) -> Self {
        Self {
            wifi,
            started: false,
            join_failed: false,
        }
    }

    fn platform_begin(&mut self, ssid: &str, password: &str) -> Result<(), JoinError> {
        let auth_method = if password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: ssid.try_into().map_err(|_| JoinError::InvalidCredentials)?,
            password: password.try_into().map_err(|_| JoinError::InvalidCredentials)?,
            auth_method,
            ..Default::default()
        });

        self.wifi.set_configuration(&config).map_err(|e| {
            log::warn!("WiFi: set_configuration failed: {}", e);
            JoinError::Platform
        })?;
        self.wifi.start().map_err(|e| {
            log::warn!("WiFi: start failed: {}", e);
            JoinError::Platform
        })?;
        if let Err(e) = self.wifi.connect() {
            // The driver retries association on its own; record the failure
            // so status polling can stop early.
            log::warn!("WiFi: connect request failed: {}", e);
            self.join_failed = true;
        }
        Ok(())
    }

    fn platform_status(&mut self) -> LinkStatus {
        if self.join_failed {
            return LinkStatus::Failed;
        }
        match self.wifi.is_connected() {
            Ok(true) => match self.wifi.sta_netif().is_up() {
                Ok(true) => LinkStatus::Connected,
                _ => LinkStatus::Connecting,
            },
            Ok(false) => LinkStatus::Connecting,
            Err(e) => {
                log::warn!("WiFi: status query failed: {}", e);
                LinkStatus::Failed
            }
        }
    }

    fn platform_ip(&self) -> Option<Ipv4Addr> {
        self.wifi
            .sta_netif()
            .get_ip_info()
            .ok()
            .map(|info| Ipv4Addr::from(info.ip.octets()))
    }
}

#[cfg(not(target_os = "espidf"))]
impl WifiAdapter {
    /// Simulated station that connects after `polls_to_connect` status
    /// checks, or never when `None`.
    pub fn simulated(polls_to_connect: Option<u32>) -> Self {
        Self {
            sim_polls_to_connect: polls_to_connect,
            sim_reject: false,
            started: false,
            join_failed: false,
        }
    }

    /// Simulated access point that refuses the credentials.
    pub fn simulated_reject() -> Self {
        Self {
            sim_reject: true,
            ..Self::simulated(None)
        }
    }

    fn platform_begin(&mut self, ssid: &str, _password: &str) -> Result<(), JoinError> {
        info!("WiFi(sim): associating with '{}'", ssid);
        if self.sim_reject {
            self.join_failed = true;
        }
        Ok(())
    }

    fn platform_status(&mut self) -> LinkStatus {
        if self.join_failed {
            return LinkStatus::Failed;
        }
        match self.sim_polls_to_connect.as_mut() {
            Some(0) => LinkStatus::Connected,
            Some(n) => {
                *n -= 1;
                LinkStatus::Connecting
            }
            None => LinkStatus::Connecting,
        }
    }

    fn platform_ip(&self) -> Option<Ipv4Addr> {
        (self.sim_polls_to_connect == Some(0)).then_some(Ipv4Addr::new(192, 168, 4, 2))
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn begin_join(&mut self, ssid: &str, password: &str) -> Result<(), JoinError> {
        info!("WiFi: connecting to '{}'", ssid);
        self.join_failed = false;
        self.platform_begin(ssid, password)?;
        self.started = true;
        Ok(())
    }

    fn link_status(&mut self) -> LinkStatus {
        if !self.started {
            return LinkStatus::Idle;
        }
        self.platform_status()
    }

    fn ip_address(&self) -> Option<Ipv4Addr> {
        if !self.started {
            return None;
        }
        self.platform_ip()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
