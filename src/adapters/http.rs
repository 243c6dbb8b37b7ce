//! HTTP uplink adapter.
//!
//! Implements [`UplinkPort`]. Every request opens a fresh connection,
//! writes the body, waits for the status line and keeps at most
//! [`MAX_BODY_BYTES`] of the response for logging.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::http::client::EspHttpConnection`.
//! - **all other targets**: a scripted simulation that records requests.

#[cfg(not(target_os = "espidf"))]
use std::collections::VecDeque;

use log::debug;

use crate::app::ports::{HttpResponse, UplinkPort};
use crate::error::SendError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::http::client::{Configuration as HttpConfiguration, EspHttpConnection};
#[cfg(target_os = "espidf")]
use esp_idf_svc::http::Method;

/// Response bytes kept for logging.
pub const MAX_BODY_BYTES: usize = 512;

/// Socket timeout for one request.
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

#[cfg(not(target_os = "espidf"))]
const SIM_ACK: &[u8] = br#"{"status":"success","message":"Data received successfully"}"#;

/// One request seen by the simulated uplink.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimRequest {
    pub method: &'static str,
    pub url: String,
    pub body: String,
}

#[derive(Default)]
pub struct HttpAdapter {
    /// Simulation: queued outcomes, consumed one per request. Empty = `200` + ack.
    #[cfg(not(target_os = "espidf"))]
    sim_script: VecDeque<Result<u16, SendError>>,
    #[cfg(not(target_os = "espidf"))]
    sim_requests: Vec<SimRequest>,
}

impl HttpAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_request(
        &mut self,
        method: &'static str,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse, SendError> {
        let config = HttpConfiguration {
            timeout: Some(core::time::Duration::from_millis(REQUEST_TIMEOUT_MS)),
            ..Default::default()
        };
        let mut conn = EspHttpConnection::new(&config).map_err(|e| {
            log::warn!("HTTP: client init failed: {}", e);
            SendError::Connect
        })?;

        let method = if method == "POST" { Method::Post } else { Method::Get };
        conn.initiate_request(method, url, headers).map_err(|e| {
            log::warn!("HTTP: request to {} failed: {}", url, e);
            SendError::Connect
        })?;

        let mut written = 0;
        while written < body.len() {
            let n = conn.write(&body[written..]).map_err(|_| SendError::Write)?;
            if n == 0 {
                return Err(SendError::Write);
            }
            written += n;
        }

        conn.initiate_response().map_err(|_| SendError::Response)?;
        let status = conn.status();

        let mut buf = [0u8; MAX_BODY_BYTES];
        let mut len = 0;
        while len < buf.len() {
            match conn.read(&mut buf[len..]) {
                Ok(0) | Err(_) => break,
                Ok(n) => len += n,
            }
        }

        Ok(HttpResponse {
            status,
            body: buf[..len].to_vec(),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_request(
        &mut self,
        method: &'static str,
        url: &str,
        _headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<HttpResponse, SendError> {
        self.sim_requests.push(SimRequest {
            method,
            url: url.to_owned(),
            body: String::from_utf8_lossy(body).into_owned(),
        });
        let status = self.sim_script.pop_front().unwrap_or(Ok(200))?;
        Ok(HttpResponse {
            status,
            body: SIM_ACK.to_vec(),
        })
    }
}

#[cfg(not(target_os = "espidf"))]
impl HttpAdapter {
    /// Queue the outcome of the next simulated request.
    pub fn sim_push(&mut self, outcome: Result<u16, SendError>) {
        self.sim_script.push_back(outcome);
    }

    pub fn sim_requests(&self) -> &[SimRequest] {
        &self.sim_requests
    }
}

// ───────────────────────────────────────────────────────────────
// UplinkPort
// ───────────────────────────────────────────────────────────────

impl UplinkPort for HttpAdapter {
    fn post_json(&mut self, url: &str, body: &str) -> Result<HttpResponse, SendError> {
        let len = body.len().to_string();
        let headers = [
            ("Content-Type", "application/json"),
            ("Content-Length", len.as_str()),
        ];
        debug!("HTTP: POST {} ({} bytes)", url, body.len());
        self.platform_request("POST", url, &headers, body.as_bytes())
    }

    fn get(&mut self, url: &str) -> Result<HttpResponse, SendError> {
        debug!("HTTP: GET {}", url);
        self.platform_request("GET", url, &[], &[])
    }
}
