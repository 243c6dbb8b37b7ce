//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the device).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Joined { ip, polls } => match ip {
                Some(ip) => info!("WIFI  | joined ip={} polls={}", ip, polls),
                None => info!("WIFI  | joined ip=? polls={}", polls),
            },
            AppEvent::JoinFailed(e) => {
                warn!("WIFI  | join failed: {}", e);
            }
            AppEvent::HealthChecked { status } => match status {
                Some(code) => info!("HEALTH| status={}", code),
                None => warn!("HEALTH| unreachable"),
            },
            AppEvent::Sent(d) => {
                info!(
                    "SEND  | status={} bytes={} T={:.1}\u{00b0}F ack={}",
                    d.status,
                    d.bytes,
                    d.temperature_f,
                    d.ack.as_deref().unwrap_or("-"),
                );
            }
            AppEvent::SendFailed(e) => {
                warn!("SEND  | failed: {}", e);
            }
            AppEvent::CycleAborted(e) => {
                warn!("CYCLE | aborted: {}", e);
            }
        }
    }
}
