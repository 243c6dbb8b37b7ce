//! Outbound application events.
//!
//! The [`TelemetryService`](super::service::TelemetryService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use core::net::Ipv4Addr;

use crate::error::{CycleError, JoinError, SendError};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The station is associated. `polls` is the number of status checks it took.
    Joined { ip: Option<Ipv4Addr>, polls: u32 },

    /// The join gave up; the node halts.
    JoinFailed(JoinError),

    /// The server answered `/health` (or did not).
    HealthChecked { status: Option<u16> },

    /// A record was POSTed and the server answered.
    Sent(Delivery),

    /// The POST raised a transport error.
    SendFailed(SendError),

    /// An unexpected error ended the cycle early.
    CycleAborted(CycleError),
}

/// Summary of one delivered record.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub status: u16,
    pub bytes: usize,
    pub temperature_f: f32,
    /// Server's own words, if the body was a recognisable ack.
    pub ack: Option<String>,
}
