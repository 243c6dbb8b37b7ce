//! Error types for the telemetry node.
//!
//! The node has exactly two recoverable failure kinds: joining the network
//! (fatal for the run) and delivering one telemetry record (the loop
//! carries on). [`CycleError`] classifies a failed loop iteration so the
//! service can tell a send failure apart from an unexpected one, which
//! earns the shorter error backoff instead of the failure blink.

use core::fmt;

// ---------------------------------------------------------------------------
// Network join
// ---------------------------------------------------------------------------

/// Why the node could not join the WiFi network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    /// SSID or password failed validation; no attempt was made.
    InvalidCredentials,
    /// The WiFi driver refused to start or configure.
    Platform,
    /// The access point reported a terminal failure (bad password, no AP).
    Rejected,
    /// The link never came up within the bounded number of polls.
    Timeout { attempts: u32 },
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid WiFi credentials"),
            Self::Platform => write!(f, "WiFi driver error"),
            Self::Rejected => write!(f, "access point rejected the connection"),
            Self::Timeout { attempts } => {
                write!(f, "no connection after {attempts} attempts")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Send
// ---------------------------------------------------------------------------

/// The HTTP POST did not produce a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// Could not open a connection to the server.
    Connect,
    /// Request headers or body could not be written.
    Write,
    /// No response status was received.
    Response,
    /// The link dropped before the request was issued.
    NotConnected,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => write!(f, "connection to server failed"),
            Self::Write => write!(f, "request write failed"),
            Self::Response => write!(f, "no response from server"),
            Self::NotConnected => write!(f, "network not connected"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC read returned an error.
    AdcReadFailed,
    /// Conversion produced a non-finite value.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

// ---------------------------------------------------------------------------
// One loop iteration
// ---------------------------------------------------------------------------

/// Failure of a single telemetry cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleError {
    /// The POST failed; failure blink, then the normal send interval.
    Send(SendError),
    /// Sensor read failed; error backoff.
    Sensor(SensorError),
    /// The record could not be serialised; error backoff.
    Encode,
}

impl CycleError {
    /// `true` for failures outside the send path.
    pub fn is_unexpected(&self) -> bool {
        !matches!(self, Self::Send(_))
    }
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Send(e) => write!(f, "send: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Encode => write!(f, "encode: record serialisation failed"),
        }
    }
}

impl From<SendError> for CycleError {
    fn from(e: SendError) -> Self {
        Self::Send(e)
    }
}

impl From<SensorError> for CycleError {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

impl core::error::Error for JoinError {}
impl core::error::Error for SendError {}
impl core::error::Error for SensorError {}
impl core::error::Error for CycleError {}
