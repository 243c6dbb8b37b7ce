//! Fuzz target: `ServerAck::parse`
//!
//! Server responses are untrusted. Arbitrary bytes must never panic the
//! parser or the summary accessor.
//!
//! cargo fuzz run fuzz_ack_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermopost::telemetry::ServerAck;

fuzz_target!(|data: &[u8]| {
    if let Some(ack) = ServerAck::parse(data) {
        let _ = ack.is_success();
        let _ = ack.summary();
    }
});
