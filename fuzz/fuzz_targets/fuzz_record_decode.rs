//! Fuzz target: `TelemetryRecord::decode`
//!
//! Feeds arbitrary text to the record decoder and verifies:
//! - No panics under arbitrary input
//! - Any record that decodes and has finite values re-encodes and
//!   decodes to the same device ID, timestamp and status
//!
//! cargo fuzz run fuzz_record_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermopost::telemetry::TelemetryRecord;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(record) = TelemetryRecord::decode(text) else {
        return;
    };
    let Ok(json) = record.encode() else {
        return;
    };
    let back = TelemetryRecord::decode(&json).expect("re-encoded record must decode");
    assert_eq!(back.device_id, record.device_id);
    assert_eq!(back.timestamp, record.timestamp);
    assert_eq!(back.status, record.status);
    assert_eq!(back.light_level, record.light_level);
});
