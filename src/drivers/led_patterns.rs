//! Blink patterns for the single-colour status LED.
//!
//! A pattern is `count` on/off pulses. The service plays it step by step
//! against the clock port, then restores the steady "connected" level.
//!
//! | Pattern        | Meaning                         | Pulses | On / off   |
//! |----------------|---------------------------------|--------|------------|
//! | `SENT`         | POST got a response             | 2      | 200/200 ms |
//! | `SEND_FAILED`  | POST raised a transport error   | 5      | 100/100 ms |
//! | `JOIN_FAILED`  | WiFi join gave up; node halts   | 10     | 100/100 ms |
//!
//! While connected and idle the LED is held solid on.

/// A finite on/off pulse train.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPattern {
    pub count: u8,
    pub on_ms: u32,
    pub off_ms: u32,
}

impl BlinkPattern {
    pub const fn new(count: u8, on_ms: u32, off_ms: u32) -> Self {
        Self { count, on_ms, off_ms }
    }

    /// `(led_on, hold_ms)` steps, alternating on and off, `2 * count` long.
    pub fn steps(&self) -> impl Iterator<Item = (bool, u32)> + '_ {
        (0..self.count).flat_map(move |_| [(true, self.on_ms), (false, self.off_ms)])
    }

    /// Wall time taken by one full play.
    pub fn duration_ms(&self) -> u32 {
        u32::from(self.count) * (self.on_ms + self.off_ms)
    }
}

pub const SENT: BlinkPattern = BlinkPattern::new(2, 200, 200);
pub const SEND_FAILED: BlinkPattern = BlinkPattern::new(5, 100, 100);
pub const JOIN_FAILED: BlinkPattern = BlinkPattern::new(10, 100, 100);
