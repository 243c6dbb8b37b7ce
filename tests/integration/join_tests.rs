//! Network join: bounded polling, failure indication and the halt path.

use crate::mock_hw::{
    test_config, MockClock, MockHardware, MockNet, MockUplink, RecordingSink,
};

use thermopost::app::events::AppEvent;
use thermopost::app::ports::LinkStatus;
use thermopost::app::service::TelemetryService;
use thermopost::drivers::led_patterns;
use thermopost::error::JoinError;

#[test]
fn join_succeeds_after_a_few_polls() {
    let mut service = TelemetryService::new(test_config());
    let mut hw = MockHardware::new();
    let mut net = MockNet::connects_after(3);
    let mut clock = MockClock::new(0);
    let mut sink = RecordingSink::new();

    let info = service.join(&mut net, &mut hw, &mut clock, &mut sink).unwrap();

    // Three "still connecting" polls with a 1 s wait each, then the
    // settled poll and the final check.
    assert_eq!(clock.sleeps, vec![1000, 1000, 1000]);
    assert_eq!(info.polls, 5);
    assert_eq!(info.ip, Some(net.ip));
    assert_eq!(
        net.began_with,
        Some(("lab-net".to_owned(), "correct-horse".to_owned()))
    );
    assert!(hw.led_on(), "LED held on once connected");
    assert!(matches!(sink.events.as_slice(), [AppEvent::Joined { .. }]));
}

#[test]
fn failed_join_plays_join_failed_pattern_and_never_sends() {
    let mut service = TelemetryService::new(test_config());
    let mut hw = MockHardware::new();
    let mut net = MockNet::never_connects();
    let mut uplink = MockUplink::new();
    let mut clock = MockClock::new(0);
    let mut sink = RecordingSink::new();

    let result = service.run_cycles(3, &mut hw, &mut net, &mut uplink, &mut clock, &mut sink);

    assert_eq!(result, Err(JoinError::Timeout { attempts: 10 }));
    assert!(uplink.posts.is_empty(), "send loop must not start");
    assert!(uplink.gets.is_empty());
    assert_eq!(hw.reads, 0);

    // 10 poll waits of 1 s, then 10 fast pulses.
    let (polls, blinks) = clock.sleeps.split_at(10);
    assert!(polls.iter().all(|&ms| ms == 1000));
    let expected: Vec<u32> = led_patterns::JOIN_FAILED.steps().map(|(_, ms)| ms).collect();
    assert_eq!(blinks, expected.as_slice());

    let expected_led: Vec<bool> = led_patterns::JOIN_FAILED
        .steps()
        .map(|(on, _)| on)
        .chain([false])
        .collect();
    assert_eq!(hw.led_log, expected_led);
    assert!(!hw.led_on());

    assert_eq!(
        sink.events,
        vec![AppEvent::JoinFailed(JoinError::Timeout { attempts: 10 })]
    );
    assert_eq!(service.stats().sent, 0);
}

#[test]
fn rejected_association_stops_polling_early() {
    let mut service = TelemetryService::new(test_config());
    let mut hw = MockHardware::new();
    let mut net = MockNet::with_script(&[LinkStatus::Connecting, LinkStatus::Failed]);
    let mut clock = MockClock::new(0);
    let mut sink = RecordingSink::new();

    let err = service.join(&mut net, &mut hw, &mut clock, &mut sink).unwrap_err();

    assert_eq!(err, JoinError::Rejected);
    assert_eq!(net.polls, 3);
    assert_eq!(&clock.sleeps[..1], &[1000]);
    assert_eq!(
        clock.sleeps.len(),
        1 + led_patterns::JOIN_FAILED.steps().count()
    );
}

#[test]
fn invalid_credentials_fail_before_touching_the_radio() {
    let mut config = test_config();
    config.wifi_password = "short";
    let mut service = TelemetryService::new(config);
    let mut hw = MockHardware::new();
    let mut net = MockNet::connects_after(0);
    let mut clock = MockClock::new(0);
    let mut sink = RecordingSink::new();

    let err = service.join(&mut net, &mut hw, &mut clock, &mut sink).unwrap_err();

    assert_eq!(err, JoinError::InvalidCredentials);
    assert!(net.began_with.is_none());
    assert_eq!(net.polls, 0);
}

#[test]
fn driver_error_on_begin_is_reported() {
    let mut service = TelemetryService::new(test_config());
    let mut hw = MockHardware::new();
    let mut net = MockNet::connects_after(0);
    net.begin_result = Err(JoinError::Platform);
    let mut clock = MockClock::new(0);
    let mut sink = RecordingSink::new();

    let err = service.join(&mut net, &mut hw, &mut clock, &mut sink).unwrap_err();

    assert_eq!(err, JoinError::Platform);
    assert_eq!(sink.events, vec![AppEvent::JoinFailed(JoinError::Platform)]);
}
