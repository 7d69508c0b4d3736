//! Alarm timer tests

mod common;

use common::{hm, CountingOutput, FixedClock, MockDelay, MockI2c, RecordingSink};
use watch_game_audio::alarm::{AlarmPhase, AlarmTimer};
use watch_game_audio::audio::GameAudio;
use watch_game_audio::config::{AlarmConfig, AudioConfig};

fn armed_at_seven() -> AlarmTimer {
    let mut alarm = AlarmTimer::new(AlarmConfig::default());
    assert!(alarm.set_alarm(7, 0, true));
    alarm
}

#[test]
fn test_initial_state() {
    let alarm = AlarmTimer::new(AlarmConfig::default());
    assert_eq!(alarm.phase(), AlarmPhase::Idle);
    assert_eq!(alarm.target(), hm(7, 0));
    assert!(!alarm.is_enabled());
    assert!(!alarm.is_ringing());
}

#[test]
fn test_rings_at_target_time() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();

    assert_eq!(alarm.check(hm(6, 59), 0, &mut out), AlarmPhase::Armed);
    assert!(out.cycles.is_empty());

    assert_eq!(alarm.check(hm(7, 0), 1_000, &mut out), AlarmPhase::Ringing);
    assert_eq!(out.cycles, vec![1_000]);
}

#[test]
fn test_keeps_ringing_inside_window() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();

    alarm.check(hm(7, 0), 1_000, &mut out);
    // Minute rolled over, still inside the window
    assert_eq!(alarm.check(hm(7, 1), 60_999, &mut out), AlarmPhase::Ringing);
    assert_eq!(out.cycles.len(), 2);
}

#[test]
fn test_times_out_after_window() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();

    alarm.check(hm(7, 0), 1_000, &mut out);
    assert_eq!(alarm.check(hm(7, 1), 61_000, &mut out), AlarmPhase::Armed);
    assert!(!alarm.is_ringing());
    assert_eq!(out.cycles.len(), 1);

    // Does not restart until the target time comes round again
    alarm.check(hm(7, 2), 62_000, &mut out);
    assert_eq!(out.cycles.len(), 1);
}

#[test]
fn test_stop_silences() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();

    alarm.check(hm(7, 0), 0, &mut out);
    alarm.stop();
    assert!(!alarm.is_ringing());
    assert!(alarm.is_enabled());

    assert_eq!(alarm.check(hm(7, 1), 5_000, &mut out), AlarmPhase::Armed);
    assert_eq!(out.cycles.len(), 1);
}

#[test]
fn test_stop_then_same_minute_rings_again() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();

    alarm.check(hm(7, 0), 0, &mut out);
    alarm.stop();
    assert_eq!(alarm.check(hm(7, 0), 3_000, &mut out), AlarmPhase::Ringing);
}

#[test]
fn test_rearm_clears_ringing() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();

    alarm.check(hm(7, 0), 0, &mut out);
    assert!(alarm.is_ringing());

    assert!(alarm.set_alarm(8, 30, true));
    assert!(!alarm.is_ringing());
    assert_eq!(alarm.target(), hm(8, 30));
    assert_eq!(alarm.phase(), AlarmPhase::Armed);
}

#[test]
fn test_disabled_never_rings() {
    let mut alarm = AlarmTimer::new(AlarmConfig::default());
    alarm.set_alarm(7, 0, false);
    let mut out = CountingOutput::ready();

    assert_eq!(alarm.check(hm(7, 0), 0, &mut out), AlarmPhase::Idle);
    assert!(out.cycles.is_empty());
}

#[test]
fn test_output_not_ready_is_noop() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput {
        ready: false,
        cycles: Vec::new(),
    };

    assert_eq!(alarm.check(hm(7, 0), 0, &mut out), AlarmPhase::Armed);
    assert!(!alarm.is_ringing());
}

#[test]
fn test_invalid_time_rejected() {
    let mut alarm = armed_at_seven();
    assert!(!alarm.set_alarm(24, 0, true));
    assert!(!alarm.set_alarm(6, 60, false));
    assert_eq!(alarm.target(), hm(7, 0));
    assert!(alarm.is_enabled());
}

#[test]
fn test_custom_timeout() {
    let mut alarm = AlarmTimer::new(AlarmConfig {
        ring_timeout_ms: 5_000,
        cycle_pause_ms: 250,
    });
    alarm.set_alarm(7, 0, true);
    let mut out = CountingOutput::ready();

    alarm.check(hm(7, 0), 0, &mut out);
    alarm.check(hm(7, 0), 4_999, &mut out);
    alarm.check(hm(7, 0), 5_000, &mut out);
    assert_eq!(out.cycles, vec![250, 250]);
    assert!(!alarm.is_ringing());
}

#[test]
fn test_poll_reads_time_source() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();

    assert_eq!(
        alarm.poll(FixedClock(Some(hm(7, 0))), 0, &mut out),
        AlarmPhase::Ringing
    );
    assert_eq!(out.cycles.len(), 1);
}

#[test]
fn test_poll_read_failure_cannot_start_ringing() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();

    assert_eq!(alarm.poll(FixedClock(None), 0, &mut out), AlarmPhase::Armed);
    assert!(out.cycles.is_empty());
}

#[test]
fn test_poll_read_failure_keeps_ringing_cycles() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();

    alarm.check(hm(7, 0), 0, &mut out);
    assert_eq!(
        alarm.poll(FixedClock(None), 1_000, &mut out),
        AlarmPhase::Ringing
    );
    assert_eq!(out.cycles, vec![1_000, 1_000]);
}

#[test]
fn test_ring_times_out_without_time_source() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();

    alarm.check(hm(7, 0), 0, &mut out);
    for t in (2_000..60_000).step_by(2_000) {
        alarm.poll(FixedClock(None), t, &mut out);
    }
    assert!(alarm.is_ringing());

    assert_eq!(
        alarm.poll(FixedClock(None), 60_000, &mut out),
        AlarmPhase::Armed
    );
    assert!(!alarm.is_ringing());
    assert_eq!(out.cycles.len(), 30);
}

#[test]
fn test_poll_read_failure_on_silent_output_plays_nothing() {
    let mut alarm = armed_at_seven();
    let mut out = CountingOutput::ready();
    alarm.check(hm(7, 0), 0, &mut out);

    out.ready = false;
    assert_eq!(
        alarm.poll(FixedClock(None), 1_000, &mut out),
        AlarmPhase::Ringing
    );
    assert_eq!(out.cycles.len(), 1);
}

#[test]
fn test_rings_through_game_audio() {
    let mut i2c = MockI2c::new();
    let mut audio = GameAudio::new(
        RecordingSink::default(),
        MockDelay::default(),
        AudioConfig::default(),
    );

    let mut alarm = armed_at_seven();
    // Codec not up yet
    alarm.check(hm(7, 0), 0, &mut audio);
    assert!(!alarm.is_ringing());

    audio.initialize_default(&mut i2c).unwrap();
    alarm.check(hm(7, 0), 0, &mut audio);
    assert!(alarm.is_ringing());

    // Six 200 ms tones at 24 kHz
    assert_eq!(audio.streamer().words_written(), 6 * 4800);

    let (_, delay) = audio.release();
    assert_eq!(delay.ms.last(), Some(&1_000));
}
