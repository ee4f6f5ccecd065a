//! Host-level tests for millisecond time tracking against the RTC and GPS.

mod common;

use common::{FakeGps, ScriptedRtc};
use doz_clock::{GPS_RESYNC_SECONDS, GpsSync, RtcTime, TimeTrack};
use embassy_time::Duration;

fn tracked(rtc: &mut ScriptedRtc) -> TimeTrack {
    let mut track = TimeTrack::new();
    track.init(rtc).unwrap();
    track
}

fn tick(track: &mut TimeTrack, rtc: &mut ScriptedRtc, gps: &mut FakeGps, ms: u64) -> GpsSync {
    track.periodic(Duration::from_millis(ms));
    track.update(rtc, gps).unwrap()
}

#[test]
fn free_runs_between_rtc_seconds() {
    let mut rtc = ScriptedRtc::at(8, 0, 0);
    let mut gps = FakeGps::default();
    let mut track = tracked(&mut rtc);
    assert_eq!(track.time_ms(), 28_800_000);

    tick(&mut track, &mut rtc, &mut gps, 100);
    assert_eq!(track.time_ms(), 28_800_100);

    rtc.now = RtcTime::new(8, 0, 1);
    tick(&mut track, &mut rtc, &mut gps, 0);
    assert_eq!(track.time_ms(), 28_801_000);
    tick(&mut track, &mut rtc, &mut gps, 100);
    assert_eq!(track.time_ms(), 28_801_100);
}

#[test]
fn rtc_rollover_to_midnight() {
    let mut rtc = ScriptedRtc::at(23, 59, 59);
    let mut gps = FakeGps::default();
    let mut track = tracked(&mut rtc);
    assert_eq!(track.time_ms(), 86_399_000);

    rtc.now = RtcTime::new(0, 0, 0);
    tick(&mut track, &mut rtc, &mut gps, 0);
    assert_eq!(track.time_ms(), 0);
}

#[test]
fn free_running_past_midnight_then_snapping() {
    let mut rtc = ScriptedRtc::at(23, 59, 59);
    let mut gps = FakeGps::default();
    let mut track = tracked(&mut rtc);

    tick(&mut track, &mut rtc, &mut gps, 999);
    assert_eq!(track.time_ms(), 86_399_999);

    rtc.now = RtcTime::new(0, 0, 0);
    track.update(&mut rtc, &mut gps).unwrap();
    // No tick since the last read, so the RTC is not consulted yet.
    assert_eq!(track.time_ms(), 86_399_999);
    tick(&mut track, &mut rtc, &mut gps, 0);
    assert_eq!(track.time_ms(), 0);

    tick(&mut track, &mut rtc, &mut gps, 999);
    assert_eq!(track.time_ms(), 999);

    rtc.now = RtcTime::new(0, 0, 1);
    tick(&mut track, &mut rtc, &mut gps, 0);
    assert_eq!(track.time_ms(), 1_000);
    tick(&mut track, &mut rtc, &mut gps, 999);
    assert_eq!(track.time_ms(), 1_999);
}

#[test]
fn periodic_wraps_at_one_day() {
    let mut rtc = ScriptedRtc::at(23, 59, 59);
    let mut track = tracked(&mut rtc);
    track.periodic(Duration::from_millis(1_500));
    assert_eq!(track.time_ms(), 500);
}

#[test]
fn gps_resync_after_an_hour_of_rtc_seconds() {
    let mut rtc = ScriptedRtc::default();
    let mut gps = FakeGps {
        connected: true,
        utc_hhmmss: 123_456.0,
    };
    let mut track = tracked(&mut rtc);

    for second in 1..u32::from(GPS_RESYNC_SECONDS) {
        rtc.now = RtcTime::from_ms(second * 1_000);
        assert_eq!(tick(&mut track, &mut rtc, &mut gps, 0), GpsSync::NotDue);
    }
    rtc.day = 4;
    rtc.now = RtcTime::new(1, 0, 0);
    assert_eq!(tick(&mut track, &mut rtc, &mut gps, 0), GpsSync::Synced);

    assert_eq!(track.time_ms(), 45_296_000);
    assert_eq!(rtc.now, RtcTime::new(12, 34, 56));
    assert_eq!((rtc.day, rtc.month), (1, 1));
    assert!(!track.gps_lost());

    // The count restarts; the next change is not a resync.
    rtc.now = RtcTime::new(12, 34, 57);
    assert_eq!(tick(&mut track, &mut rtc, &mut gps, 0), GpsSync::NotDue);
    assert_eq!(track.time_ms(), 45_297_000);
}

#[test]
fn missing_fix_is_retried_until_gps_returns() {
    let mut rtc = ScriptedRtc::default();
    let mut gps = FakeGps::default();
    let mut track = tracked(&mut rtc);
    for second in 1..=u32::from(GPS_RESYNC_SECONDS) {
        rtc.now = RtcTime::from_ms(second * 1_000);
        tick(&mut track, &mut rtc, &mut gps, 0);
    }
    assert!(track.gps_lost());
    assert_eq!(track.update(&mut rtc, &mut gps), Ok(GpsSync::Lost));

    gps.connected = true;
    gps.utc_hhmmss = 60_000.0;
    assert_eq!(track.update(&mut rtc, &mut gps), Ok(GpsSync::Synced));
    assert_eq!(track.time_ms(), 6 * 3_600_000);
    assert!(!track.gps_lost());
}

#[test]
fn unreadable_rtc_keeps_free_running() {
    let mut rtc = ScriptedRtc::at(8, 0, 0);
    let mut gps = FakeGps::default();
    let mut track = tracked(&mut rtc);
    rtc.fail_reads = true;
    track.periodic(Duration::from_millis(167));
    assert!(track.update(&mut rtc, &mut gps).is_err());
    assert_eq!(track.time_ms(), 28_800_167);
}
