//! Hand-written collaborators shared by the host integration tests.
#![allow(
    dead_code,
    reason = "Each test binary uses a different subset of the mocks."
)]

use std::cell::Cell;

use doz_clock::{
    AlarmId, Button, BuzzerOutput, ClockController, Collaborators, Colour, DisplayPanel, Error,
    Event, EventQueue, Gps, PressDuration, Result, Row, Rtc, RtcTime,
};

/// A panel that records every call it receives.
#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub fail_init: bool,
    pub brightness_calls: usize,
    pub colour_calls: usize,
    pub bitmap_calls: usize,
    pub on_calls: usize,
    pub off_calls: usize,
    pub show_calls: usize,
    pub hide_calls: usize,
    pub brightness: u8,
    pub colours: [Option<Colour>; 3],
    pub bitmaps: [Vec<u8>; 3],
    pub visible: [bool; 3],
    pub is_on: bool,
}

const fn row_index(row: Row) -> usize {
    match row {
        Row::Row1 => 0,
        Row::Row2 => 1,
        Row::Row3 => 2,
    }
}

impl DisplayPanel for RecordingPanel {
    fn init(&mut self) -> Result<()> {
        if self.fail_init {
            Err(Error::DisplayInit)
        } else {
            Ok(())
        }
    }

    fn display_on(&mut self) {
        self.on_calls += 1;
        self.is_on = true;
    }

    fn display_off(&mut self) {
        self.off_calls += 1;
        self.is_on = false;
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness_calls += 1;
        self.brightness = brightness;
    }

    fn set_bitmap(&mut self, row: Row, bitmap: &[u8]) {
        self.bitmap_calls += 1;
        self.bitmaps[row_index(row)] = bitmap.to_vec();
    }

    fn set_colour(&mut self, row: Row, colour: Colour) {
        self.colour_calls += 1;
        self.colours[row_index(row)] = Some(colour);
    }

    fn show(&mut self, row: Row) {
        self.show_calls += 1;
        self.visible[row_index(row)] = true;
    }

    fn hide(&mut self, row: Row) {
        self.hide_calls += 1;
        self.visible[row_index(row)] = false;
    }
}

/// An RTC whose time and replies are set by the test.
#[derive(Debug)]
pub struct ScriptedRtc {
    pub fail_init: bool,
    pub fail_reads: bool,
    pub now: RtcTime,
    pub day: u8,
    pub month: u8,
    pub alarms: [RtcTime; 2],
    pub enabled: [bool; 2],
    pub calibration: Option<i32>,
    pub accept_calibration: bool,
    pub set_time_calls: usize,
}

impl Default for ScriptedRtc {
    fn default() -> Self {
        Self {
            fail_init: false,
            fail_reads: false,
            now: RtcTime::default(),
            day: 1,
            month: 1,
            alarms: [RtcTime::default(); 2],
            enabled: [false; 2],
            calibration: Some(0),
            accept_calibration: true,
            set_time_calls: 0,
        }
    }
}

impl ScriptedRtc {
    pub fn at(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            now: RtcTime::new(hour, minute, second),
            ..Self::default()
        }
    }

    pub const fn alarm_enabled_flag(&self, id: AlarmId) -> bool {
        self.enabled[alarm_index(id)]
    }

    pub const fn alarm_time(&self, id: AlarmId) -> RtcTime {
        self.alarms[alarm_index(id)]
    }
}

const fn alarm_index(id: AlarmId) -> usize {
    match id {
        AlarmId::Alarm => 0,
        AlarmId::Timer => 1,
    }
}

impl Rtc for ScriptedRtc {
    fn init(&mut self) -> Result<()> {
        if self.fail_init {
            Err(Error::RtcUnavailable)
        } else {
            Ok(())
        }
    }

    fn set_time(&mut self, time: RtcTime) -> Result<()> {
        self.set_time_calls += 1;
        self.now = time;
        Ok(())
    }

    fn time(&mut self) -> Result<RtcTime> {
        if self.fail_reads {
            Err(Error::RtcUnavailable)
        } else {
            Ok(self.now)
        }
    }

    fn set_day(&mut self, day: u8) {
        self.day = day;
    }

    fn day(&mut self) -> u8 {
        self.day
    }

    fn set_month(&mut self, month: u8) {
        self.month = month;
    }

    fn month(&mut self) -> u8 {
        self.month
    }

    fn set_alarm(&mut self, id: AlarmId, time: RtcTime) {
        self.alarms[alarm_index(id)] = time;
    }

    fn alarm(&mut self, id: AlarmId) -> RtcTime {
        self.alarms[alarm_index(id)]
    }

    fn enable_alarm(&mut self, id: AlarmId, enabled: bool) {
        self.enabled[alarm_index(id)] = enabled;
    }

    fn alarm_enabled(&mut self, id: AlarmId) -> bool {
        self.enabled[alarm_index(id)]
    }

    fn set_calibration(&mut self, value: i32) -> bool {
        if self.accept_calibration {
            self.calibration = Some(value);
        }
        self.accept_calibration
    }

    fn calibration(&mut self) -> Result<i32> {
        self.calibration.ok_or(Error::CalibrationUnavailable)
    }
}

#[derive(Debug, Default)]
pub struct FakeGps {
    pub connected: bool,
    pub utc_hhmmss: f32,
}

impl Gps for FakeGps {
    fn utc_time(&mut self) -> f32 {
        self.utc_hhmmss
    }

    fn is_connected(&mut self) -> bool {
        self.connected
    }
}

#[derive(Debug, Default)]
pub struct MockBuzzer {
    pub fail_init: bool,
    pub sounding: bool,
    pub starts: usize,
    pub stops: usize,
    pub level: u8,
}

impl BuzzerOutput for MockBuzzer {
    fn init(&mut self) -> Result<()> {
        if self.fail_init {
            Err(Error::BuzzerUnavailable)
        } else {
            Ok(())
        }
    }

    fn start(&mut self) {
        self.starts += 1;
        self.sounding = true;
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.sounding = false;
    }

    fn set_output_level(&mut self, level: u8) -> Result<()> {
        self.level = level;
        Ok(())
    }
}

pub type TestClock<'q> = ClockController<'q, RecordingPanel, ScriptedRtc, FakeGps, MockBuzzer>;

thread_local! {
    static FATAL: Cell<Option<Error>> = const { Cell::new(None) };
}

/// Fatal handler that records the error for [`last_fatal`].
pub fn record_fatal(error: Error) {
    FATAL.with(|fatal| fatal.set(Some(error)));
}

pub fn last_fatal() -> Option<Error> {
    FATAL.with(Cell::get)
}

pub fn collaborators(
    rtc: ScriptedRtc,
) -> Collaborators<RecordingPanel, ScriptedRtc, FakeGps, MockBuzzer> {
    Collaborators {
        display: RecordingPanel::default(),
        rtc,
        gps: FakeGps::default(),
        buzzer: MockBuzzer::default(),
    }
}

/// A controller that has finished `Init` and sits in `IdleDisplayOn`.
pub fn running_clock(events: &EventQueue, rtc: ScriptedRtc) -> TestClock<'_> {
    let mut clock = TestClock::new(events, collaborators(rtc), record_fatal).unwrap();
    clock.update();
    clock
}

/// Run `ticks` periodic callbacks, each followed by a main-loop update.
///
/// The scripted RTC is left alone, so the tracked time free-runs 167 ms per tick.
pub fn run_ticks(clock: &mut TestClock<'_>, ticks: usize) {
    for _ in 0..ticks {
        clock.timer_callback();
        clock.update();
    }
}

/// Dispatch a button press, then run one update so edits are composed.
pub fn press(clock: &mut TestClock<'_>, button: Button, duration: PressDuration) {
    clock.dispatch(Event::Button(button, duration));
    clock.update();
}
