//! Host-level tests for the display state machine and what it draws.

mod common;

use common::RecordingPanel;
use doz_clock::{
    BlinkState, ClockState, ClockStatus, Colour, DisplayRenderer, DisplayState, Error, TimeFormat,
    TimerAlarmDisplayed,
};

fn renderer() -> DisplayRenderer<RecordingPanel> {
    let mut renderer = DisplayRenderer::new(RecordingPanel::default());
    renderer.init().unwrap();
    renderer
}

fn showing(format: TimeFormat) -> DisplayRenderer<RecordingPanel> {
    let mut renderer = renderer();
    renderer.on();
    renderer.set_format(format);
    renderer
}

#[test]
fn panel_calls_across_a_typical_session() {
    let mut renderer = DisplayRenderer::new(RecordingPanel::default());
    renderer.init().unwrap();
    renderer.on();
    renderer.set_format(TimeFormat::DozDrn4);
    renderer.set_time();
    renderer.show_time();
    renderer.set_format(TimeFormat::DozSemi);
    renderer.toggle_mode();

    assert_eq!(renderer.format(), TimeFormat::DozSemi);
    assert_eq!(renderer.state(), DisplayState::ShowTime23);
    let panel = renderer.panel();
    assert_eq!(panel.brightness_calls, 1);
    assert_eq!(panel.colour_calls, 3);
    assert_eq!(panel.bitmap_calls, 3);
    assert_eq!(panel.off_calls, 1);
    assert_eq!(panel.on_calls, 1);
    assert_eq!(panel.show_calls, 11);
    assert_eq!(panel.hide_calls, 1);
    assert_eq!(panel.visible, [false, true, true]);
}

#[test]
fn init_sets_default_colours_and_starts_off() {
    let renderer = renderer();
    let panel = renderer.panel();
    assert_eq!(renderer.state(), DisplayState::Off);
    assert_eq!(panel.brightness, 255);
    assert_eq!(
        panel.colours,
        [Some(Colour::Red), Some(Colour::Cyan), Some(Colour::Blue)]
    );
    assert!(panel.bitmaps.iter().all(|bitmap| bitmap.iter().all(|&byte| byte == 0)));
    assert!(!panel.is_on);
}

#[test]
fn init_failure_is_a_display_error() {
    let mut renderer = DisplayRenderer::new(RecordingPanel {
        fail_init: true,
        ..RecordingPanel::default()
    });
    assert_eq!(renderer.init(), Err(Error::DisplayInit));
}

#[test]
fn requests_outside_their_source_states_are_ignored() {
    let mut renderer = renderer();
    renderer.off();
    renderer.toggle_mode();
    renderer.set_alarm();
    renderer.show_time();
    assert_eq!(renderer.state(), DisplayState::Off);

    renderer.on();
    renderer.on();
    assert_eq!(renderer.state(), DisplayState::ShowTime123);
    assert_eq!(renderer.panel().on_calls, 1);

    renderer.set_timer();
    renderer.off();
    renderer.toggle_mode();
    renderer.set_alarm();
    assert_eq!(renderer.state(), DisplayState::SetTimer);
}

#[test]
fn show_modes_cycle_and_are_remembered_across_off() {
    let mut renderer = showing(TimeFormat::DozDrn4);
    let expected = [
        DisplayState::ShowTime23,
        DisplayState::ShowTime12,
        DisplayState::ShowTime2,
        DisplayState::ShowTime123,
    ];
    for state in expected {
        renderer.toggle_mode();
        assert_eq!(renderer.state(), state);
    }
    renderer.toggle_mode();
    renderer.off();
    renderer.on();
    assert_eq!(renderer.state(), DisplayState::ShowTime23);
}

#[test]
fn off_draws_nothing() {
    let mut renderer = renderer();
    let mut clock = ClockState::new();
    clock.alarm_set = true;
    renderer.update(&clock);
    assert_eq!(renderer.panel().bitmap_calls, 3);
    assert!(!renderer.row1().pixel(2, 2));
}

#[test]
fn drn4_digits_shift_right_of_the_radix() {
    let mut renderer = showing(TimeFormat::DozDrn4);
    let clock = ClockState::new();
    renderer.update(&clock);

    let row2 = renderer.row2();
    // Digit 0 at column 11, lit from 13.
    assert!(!row2.pixel(12, 0));
    assert!(row2.pixel(13, 0));
    // Radix point at column 41, bottom two pixel rows.
    assert!(row2.pixel(41, 10));
    assert!(!row2.pixel(41, 0));
    // The fourth digit moved from 41 to 45.
    assert!(!row2.pixel(43, 0));
    assert!(row2.pixel(47, 0));
    assert_eq!(renderer.panel().bitmaps[1], row2.as_bytes().to_vec());
}

#[test]
fn status_row_shows_flags_and_format_marker() {
    let mut renderer = showing(TimeFormat::DozDrn4);
    let mut clock = ClockState::new();
    clock.alarm_set = true;
    clock.show_error = true;
    clock.error_code = ClockStatus::Fail;
    renderer.update(&clock);

    let row1 = renderer.row1();
    assert!(row1.pixel(2, 2), "alarm symbol");
    assert!(!row1.pixel(7, 2), "no timer symbol");
    assert!(row1.pixel(11, 2), "error mark");
    assert!(row1.pixel(60, 2), "diurnal marker");

    clock.show_error = false;
    renderer.update(&clock);
    assert!(!renderer.row1().pixel(11, 2));
}

#[test]
fn trad12_status_row_shows_am_or_pm() {
    let mut renderer = showing(TimeFormat::Trad12H);
    let mut clock = ClockState::new();
    clock.time_ms = 13 * 3_600_000;
    renderer.update(&clock);
    assert!(renderer.row1().pixel(56, 2), "PM");

    clock.time_ms = 11 * 3_600_000;
    renderer.update(&clock);
    assert!(!renderer.row1().pixel(56, 2), "AM");
    assert!(renderer.row1().pixel(57, 2));
}

#[test]
fn row3_colour_is_pushed_only_when_it_changes() {
    let mut renderer = showing(TimeFormat::DozDrn4);
    let mut clock = ClockState::new();
    clock.timer_set = true;
    renderer.update(&clock);
    renderer.update(&clock);
    assert_eq!(renderer.panel().colour_calls, 4);
    assert_eq!(renderer.panel().colours[2], Some(Colour::Green));

    clock.alarm_set = true;
    clock.timer_alarm_displayed = TimerAlarmDisplayed::Alarm;
    renderer.update(&clock);
    renderer.update(&clock);
    assert_eq!(renderer.panel().colour_calls, 5);
    assert_eq!(renderer.panel().colours[2], Some(Colour::Blue));
}

#[test]
fn selected_digit_blinks_in_set_time() {
    let mut renderer = showing(TimeFormat::DozDrn4);
    renderer.set_time();
    let clock = ClockState::new();
    renderer.update(&clock);
    assert!(renderer.row2().pixel(13, 0));

    renderer.periodic_callback();
    assert_eq!(renderer.blink(), BlinkState::BlankedOut);
    renderer.update(&clock);
    assert!(!renderer.row2().pixel(13, 0));
    assert!(renderer.row2().pixel(23, 0), "neighbouring digit untouched");

    renderer.periodic_callback();
    renderer.update(&clock);
    assert!(renderer.row2().pixel(13, 0));
}

#[test]
fn calibration_shows_sign_and_base12_magnitude() {
    let mut renderer = showing(TimeFormat::DozDrn4);
    renderer.set_calibration();
    let mut clock = ClockState::new();
    clock.alarm_set = true;
    clock.rtc_calib = -13;
    renderer.update(&clock);

    let row2 = renderer.row2();
    assert!(row2.pixel(6, 5) && row2.pixel(13, 5), "minus bar");
    assert!(!row2.pixel(9, 2));
    // 13 is 0011 in base 12.
    assert!(row2.pixel(18, 0), "leading zero");
    assert!(row2.pixel(39, 0) && !row2.pixel(38, 0), "one");
    assert!(row2.pixel(49, 0) && !row2.pixel(48, 0), "one");
    assert!(renderer.row1().as_bytes().iter().all(|&byte| byte == 0));
    assert!(renderer.row3().as_bytes().iter().all(|&byte| byte == 0));

    clock.rtc_calib = 13;
    renderer.update(&clock);
    assert!(renderer.row2().pixel(9, 2), "plus stem");
}

#[test]
fn format_change_clears_the_buffers() {
    let mut renderer = showing(TimeFormat::DozDrn4);
    renderer.update(&ClockState::new());
    assert!(renderer.row2().pixel(13, 0));
    renderer.set_format(TimeFormat::DozDrn5);
    assert!(renderer.row2().as_bytes().iter().all(|&byte| byte == 0));
    assert_eq!(renderer.format(), TimeFormat::DozDrn5);
}

#[test]
fn brightness_reaches_the_panel() {
    let mut renderer = renderer();
    renderer.set_brightness(30);
    assert_eq!(renderer.brightness(), 30);
    assert_eq!(renderer.panel().brightness, 30);
}
