//! Console Clock - the clock core on the host, drawn as ASCII art
//!
//! A simulated RTC advances with the 167 ms tick. The demo presses a few buttons and prints
//! the three panel rows after each one.

use doz_clock::{
    AlarmId, Button, ClockController, Collaborators, Colour, DisplayPanel, EventQueue, Gps,
    PressDuration, Result, Row, Rtc, RtcTime, TICK_PERIOD,
    row_bitmap::{RowBitmap, ROW_STRIDE},
};

static EVENTS: EventQueue = EventQueue::new();

/// The renderer keeps its own bitmaps, so the console panel only tracks power.
#[derive(Default)]
struct ConsolePanel {
    is_on: bool,
}

impl DisplayPanel for ConsolePanel {
    fn display_on(&mut self) {
        self.is_on = true;
    }

    fn display_off(&mut self) {
        self.is_on = false;
    }

    fn set_brightness(&mut self, brightness: u8) {
        println!("[panel] brightness {brightness}");
    }

    fn set_bitmap(&mut self, _row: Row, _bitmap: &[u8]) {}

    fn set_colour(&mut self, row: Row, colour: Colour) {
        println!("[panel] {row:?} colour {colour:?}");
    }

    fn show(&mut self, _row: Row) {}

    fn hide(&mut self, _row: Row) {}
}

/// An RTC that counts simulated milliseconds.
struct SimRtc {
    now_ms: u32,
    alarms: [(RtcTime, bool); 2],
    calibration: i32,
}

impl SimRtc {
    fn advance(&mut self, ms: u32) {
        self.now_ms = (self.now_ms + ms) % doz_clock::ONE_DAY_MS;
    }
}

const fn slot(id: AlarmId) -> usize {
    match id {
        AlarmId::Alarm => 0,
        AlarmId::Timer => 1,
    }
}

impl Rtc for SimRtc {
    fn set_time(&mut self, time: RtcTime) -> Result<()> {
        self.now_ms = time.to_ms();
        Ok(())
    }

    fn time(&mut self) -> Result<RtcTime> {
        Ok(RtcTime::from_ms(self.now_ms))
    }

    fn set_day(&mut self, _day: u8) {}

    fn day(&mut self) -> u8 {
        1
    }

    fn set_month(&mut self, _month: u8) {}

    fn month(&mut self) -> u8 {
        1
    }

    fn set_alarm(&mut self, id: AlarmId, time: RtcTime) {
        self.alarms[slot(id)].0 = time;
    }

    fn alarm(&mut self, id: AlarmId) -> RtcTime {
        self.alarms[slot(id)].0
    }

    fn enable_alarm(&mut self, id: AlarmId, enabled: bool) {
        self.alarms[slot(id)].1 = enabled;
    }

    fn alarm_enabled(&mut self, id: AlarmId) -> bool {
        self.alarms[slot(id)].1
    }

    fn set_calibration(&mut self, value: i32) -> bool {
        self.calibration = value;
        true
    }

    fn calibration(&mut self) -> Result<i32> {
        Ok(self.calibration)
    }
}

struct NoGps;

impl Gps for NoGps {
    fn utc_time(&mut self) -> f32 {
        0.0
    }

    fn is_connected(&mut self) -> bool {
        false
    }
}

/// Prints when the buzzer would sound.
struct ConsoleBuzzer;

impl doz_clock::BuzzerOutput for ConsoleBuzzer {
    fn start(&mut self) {
        println!("[buzzer] BEEP");
    }

    fn stop(&mut self) {
        println!("[buzzer] quiet");
    }

    fn set_output_level(&mut self, _level: u8) -> Result<()> {
        Ok(())
    }
}

type Clock = ClockController<'static, ConsolePanel, SimRtc, NoGps, ConsoleBuzzer>;

fn print_row<const N: usize>(label: &str, row: &RowBitmap<N>) {
    println!("{label}");
    for y in 0..RowBitmap::<N>::pixel_rows() {
        let line: String = (0..ROW_STRIDE * 8)
            .map(|x| if row.pixel(x, y) { '#' } else { '.' })
            .collect();
        println!("  {line}");
    }
}

fn print_panel(clock: &Clock, caption: &str) {
    let renderer = clock.renderer();
    println!(
        "\n== {caption} ({:?}, {:?}, {:?})",
        clock.controller_state(),
        renderer.state(),
        renderer.format()
    );
    if !renderer.panel().is_on {
        println!("  (display off)");
        return;
    }
    print_row("row 1", renderer.row1());
    print_row("row 2", renderer.row2());
    print_row("row 3", renderer.row3());
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "The tick period is 167 ms."
)]
fn run_ticks(clock: &mut Clock, ticks: usize) {
    for _ in 0..ticks {
        clock.rtc_mut().advance(TICK_PERIOD.as_millis() as u32);
        clock.timer_callback();
        clock.update();
    }
}

fn press(clock: &mut Clock, button: Button, duration: PressDuration, caption: &str) {
    if let Err(error) = EVENTS.trigger_button_event(button, duration) {
        println!("dropped {button:?}: {error}");
    }
    run_ticks(clock, 2);
    print_panel(clock, caption);
}

fn halt(error: doz_clock::Error) {
    eprintln!("clock halted: {error}");
}

fn main() -> Result<()> {
    let rtc = SimRtc {
        now_ms: RtcTime::new(20, 35, 20).to_ms(),
        alarms: [(RtcTime::default(), false); 2],
        calibration: -13,
    };
    let collaborators = Collaborators {
        display: ConsolePanel::default(),
        rtc,
        gps: NoGps,
        buzzer: ConsoleBuzzer,
    };
    let mut clock = Clock::new(&EVENTS, collaborators, halt)?;
    run_ticks(&mut clock, 1);
    print_panel(&clock, "power-up in DozDrn4");

    press(&mut clock, Button::Doz, PressDuration::Short, "DozDrn5");
    press(&mut clock, Button::Doz, PressDuration::Short, "DozSemi");
    press(&mut clock, Button::Trad, PressDuration::Short, "Trad24H");
    press(&mut clock, Button::Trad, PressDuration::Short, "Trad12H");

    press(&mut clock, Button::Alarm, PressDuration::Long, "editing the alarm");
    press(&mut clock, Button::Up, PressDuration::Short, "alarm hour tens up");
    press(&mut clock, Button::Alarm, PressDuration::Long, "alarm committed");

    press(&mut clock, Button::Cancel, PressDuration::Long, "calibration");
    press(&mut clock, Button::Cancel, PressDuration::Short, "back to the time");

    EVENTS
        .trigger_alarm_event(AlarmId::Alarm)
        .unwrap_or_else(|error| println!("dropped alarm: {error}"));
    run_ticks(&mut clock, 2);
    press(&mut clock, Button::Cancel, PressDuration::Short, "alarm cancelled");
    Ok(())
}
