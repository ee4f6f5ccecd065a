use crate::{
    ClockStatus,
    time_codec::{Digits, TimeFormat},
};

/// Which of alarm and timer occupies row 3 when both are set.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerAlarmDisplayed {
    #[default]
    Timer,
    Alarm,
}

/// Everything the clock knows, owned by the controller and read by the renderer.
///
/// All `*_ms` fields are milliseconds of the day and always below `ONE_DAY_MS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    /// The tracked time of day.
    pub time_ms: u32,
    /// The time being edited in `SetTime`.
    pub user_time_ms: u32,
    pub user_alarm_ms: u32,
    /// Remaining countdown while the timer is armed; the duration being edited in `SetTimer`.
    pub user_timer_ms: u32,
    /// The last duration committed in `SetTimer`, restored after the timer fires.
    pub committed_timer_ms: u32,

    pub alarm_set: bool,
    pub timer_set: bool,
    pub alarm_triggered: bool,
    pub timer_triggered: bool,
    pub show_error: bool,
    pub timer_alarm_displayed: TimerAlarmDisplayed,

    /// Edit cursor, an index into `digit_vals`.
    pub digit_sel: usize,
    pub digit_vals: Digits,
    /// Radix point of DozDrn4 (0..=4) and DozDrn5 (0..=5). Presentation only.
    pub diurn_radix_pos: u8,
    /// Radix point of DozSemi (1..=5). Presentation only.
    pub semi_diurn_radix_pos: u8,

    pub rtc_calib: i32,
    pub error_code: ClockStatus,
    pub curr_format: TimeFormat,
}

impl ClockState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            time_ms: 0,
            user_time_ms: 0,
            user_alarm_ms: 0,
            user_timer_ms: 0,
            committed_timer_ms: 0,
            alarm_set: false,
            timer_set: false,
            alarm_triggered: false,
            timer_triggered: false,
            show_error: false,
            timer_alarm_displayed: TimerAlarmDisplayed::Timer,
            digit_sel: 0,
            digit_vals: [0; 7],
            diurn_radix_pos: 3,
            semi_diurn_radix_pos: 2,
            rtc_calib: 0,
            error_code: ClockStatus::Ok,
            curr_format: TimeFormat::DozDrn4,
        }
    }

    /// Show the alarm on row 3 if it is set, otherwise leave the choice alone.
    pub const fn prefer_alarm_display(&mut self) {
        if self.alarm_set {
            self.timer_alarm_displayed = TimerAlarmDisplayed::Alarm;
        }
    }

    /// Show the timer on row 3 if it is armed, otherwise leave the choice alone.
    pub const fn prefer_timer_display(&mut self) {
        if self.timer_set {
            self.timer_alarm_displayed = TimerAlarmDisplayed::Timer;
        }
    }

    /// The value row 3 shows in the idle and `SetTime` screens, if any.
    #[must_use]
    pub const fn row3_selection(&self) -> Option<TimerAlarmDisplayed> {
        match (self.alarm_set, self.timer_set) {
            (true, true) => Some(self.timer_alarm_displayed),
            (false, true) => Some(TimerAlarmDisplayed::Timer),
            (true, false) => Some(TimerAlarmDisplayed::Alarm),
            (false, false) => None,
        }
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}
