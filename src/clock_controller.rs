//! The clock's top-level state machine.
//!
//! [`ClockController`] owns the clock data, the renderer and the collaborators. The main loop
//! calls [`ClockController::update`]; a ~6 Hz periodic source calls
//! [`ClockController::timer_callback`].

use crate::{
    AlarmId, Button, Buzzer, BuzzerOutput, ClockState, ClockStatus, ControllerState,
    DisplayPanel, DisplayRenderer, Error, Event, EventQueue, Gps, PressDuration, Result, Rtc,
    TimerAlarmDisplayed,
    digit_editor,
    hardware::{rtc_calendar_is_valid, write_rtc_alarm, write_rtc_time},
    shared_constants::{
        ALARM_SILENCE_AFTER, BLINK_DIVIDER, CALIBRATION_LARGE_STEP, CALIBRATION_STEP,
        HIGH_BRIGHTNESS, LOW_BRIGHTNESS, ONE_DAY_MS, TICK_PERIOD,
    },
    time_codec::{TimeFormat, compose, decompose},
    time_track::{GpsSync, TimeTrack},
};

#[expect(
    clippy::cast_possible_truncation,
    reason = "167 ms fits in a u32."
)]
const TICK_MS: u32 = TICK_PERIOD.as_millis() as u32;
#[expect(
    clippy::cast_possible_truncation,
    reason = "30 000 ms fits in a u32."
)]
const SILENCE_AFTER_MS: u32 = ALARM_SILENCE_AFTER.as_millis() as u32;

const TRAD_FORMATS: [TimeFormat; 2] = [TimeFormat::Trad24H, TimeFormat::Trad12H];
const DOZ_FORMATS: [TimeFormat; 3] = [
    TimeFormat::DozSemi,
    TimeFormat::DozDrn4,
    TimeFormat::DozDrn5,
];

/// The two format families selected by the Trad and Doz buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Family {
    Trad,
    Doz,
}

/// Direction of a cursor, digit, radix or calibration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Up,
    Down,
}

/// The board-specific pieces the controller drives.
pub struct Collaborators<D, R, G, B> {
    pub display: D,
    pub rtc: R,
    pub gps: G,
    pub buzzer: B,
}

/// Values saved on entry to a `Set*` state so a cancel can put them back.
#[derive(Debug, Clone, Copy, Default)]
struct EditSession {
    /// The edited value while no digit has changed.
    base_ms: u32,
    digits_changed: bool,
    cancelled: bool,
    saved_ms: u32,
    saved_alarm_set: bool,
    saved_timer_set: bool,
    saved_format: TimeFormat,
}

/// Counts how long the buzzer has sounded, across the midnight wrap.
#[derive(Debug, Clone, Copy, Default)]
struct SilenceCountdown {
    elapsed_ms: u32,
    last_time_ms: u32,
}

/// Owns the clock data, the renderer and the collaborators, and runs the clock state machine.
pub struct ClockController<'q, D, R, G, B>
where
    D: DisplayPanel,
    R: Rtc,
    G: Gps,
    B: BuzzerOutput,
{
    events: &'q EventQueue,
    state: ControllerState,
    clock: ClockState,
    renderer: DisplayRenderer<D>,
    rtc: R,
    gps: G,
    buzzer: Buzzer<B>,
    time_track: TimeTrack,
    fatal: fn(Error),
    edit: EditSession,
    countdown: SilenceCountdown,
    tick_divider: u8,
    trad_index: usize,
    doz_index: usize,
}

impl<'q, D, R, G, B> ClockController<'q, D, R, G, B>
where
    D: DisplayPanel,
    R: Rtc,
    G: Gps,
    B: BuzzerOutput,
{
    /// Build the controller and run its `Init` entry.
    ///
    /// The queue is cleared, then the buzzer, GPS, RTC, panel and time tracking are brought up
    /// in that order. `fatal` is called with the first failure before it is returned; it is
    /// also called later if the RTC time can no longer be read while resynchronising.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SoftwareInit`] if the buzzer, GPS or RTC handshake fails,
    /// [`Error::DisplayInit`] if the panel fails, or [`Error::TimeInit`] if the RTC time cannot
    /// be read.
    pub fn new(
        events: &'q EventQueue,
        collaborators: Collaborators<D, R, G, B>,
        fatal: fn(Error),
    ) -> Result<Self> {
        let Collaborators {
            display,
            rtc,
            gps,
            buzzer,
        } = collaborators;
        let mut controller = Self {
            events,
            state: ControllerState::Init,
            clock: ClockState::new(),
            renderer: DisplayRenderer::new(display),
            rtc,
            gps,
            buzzer: Buzzer::new(buzzer),
            time_track: TimeTrack::new(),
            fatal,
            edit: EditSession::default(),
            countdown: SilenceCountdown::default(),
            tick_divider: 0,
            trad_index: 0,
            doz_index: 1,
        };
        if let Err(error) = controller.enter_init() {
            controller.fail(error);
            return Err(error);
        }
        Ok(controller)
    }

    /// One main-loop pass: track time, run the state's update, redraw, then handle one event.
    pub fn update(&mut self) {
        self.update_time_track();
        self.update_state();
        self.renderer.update(&self.clock);
        if let Ok(event) = self.events.get_event() {
            self.dispatch(event);
        }
    }

    /// The periodic tick: advance time, run down an armed timer, and pace the cursor blink.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "The timer is reduced by at most its own value and the divider stays below 3."
    )]
    pub fn timer_callback(&mut self) {
        self.time_track.periodic(TICK_PERIOD);
        if self.clock.timer_set {
            self.clock.user_timer_ms -= self.clock.user_timer_ms.min(TICK_MS);
        }
        if self.tick_divider == 0 {
            self.renderer.periodic_callback();
        }
        self.tick_divider = (self.tick_divider + 1) % BLINK_DIVIDER;
    }

    /// Handle `event` immediately, bypassing the queue.
    pub fn dispatch(&mut self, event: Event) {
        let state = self.state;
        if let Some(next) = state.handle_event(self, event) {
            self.transition(next);
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ClockState {
        &self.clock
    }

    #[must_use]
    pub const fn controller_state(&self) -> ControllerState {
        self.state
    }

    #[must_use]
    pub const fn renderer(&self) -> &DisplayRenderer<D> {
        &self.renderer
    }

    #[must_use]
    pub const fn rtc(&self) -> &R {
        &self.rtc
    }

    pub const fn rtc_mut(&mut self) -> &mut R {
        &mut self.rtc
    }

    pub const fn gps_mut(&mut self) -> &mut G {
        &mut self.gps
    }

    #[must_use]
    pub const fn buzzer(&self) -> &Buzzer<B> {
        &self.buzzer
    }

    // ===== Transitions ======================================================

    /// Run the current state's exit and `next`'s entry. An entry may bounce straight on to
    /// another state, which is followed in the same call.
    fn transition(&mut self, next: ControllerState) {
        let mut next = next;
        loop {
            #[cfg(feature = "defmt")]
            defmt::info!("Clock {:?} -> {:?}", self.state, next);
            self.exit(self.state);
            self.state = next;
            match self.enter(next) {
                Some(bounce) => next = bounce,
                None => break,
            }
        }
    }

    fn enter(&mut self, state: ControllerState) -> Option<ControllerState> {
        match state {
            ControllerState::Init => {}
            ControllerState::IdleDisplayOn => self.enter_idle_display_on(),
            ControllerState::IdleDisplayOff => self.renderer.off(),
            ControllerState::SetTime => self.enter_set_time(),
            ControllerState::SetAlarm => self.enter_set_alarm(),
            ControllerState::SetTimer => self.enter_set_timer(),
            ControllerState::SetCalibration => return self.enter_set_calibration(),
            ControllerState::AlarmOrTimerFiredDisplayOn
            | ControllerState::AlarmOrTimerFiredDisplayOff => self.enter_fired(),
        }
        None
    }

    fn exit(&mut self, state: ControllerState) {
        match state {
            ControllerState::Init => {
                self.read_time();
                self.renderer.on();
            }
            ControllerState::SetTime => self.exit_set_time(),
            ControllerState::SetAlarm => self.exit_set_alarm(),
            ControllerState::SetTimer => self.exit_set_timer(),
            ControllerState::AlarmOrTimerFiredDisplayOn
            | ControllerState::AlarmOrTimerFiredDisplayOff => self.exit_fired(),
            ControllerState::IdleDisplayOn
            | ControllerState::IdleDisplayOff
            | ControllerState::SetCalibration => {}
        }
    }

    fn update_state(&mut self) {
        match self.state {
            ControllerState::Init => self.update_init(),
            ControllerState::IdleDisplayOn | ControllerState::IdleDisplayOff => self.read_time(),
            ControllerState::SetTime => {
                self.read_time();
                self.clock.user_time_ms = self.edited_value();
            }
            ControllerState::SetAlarm => {
                self.read_time();
                self.clock.user_alarm_ms = self.edited_value();
            }
            ControllerState::SetTimer => {
                self.read_time();
                self.clock.user_timer_ms = self.edited_value();
            }
            ControllerState::SetCalibration => {}
            ControllerState::AlarmOrTimerFiredDisplayOn => {
                self.update_fired(ControllerState::IdleDisplayOn);
            }
            ControllerState::AlarmOrTimerFiredDisplayOff => {
                self.update_fired(ControllerState::IdleDisplayOff);
            }
        }
    }

    // ===== Init =============================================================

    fn enter_init(&mut self) -> Result<()> {
        self.events.clear();
        self.buzzer.init().map_err(|_| Error::SoftwareInit)?;
        self.gps.init().map_err(|_| Error::SoftwareInit)?;
        self.rtc.init().map_err(|_| Error::SoftwareInit)?;
        self.renderer.init()?;
        self.time_track
            .init(&mut self.rtc)
            .map_err(|_| Error::TimeInit)?;
        #[cfg(feature = "defmt")]
        defmt::info!("Clock initialised");
        Ok(())
    }

    fn update_init(&mut self) {
        self.set_format(TimeFormat::DozDrn4);
        if let Err(error) = self.time_track.sync_to_rtc(&mut self.rtc) {
            self.fail(error);
            return;
        }
        self.read_time();

        if self.rtc.alarm_enabled(AlarmId::Alarm) {
            self.clock.user_alarm_ms = self.rtc.alarm(AlarmId::Alarm).to_ms() % ONE_DAY_MS;
            self.clock.alarm_set = true;
            self.rtc.enable_alarm(AlarmId::Alarm, true);
        }
        if !rtc_calendar_is_valid(&mut self.rtc) {
            #[cfg(feature = "defmt")]
            defmt::warn!("RTC calendar is stale; time may be wrong");
            self.latch_advisory_error();
        }
        self.transition(ControllerState::IdleDisplayOn);
    }

    // ===== Idle =============================================================

    fn enter_idle_display_on(&mut self) {
        self.renderer.on();
        self.renderer.show_time();
        self.read_time();
        self.commit_timer_to_rtc();
    }

    // ===== SetTime ==========================================================

    fn enter_set_time(&mut self) {
        self.read_time();
        self.begin_edit(self.clock.time_ms);
        self.clock.user_time_ms = self.clock.time_ms;
        self.renderer.set_time();
        self.suspend_alarms(true, true);
    }

    fn exit_set_time(&mut self) {
        self.resume_alarms(true, true);
        if self.edit.cancelled {
            return;
        }
        let result = write_rtc_time(&mut self.rtc, self.clock.user_time_ms)
            .and_then(|()| self.time_track.sync_to_rtc(&mut self.rtc))
            .map_err(|_| Error::TimeInit);
        match result {
            Ok(()) => self.read_time(),
            Err(error) => self.fail(error),
        }
    }

    // ===== SetAlarm =========================================================

    fn enter_set_alarm(&mut self) {
        self.edit.saved_ms = self.clock.user_alarm_ms;
        self.edit.saved_alarm_set = self.clock.alarm_set;
        self.clock.alarm_set = false;
        self.begin_edit(self.clock.user_alarm_ms);
        self.rtc.enable_alarm(AlarmId::Alarm, false);
        self.renderer.set_alarm();
        self.suspend_alarms(false, true);
    }

    fn exit_set_alarm(&mut self) {
        self.resume_alarms(false, true);
        if self.edit.cancelled {
            self.clock.user_alarm_ms = self.edit.saved_ms;
            self.clock.alarm_set = self.edit.saved_alarm_set;
            self.rtc.enable_alarm(AlarmId::Alarm, self.clock.alarm_set);
        } else {
            self.clock.alarm_set = true;
            write_rtc_alarm(&mut self.rtc, AlarmId::Alarm, self.clock.user_alarm_ms);
            self.rtc.enable_alarm(AlarmId::Alarm, true);
            self.clock.timer_alarm_displayed = TimerAlarmDisplayed::Alarm;
        }
    }

    // ===== SetTimer =========================================================

    fn enter_set_timer(&mut self) {
        self.edit.saved_format = self.clock.curr_format;
        let timer_format = match self.clock.curr_format {
            TimeFormat::Trad24H | TimeFormat::Trad12H => TimeFormat::Trad24H,
            TimeFormat::DozDrn4 | TimeFormat::DozDrn5 | TimeFormat::DozSemi => TimeFormat::DozDrn5,
        };
        self.set_format(timer_format);

        self.edit.saved_ms = self.clock.user_timer_ms;
        self.edit.saved_timer_set = self.clock.timer_set;
        self.clock.user_timer_ms = 0;
        self.clock.timer_set = false;
        self.begin_edit(0);
        self.rtc.enable_alarm(AlarmId::Timer, false);
        self.renderer.set_timer();
        self.suspend_alarms(true, false);
    }

    fn exit_set_timer(&mut self) {
        self.resume_alarms(true, false);
        if self.edit.cancelled {
            self.clock.user_timer_ms = self.edit.saved_ms;
            self.clock.timer_set = self.edit.saved_timer_set;
        } else {
            self.clock.timer_set = true;
            self.clock.timer_alarm_displayed = TimerAlarmDisplayed::Timer;
        }
        self.clock.committed_timer_ms = self.clock.user_timer_ms;
        self.write_timer_end();
        self.rtc.enable_alarm(AlarmId::Timer, self.clock.timer_set);
        self.set_format(self.edit.saved_format);
    }

    // ===== SetCalibration ===================================================

    fn enter_set_calibration(&mut self) -> Option<ControllerState> {
        match self.rtc.calibration() {
            Ok(calibration) => {
                self.clock.rtc_calib = calibration;
                self.renderer.set_calibration();
                None
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("RTC calibration unavailable");
                Some(ControllerState::IdleDisplayOn)
            }
        }
    }

    // ===== Alarm or timer fired =============================================

    fn enter_fired(&mut self) {
        self.clock.timer_alarm_displayed = if self.clock.alarm_triggered {
            TimerAlarmDisplayed::Alarm
        } else {
            TimerAlarmDisplayed::Timer
        };
        self.countdown = SilenceCountdown {
            elapsed_ms: 0,
            last_time_ms: self.clock.time_ms,
        };
        self.buzzer.start();
    }

    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "Both times are below one day, so the wrapped difference is too."
    )]
    fn update_fired(&mut self, idle: ControllerState) {
        self.read_time();
        let now = self.clock.time_ms;
        let step = (now + ONE_DAY_MS - self.countdown.last_time_ms) % ONE_DAY_MS;
        self.countdown.elapsed_ms = self.countdown.elapsed_ms.saturating_add(step);
        self.countdown.last_time_ms = now;
        if self.countdown.elapsed_ms >= SILENCE_AFTER_MS {
            self.transition(idle);
        }
    }

    fn exit_fired(&mut self) {
        self.buzzer.stop();
        if self.clock.alarm_triggered {
            self.clock.alarm_triggered = false;
            self.clock.alarm_set = false;
            self.rtc.enable_alarm(AlarmId::Alarm, false);
            if self.clock.timer_alarm_displayed == TimerAlarmDisplayed::Alarm {
                self.clock.prefer_timer_display();
            }
        } else if self.clock.timer_triggered {
            self.clock.timer_triggered = false;
            self.clock.timer_set = false;
            self.rtc.enable_alarm(AlarmId::Timer, false);
            self.clock.user_timer_ms = self.clock.committed_timer_ms;
            if self.clock.timer_alarm_displayed == TimerAlarmDisplayed::Timer {
                self.clock.prefer_alarm_display();
            }
        }
    }

    // ===== Actions used by the event map ====================================

    pub(crate) fn toggle_display_mode(&mut self) {
        self.renderer.toggle_mode();
    }

    /// Switch to the family's remembered format, or to its next one if already there.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "Indices stay below the family sizes."
    )]
    pub(crate) fn toggle_format(&mut self, family: Family) {
        let format = match family {
            Family::Trad => {
                if self.clock.curr_format == family_format(&TRAD_FORMATS, self.trad_index) {
                    self.trad_index = (self.trad_index + 1) % TRAD_FORMATS.len();
                }
                family_format(&TRAD_FORMATS, self.trad_index)
            }
            Family::Doz => {
                if self.clock.curr_format == family_format(&DOZ_FORMATS, self.doz_index) {
                    self.doz_index = (self.doz_index + 1) % DOZ_FORMATS.len();
                }
                family_format(&DOZ_FORMATS, self.doz_index)
            }
        };

        if matches!(
            self.state,
            ControllerState::SetTime | ControllerState::SetAlarm
        ) {
            self.clock.digit_sel = 0;
            let edited = match self.state {
                ControllerState::SetAlarm => self.clock.user_alarm_ms,
                _ => self.clock.user_time_ms,
            };
            self.clock.digit_vals = decompose(format, edited);
            self.edit.base_ms = edited;
        }
        self.edit.digits_changed = false;
        if format == TimeFormat::DozDrn4 && self.clock.diurn_radix_pos > 4 {
            self.clock.diurn_radix_pos = 4;
        }
        self.set_format(format);
    }

    /// Adopt the family's remembered format without cycling.
    pub(crate) fn use_family_format(&mut self, family: Family) {
        let format = match family {
            Family::Trad => family_format(&TRAD_FORMATS, self.trad_index),
            Family::Doz => family_format(&DOZ_FORMATS, self.doz_index),
        };
        if format == TimeFormat::DozDrn4 && self.clock.diurn_radix_pos > 4 {
            self.clock.diurn_radix_pos = 4;
        }
        self.set_format(format);
    }

    /// In `SetTimer`, switch between Trad24H and DozDrn5 keeping the edited duration.
    pub(crate) fn switch_timer_family(&mut self, family: Family) {
        let format = match (family, self.clock.curr_format) {
            (Family::Doz, TimeFormat::Trad24H) => TimeFormat::DozDrn5,
            (Family::Trad, TimeFormat::DozDrn5) => TimeFormat::Trad24H,
            _ => return,
        };
        self.set_format(format);
        self.clock.digit_sel = 0;
        self.clock.digit_vals = decompose(format, self.clock.user_timer_ms);
        self.edit.base_ms = self.clock.user_timer_ms;
        self.edit.digits_changed = false;
    }

    pub(crate) fn toggle_alarm(&mut self) {
        self.clock.alarm_set = !self.clock.alarm_set;
        self.rtc.enable_alarm(AlarmId::Alarm, self.clock.alarm_set);
        let displayed = self.clock.timer_alarm_displayed;
        if self.clock.alarm_set {
            if displayed == TimerAlarmDisplayed::Timer && !self.clock.timer_set {
                self.clock.timer_alarm_displayed = TimerAlarmDisplayed::Alarm;
            }
        } else if displayed == TimerAlarmDisplayed::Alarm {
            self.clock.prefer_timer_display();
        }
    }

    pub(crate) fn toggle_timer(&mut self) {
        self.clock.timer_set = !self.clock.timer_set;
        if self.clock.timer_set {
            self.write_timer_end();
            if self.clock.timer_alarm_displayed == TimerAlarmDisplayed::Alarm {
                self.clock.timer_alarm_displayed = TimerAlarmDisplayed::Timer;
            }
        } else if self.clock.timer_alarm_displayed == TimerAlarmDisplayed::Timer {
            self.clock.prefer_alarm_display();
        }
        self.rtc.enable_alarm(AlarmId::Timer, self.clock.timer_set);
    }

    /// Swap what row 3 shows, if the other one is set.
    pub(crate) const fn swap_row3(&mut self) {
        match self.clock.timer_alarm_displayed {
            TimerAlarmDisplayed::Alarm => self.clock.prefer_timer_display(),
            TimerAlarmDisplayed::Timer => self.clock.prefer_alarm_display(),
        }
    }

    pub(crate) fn move_radix(&mut self, step: Step) {
        let format = self.clock.curr_format;
        let (diurn, semi) = (
            &mut self.clock.diurn_radix_pos,
            &mut self.clock.semi_diurn_radix_pos,
        );
        match step {
            Step::Up => digit_editor::radix_right(format, diurn, semi),
            Step::Down => digit_editor::radix_left(format, diurn, semi),
        }
    }

    pub(crate) fn move_cursor(&mut self, step: Step) {
        let format = self.clock.curr_format;
        self.clock.digit_sel = match step {
            Step::Up => digit_editor::cursor_right(format, self.clock.digit_sel),
            Step::Down => digit_editor::cursor_left(format, self.clock.digit_sel),
        };
    }

    pub(crate) fn change_digit(&mut self, step: Step) {
        let format = self.clock.curr_format;
        let cursor = self.clock.digit_sel;
        match step {
            Step::Up => digit_editor::increase(format, &mut self.clock.digit_vals, cursor),
            Step::Down => digit_editor::decrease(format, &mut self.clock.digit_vals, cursor),
        }
        self.edit.digits_changed = true;
    }

    pub(crate) const fn mark_triggered(&mut self, id: AlarmId) {
        match id {
            AlarmId::Alarm => self.clock.alarm_triggered = true,
            AlarmId::Timer => self.clock.timer_triggered = true,
        }
    }

    /// Abandon the edit; the `Set*` exit restores the saved values.
    pub(crate) fn cancel_edit(&mut self) -> ControllerState {
        self.edit.cancelled = true;
        self.commit_timer_to_rtc();
        ControllerState::IdleDisplayOn
    }

    /// Program the RTC timer alarm for the end of the running countdown, if armed.
    pub(crate) fn commit_timer_to_rtc(&mut self) {
        if self.clock.timer_set {
            self.write_timer_end();
            self.rtc.enable_alarm(AlarmId::Timer, true);
        }
    }

    /// Step the calibration; the in-memory value only follows if the RTC accepts it.
    pub(crate) fn calibrate(&mut self, step: Step, duration: PressDuration) {
        let size = match duration {
            PressDuration::Short => CALIBRATION_STEP,
            PressDuration::Long => CALIBRATION_LARGE_STEP,
        };
        let value = match step {
            Step::Up => self.clock.rtc_calib.saturating_add(size),
            Step::Down => self.clock.rtc_calib.saturating_sub(size),
        };
        if self.rtc.set_calibration(value) {
            self.clock.rtc_calib = value;
        } else {
            report(Err(Error::CalibrationRejected(value)));
        }
    }

    pub(crate) fn apply_light(&mut self, event: Event) {
        match event {
            Event::RoomDark => self.renderer.set_brightness(LOW_BRIGHTNESS),
            Event::RoomLight => self.renderer.set_brightness(HIGH_BRIGHTNESS),
            _ => {}
        }
    }

    pub(crate) fn change_volume(&mut self, button: Button, duration: PressDuration) {
        let result = match (button, duration) {
            (Button::VolUp, PressDuration::Short) => self.buzzer.volume_up(),
            (Button::VolUp, PressDuration::Long) => self.buzzer.set_volume_max(),
            (Button::VolDown, PressDuration::Short) => self.buzzer.volume_down(),
            (Button::VolDown, PressDuration::Long) => self.buzzer.set_volume_min(),
            _ => Ok(()),
        };
        report(result);
    }

    // ===== Helpers ==========================================================

    fn read_time(&mut self) {
        self.clock.time_ms = self.time_track.time_ms();
    }

    fn set_format(&mut self, format: TimeFormat) {
        self.clock.curr_format = format;
        self.renderer.set_format(format);
    }

    /// Start editing `value_ms` in the current format.
    fn begin_edit(&mut self, value_ms: u32) {
        self.clock.digit_sel = 0;
        self.clock.digit_vals = decompose(self.clock.curr_format, value_ms);
        self.edit.base_ms = value_ms;
        self.edit.digits_changed = false;
        self.edit.cancelled = false;
    }

    /// The value under edit: the untouched base, or whatever the digits now spell.
    fn edited_value(&mut self) -> u32 {
        if self.edit.digits_changed {
            self.edit.base_ms = compose(self.clock.curr_format, &self.clock.digit_vals);
        }
        self.edit.base_ms
    }

    /// Disarm the chosen alarms for the duration of an edit, remembering their flags.
    fn suspend_alarms(&mut self, alarm: bool, timer: bool) {
        if alarm {
            self.edit.saved_alarm_set = self.clock.alarm_set;
            self.clock.alarm_set = false;
            self.rtc.enable_alarm(AlarmId::Alarm, false);
        }
        if timer {
            self.edit.saved_timer_set = self.clock.timer_set;
            self.clock.timer_set = false;
            self.rtc.enable_alarm(AlarmId::Timer, false);
        }
    }

    fn resume_alarms(&mut self, alarm: bool, timer: bool) {
        if alarm {
            self.clock.alarm_set = self.edit.saved_alarm_set;
            self.rtc.enable_alarm(AlarmId::Alarm, self.clock.alarm_set);
        }
        if timer {
            self.clock.timer_set = self.edit.saved_timer_set;
            self.rtc.enable_alarm(AlarmId::Timer, self.clock.timer_set);
        }
    }

    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "Both terms are below one day, so the sum fits in a u32."
    )]
    fn write_timer_end(&mut self) {
        let end_ms = (self.clock.user_timer_ms + self.clock.time_ms) % ONE_DAY_MS;
        write_rtc_alarm(&mut self.rtc, AlarmId::Timer, end_ms);
    }

    fn update_time_track(&mut self) {
        match self.time_track.update(&mut self.rtc, &mut self.gps) {
            Ok(GpsSync::NotDue) => {}
            Ok(GpsSync::Synced) => {
                if self.clock.error_code == ClockStatus::Fail {
                    self.clock.error_code = ClockStatus::Ok;
                    self.clock.show_error = false;
                }
            }
            Ok(GpsSync::Lost) | Err(_) => self.latch_advisory_error(),
        }
    }

    /// A recoverable fault: shown as `!` on row 1 until the next good GPS resync.
    fn latch_advisory_error(&mut self) {
        if !self.clock.error_code.is_fatal() {
            self.clock.error_code = ClockStatus::Fail;
        }
        self.clock.show_error = true;
    }

    fn fail(&mut self, error: Error) {
        #[cfg(feature = "defmt")]
        defmt::error!("Clock failure: {}", error);
        self.clock.error_code = error.status();
        (self.fatal)(error);
    }
}

fn family_format(family: &[TimeFormat], index: usize) -> TimeFormat {
    family.get(index).copied().unwrap_or_default()
}

/// Rejected requests leave the clock unchanged; they are only logged.
#[cfg_attr(
    not(feature = "defmt"),
    expect(unused_variables, reason = "Only logged with defmt.")
)]
fn report(result: Result<()>) {
    #[cfg(feature = "defmt")]
    if let Err(error) = result {
        defmt::warn!("Ignored: {}", error);
    }
}
