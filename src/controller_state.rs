use crate::{
    AlarmId, Button, BuzzerOutput, ClockController, DisplayPanel, Event, Gps, PressDuration, Rtc,
    clock_controller::{Family, Step},
};
use Button::{Alarm, Cancel, Display, Doz, Down, Left, Right, Timer, Trad, Up, VolDown, VolUp};
use PressDuration::{Long, Short};

/// Represents the states the clock controller can be in.
///
/// `Init` runs once at power-up. The two `Idle*` states show (or blank) the time, the `Set*`
/// states edit a value, and the two `AlarmOrTimerFired*` states sound the buzzer.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Init,
    IdleDisplayOn,
    IdleDisplayOff,
    SetTime,
    SetAlarm,
    SetTimer,
    SetCalibration,
    AlarmOrTimerFiredDisplayOn,
    AlarmOrTimerFiredDisplayOff,
}

impl ControllerState {
    /// Apply `event` in this state and return the state to move to, if any.
    ///
    /// Pairs with no mapping are ignored.
    pub(crate) fn handle_event<D, R, G, B>(
        self,
        clock: &mut ClockController<'_, D, R, G, B>,
        event: Event,
    ) -> Option<Self>
    where
        D: DisplayPanel,
        R: Rtc,
        G: Gps,
        B: BuzzerOutput,
    {
        match self {
            Self::Init => None,
            Self::IdleDisplayOn => Self::handle_idle_display_on(clock, event),
            Self::IdleDisplayOff => Self::handle_idle_display_off(clock, event),
            Self::SetTime => Self::handle_set_time(clock, event),
            Self::SetAlarm => Self::handle_set_alarm(clock, event),
            Self::SetTimer => Self::handle_set_timer(clock, event),
            Self::SetCalibration => Self::handle_set_calibration(clock, event),
            Self::AlarmOrTimerFiredDisplayOn => {
                Self::handle_fired(clock, event, Self::IdleDisplayOn)
            }
            Self::AlarmOrTimerFiredDisplayOff => {
                Self::handle_fired(clock, event, Self::IdleDisplayOff)
            }
        }
    }

    fn handle_idle_display_on<D, R, G, B>(
        clock: &mut ClockController<'_, D, R, G, B>,
        event: Event,
    ) -> Option<Self>
    where
        D: DisplayPanel,
        R: Rtc,
        G: Gps,
        B: BuzzerOutput,
    {
        match event {
            Event::Button(Display, Short) => clock.toggle_display_mode(),
            Event::Button(Display, Long) => return Some(Self::IdleDisplayOff),
            Event::Button(Doz, Short) => clock.toggle_format(Family::Doz),
            Event::Button(Doz, Long) => {
                clock.use_family_format(Family::Doz);
                return Some(Self::SetTime);
            }
            Event::Button(Trad, Short) => clock.toggle_format(Family::Trad),
            Event::Button(Trad, Long) => {
                clock.use_family_format(Family::Trad);
                return Some(Self::SetTime);
            }
            Event::Button(Alarm, Short) => clock.toggle_alarm(),
            Event::Button(Alarm, Long) => return Some(Self::SetAlarm),
            Event::Button(Timer, Short) => clock.toggle_timer(),
            Event::Button(Timer, Long) => return Some(Self::SetTimer),
            Event::Button(Cancel, Long) => return Some(Self::SetCalibration),
            Event::Button(Left, Short) => clock.move_radix(Step::Down),
            Event::Button(Right, Short) => clock.move_radix(Step::Up),
            Event::Button(Up | Down, Short) => clock.swap_row3(),
            Event::AlarmTriggered => {
                clock.mark_triggered(AlarmId::Alarm);
                return Some(Self::AlarmOrTimerFiredDisplayOn);
            }
            Event::TimerTriggered => {
                clock.mark_triggered(AlarmId::Timer);
                return Some(Self::AlarmOrTimerFiredDisplayOn);
            }
            _ => Self::handle_ambient(clock, event),
        }
        None
    }

    fn handle_idle_display_off<D, R, G, B>(
        clock: &mut ClockController<'_, D, R, G, B>,
        event: Event,
    ) -> Option<Self>
    where
        D: DisplayPanel,
        R: Rtc,
        G: Gps,
        B: BuzzerOutput,
    {
        match event {
            Event::Button(Display, Long) => {
                clock.commit_timer_to_rtc();
                return Some(Self::IdleDisplayOn);
            }
            Event::AlarmTriggered => {
                clock.mark_triggered(AlarmId::Alarm);
                return Some(Self::AlarmOrTimerFiredDisplayOff);
            }
            Event::TimerTriggered => {
                clock.mark_triggered(AlarmId::Timer);
                return Some(Self::AlarmOrTimerFiredDisplayOff);
            }
            _ => Self::handle_ambient(clock, event),
        }
        None
    }

    fn handle_set_time<D, R, G, B>(
        clock: &mut ClockController<'_, D, R, G, B>,
        event: Event,
    ) -> Option<Self>
    where
        D: DisplayPanel,
        R: Rtc,
        G: Gps,
        B: BuzzerOutput,
    {
        match event {
            Event::Button(Doz, Short) => clock.toggle_format(Family::Doz),
            Event::Button(Trad, Short) => clock.toggle_format(Family::Trad),
            Event::Button(Doz, Long) => {
                clock.use_family_format(Family::Doz);
                return Some(Self::IdleDisplayOn);
            }
            Event::Button(Trad, Long) => {
                clock.use_family_format(Family::Trad);
                return Some(Self::IdleDisplayOn);
            }
            Event::Button(Cancel, Short) => return Some(clock.cancel_edit()),
            _ => Self::handle_editing(clock, event),
        }
        None
    }

    fn handle_set_alarm<D, R, G, B>(
        clock: &mut ClockController<'_, D, R, G, B>,
        event: Event,
    ) -> Option<Self>
    where
        D: DisplayPanel,
        R: Rtc,
        G: Gps,
        B: BuzzerOutput,
    {
        match event {
            Event::Button(Doz, Short) => clock.toggle_format(Family::Doz),
            Event::Button(Trad, Short) => clock.toggle_format(Family::Trad),
            Event::Button(Cancel, Short) => return Some(clock.cancel_edit()),
            Event::Button(Alarm, Long) => return Some(Self::IdleDisplayOn),
            _ => Self::handle_editing(clock, event),
        }
        None
    }

    fn handle_set_timer<D, R, G, B>(
        clock: &mut ClockController<'_, D, R, G, B>,
        event: Event,
    ) -> Option<Self>
    where
        D: DisplayPanel,
        R: Rtc,
        G: Gps,
        B: BuzzerOutput,
    {
        match event {
            Event::Button(Doz, Short) => clock.switch_timer_family(Family::Doz),
            Event::Button(Trad, Short) => clock.switch_timer_family(Family::Trad),
            Event::Button(Cancel, Short) => return Some(clock.cancel_edit()),
            Event::Button(Timer, Long) => return Some(Self::IdleDisplayOn),
            _ => Self::handle_editing(clock, event),
        }
        None
    }

    fn handle_set_calibration<D, R, G, B>(
        clock: &mut ClockController<'_, D, R, G, B>,
        event: Event,
    ) -> Option<Self>
    where
        D: DisplayPanel,
        R: Rtc,
        G: Gps,
        B: BuzzerOutput,
    {
        match event {
            Event::Button(Cancel, _) | Event::Button(Alarm | Timer | Trad | Doz, Long) => {
                clock.commit_timer_to_rtc();
                return Some(Self::IdleDisplayOn);
            }
            Event::Button(Up, Short) => clock.calibrate(Step::Up, Short),
            Event::Button(Down, Short) => clock.calibrate(Step::Down, Short),
            Event::Button(Up, Long) => clock.calibrate(Step::Up, Long),
            Event::Button(Down, Long) => clock.calibrate(Step::Down, Long),
            _ => Self::handle_ambient(clock, event),
        }
        None
    }

    fn handle_fired<D, R, G, B>(
        clock: &mut ClockController<'_, D, R, G, B>,
        event: Event,
        idle: Self,
    ) -> Option<Self>
    where
        D: DisplayPanel,
        R: Rtc,
        G: Gps,
        B: BuzzerOutput,
    {
        if event == Event::Button(Cancel, Short) {
            if idle == Self::IdleDisplayOn {
                clock.commit_timer_to_rtc();
            }
            return Some(idle);
        }
        Self::handle_ambient(clock, event);
        None
    }

    /// Cursor and digit keys shared by the `Set*` editors.
    fn handle_editing<D, R, G, B>(clock: &mut ClockController<'_, D, R, G, B>, event: Event)
    where
        D: DisplayPanel,
        R: Rtc,
        G: Gps,
        B: BuzzerOutput,
    {
        match event {
            Event::Button(Left, Short) => clock.move_cursor(Step::Down),
            Event::Button(Right, Short) => clock.move_cursor(Step::Up),
            Event::Button(Up, Short) => clock.change_digit(Step::Up),
            Event::Button(Down, Short) => clock.change_digit(Step::Down),
            _ => Self::handle_ambient(clock, event),
        }
    }

    /// Light and volume events, handled the same in every state but `Init`.
    fn handle_ambient<D, R, G, B>(clock: &mut ClockController<'_, D, R, G, B>, event: Event)
    where
        D: DisplayPanel,
        R: Rtc,
        G: Gps,
        B: BuzzerOutput,
    {
        match event {
            Event::RoomDark | Event::RoomLight => clock.apply_light(event),
            Event::Button(button @ (VolUp | VolDown), duration) => {
                clock.change_volume(button, duration);
            }
            _ => {}
        }
    }
}
