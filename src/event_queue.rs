//! Fixed-capacity FIFO of discrete clock events.
//!
//! Producers (button, light-sensor and RTC-alarm interrupts) push through a shared
//! `&EventQueue`; the main loop pops one event per tick.

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use crate::{Error, Result, shared_constants::EVENT_QUEUE_CAPACITY};

/// The clock's front-panel buttons.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Display,
    Doz,
    Trad,
    Left,
    Right,
    Up,
    Down,
    Alarm,
    Timer,
    VolUp,
    VolDown,
    Cancel,
}

/// How long a button was held, as classified by the debouncer.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressDuration {
    #[default]
    Short,
    Long,
}

#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightLevel {
    Light,
    Dark,
}

/// The two RTC alarm slots: the wall-clock alarm and the countdown timer's end time.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmId {
    Alarm,
    Timer,
}

/// Everything that can drive the clock state machine.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A debounced press of `Button`.
    Button(Button, PressDuration),
    AlarmTriggered,
    TimerTriggered,
    RoomDark,
    RoomLight,
}

impl From<LightLevel> for Event {
    fn from(level: LightLevel) -> Self {
        match level {
            LightLevel::Light => Self::RoomLight,
            LightLevel::Dark => Self::RoomDark,
        }
    }
}

impl From<AlarmId> for Event {
    fn from(id: AlarmId) -> Self {
        match id {
            AlarmId::Alarm => Self::AlarmTriggered,
            AlarmId::Timer => Self::TimerTriggered,
        }
    }
}

type EventChannel = Channel<CriticalSectionRawMutex, Event, EVENT_QUEUE_CAPACITY>;

/// A queue that is safe to push to from interrupt context while the main loop pops.
///
/// ```
/// use doz_clock::{Button, Event, EventQueue, PressDuration};
///
/// static EVENTS: EventQueue = EventQueue::new();
///
/// EVENTS.trigger_button_event(Button::Up, PressDuration::Short).unwrap();
/// assert_eq!(EVENTS.get_event(), Ok(Event::Button(Button::Up, PressDuration::Short)));
/// assert!(EVENTS.get_event().is_err());
/// ```
pub struct EventQueue(EventChannel);

impl EventQueue {
    #[must_use]
    pub const fn new() -> Self {
        Self(Channel::new())
    }

    /// Queue a button press.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueueFull`] when the queue already holds `EVENT_QUEUE_CAPACITY` events.
    /// The new event is dropped and the queued ones are left intact.
    pub fn trigger_button_event(&self, button: Button, duration: PressDuration) -> Result<()> {
        self.push(Event::Button(button, duration))
    }

    /// Queue a room light change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueueFull`] when the queue is full.
    pub fn trigger_light_event(&self, level: LightLevel) -> Result<()> {
        self.push(level.into())
    }

    /// Queue an RTC alarm or timer expiry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueueFull`] when the queue is full.
    pub fn trigger_alarm_event(&self, id: AlarmId) -> Result<()> {
        self.push(id.into())
    }

    /// Pop the oldest event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::QueueEmpty`] when nothing is queued.
    pub fn get_event(&self) -> Result<Event> {
        self.0.try_receive().map_err(|_| Error::QueueEmpty)
    }

    /// Drop every queued event.
    pub fn clear(&self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&self, event: Event) -> Result<()> {
        self.0.try_send(event).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Event queue full, dropping {:?}", event);
            Error::QueueFull
        })
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
