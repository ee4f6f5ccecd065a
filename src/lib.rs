//! Control core for a bitmap-matrix clock that shows conventional and dozenal time.
//!
//! The clock keeps a millisecond time of day and displays it as 24-hour or 12-hour time, or
//! in one of three base-12 formats. It has an alarm, a countdown timer and an RTC calibration
//! screen, all driven by discrete button and sensor events.
//!
//! Board code implements the collaborator traits in [`hardware`], feeds events into a
//! `static` [`EventQueue`], calls [`ClockController::timer_callback`] from a ~6 Hz periodic
//! source and [`ClockController::update`] from its main loop.
#![cfg_attr(not(test), no_std)]

mod blink_state;
mod buzzer;
mod clock_controller;
mod clock_state;
mod controller_state;
pub mod digit_editor;
mod display_renderer;
mod error;
mod event_queue;
pub mod glyphs;
pub mod hardware;
pub mod row_bitmap;
mod shared_clock;
mod shared_constants;
pub mod time_codec;
mod time_track;

// Re-export commonly used items
pub use blink_state::BlinkState;
pub use buzzer::Buzzer;
pub use clock_controller::{ClockController, Collaborators};
pub use clock_state::{ClockState, TimerAlarmDisplayed};
pub use controller_state::ControllerState;
pub use display_renderer::{DisplayRenderer, DisplayState};
pub use error::{ClockStatus, Error, Result};
pub use event_queue::{AlarmId, Button, Event, EventQueue, LightLevel, PressDuration};
pub use hardware::{BuzzerOutput, Colour, DisplayPanel, Gps, Row, Rtc};
pub use shared_clock::SharedClock;
pub use shared_constants::*;
pub use time_codec::{Digits, RtcTime, TimeFormat};
pub use time_track::{GpsSync, TimeTrack};
