//! Collaborator interfaces the clock core drives.
//!
//! Each board supplies implementations for its panel, RTC chip, GPS receiver and buzzer.
//! Every trait has an `init` handshake that runs once while the controller is constructed.

use crate::{AlarmId, Result, RtcTime};

/// One of the three bitmap rows on the panel.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Row1,
    Row2,
    Row3,
}

/// Row colours as the panel's three-bit RGB code.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Colour {
    Red = 0b100,
    Green = 0b010,
    Blue = 0b001,
    Yellow = 0b110,
    Magenta = 0b101,
    Cyan = 0b011,
    White = 0b111,
}

impl Colour {
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// The bitmap panel: three independently coloured rows.
pub trait DisplayPanel {
    /// # Errors
    ///
    /// Returns an error if the panel does not respond.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn display_on(&mut self);
    fn display_off(&mut self);
    fn set_brightness(&mut self, brightness: u8);
    /// Replace a row's pixels; eight bytes per pixel row, MSB leftmost.
    fn set_bitmap(&mut self, row: Row, bitmap: &[u8]);
    fn set_colour(&mut self, row: Row, colour: Colour);
    fn show(&mut self, row: Row);
    fn hide(&mut self, row: Row);
}

/// The battery-backed real-time clock, which also holds both alarms and the calibration.
pub trait Rtc {
    /// # Errors
    ///
    /// Returns an error if the chip does not respond.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`crate::Error::RtcUnavailable`] if the write fails.
    fn set_time(&mut self, time: RtcTime) -> Result<()>;

    /// # Errors
    ///
    /// Returns [`crate::Error::RtcUnavailable`] if the read fails.
    fn time(&mut self) -> Result<RtcTime>;

    fn set_day(&mut self, day: u8);
    fn day(&mut self) -> u8;
    fn set_month(&mut self, month: u8);
    fn month(&mut self) -> u8;

    fn set_alarm(&mut self, id: AlarmId, time: RtcTime);
    fn alarm(&mut self, id: AlarmId) -> RtcTime;
    fn enable_alarm(&mut self, id: AlarmId, enabled: bool);
    fn alarm_enabled(&mut self, id: AlarmId) -> bool;

    /// Returns `false` if the chip rejects `value`.
    fn set_calibration(&mut self, value: i32) -> bool;

    /// # Errors
    ///
    /// Returns [`crate::Error::CalibrationUnavailable`] if the chip cannot report it.
    fn calibration(&mut self) -> Result<i32>;
}

/// A GPS receiver reporting UTC time of day.
pub trait Gps {
    /// # Errors
    ///
    /// Returns an error if the receiver cannot be configured.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// UTC time encoded as the decimal number `HHMMSS`.
    fn utc_time(&mut self) -> f32;
    fn is_connected(&mut self) -> bool;
}

/// The raw buzzer output; volume policy lives in [`crate::Buzzer`].
pub trait BuzzerOutput {
    /// # Errors
    ///
    /// Returns an error if the output cannot be configured.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn start(&mut self);
    fn stop(&mut self);

    /// # Errors
    ///
    /// Returns [`crate::Error::BuzzerUnavailable`] if the level cannot be applied.
    fn set_output_level(&mut self, level: u8) -> Result<()>;
}

/// Set the RTC to `ms` and restart its calendar at day 1, month 1.
///
/// The calendar then counts days since the time was last set; see [`rtc_calendar_is_valid`].
///
/// # Errors
///
/// Propagates the RTC's write error.
pub fn write_rtc_time<R: Rtc>(rtc: &mut R, ms: u32) -> Result<()> {
    rtc.set_time(RtcTime::from_ms(ms))?;
    rtc.set_day(1);
    rtc.set_month(1);
    Ok(())
}

/// `true` while the RTC was set within the last few days.
pub fn rtc_calendar_is_valid<R: Rtc>(rtc: &mut R) -> bool {
    rtc.day() <= crate::MAX_DAYS_SINCE_SET && rtc.month() <= 1
}

/// Program alarm `id` to fire at millisecond-of-day `ms` (whole seconds).
pub fn write_rtc_alarm<R: Rtc>(rtc: &mut R, id: AlarmId, ms: u32) {
    rtc.set_alarm(id, RtcTime::from_ms(ms));
}
