//! Conversions between a millisecond-of-day value and the clock's digit representations.
//!
//! Five formats are supported: conventional 24-hour and 12-hour time, and three dozenal
//! formats. The diurnal formats split the day into 12⁵ steps of 347.2̅ ms (five digits, or
//! the leading four of them). The semi-diurnal format splits each half-day into 12⁴ steps of
//! 2083.3̅ ms, with a leading half-day digit.
//!
//! The step sizes are the exact rationals 3125/9 ms and 6250/3 ms. All scaling is done in
//! integer arithmetic with round-half-up, which matches rounding against the decimal
//! approximations `347.22222222` and `2083.33333333` for every integer input.

use crate::shared_constants::{MAX_DIGITS, ONE_DAY_MS, ONE_HOUR_MS, ONE_MINUTE_MS, ONE_SECOND_MS};

/// Per-position digit values, most significant first. Unused trailing positions are zero.
pub type Digits = [u8; MAX_DIGITS];

/// Index of the AM/PM flag in a Trad12H [`Digits`].
pub const AM_PM_DIGIT: usize = 6;

/// The time formats the clock can display and edit.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    /// `HH:MM:SS`, hours 0..=23.
    Trad24H,
    /// `HH:MM:SS` with an AM/PM flag as the seventh digit.
    Trad12H,
    /// The leading four digits of the five-digit diurnal time.
    #[default]
    DozDrn4,
    /// Five base-12 digits covering the whole day.
    DozDrn5,
    /// A half-day digit followed by four base-12 digits.
    DozSemi,
}

impl TimeFormat {
    /// Number of editable digit positions.
    #[must_use]
    pub const fn digit_count(self) -> usize {
        match self {
            Self::Trad24H => 6,
            Self::Trad12H => 7,
            Self::DozDrn4 => 4,
            Self::DozDrn5 | Self::DozSemi => 5,
        }
    }

    #[must_use]
    pub const fn is_trad(self) -> bool {
        matches!(self, Self::Trad24H | Self::Trad12H)
    }
}

/// Hour, minute and second as exchanged with the RTC and GPS collaborators.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RtcTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl RtcTime {
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Truncates to whole seconds and wraps past one day.
    #[must_use]
    pub const fn from_ms(ms: u32) -> Self {
        let (hour, minute, second) = ms_to_trad(ms);
        Self::new(hour, minute, second)
    }

    #[must_use]
    pub const fn to_ms(self) -> u32 {
        trad_to_ms(self.hour, self.minute, self.second)
    }

    /// Decodes a GPS receiver's UTC time, encoded as the decimal number `HHMMSS`.
    ///
    /// Fractional seconds are dropped. Negative or non-finite readings decode as midnight.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::integer_division_remainder_used,
        reason = "Float-to-int casts saturate and each `% 100` result fits in a u8."
    )]
    pub fn from_hhmmss(encoded: f32) -> Self {
        let mut packed = encoded as u32;
        let second = (packed % 100) as u8;
        packed /= 100;
        let minute = (packed % 100) as u8;
        packed /= 100;
        let hour = (packed % 100) as u8;
        Self::new(hour, minute, second)
    }
}

/// Splits `ms` into `(hour24, minute, second)`; inputs beyond one day wrap.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::integer_division_remainder_used,
    reason = "Each remainder is below 60 and fits in a u8."
)]
pub const fn ms_to_trad(ms: u32) -> (u8, u8, u8) {
    let mut seconds = ms / ONE_SECOND_MS;
    let second = (seconds % 60) as u8;
    seconds /= 60;
    let minute = (seconds % 60) as u8;
    seconds /= 60;
    let hour = (seconds % 24) as u8;
    (hour, minute, second)
}

#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    reason = "Each term is bounded by the u8 inputs and the sum stays well inside u32."
)]
pub const fn trad_to_ms(hour: u8, minute: u8, second: u8) -> u32 {
    second as u32 * ONE_SECOND_MS + minute as u32 * ONE_MINUTE_MS + hour as u32 * ONE_HOUR_MS
}

/// Five base-12 digits of the diurnal time, most significant first.
#[must_use]
pub const fn ms_to_diurn(ms: u32) -> [u8; 5] {
    split_base12(diurn_steps(ms), 12)
}

/// Half-day flag followed by four base-12 digits of the semi-diurnal time.
#[must_use]
pub const fn ms_to_semi_diurn(ms: u32) -> [u8; 5] {
    split_base12(semi_diurn_steps(ms), 2)
}

/// Inverse of [`ms_to_diurn`], rounded to the nearest millisecond.
#[must_use]
pub const fn diurn_to_ms(digits: &[u8; 5]) -> u32 {
    compose(
        TimeFormat::DozDrn5,
        &[digits[0], digits[1], digits[2], digits[3], digits[4], 0, 0],
    )
}

/// Inverse of [`ms_to_semi_diurn`], rounded to the nearest millisecond.
#[must_use]
pub const fn semi_diurn_to_ms(digits: &[u8; 5]) -> u32 {
    compose(
        TimeFormat::DozSemi,
        &[digits[0], digits[1], digits[2], digits[3], digits[4], 0, 0],
    )
}

/// Digits of `ms` as they are edited in `format`.
///
/// Trad formats produce `[h/10, h%10, m/10, m%10, s/10, s%10, pm]`, where Trad12H shows hours
/// past noon as `hour - 12`. The PM flag is set for any afternoon hour and also at noon.
/// DozDrn4 keeps the leading four diurnal digits.
#[must_use]
#[expect(
    clippy::integer_division_remainder_used,
    clippy::arithmetic_side_effects,
    reason = "hour < 24, minute < 60 and second < 60, so the digit split cannot overflow."
)]
pub const fn decompose(format: TimeFormat, ms: u32) -> Digits {
    match format {
        TimeFormat::Trad24H | TimeFormat::Trad12H => {
            let (mut hour, minute, second) = ms_to_trad(ms);
            let pm = if matches!(format, TimeFormat::Trad12H) && hour > 12 {
                hour -= 12;
                1
            } else {
                (hour == 12) as u8
            };
            [
                hour / 10,
                hour % 10,
                minute / 10,
                minute % 10,
                second / 10,
                second % 10,
                pm,
            ]
        }
        TimeFormat::DozDrn4 => {
            let [d1, d2, d3, d4, _] = ms_to_diurn(ms);
            [d1, d2, d3, d4, 0, 0, 0]
        }
        TimeFormat::DozDrn5 => {
            let [d1, d2, d3, d4, d5] = ms_to_diurn(ms);
            [d1, d2, d3, d4, d5, 0, 0]
        }
        TimeFormat::DozSemi => {
            let [d1, d2, d3, d4, d5] = ms_to_semi_diurn(ms);
            [d1, d2, d3, d4, d5, 0, 0]
        }
    }
}

/// Millisecond-of-day described by `digits` in `format`; the inverse of [`decompose`].
///
/// Trad12H adds twelve hours when the PM flag is set, except for hour 12 which is noon.
/// Out-of-range digits never panic; the result is wrapped into one day.
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    clippy::cast_possible_truncation,
    reason = "Terms are computed in u64 from u8 digits and reduced below one day before the cast."
)]
pub const fn compose(format: TimeFormat, digits: &Digits) -> u32 {
    let ms = match format {
        TimeFormat::Trad24H | TimeFormat::Trad12H => {
            let mut hour = 10 * digits[0] as u64 + digits[1] as u64;
            let minute = 10 * digits[2] as u64 + digits[3] as u64;
            let second = 10 * digits[4] as u64 + digits[5] as u64;
            if matches!(format, TimeFormat::Trad12H) && digits[AM_PM_DIGIT] == 1 && hour != 12 {
                hour += 12;
            }
            second * ONE_SECOND_MS as u64
                + minute * ONE_MINUTE_MS as u64
                + hour * ONE_HOUR_MS as u64
        }
        TimeFormat::DozDrn4 => {
            diurn_steps_to_ms(join_base12(&[digits[0], digits[1], digits[2], digits[3], 0]))
        }
        TimeFormat::DozDrn5 => diurn_steps_to_ms(join_base12(&[
            digits[0], digits[1], digits[2], digits[3], digits[4],
        ])),
        TimeFormat::DozSemi => semi_diurn_steps_to_ms(join_base12(&[
            digits[0], digits[1], digits[2], digits[3], digits[4],
        ])),
    };
    (ms % ONE_DAY_MS as u64) as u32
}

// round(ms / (3125 / 9)) == floor((18 * ms + 3125) / 6250)
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Computed in u64, where 18 * u32::MAX cannot overflow."
)]
const fn diurn_steps(ms: u32) -> u64 {
    (18 * ms as u64 + 3125) / 6250
}

// round(ms / (6250 / 3)) == floor((6 * ms + 6250) / 12500)
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Computed in u64, where 6 * u32::MAX cannot overflow."
)]
const fn semi_diurn_steps(ms: u32) -> u64 {
    (6 * ms as u64 + 6250) / 12500
}

// round(steps * 3125 / 9) == floor((6250 * steps + 9) / 18)
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Five digits below 256 give fewer than 2^40 steps, so the product fits in u64."
)]
const fn diurn_steps_to_ms(steps: u64) -> u64 {
    (6250 * steps + 9) / 18
}

// round(steps * 6250 / 3) == floor((12500 * steps + 3) / 6)
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Five digits below 256 give fewer than 2^40 steps, so the product fits in u64."
)]
const fn semi_diurn_steps_to_ms(steps: u64) -> u64 {
    (12500 * steps + 3) / 6
}

#[expect(
    clippy::integer_division_remainder_used,
    clippy::cast_possible_truncation,
    clippy::arithmetic_side_effects,
    reason = "Every digit is reduced below 12 before the cast."
)]
const fn split_base12(mut steps: u64, leading_radix: u64) -> [u8; 5] {
    let d5 = (steps % 12) as u8;
    steps /= 12;
    let d4 = (steps % 12) as u8;
    steps /= 12;
    let d3 = (steps % 12) as u8;
    steps /= 12;
    let d2 = (steps % 12) as u8;
    steps /= 12;
    let d1 = (steps % leading_radix) as u8;
    [d1, d2, d3, d4, d5]
}

#[expect(
    clippy::arithmetic_side_effects,
    reason = "Five digits below 256 cannot overflow u64."
)]
const fn join_base12(digits: &[u8; 5]) -> u64 {
    let [d1, d2, d3, d4, d5] = *digits;
    (((d1 as u64 * 12 + d2 as u64) * 12 + d3 as u64) * 12 + d4 as u64) * 12 + d5 as u64
}

#[cfg(test)]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "test-only float checks")]
mod tests {
    use super::*;

    // The firmware this clock grew from rounded against decimal approximations of the step sizes.
    fn float_diurn_steps(ms: u32) -> u64 {
        (f64::from(ms) / 347.222_222_22).round() as u64
    }

    fn float_semi_diurn_steps(ms: u32) -> u64 {
        (f64::from(ms) / 2083.333_333_33).round() as u64
    }

    #[test]
    fn integer_scaling_matches_float_constants() {
        for ms in (0..ONE_DAY_MS).step_by(997).chain([ONE_DAY_MS - 1, 97_200_000]) {
            assert_eq!(diurn_steps(ms), float_diurn_steps(ms), "diurn steps at {ms}");
            assert_eq!(
                semi_diurn_steps(ms),
                float_semi_diurn_steps(ms),
                "semi-diurn steps at {ms}"
            );
        }
    }

    #[test]
    fn integer_composition_matches_float_constants() {
        for steps in 0..248_832_u64 {
            let float_ms = (steps as f64 * 347.222_222_22).round() as u64;
            assert_eq!(diurn_steps_to_ms(steps), float_ms, "diurn steps {steps}");
        }
        for steps in 0..41_472_u64 {
            let float_ms = (steps as f64 * 2083.333_333_33).round() as u64;
            assert_eq!(semi_diurn_steps_to_ms(steps), float_ms, "semi steps {steps}");
        }
    }

    #[test]
    fn base12_split_and_join_agree() {
        assert_eq!(split_base12(213_466, 12), [10, 3, 6, 4, 10]);
        assert_eq!(join_base12(&[10, 3, 6, 4, 10]), 213_466);
        // A full day of steps wraps to zero.
        assert_eq!(split_base12(248_832, 12), [0; 5]);
    }
}
