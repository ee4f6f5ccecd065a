//! Cursor, digit and radix movement rules used while a time is being edited.
//!
//! Trad digits keep to valid clock values as they change. In Trad24H the tens of hours wraps
//! through 0..=2 and the units of hours through 0..=3 once the tens is 2. Trad12H does the same
//! for 0..=1 and 0..=2 and keeps 12 on the PM side and 00 on the AM side.

use crate::time_codec::{AM_PM_DIGIT, Digits, TimeFormat};

#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "digit_count() is never zero."
)]
pub const fn cursor_left(format: TimeFormat, cursor: usize) -> usize {
    let count = format.digit_count();
    (cursor % count + count - 1) % count
}

#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "digit_count() is never zero."
)]
pub const fn cursor_right(format: TimeFormat, cursor: usize) -> usize {
    (cursor + 1) % format.digit_count()
}

/// Step the digit under `cursor` up by one, wrapping within its range.
pub fn increase(format: TimeFormat, digits: &mut Digits, cursor: usize) {
    step(format, digits, cursor, Direction::Up);
}

/// Step the digit under `cursor` down by one, wrapping within its range.
pub fn decrease(format: TimeFormat, digits: &mut Digits, cursor: usize) {
    step(format, digits, cursor, Direction::Down);
}

#[derive(Clone, Copy)]
enum Direction {
    Up,
    Down,
}

#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Every modulus is at least 2 and digits stay below 12."
)]
fn step(format: TimeFormat, digits: &mut Digits, cursor: usize, direction: Direction) {
    let Some(modulus) = modulus(format, digits, cursor) else {
        return;
    };
    let Some(digit) = digits.get_mut(cursor) else {
        return;
    };
    *digit = match direction {
        Direction::Up => (*digit % modulus + 1) % modulus,
        Direction::Down => (*digit % modulus + modulus - 1) % modulus,
    };
    clamp_trad_hours(format, digits);
}

/// Range of the digit at `cursor`, or `None` past the format's last digit.
fn modulus(format: TimeFormat, digits: &Digits, cursor: usize) -> Option<u8> {
    let hour_tens = digits[0];
    let modulus = match (format, cursor) {
        (TimeFormat::Trad24H, 0) => 3,
        (TimeFormat::Trad24H, 1) => {
            if hour_tens == 2 {
                4
            } else {
                10
            }
        }
        (TimeFormat::Trad12H, 0) | (TimeFormat::Trad12H, AM_PM_DIGIT) => 2,
        (TimeFormat::Trad12H, 1) => {
            if hour_tens == 1 {
                3
            } else {
                10
            }
        }
        (TimeFormat::Trad24H | TimeFormat::Trad12H, 2 | 4) => 6,
        (TimeFormat::Trad24H | TimeFormat::Trad12H, 3 | 5) => 10,
        (TimeFormat::DozSemi, 0) => 2,
        (TimeFormat::DozDrn4 | TimeFormat::DozDrn5 | TimeFormat::DozSemi, _) => 12,
        (TimeFormat::Trad24H | TimeFormat::Trad12H, _) => return None,
    };
    (cursor < format.digit_count()).then_some(modulus)
}

fn clamp_trad_hours(format: TimeFormat, digits: &mut Digits) {
    match format {
        TimeFormat::Trad24H => {
            if digits[0] == 2 && digits[1] > 3 {
                digits[1] = 0;
            }
        }
        TimeFormat::Trad12H => {
            if digits[0] == 1 && digits[1] > 2 {
                digits[1] = 0;
            }
            if digits[0] == 1 && digits[1] == 2 && digits[AM_PM_DIGIT] == 0 {
                digits[AM_PM_DIGIT] = 1;
            } else if digits[0] == 0 && digits[1] == 0 && digits[AM_PM_DIGIT] == 1 {
                digits[AM_PM_DIGIT] = 0;
            }
        }
        TimeFormat::DozDrn4 | TimeFormat::DozDrn5 | TimeFormat::DozSemi => {}
    }
}

/// Move the radix point one place left; trad formats have no radix.
///
/// `diurn` is shared by DozDrn4 (0..=4) and DozDrn5 (0..=5). `semi` is DozSemi's, 1..=5,
/// since the half-day digit always stays left of the point.
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Moduli are 5 or 6 and positions are reduced before subtracting."
)]
pub const fn radix_left(format: TimeFormat, diurn: &mut u8, semi: &mut u8) {
    match format {
        TimeFormat::DozDrn4 => *diurn = (*diurn % 5 + 4) % 5,
        TimeFormat::DozDrn5 => *diurn = (*diurn % 6 + 5) % 6,
        TimeFormat::DozSemi => *semi = if *semi <= 1 { 5 } else { *semi - 1 },
        TimeFormat::Trad24H | TimeFormat::Trad12H => {}
    }
}

/// Move the radix point one place right; see [`radix_left`].
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Moduli are 5 or 6 and positions stay below 6."
)]
pub const fn radix_right(format: TimeFormat, diurn: &mut u8, semi: &mut u8) {
    match format {
        TimeFormat::DozDrn4 => *diurn = (*diurn + 1) % 5,
        TimeFormat::DozDrn5 => *diurn = (*diurn + 1) % 6,
        TimeFormat::DozSemi => *semi = if *semi >= 5 { 1 } else { *semi + 1 },
        TimeFormat::Trad24H | TimeFormat::Trad12H => {}
    }
}
