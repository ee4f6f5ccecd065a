//! The display state machine: which rows are visible and what is drawn into them.
//!
//! Row 1 carries status symbols, row 2 the time (or the calibration) in large glyphs, and
//! row 3 the alarm or timer in small glyphs. Each `update` redraws all three bitmaps from a
//! [`ClockState`] and pushes them to the panel.

use crate::{
    ClockState, ClockStatus, Colour, DisplayPanel, Error, Result, Row, TimerAlarmDisplayed,
    blink_state::BlinkState,
    glyphs,
    row_bitmap::{LargeRowBitmap, RowBitmap, SmallRowBitmap},
    shared_constants::{HIGH_BRIGHTNESS, PM_BOUNDARY_MS},
    time_codec::{AM_PM_DIGIT, Digits, TimeFormat, decompose},
};

/// Renderer states. `Off` blanks the panel; the four `ShowTime*` variants differ only in which
/// rows are visible; the `Set*` states add a blinking edit cursor.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Off,
    ShowTime123,
    ShowTime23,
    ShowTime12,
    ShowTime2,
    SetTime,
    SetTimer,
    SetAlarm,
    SetCalibration,
}

impl DisplayState {
    const SHOW_TIME_MODES: [Self; 4] = [
        Self::ShowTime123,
        Self::ShowTime23,
        Self::ShowTime12,
        Self::ShowTime2,
    ];

    #[must_use]
    pub const fn is_show_time(self) -> bool {
        matches!(
            self,
            Self::ShowTime123 | Self::ShowTime23 | Self::ShowTime12 | Self::ShowTime2
        )
    }

    #[must_use]
    pub const fn is_set(self) -> bool {
        matches!(
            self,
            Self::SetTime | Self::SetTimer | Self::SetAlarm | Self::SetCalibration
        )
    }

    /// Rows shown on entry; the rest are hidden.
    const fn visible_rows(self) -> (bool, bool, bool) {
        match self {
            Self::Off => (false, false, false),
            Self::ShowTime23 => (false, true, true),
            Self::ShowTime12 => (true, true, false),
            Self::ShowTime2 => (false, true, false),
            Self::ShowTime123
            | Self::SetTime
            | Self::SetTimer
            | Self::SetAlarm
            | Self::SetCalibration => (true, true, true),
        }
    }
}

/// Glyph anchors (pixel columns) for one time row in one format.
struct Layout {
    digits: &'static [usize],
    colons: &'static [usize],
    radix: &'static [usize],
    /// Added to digits right of the radix point.
    shift: usize,
}

const ROW1_ALARM: usize = 1;
const ROW1_TIMER: usize = 6;
const ROW1_ERROR: usize = 11;
const ROW1_AM_PM: usize = 55;
const ROW1_FORMAT: usize = 60;
const ROW3_AM_PM: usize = 52;

const CALIBRATION_SIGN: usize = 6;
const CALIBRATION_DIGITS: [usize; 4] = [16, 26, 36, 46];

const ROW2_TRAD: Layout = Layout {
    digits: &[1, 11, 23, 33, 45, 55],
    colons: &[20, 42],
    radix: &[],
    shift: 0,
};
const ROW2_DOZ5: Layout = Layout {
    digits: &[6, 16, 26, 36, 46],
    colons: &[],
    radix: &[6, 16, 26, 36, 46, 56],
    shift: 4,
};
const ROW2_DOZ4: Layout = Layout {
    digits: &[11, 21, 31, 41],
    colons: &[],
    radix: &[11, 21, 31, 41, 51],
    shift: 4,
};
const ROW3_TRAD: Layout = Layout {
    digits: &[12, 18, 26, 32, 40, 46],
    colons: &[24, 38],
    radix: &[],
    shift: 0,
};
const ROW3_DOZ5: Layout = Layout {
    digits: &[16, 22, 28, 34, 40],
    colons: &[],
    radix: &[16, 22, 28, 34, 40, 46],
    shift: 2,
};
const ROW3_DOZ4: Layout = Layout {
    digits: &[19, 25, 31, 37],
    colons: &[],
    radix: &[19, 25, 31, 37, 43],
    shift: 2,
};

const fn row2_layout(format: TimeFormat) -> &'static Layout {
    match format {
        TimeFormat::Trad24H | TimeFormat::Trad12H => &ROW2_TRAD,
        TimeFormat::DozDrn5 | TimeFormat::DozSemi => &ROW2_DOZ5,
        TimeFormat::DozDrn4 => &ROW2_DOZ4,
    }
}

const fn row3_layout(format: TimeFormat) -> &'static Layout {
    match format {
        TimeFormat::Trad24H | TimeFormat::Trad12H => &ROW3_TRAD,
        TimeFormat::DozDrn5 | TimeFormat::DozSemi => &ROW3_DOZ5,
        TimeFormat::DozDrn4 => &ROW3_DOZ4,
    }
}

/// The radix position that applies to `format`, if it has one.
const fn radix_position(format: TimeFormat, clock: &ClockState) -> Option<usize> {
    match format {
        TimeFormat::DozDrn4 | TimeFormat::DozDrn5 => Some(clock.diurn_radix_pos as usize),
        TimeFormat::DozSemi => Some(clock.semi_diurn_radix_pos as usize),
        TimeFormat::Trad24H | TimeFormat::Trad12H => None,
    }
}

impl Layout {
    /// Anchor of digit `index` (0-based): digits at or past the radix move right by `shift`.
    /// The semi-diurnal half-day digit never moves.
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "Anchors and shifts are small constants."
    )]
    fn digit_anchor(
        &self,
        format: TimeFormat,
        index: usize,
        radix: Option<usize>,
    ) -> Option<usize> {
        let anchor = *self.digits.get(index)?;
        let semi_half_day = matches!(format, TimeFormat::DozSemi) && index == 0;
        Some(match radix {
            Some(radix) if radix <= index && !semi_half_day => anchor + self.shift,
            _ => anchor,
        })
    }

    fn draw<const N: usize>(
        &self,
        bitmap: &mut RowBitmap<N>,
        format: TimeFormat,
        digits: &Digits,
        radix: Option<usize>,
        glyph: fn(usize) -> &'static [u8],
    ) {
        for &colon in self.colons {
            bitmap.draw(colon, glyph(glyphs::COLON));
        }
        if let Some(&anchor) = radix.and_then(|radix| self.radix.get(radix)) {
            bitmap.draw(anchor, glyph(glyphs::RADIX));
        }
        for (index, &digit) in digits.iter().enumerate().take(self.digits.len()) {
            if let Some(anchor) = self.digit_anchor(format, index, radix) {
                bitmap.draw(anchor, glyph(usize::from(digit)));
            }
        }
    }
}

fn large_glyph(index: usize) -> &'static [u8] {
    glyphs::large(index)
}

fn small_glyph(index: usize) -> &'static [u8] {
    glyphs::small(index)
}

const fn am_pm_glyph(pm: bool) -> &'static [u8] {
    if pm { &glyphs::PM } else { &glyphs::AM }
}

/// Small digits are five pixels wide; blanking one leaves the three columns right of it.
const SMALL_BLANK_DEAD_ZONE: u8 = 3;

/// Owns the panel and the three row bitmaps.
pub struct DisplayRenderer<D: DisplayPanel> {
    panel: D,
    state: DisplayState,
    show_mode: usize,
    format: TimeFormat,
    brightness: u8,
    blink: BlinkState,
    row1: SmallRowBitmap,
    row2: LargeRowBitmap,
    row3: SmallRowBitmap,
    row3_colour: Colour,
}

impl<D: DisplayPanel> DisplayRenderer<D> {
    #[must_use]
    pub const fn new(panel: D) -> Self {
        Self {
            panel,
            state: DisplayState::Off,
            show_mode: 0,
            format: TimeFormat::DozDrn4,
            brightness: HIGH_BRIGHTNESS,
            blink: BlinkState::Shown,
            row1: SmallRowBitmap::new(),
            row2: LargeRowBitmap::new(),
            row3: SmallRowBitmap::new(),
            row3_colour: Colour::Blue,
        }
    }

    /// Handshake with the panel, push blank rows in their default colours, then enter `Off`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DisplayInit`] if the panel does not respond.
    pub fn init(&mut self) -> Result<()> {
        self.panel.init().map_err(|_| Error::DisplayInit)?;
        self.set_brightness(HIGH_BRIGHTNESS);
        self.clear_rows();
        self.panel.set_colour(Row::Row1, Colour::Red);
        self.panel.set_colour(Row::Row2, Colour::Cyan);
        self.panel.set_colour(Row::Row3, Colour::Blue);
        self.row3_colour = Colour::Blue;
        self.push_rows();
        self.state = DisplayState::Off;
        self.enter(DisplayState::Off);
        Ok(())
    }

    /// Leave `Off` for the current show-time mode.
    pub fn on(&mut self) {
        if self.state == DisplayState::Off {
            self.transition(self.show_time_state());
        }
    }

    pub fn off(&mut self) {
        if self.state.is_show_time() {
            self.transition(DisplayState::Off);
        }
    }

    /// Cycle the show-time modes: all rows, rows 2-3, rows 1-2, row 2 only.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "show_mode stays below the number of modes."
    )]
    pub fn toggle_mode(&mut self) {
        if self.state.is_show_time() {
            self.show_mode = (self.show_mode + 1) % DisplayState::SHOW_TIME_MODES.len();
            self.transition(self.show_time_state());
        }
    }

    /// Return from any `Set*` screen to the current show-time mode.
    pub fn show_time(&mut self) {
        if self.state.is_set() {
            self.transition(self.show_time_state());
        }
    }

    pub fn set_time(&mut self) {
        self.enter_set_state(DisplayState::SetTime);
    }

    pub fn set_timer(&mut self) {
        self.enter_set_state(DisplayState::SetTimer);
    }

    pub fn set_alarm(&mut self) {
        self.enter_set_state(DisplayState::SetAlarm);
    }

    pub fn set_calibration(&mut self) {
        self.enter_set_state(DisplayState::SetCalibration);
    }

    /// Switch format; the buffers are cleared so no glyph of the old layout survives.
    pub fn set_format(&mut self, format: TimeFormat) {
        self.format = format;
        self.clear_rows();
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
        self.panel.set_brightness(brightness);
    }

    /// Advance the edit-cursor blink. Called every few ticks.
    pub fn periodic_callback(&mut self) {
        self.blink = self.blink.toggled();
    }

    /// Redraw and push every row for the current state.
    pub fn update(&mut self, clock: &ClockState) {
        match self.state {
            DisplayState::Off => return,
            DisplayState::ShowTime123
            | DisplayState::ShowTime23
            | DisplayState::ShowTime12
            | DisplayState::ShowTime2 => self.render_show_time(clock),
            DisplayState::SetTime => self.render_set_time(clock),
            DisplayState::SetTimer => self.render_set_timer(clock),
            DisplayState::SetAlarm => self.render_set_alarm(clock),
            DisplayState::SetCalibration => self.render_set_calibration(clock),
        }
        self.push_rows();
    }

    #[must_use]
    pub const fn state(&self) -> DisplayState {
        self.state
    }

    #[must_use]
    pub const fn format(&self) -> TimeFormat {
        self.format
    }

    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    #[must_use]
    pub const fn blink(&self) -> BlinkState {
        self.blink
    }

    #[must_use]
    pub const fn panel(&self) -> &D {
        &self.panel
    }

    pub const fn panel_mut(&mut self) -> &mut D {
        &mut self.panel
    }

    #[must_use]
    pub const fn row1(&self) -> &SmallRowBitmap {
        &self.row1
    }

    #[must_use]
    pub const fn row2(&self) -> &LargeRowBitmap {
        &self.row2
    }

    #[must_use]
    pub const fn row3(&self) -> &SmallRowBitmap {
        &self.row3
    }

    fn show_time_state(&self) -> DisplayState {
        DisplayState::SHOW_TIME_MODES
            .get(self.show_mode)
            .copied()
            .unwrap_or(DisplayState::ShowTime123)
    }

    fn enter_set_state(&mut self, next: DisplayState) {
        if self.state.is_show_time() {
            self.transition(next);
        }
    }

    fn transition(&mut self, next: DisplayState) {
        #[cfg(feature = "defmt")]
        defmt::info!("Display {:?} -> {:?}", self.state, next);
        self.exit(self.state);
        self.state = next;
        self.enter(next);
    }

    fn enter(&mut self, state: DisplayState) {
        if state == DisplayState::Off {
            self.panel.display_off();
            return;
        }
        let (row1, row2, row3) = state.visible_rows();
        for (row, visible) in [(Row::Row1, row1), (Row::Row2, row2), (Row::Row3, row3)] {
            if visible {
                self.panel.show(row);
            } else {
                self.panel.hide(row);
            }
        }
        match state {
            DisplayState::SetTimer => {
                self.panel.set_colour(Row::Row3, Colour::Green);
                self.row3_colour = Colour::Green;
            }
            DisplayState::SetAlarm => {
                self.panel.set_colour(Row::Row3, Colour::Blue);
                self.row3_colour = Colour::Blue;
            }
            _ => {}
        }
    }

    fn exit(&mut self, state: DisplayState) {
        if state == DisplayState::Off {
            self.panel.display_on();
        }
    }

    fn clear_rows(&mut self) {
        self.row1.clear();
        self.row2.clear();
        self.row3.clear();
    }

    fn push_rows(&mut self) {
        self.panel.set_bitmap(Row::Row1, self.row1.as_bytes());
        self.panel.set_bitmap(Row::Row2, self.row2.as_bytes());
        self.panel.set_bitmap(Row::Row3, self.row3.as_bytes());
    }

    fn set_row3_colour(&mut self, colour: Colour) {
        if self.row3_colour != colour {
            self.row3_colour = colour;
            self.panel.set_colour(Row::Row3, colour);
        }
    }

    fn render_show_time(&mut self, clock: &ClockState) {
        self.render_status(clock, clock.time_ms);
        self.render_row2_time(clock, clock.time_ms);
        self.render_row3_selection(clock);
    }

    fn render_set_time(&mut self, clock: &ClockState) {
        self.render_status(clock, clock.user_time_ms);
        self.render_row2_time(clock, clock.user_time_ms);
        self.render_row3_selection(clock);

        if self.format == TimeFormat::Trad12H && clock.digit_sel == AM_PM_DIGIT {
            let glyph = am_pm_glyph(clock.digit_vals[AM_PM_DIGIT] == 1);
            self.blink_cell_row1(ROW1_AM_PM, glyph);
            return;
        }
        let radix = radix_position(self.format, clock);
        let anchor = row2_layout(self.format).digit_anchor(self.format, clock.digit_sel, radix);
        if let Some(anchor) = anchor {
            if self.blink.is_blanked_out() {
                self.row2.erase(anchor, 0);
            } else {
                self.row2.draw(anchor, large_glyph(selected_digit(clock)));
            }
        }
    }

    fn render_set_timer(&mut self, clock: &ClockState) {
        self.render_status(clock, clock.time_ms);
        self.render_row2_time(clock, clock.time_ms);
        self.row3.clear();
        self.render_row3_time(clock, clock.user_timer_ms, false);
        self.blink_row3_digit(clock);
    }

    fn render_set_alarm(&mut self, clock: &ClockState) {
        self.render_status(clock, clock.time_ms);
        self.render_row2_time(clock, clock.time_ms);
        self.row3.clear();
        self.render_row3_time(clock, clock.user_alarm_ms, true);

        if self.format == TimeFormat::Trad12H && clock.digit_sel == AM_PM_DIGIT {
            let glyph = am_pm_glyph(clock.digit_vals[AM_PM_DIGIT] == 1);
            if self.blink.is_blanked_out() {
                self.row3.erase(ROW3_AM_PM, 0);
            } else {
                self.row3.draw(ROW3_AM_PM, glyph);
            }
            return;
        }
        self.blink_row3_digit(clock);
    }

    /// Sign then four base-12 digits of the magnitude.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Base-12 digit extraction."
    )]
    fn render_set_calibration(&mut self, clock: &ClockState) {
        self.row1.clear();
        self.row2.clear();
        self.row3.clear();

        let sign = match clock.rtc_calib.signum() {
            1 => glyphs::PLUS,
            -1 => glyphs::MINUS,
            _ => glyphs::BLANK,
        };
        self.row2.draw(CALIBRATION_SIGN, large_glyph(sign));

        let mut magnitude = clock.rtc_calib.unsigned_abs();
        for &anchor in CALIBRATION_DIGITS.iter().rev() {
            self.row2.draw(anchor, large_glyph((magnitude % 12) as usize));
            magnitude /= 12;
        }
    }

    /// Row 1: alarm, timer and error flags, then the format marker.
    fn render_status(&mut self, clock: &ClockState, reference_ms: u32) {
        self.row1.clear();
        if clock.alarm_set {
            self.row1.draw(ROW1_ALARM, &glyphs::ALARM);
        }
        if clock.timer_set {
            self.row1.draw(ROW1_TIMER, &glyphs::TIMER);
        }
        if clock.show_error && clock.error_code != ClockStatus::Ok {
            self.row1.draw(ROW1_ERROR, &glyphs::ERROR);
        }
        match self.format {
            TimeFormat::Trad12H => {
                self.row1
                    .draw(ROW1_AM_PM, am_pm_glyph(reference_ms >= PM_BOUNDARY_MS));
            }
            TimeFormat::DozDrn4 | TimeFormat::DozDrn5 => {
                self.row1.draw(ROW1_FORMAT, &glyphs::DIURNAL);
            }
            TimeFormat::DozSemi => self.row1.draw(ROW1_FORMAT, &glyphs::SEMI_DIURNAL),
            TimeFormat::Trad24H => {}
        }
    }

    fn render_row2_time(&mut self, clock: &ClockState, ms: u32) {
        self.row2.clear();
        let digits = decompose(self.format, ms);
        let radix = radix_position(self.format, clock);
        row2_layout(self.format).draw(
            &mut self.row2,
            self.format,
            &digits,
            radix,
            large_glyph,
        );
    }

    /// Row 3 in the show-time and `SetTime` screens: whichever of alarm and timer is selected.
    fn render_row3_selection(&mut self, clock: &ClockState) {
        self.row3.clear();
        match clock.row3_selection() {
            Some(TimerAlarmDisplayed::Timer) => {
                self.set_row3_colour(Colour::Green);
                self.render_row3_time(clock, clock.user_timer_ms, false);
            }
            Some(TimerAlarmDisplayed::Alarm) => {
                self.set_row3_colour(Colour::Blue);
                self.render_row3_time(clock, clock.user_alarm_ms, true);
            }
            None => {}
        }
    }

    /// A countdown has no AM/PM, so `with_am_pm` is false for the timer.
    fn render_row3_time(&mut self, clock: &ClockState, ms: u32, with_am_pm: bool) {
        let digits = decompose(self.format, ms);
        let radix = radix_position(self.format, clock);
        row3_layout(self.format).draw(
            &mut self.row3,
            self.format,
            &digits,
            radix,
            small_glyph,
        );
        if with_am_pm && self.format == TimeFormat::Trad12H {
            self.row3
                .draw(ROW3_AM_PM, am_pm_glyph(digits[AM_PM_DIGIT] == 1));
        }
    }

    fn blink_row3_digit(&mut self, clock: &ClockState) {
        let radix = radix_position(self.format, clock);
        let anchor = row3_layout(self.format).digit_anchor(self.format, clock.digit_sel, radix);
        if let Some(anchor) = anchor {
            if self.blink.is_blanked_out() {
                self.row3.erase(anchor, SMALL_BLANK_DEAD_ZONE);
            } else {
                self.row3.draw(anchor, small_glyph(selected_digit(clock)));
            }
        }
    }

    fn blink_cell_row1(&mut self, anchor: usize, glyph: &[u8]) {
        if self.blink.is_blanked_out() {
            self.row1.erase(anchor, 0);
        } else {
            self.row1.draw(anchor, glyph);
        }
    }
}

fn selected_digit(clock: &ClockState) -> usize {
    clock
        .digit_vals
        .get(clock.digit_sel)
        .map_or(glyphs::BLANK, |&digit| usize::from(digit))
}
