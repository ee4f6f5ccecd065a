/// Phase of the edit-cursor blink, toggled by the periodic tick.
///
/// While `BlankedOut`, the selected digit is drawn as a blank cell; while `Shown` the digit's
/// glyph is drawn.
#[expect(missing_docs, reason = "The variants are self-explanatory.")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlinkState {
    #[default]
    Shown,
    BlankedOut,
}

impl BlinkState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Shown => Self::BlankedOut,
            Self::BlankedOut => Self::Shown,
        }
    }

    #[must_use]
    pub const fn is_blanked_out(self) -> bool {
        matches!(self, Self::BlankedOut)
    }
}
