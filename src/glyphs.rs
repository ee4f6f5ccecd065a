//! Bitmap glyphs for the panel, one byte per pixel row, MSB leftmost.
//!
//! Large glyphs (12 rows) fill row 2. Small glyphs and symbols (7 rows) fill rows 1 and 3.
//! Digits 10 and 11 are the dozenal digits, drawn as a turned 2 and a turned 3.

pub type LargeGlyph = [u8; 12];
pub type SmallGlyph = [u8; 7];

pub const RADIX: usize = 12;
pub const COLON: usize = 13;
pub const BLANK: usize = 14;
/// Large table only.
pub const PLUS: usize = 15;
/// Large table only.
pub const MINUS: usize = 16;

/// Digits `0..12`, then [`RADIX`], [`COLON`], [`BLANK`], [`PLUS`] and [`MINUS`].
pub const LARGE: [LargeGlyph; 17] = [
    [0x3C, 0x7E, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0x7E, 0x3C],
    [0x18, 0x38, 0x78, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0xFF, 0xFF],
    [0x3C, 0x7E, 0xC3, 0x03, 0x07, 0x0E, 0x1C, 0x38, 0x70, 0xE0, 0xFF, 0xFF],
    [0x3C, 0x7E, 0xC3, 0x03, 0x03, 0x3E, 0x3E, 0x03, 0x03, 0xC3, 0x7E, 0x3C],
    [0x06, 0x0E, 0x1E, 0x3E, 0x76, 0xE6, 0xC6, 0xFF, 0xFF, 0x06, 0x06, 0x06],
    [0xFF, 0xFF, 0xC0, 0xC0, 0xC0, 0xFC, 0x7E, 0x03, 0x03, 0xC3, 0x7E, 0x3C],
    [0x3C, 0x7E, 0xC3, 0xC0, 0xC0, 0xFE, 0xFF, 0xC3, 0xC3, 0xC3, 0x7E, 0x3C],
    [0xFF, 0xFF, 0x03, 0x03, 0x06, 0x06, 0x0C, 0x0C, 0x18, 0x18, 0x30, 0x30],
    [0x3C, 0x7E, 0xC3, 0xC3, 0xC3, 0x7E, 0x7E, 0xC3, 0xC3, 0xC3, 0x7E, 0x3C],
    [0x3C, 0x7E, 0xC3, 0xC3, 0xC3, 0x7F, 0x7F, 0x03, 0x03, 0xC3, 0x7E, 0x3C],
    [0xFF, 0xFF, 0x07, 0x0E, 0x1C, 0x38, 0x70, 0xE0, 0xC0, 0xC3, 0x7E, 0x3C],
    [0x3C, 0x7E, 0xC3, 0xC0, 0xC0, 0x7C, 0x7C, 0xC0, 0xC0, 0xC3, 0x7E, 0x3C],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xC0, 0xC0],
    [0, 0, 0, 0xC0, 0xC0, 0, 0, 0xC0, 0xC0, 0, 0, 0],
    [0; 12],
    [0, 0, 0x18, 0x18, 0x18, 0xFF, 0xFF, 0x18, 0x18, 0x18, 0, 0],
    [0, 0, 0, 0, 0, 0xFF, 0xFF, 0, 0, 0, 0, 0],
];

/// Digits `0..12`, then [`RADIX`], [`COLON`] and [`BLANK`].
pub const SMALL: [SmallGlyph; 15] = [
    [0x70, 0x88, 0x88, 0x88, 0x88, 0x88, 0x70],
    [0x20, 0x60, 0xA0, 0x20, 0x20, 0x20, 0xF8],
    [0x70, 0x88, 0x08, 0x10, 0x20, 0x40, 0xF8],
    [0x70, 0x88, 0x08, 0x30, 0x08, 0x88, 0x70],
    [0x10, 0x30, 0x50, 0x90, 0xF8, 0x10, 0x10],
    [0xF8, 0x80, 0xF0, 0x08, 0x08, 0x88, 0x70],
    [0x70, 0x80, 0x80, 0xF0, 0x88, 0x88, 0x70],
    [0xF8, 0x08, 0x08, 0x10, 0x20, 0x20, 0x20],
    [0x70, 0x88, 0x88, 0x70, 0x88, 0x88, 0x70],
    [0x70, 0x88, 0x88, 0x78, 0x08, 0x08, 0x70],
    [0xF8, 0x10, 0x20, 0x40, 0x80, 0x88, 0x70],
    [0x70, 0x88, 0x80, 0x60, 0x80, 0x88, 0x70],
    [0, 0, 0, 0, 0, 0, 0x80],
    [0, 0, 0x80, 0, 0x80, 0, 0],
    [0; 7],
];

// Row 1 status symbols.
pub const DIURNAL: SmallGlyph = [0x00, 0x00, 0xC0, 0xA0, 0xA0, 0xA0, 0xC0];
pub const SEMI_DIURNAL: SmallGlyph = [0x00, 0x00, 0x60, 0x80, 0xE0, 0x20, 0xC0];
pub const SUN: SmallGlyph = [0x20, 0xA8, 0x70, 0xD8, 0x70, 0xA8, 0x20];
pub const MOON: SmallGlyph = [0x38, 0x50, 0xA0, 0xA0, 0x90, 0x4C, 0x38];
pub const ALARM: SmallGlyph = [0x00, 0x00, 0x40, 0xA0, 0xE0, 0xA0, 0xA0];
pub const TIMER: SmallGlyph = [0x00, 0x00, 0xE0, 0x40, 0x40, 0x40, 0x40];
pub const AM: SmallGlyph = [0x00, 0x00, 0x25, 0x57, 0x77, 0x55, 0x55];
pub const PM: SmallGlyph = [0x00, 0x00, 0x75, 0x57, 0x77, 0x45, 0x45];
pub const ERROR: SmallGlyph = [0x00, 0x00, 0x80, 0x80, 0x80, 0x00, 0x80];

/// Large glyph for `index`, or blank for anything past the table.
#[must_use]
pub fn large(index: usize) -> &'static LargeGlyph {
    LARGE.get(index).unwrap_or(&LARGE[BLANK])
}

/// Small glyph for `index`, or blank for anything past the table.
#[must_use]
pub fn small(index: usize) -> &'static SmallGlyph {
    SMALL.get(index).unwrap_or(&SMALL[BLANK])
}
