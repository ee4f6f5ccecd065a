use core::ops::Index;

/// Bytes per pixel row: the panel is 64 pixels wide.
pub const ROW_STRIDE: usize = 8;

/// One panel row's pixels, `N / 8` pixel rows of 64 pixels, MSB leftmost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBitmap<const N: usize>([u8; N]);

/// Row 1 and row 3: seven pixel rows.
pub type SmallRowBitmap = RowBitmap<56>;
/// Row 2: twelve pixel rows.
pub type LargeRowBitmap = RowBitmap<96>;

impl<const N: usize> RowBitmap<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self([0; N])
    }

    pub fn clear(&mut self) {
        self.0.fill(0);
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Dividing by a non-zero constant."
    )]
    pub const fn pixel_rows() -> usize {
        N / ROW_STRIDE
    }

    /// `true` if pixel `(x, y)` is lit; out-of-range pixels read as unlit.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "x % 8 < 8 and the byte lookup is bounds-checked."
    )]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= ROW_STRIDE * 8 {
            return false;
        }
        self.0
            .get(y * ROW_STRIDE + x / 8)
            .is_some_and(|byte| byte & (0x80 >> (x % 8)) != 0)
    }

    /// Draw `glyph` with its left edge at pixel column `index`, trimming its empty right-hand
    /// columns so they don't overwrite whatever sits to the right.
    pub fn draw(&mut self, index: usize, glyph: &[u8]) {
        self.write_glyph(index, glyph, trailing_blank_columns(glyph));
    }

    /// Clear the 8-pixel cell at column `index`, minus its rightmost `dead_zone` columns.
    pub fn erase(&mut self, index: usize, dead_zone: u8) {
        self.write_glyph(index, &[0; N], dead_zone);
    }

    /// Copy the leftmost `8 - dead_zone` columns of `glyph` to pixel column `index`.
    ///
    /// The glyph may straddle two bytes; the spill-over into the next byte is skipped at the
    /// right edge of the panel. Pixels outside the written columns are preserved.
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::integer_division_remainder_used,
        reason = "bit < 8 and dead_zone is clamped to 8, so every shift and difference stays in 0..8."
    )]
    pub fn write_glyph(&mut self, index: usize, glyph: &[u8], dead_zone: u8) {
        let column = index / 8;
        let bit = index % 8;
        let dead_zone = usize::from(dead_zone.min(8));
        let lhs = 8 - dead_zone.max(bit);
        let rhs = bit.saturating_sub(dead_zone);

        for (row, &glyph_row) in glyph.iter().take(Self::pixel_rows()).enumerate() {
            let byte_index = column + ROW_STRIDE * row;
            if let Some(byte) = self.0.get_mut(byte_index) {
                for i in 0..lhs {
                    copy_bit(glyph_row, 7 - i, byte, 7 - bit - i);
                }
            }
            if column < ROW_STRIDE - 1 && rhs > 0 {
                if let Some(byte) = self.0.get_mut(byte_index + 1) {
                    for i in 0..rhs {
                        copy_bit(glyph_row, 7 - lhs - i, byte, 7 - i);
                    }
                }
            }
        }
    }
}

impl<const N: usize> Default for RowBitmap<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Index<usize> for RowBitmap<N> {
    type Output = u8;

    #[expect(
        clippy::indexing_slicing,
        reason = "Bounds checking is the caller's responsibility."
    )]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Number of all-zero columns on the right of `glyph`, counted from bit 0 upward.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "trailing_zeros of a u8 is at most 8."
)]
pub fn trailing_blank_columns(glyph: &[u8]) -> u8 {
    glyph.iter().fold(0_u8, |acc, &row| acc | row).trailing_zeros() as u8
}

fn copy_bit(source: u8, source_bit: usize, target: &mut u8, target_bit: usize) {
    let mask = 1_u8 << target_bit;
    if source & (1 << source_bit) != 0 {
        *target |= mask;
    } else {
        *target &= !mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyphs;

    #[test]
    fn trailing_columns_of_narrow_glyphs() {
        assert_eq!(trailing_blank_columns(&glyphs::LARGE[0]), 0);
        assert_eq!(trailing_blank_columns(&glyphs::LARGE[glyphs::RADIX]), 6);
        assert_eq!(trailing_blank_columns(&glyphs::SMALL[0]), 3);
        assert_eq!(trailing_blank_columns(&glyphs::AM), 0);
        assert_eq!(trailing_blank_columns(&[0; 7]), 8);
    }

    #[test]
    fn aligned_write_fills_one_byte() {
        let mut row = LargeRowBitmap::new();
        row.draw(8, &glyphs::LARGE[8]);
        for pixel_row in 0..12 {
            assert_eq!(row[1 + 8 * pixel_row], glyphs::LARGE[8][pixel_row]);
            assert_eq!(row[8 * pixel_row], 0);
            assert_eq!(row[2 + 8 * pixel_row], 0);
        }
    }

    #[test]
    fn unaligned_write_splits_across_bytes() {
        let mut row = SmallRowBitmap::new();
        // 0x70 with three blank trailing columns: five columns wide, drawn at pixel 6.
        row.draw(6, &glyphs::SMALL[0]);
        // Glyph columns 1..=3 land on pixels 7..=9.
        assert_eq!(row[0], 0b0000_0001);
        assert_eq!(row[1], 0b1100_0000);
        assert!(row.pixel(7, 0));
        assert!(row.pixel(9, 0));
        assert!(!row.pixel(10, 0));
    }

    #[test]
    fn neighbouring_pixels_survive() {
        let mut row = SmallRowBitmap::new();
        row.draw(0, &[0xFF; 7]);
        row.draw(8, &[0xFF; 7]);
        // A five-column erase at pixel 2 only touches pixels 2..=6.
        row.erase(2, 3);
        assert_eq!(row[0], 0b1100_0001);
        assert_eq!(row[1], 0xFF);
        // A one-column glyph at pixel 3 leaves its neighbours alone.
        row.draw(3, &[0x80; 7]);
        assert_eq!(row[0], 0b1101_0001);
    }

    #[test]
    fn blank_write_clears_whole_cell_across_boundary() {
        let mut row = LargeRowBitmap::new();
        row.draw(0, &[0xFF; 12]);
        row.draw(8, &[0xFF; 12]);
        row.erase(4, 0);
        assert_eq!(row[0], 0xF0);
        assert_eq!(row[1], 0x0F);
    }

    #[test]
    fn rightmost_cell_does_not_wrap_to_next_pixel_row() {
        let mut row = SmallRowBitmap::new();
        row.draw(60, &[0xFF; 7]);
        assert_eq!(row[7], 0x0F);
        assert_eq!(row[8], 0);
    }
}
