//! Character display trait

use crate::marquee::Line;

/// Fixed-width character display
///
/// The scheduler only positions the cursor and writes whole rows. Bus
/// errors are the implementation's business: nothing here is checked by
/// the caller, a failed write just leaves the previous frame visible.
pub trait DisplaySurface {
    /// Move the cursor to `col`, `row` (0-based)
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write one full row of glyph codes starting at column 0
    fn write_line(&mut self, row: u8, line: &Line);
}
