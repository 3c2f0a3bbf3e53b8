//! Marquee rendering of display rows
//!
//! Each row is `NAME_COLS` of destination, one blank, and an `HH:MM`
//! clock. Names longer than the name field scroll left one glyph per
//! tick and jump back to the start once the tail is visible.

use core::fmt::Write;

use heapless::String;

use crate::config::{
    CLOCK_COL, CLOCK_LEN, NAME_COLS, ROW_WIDTH, SCROLL_MODULUS, SECS_PER_DAY, SECS_PER_HOUR,
    SEPARATOR_COL, TIMEZONE_OFFSET_S,
};
use crate::departure::DisplayedDeparture;
use crate::glyph::GlyphBuffer;

/// One rendered display row, raw glyph codes
pub type Line = [u8; ROW_WIDTH];

/// Shared scroll position for all rows
///
/// Advances once per refresh tick and wraps at `SCROLL_MODULUS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollTick(u8);

impl ScrollTick {
    /// Start at offset zero
    pub const fn new() -> Self {
        Self(0)
    }

    /// Current tick value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Move one step, wrapping at `SCROLL_MODULUS`
    pub fn advance(&mut self) {
        self.0 = ((self.0 as u16 + 1) % SCROLL_MODULUS as u16) as u8;
    }
}

/// First visible glyph of a name of `len` glyphs at `tick`
///
/// Names that fit never scroll. Longer names cycle through
/// `len - NAME_COLS + 1` positions.
pub fn scroll_offset(len: usize, tick: u8) -> usize {
    if len <= NAME_COLS {
        0
    } else {
        tick as usize % (len - (NAME_COLS - 1))
    }
}

/// Render the `HH:MM` field for a departure instant
///
/// The hour is shifted by `TIMEZONE_OFFSET_S`, the minute is not. Whole
/// hour offsets make that harmless; a half-hour zone would show wrong
/// minutes.
pub fn clock_field(realtime_departure: i64) -> [u8; CLOCK_LEN] {
    let hour = (realtime_departure + TIMEZONE_OFFSET_S).rem_euclid(SECS_PER_DAY) / SECS_PER_HOUR;
    let minute = realtime_departure.rem_euclid(SECS_PER_HOUR) / 60;

    let mut text: String<CLOCK_LEN> = String::new();
    // Cannot fail: both values are two digits
    let _ = write!(text, "{:02}:{:02}", hour, minute);

    let mut field = [b' '; CLOCK_LEN];
    field.copy_from_slice(text.as_bytes());
    field
}

/// Render one departure into a display row
pub fn render(departure: &DisplayedDeparture, scroll_tick: u8) -> Line {
    let glyphs = GlyphBuffer::from_text(&departure.destination);
    let name = glyphs.as_slice();

    let mut line = [b' '; ROW_WIDTH];

    let offset = scroll_offset(name.len(), scroll_tick);
    let visible = &name[offset..name.len().min(offset + NAME_COLS)];
    line[..visible.len()].copy_from_slice(visible);

    line[SEPARATOR_COL] = b' ';
    line[CLOCK_COL..CLOCK_COL + CLOCK_LEN]
        .copy_from_slice(&clock_field(departure.realtime_departure));

    line
}

/// Render a left-aligned status message across the full row
///
/// Text is transcoded like destination names and cut at `ROW_WIDTH`.
pub fn render_message(text: &str) -> Line {
    let glyphs = GlyphBuffer::from_text(text);
    let shown = &glyphs.as_slice()[..glyphs.len().min(ROW_WIDTH)];

    let mut line = [b' '; ROW_WIDTH];
    line[..shown.len()].copy_from_slice(shown);
    line
}
