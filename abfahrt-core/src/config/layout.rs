//! Character display layout
//!
//! ```text
//!  0         1
//!  0123456789012345
//! ┌────────────────┐
//! │Fröttmanin 14:07│  row 0
//! │Laufen...  02:00│  row 1
//! └────────────────┘
//!  └─ name ─┘ └time┘
//! ```

/// Number of character columns on the LCD
pub const ROW_WIDTH: usize = 16;

/// Number of character rows on the LCD (one departure per row)
pub const ROWS: usize = 2;

/// Columns reserved for the destination name
pub const NAME_COLS: usize = 10;

/// Column of the blank between name and clock
pub const SEPARATOR_COL: usize = 10;

/// First column of the `HH:MM` clock field
pub const CLOCK_COL: usize = 11;

/// Width of the `HH:MM` clock field
pub const CLOCK_LEN: usize = 5;

/// Maximum transcoded glyphs kept per destination
pub const MAX_GLYPHS: usize = 255;

/// Cursor position parked on while a fetch is in flight (col, row)
///
/// The LCD blinks its cursor here, so a blinking block between name and
/// clock on the second row means "fetching".
pub const FETCH_INDICATOR: (u8, u8) = (SEPARATOR_COL as u8, 1);

/// Name shown when no departure qualifies
pub const PLACEHOLDER_DESTINATION: &str = "Laufen...";

/// Boot message shown while the station joins the network
pub const WIFI_INIT_MESSAGE: &str = "WiFi init..";
