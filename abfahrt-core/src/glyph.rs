//! UTF-8 to HD44780 glyph transcoding
//!
//! The LCD character ROM (A00 variant) is ASCII in its lower half and
//! Japanese katakana plus a handful of Latin/Greek symbols in the upper
//! half. German destination names only need four of those: ß and the
//! three umlauts. Everything else is passed through or replaced by `?`.
//!
//! Upper and lower case umlauts share a single ROM glyph, so `Ö` and `ö`
//! both render as the lowercase form.

use crate::config::MAX_GLYPHS;

/// Lead byte of the two-byte UTF-8 sequences for U+00C0..U+00FF
pub const UTF8_LEAD_LATIN1: u8 = 0xC3;

/// ROM glyph for ß
pub const GLYPH_SHARP_S: u8 = 0xE2;

/// ROM glyph for ä
pub const GLYPH_A_UMLAUT: u8 = 0xE1;

/// ROM glyph for ö
pub const GLYPH_O_UMLAUT: u8 = 0xEF;

/// ROM glyph for ü
pub const GLYPH_U_UMLAUT: u8 = 0xF5;

/// Substitute for any unmapped Latin-1 letter
pub const GLYPH_UNKNOWN: u8 = b'?';

/// Map the continuation byte of a `0xC3 xx` sequence to a ROM glyph
pub const fn latin1_glyph(continuation: u8) -> u8 {
    match continuation {
        0x9F => GLYPH_SHARP_S,         // ß
        0x84 | 0xA4 => GLYPH_A_UMLAUT, // Ä ä
        0x96 | 0xB6 => GLYPH_O_UMLAUT, // Ö ö
        0x9C | 0xBC => GLYPH_U_UMLAUT, // Ü ü
        _ => GLYPH_UNKNOWN,
    }
}

/// Transcode UTF-8 bytes into LCD glyph codes
///
/// Writes at most `dst.len()` glyphs and returns the number written.
/// Input that does not fit is dropped. A `0xC3` pair collapses into one
/// glyph; a trailing `0xC3` without continuation is copied unchanged.
/// All other bytes are copied as-is, so ASCII survives untouched and
/// other multi-byte characters come out as raw (garbage) glyphs.
pub fn transcode(src: &[u8], dst: &mut [u8]) -> usize {
    let mut read = 0;
    let mut written = 0;

    while read < src.len() && written < dst.len() {
        let byte = src[read];
        if byte == UTF8_LEAD_LATIN1 && read + 1 < src.len() {
            dst[written] = latin1_glyph(src[read + 1]);
            read += 2;
        } else {
            dst[written] = byte;
            read += 1;
        }
        written += 1;
    }

    written
}

/// Owned, capacity-bounded glyph string
///
/// Working buffer for one transcoded destination.
#[derive(Clone)]
pub struct GlyphBuffer {
    glyphs: [u8; MAX_GLYPHS],
    len: usize,
}

impl GlyphBuffer {
    /// Transcode `text` into a new buffer, truncating at `MAX_GLYPHS`
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Transcode raw bytes into a new buffer, truncating at `MAX_GLYPHS`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut glyphs = [0u8; MAX_GLYPHS];
        let len = transcode(bytes, &mut glyphs);
        Self { glyphs, len }
    }

    /// Transcoded glyphs
    pub fn as_slice(&self) -> &[u8] {
        &self.glyphs[..self.len]
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no glyphs were produced
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl core::fmt::Debug for GlyphBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphBuffer")
            .field("glyphs", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn transcode_str(text: &str) -> ([u8; 64], usize) {
        let mut out = [0u8; 64];
        let len = transcode(text.as_bytes(), &mut out);
        (out, len)
    }

    #[test]
    fn test_ascii_passthrough() {
        let (out, len) = transcode_str("Klinikum Grosshadern");
        assert_eq!(&out[..len], b"Klinikum Grosshadern");
    }

    #[test]
    fn test_umlauts() {
        let (out, len) = transcode_str("Fröttmaning");
        assert_eq!(&out[..len], b"Fr\xEFttmaning");

        let (out, len) = transcode_str("München");
        assert_eq!(&out[..len], b"M\xF5nchen");
        assert_eq!(len, 7);
    }

    #[test]
    fn test_case_folding() {
        let (out, len) = transcode_str("ÄäÖöÜüß");
        assert_eq!(
            &out[..len],
            &[
                GLYPH_A_UMLAUT,
                GLYPH_A_UMLAUT,
                GLYPH_O_UMLAUT,
                GLYPH_O_UMLAUT,
                GLYPH_U_UMLAUT,
                GLYPH_U_UMLAUT,
                GLYPH_SHARP_S
            ]
        );
    }

    #[test]
    fn test_unknown_latin1() {
        // é is 0xC3 0xA9
        let (out, len) = transcode_str("Café");
        assert_eq!(&out[..len], b"Caf?");
    }

    #[test]
    fn test_trailing_lead_byte() {
        let mut out = [0u8; 8];
        let len = transcode(&[b'a', 0xC3], &mut out);
        assert_eq!(&out[..len], &[b'a', 0xC3]);
    }

    #[test]
    fn test_other_multibyte_copied_raw() {
        // € is E2 82 AC, passes through byte for byte
        let (out, len) = transcode_str("5€");
        assert_eq!(&out[..len], &[b'5', 0xE2, 0x82, 0xAC]);
    }

    #[test]
    fn test_truncates_at_capacity() {
        let mut out = [0u8; 4];
        let len = transcode("Giesing Bahnhof".as_bytes(), &mut out);
        assert_eq!(len, 4);
        assert_eq!(&out, b"Gies");
    }

    #[test]
    fn test_zero_capacity() {
        let mut out = [0u8; 0];
        assert_eq!(transcode(b"abc", &mut out), 0);
    }

    #[test]
    fn test_glyph_buffer_bound() {
        let long = [b'x'; 400];
        let buffer = GlyphBuffer::from_bytes(&long);
        assert_eq!(buffer.len(), MAX_GLYPHS);
    }

    fn german_text() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                proptest::char::range(' ', '~'),
                proptest::sample::select(vec!['ä', 'Ä', 'ö', 'Ö', 'ü', 'Ü', 'ß']),
            ],
            0..80,
        )
        .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_deterministic_and_shrinking(text in german_text()) {
            let (first, first_len) = transcode_str_owned(&text);
            let (second, second_len) = transcode_str_owned(&text);
            prop_assert_eq!(first_len, second_len);
            prop_assert_eq!(&first[..first_len], &second[..second_len]);
            prop_assert!(first_len <= text.len());
            prop_assert_eq!(first_len, text.chars().count());
        }

        #[test]
        fn prop_never_exceeds_capacity(bytes in proptest::collection::vec(any::<u8>(), 0..64), cap in 0usize..32) {
            let mut out = vec![0u8; cap];
            let len = transcode(&bytes, &mut out);
            prop_assert!(len <= cap);
            prop_assert!(len <= bytes.len());
        }
    }

    fn transcode_str_owned(text: &str) -> (Vec<u8>, usize) {
        let mut out = vec![0u8; text.len()];
        let len = transcode(text.as_bytes(), &mut out);
        (out, len)
    }
}
