//! Encoding mode selection: numeric, alphanumeric, byte, and Shift-JIS
//! kanji, each with its own per-character bit cost and character-count
//! indicator width.

use crate::ecc::CodeEcc;
use crate::tables;
use crate::version::Version;

/// One of the four encoding modes a segment's data can be packed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
}

impl Mode {
    pub(crate) fn ordinal(self) -> usize {
        match self {
            Mode::Numeric => 0,
            Mode::Alphanumeric => 1,
            Mode::Byte => 2,
            Mode::Kanji => 3,
        }
    }

    /// The 4-bit mode indicator written ahead of the character count.
    pub(crate) fn mode_bits(self) -> u32 {
        match self {
            Mode::Numeric => 0x1,
            Mode::Alphanumeric => 0x2,
            Mode::Byte => 0x4,
            Mode::Kanji => 0x8,
        }
    }

    /// Width, in bits, of the character-count indicator at the given
    /// version.
    pub fn count_indicator_bits(self, version: Version) -> u8 {
        tables::count_indicator_bits(version, self)
    }
}

fn is_numeric(payload: &[u8]) -> bool {
    !payload.is_empty() && payload.iter().all(u8::is_ascii_digit)
}

fn is_alphanumeric(payload: &[u8]) -> bool {
    !payload.is_empty() && payload.iter().all(|&b| tables::alphanumeric_value(b).is_some())
}

/// True if `(first, second)` fall inside a valid Shift-JIS double-byte
/// kanji codepoint range, per JIS X 0208.
fn is_sjis_kanji(first: u8, second: u8) -> bool {
    let lead_ok = (0x81..=0x9F).contains(&first) || (0xE0..=0xEB).contains(&first);
    let trail_ok = (0x40..=0x7E).contains(&second) || (0x80..=0xFC).contains(&second);
    if !lead_ok || !trail_ok {
        return false;
    }
    let code = (u16::from(first) << 8) | u16::from(second);
    code <= 0xEBBF
}

fn is_kanji(payload: &[u8]) -> bool {
    if payload.is_empty() || payload.len() % 2 != 0 {
        return false;
    }
    payload
        .chunks_exact(2)
        .all(|pair| is_sjis_kanji(pair[0], pair[1]))
}

/// Chooses the narrowest mode that can represent `payload` without loss:
/// numeric, then alphanumeric, then Shift-JIS kanji, falling back to byte
/// mode for arbitrary binary data.
///
/// Kanji is preferred over byte mode only when every byte pair is a valid
/// Shift-JIS double-byte sequence; otherwise a kanji-shaped-but-invalid
/// payload is encoded as bytes.
pub fn pick_mode(payload: &[u8]) -> Mode {
    if is_numeric(payload) {
        Mode::Numeric
    } else if is_alphanumeric(payload) {
        Mode::Alphanumeric
    } else if is_kanji(payload) {
        Mode::Kanji
    } else {
        Mode::Byte
    }
}

/// Number of bits `payload.len()` characters of `mode` occupy in the
/// bitstream body, not counting the mode indicator or character-count
/// indicator.
fn body_bits(mode: Mode, char_count: usize) -> usize {
    match mode {
        Mode::Numeric => {
            let triples = char_count / 3;
            let rem = char_count % 3;
            triples * 10 + if rem == 2 { 7 } else if rem == 1 { 4 } else { 0 }
        }
        Mode::Alphanumeric => {
            let pairs = char_count / 2;
            pairs * 11 + if char_count % 2 == 1 { 6 } else { 0 }
        }
        Mode::Byte => char_count * 8,
        Mode::Kanji => (char_count / 2) * 13,
    }
}

/// The character count a segment of `mode` presents to the character-count
/// indicator: bytes for byte mode, double-byte characters for kanji mode.
fn char_count_for(mode: Mode, payload_len: usize) -> usize {
    if mode == Mode::Kanji {
        payload_len / 2
    } else {
        payload_len
    }
}

/// Total bitstream length (mode indicator + count indicator + body) for
/// `payload` encoded as `mode` at `version`.
pub(crate) fn segment_bit_length(mode: Mode, payload_len: usize, version: Version) -> usize {
    4 + usize::from(mode.count_indicator_bits(version))
        + body_bits(mode, char_count_for(mode, payload_len))
}

/// Finds the smallest version at which `payload`, encoded as `mode`, fits
/// within the data-codeword capacity for `ec`. Versions are tried in
/// increasing order since indicator widths only grow with version, so the
/// first version that fits is minimal.
pub fn pick_version(payload_len: usize, ec: CodeEcc, mode: Mode) -> Option<Version> {
    for v in Version::MIN.value()..=Version::MAX.value() {
        let version = Version::new(v);
        let capacity_bits = tables::data_codewords_len(version, ec) * 8;
        if segment_bit_length(mode, payload_len, version) <= capacity_bits {
            return Some(version);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_numeric_for_digits() {
        assert_eq!(pick_mode(b"0123456789"), Mode::Numeric);
    }

    #[test]
    fn picks_alphanumeric_for_hello_world() {
        assert_eq!(pick_mode(b"HELLO WORLD"), Mode::Alphanumeric);
    }

    #[test]
    fn picks_byte_for_lowercase() {
        assert_eq!(pick_mode(b"Hello World"), Mode::Byte);
    }

    #[test]
    fn picks_kanji_for_valid_sjis_pairs() {
        assert_eq!(pick_mode(&[0x93, 0xFA, 0x96, 0x7B]), Mode::Kanji);
    }

    #[test]
    fn version_for_hello_world_quartile_is_1() {
        assert_eq!(
            pick_version(11, CodeEcc::Quartile, Mode::Alphanumeric),
            Some(Version::new(1))
        );
    }

    #[test]
    fn sjis_boundaries() {
        assert!(!is_sjis_kanji(0x81, 0x3F));
        assert!(is_sjis_kanji(0x81, 0x40));
        assert!(is_sjis_kanji(0x81, 0x7E));
        assert!(!is_sjis_kanji(0x81, 0x7F));
        assert!(is_sjis_kanji(0x81, 0x80));
        assert!(is_sjis_kanji(0x81, 0xFC));
        assert!(is_sjis_kanji(0xEB, 0xBF));
        assert!(!is_sjis_kanji(0xEB, 0xC0));
    }

    #[test]
    fn pick_version_is_monotonic_in_payload_len() {
        let short = pick_version(10, CodeEcc::High, Mode::Byte);
        let long = pick_version(200, CodeEcc::High, Mode::Byte);
        assert!(short.unwrap().value() <= long.unwrap().value());
    }
}
