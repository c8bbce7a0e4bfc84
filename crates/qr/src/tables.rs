//! Static capacity, block-layout, alignment-pattern, version-string, and
//! format-string tables indexed by (version, error-correction level).
//!
//! All tables are compile-time constants. Values are taken from ISO/IEC
//! 18004, cross-checked against a reference C implementation's literal
//! tables (`num_codewords`, `rs_block_table`, `chrcnt_indicator_lens`,
//! `alphanumerics`, `alignment_pattern_gaps`, `version_strings`,
//! `format_strings`). Everything here is addressed by the 0-based table
//! index `v = Version - 1`.

use crate::ecc::CodeEcc;
use crate::mode::Mode;
use crate::version::Version;

/// Total number of codewords (data + error correction) in the symbol, by
/// 0-based version index.
pub(crate) static TOTAL_CODEWORDS: [u16; 40] = [
    26, 44, 70, 100, 134, 172, 196, 242, 292, 346, 404, 466, 532, 581, 655, 733, 815, 901, 991,
    1085, 1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185, 2323, 2465, 2611, 2761,
    2876, 3034, 3196, 3362, 3532, 3706,
];

/// Raw Reed-Solomon block layout by (version, EC level): `(g1_blocks,
/// g1_data_per_block, g2_blocks)`. `ec_per_block` and `g2_data_per_block`
/// are derived from this and `TOTAL_CODEWORDS`, per the layout invariant in
/// spec §3.
///
/// Indexed `[version][ec]` where `ec` follows `CodeEcc::ordinal()` (L, M, Q,
/// H).
pub(crate) static RS_BLOCK_RAW: [[(u8, u16, u8); 4]; 40] = [
    [(1, 19, 0), (1, 16, 0), (1, 13, 0), (1, 9, 0)],
    [(1, 34, 0), (1, 28, 0), (1, 22, 0), (1, 16, 0)],
    [(1, 55, 0), (1, 44, 0), (2, 17, 0), (2, 13, 0)],
    [(1, 80, 0), (2, 32, 0), (2, 24, 0), (4, 9, 0)],
    [(1, 108, 0), (2, 43, 0), (2, 15, 2), (2, 11, 2)],
    [(2, 68, 0), (4, 27, 0), (4, 19, 0), (4, 15, 0)],
    [(2, 78, 0), (4, 31, 0), (2, 14, 4), (4, 13, 1)],
    [(2, 97, 0), (2, 38, 2), (4, 18, 2), (4, 14, 2)],
    [(2, 116, 0), (3, 36, 2), (4, 16, 4), (4, 12, 4)],
    [(2, 68, 2), (4, 43, 1), (6, 19, 2), (6, 15, 2)],
    [(4, 81, 0), (1, 50, 4), (4, 22, 4), (3, 12, 8)],
    [(2, 92, 2), (6, 36, 2), (4, 20, 6), (7, 14, 4)],
    [(4, 107, 0), (8, 37, 1), (8, 20, 4), (12, 11, 4)],
    [(3, 115, 1), (4, 40, 5), (11, 16, 5), (11, 12, 5)],
    [(5, 87, 1), (5, 41, 5), (5, 24, 7), (11, 12, 7)],
    [(5, 98, 1), (7, 45, 3), (15, 19, 2), (3, 15, 13)],
    [(1, 107, 5), (10, 46, 1), (1, 22, 15), (2, 14, 17)],
    [(5, 120, 1), (9, 43, 4), (17, 22, 1), (2, 14, 19)],
    [(3, 113, 4), (3, 44, 11), (17, 21, 4), (9, 13, 16)],
    [(3, 107, 5), (3, 41, 13), (15, 24, 5), (15, 15, 10)],
    [(4, 116, 4), (17, 42, 0), (17, 22, 6), (19, 16, 6)],
    [(2, 111, 7), (17, 46, 0), (7, 24, 16), (34, 13, 0)],
    [(4, 121, 5), (4, 47, 14), (11, 24, 14), (16, 15, 14)],
    [(6, 117, 4), (6, 45, 14), (11, 24, 16), (30, 16, 2)],
    [(8, 106, 4), (8, 47, 13), (7, 24, 22), (22, 15, 13)],
    [(10, 114, 2), (19, 46, 4), (28, 22, 6), (33, 16, 4)],
    [(8, 122, 4), (22, 45, 3), (8, 23, 26), (12, 15, 28)],
    [(3, 117, 10), (3, 45, 23), (4, 24, 31), (11, 15, 31)],
    [(7, 116, 7), (21, 45, 7), (1, 23, 37), (19, 15, 26)],
    [(5, 115, 10), (19, 47, 10), (15, 24, 25), (23, 15, 25)],
    [(13, 115, 3), (2, 46, 29), (42, 24, 1), (23, 15, 28)],
    [(17, 115, 0), (10, 46, 23), (10, 24, 35), (19, 15, 35)],
    [(17, 115, 1), (14, 46, 21), (29, 24, 19), (11, 15, 46)],
    [(13, 115, 6), (14, 46, 23), (44, 24, 7), (59, 16, 1)],
    [(12, 121, 7), (12, 47, 26), (39, 24, 14), (22, 15, 41)],
    [(6, 121, 14), (6, 47, 34), (46, 24, 10), (2, 15, 64)],
    [(17, 122, 4), (29, 46, 14), (49, 24, 10), (24, 15, 46)],
    [(4, 122, 18), (13, 46, 32), (48, 24, 14), (42, 15, 32)],
    [(20, 117, 4), (40, 47, 7), (43, 24, 22), (10, 15, 67)],
    [(19, 118, 6), (18, 47, 31), (34, 24, 34), (20, 15, 61)],
];

/// Character count indicator widths, indexed `[tier][mode]` where `tier =
/// (version >= 10) as usize + (version >= 27) as usize`, per ISO 18004 §8.4.
/// Modes are ordered Numeric, Alphanumeric, Byte, Kanji.
static COUNT_INDICATOR_BITS: [[u8; 4]; 3] = [[10, 9, 8, 8], [12, 11, 16, 10], [14, 13, 16, 12]];

/// ASCII byte -> alphanumeric value (0..44), or -1 if the byte is outside
/// the 45-character alphanumeric alphabet `0-9A-Z $%*+-./:`.
static ALPHANUMERIC_VALUE: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, 36, -1, -1, -1, 37, 38, -1, -1, -1, -1, 39, 40, -1, 41, 42, 43,
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 44, -1, -1, -1, -1, -1, -1, 10, 11, 12, 13, 14, 15, 16, 17, 18,
    19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
];

/// Row/column gap between adjacent alignment-pattern centers, by 0-based
/// version index. Unused (and meaningless) for version 1.
static ALIGNMENT_GAP: [i8; 40] = [
    -1, -1, -1, -1, -1, -1, 16, 18, 20, 22, 24, 26, 28, 20, 22, 24, 24, 26, 28, 28, 22, 24, 24, 26,
    26, 28, 28, 24, 24, 26, 26, 26, 28, 28, 24, 26, 26, 26, 28, 28,
];

/// 18-bit BCH-protected version strings for versions 7..40 (index 0 is
/// version 7).
static VERSION_INFO: [u32; 34] = [
    0x7C94, 0x85BC, 0x9A99, 0xA4D3, 0xBBF6, 0xC762, 0xD847, 0xE60D, 0xF928, 0x10B78, 0x1145D,
    0x12A17, 0x13532, 0x149A6, 0x15683, 0x168C9, 0x177EC, 0x18EC4, 0x191E1, 0x1AFAB, 0x1B08E,
    0x1CC1A, 0x1D33F, 0x1ED75, 0x1F250, 0x209D5, 0x216F0, 0x228BA, 0x2379F, 0x24B0B, 0x2542E,
    0x26A64, 0x27541, 0x28C69,
];

/// 15-bit BCH-protected format strings, indexed `[ec][mask]`.
static FORMAT_INFO: [[u16; 8]; 4] = [
    [0x77C4, 0x72F3, 0x7DAA, 0x789D, 0x662F, 0x6318, 0x6C41, 0x6976],
    [0x5412, 0x5125, 0x5E7C, 0x5B4B, 0x45F9, 0x40CE, 0x4F97, 0x4AA0],
    [0x355F, 0x3068, 0x3F31, 0x3A06, 0x24B4, 0x2183, 0x2EDA, 0x2BED],
    [0x1689, 0x13BE, 0x1CE7, 0x19D0, 0x0762, 0x0255, 0x0D0C, 0x083B],
];

/// Reed-Solomon block layout for a given version and EC level, with
/// `ec_per_block` and `g2_data_per_block` filled in per the layout
/// invariant in spec §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsBlockLayout {
    pub ec_per_block: u16,
    pub g1_blocks: u16,
    pub g1_data_per_block: u16,
    pub g2_blocks: u16,
    pub g2_data_per_block: u16,
}

pub(crate) fn total_codewords(version: Version) -> usize {
    TOTAL_CODEWORDS[usize::from(version.value() - 1)] as usize
}

pub(crate) fn rs_block_layout(version: Version, ec: CodeEcc) -> RsBlockLayout {
    let (g1_blocks, g1_data, g2_blocks) =
        RS_BLOCK_RAW[usize::from(version.value() - 1)][ec.ordinal()];
    let total_blocks = u32::from(g1_blocks) + u32::from(g2_blocks);
    let data_total = u32::from(g1_blocks) * u32::from(g1_data)
        + u32::from(g2_blocks) * (u32::from(g1_data) + 1);
    let ec_per_block = (total_codewords(version) as u32 - data_total) / total_blocks;
    RsBlockLayout {
        ec_per_block: ec_per_block as u16,
        g1_blocks: g1_blocks.into(),
        g1_data_per_block: g1_data,
        g2_blocks: g2_blocks.into(),
        g2_data_per_block: if g2_blocks == 0 { 0 } else { g1_data + 1 },
    }
}

/// Number of data codewords available at the given version and EC level.
pub fn data_codewords_len(version: Version, ec: CodeEcc) -> usize {
    let layout = rs_block_layout(version, ec);
    usize::from(layout.g1_blocks) * usize::from(layout.g1_data_per_block)
        + usize::from(layout.g2_blocks) * usize::from(layout.g2_data_per_block)
}

pub(crate) fn count_indicator_bits(version: Version, mode: Mode) -> u8 {
    let tier = usize::from(version.value() >= 10) + usize::from(version.value() >= 27);
    COUNT_INDICATOR_BITS[tier][mode.ordinal()]
}

pub(crate) fn alphanumeric_value(byte: u8) -> Option<u8> {
    if byte >= 128 {
        return None;
    }
    let v = ALPHANUMERIC_VALUE[usize::from(byte)];
    if v < 0 {
        None
    } else {
        Some(v as u8)
    }
}

pub(crate) fn alignment_gap(version: Version) -> i32 {
    i32::from(ALIGNMENT_GAP[usize::from(version.value() - 1)])
}

pub(crate) fn version_info(version: Version) -> u32 {
    VERSION_INFO[usize::from(version.value() - 7)]
}

pub(crate) fn format_info(ec: CodeEcc, mask: crate::mask::Mask) -> u16 {
    FORMAT_INFO[ec.ordinal()][usize::from(mask.value())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::CodeEcc;

    #[test]
    fn total_codewords_matches_data_plus_ec() {
        for v in 1..=40u8 {
            let version = Version::new(v);
            for &ec in &[CodeEcc::Low, CodeEcc::Medium, CodeEcc::Quartile, CodeEcc::High] {
                let layout = rs_block_layout(version, ec);
                let total_blocks = layout.g1_blocks + layout.g2_blocks;
                let data = data_codewords_len(version, ec);
                assert_eq!(
                    data + usize::from(layout.ec_per_block) * usize::from(total_blocks),
                    total_codewords(version),
                    "version {v} ec {ec:?}"
                );
            }
        }
    }

    #[test]
    fn alphanumeric_value_round_trip() {
        assert_eq!(alphanumeric_value(b'0'), Some(0));
        assert_eq!(alphanumeric_value(b'9'), Some(9));
        assert_eq!(alphanumeric_value(b'A'), Some(10));
        assert_eq!(alphanumeric_value(b'Z'), Some(35));
        assert_eq!(alphanumeric_value(b' '), Some(36));
        assert_eq!(alphanumeric_value(b':'), Some(44));
        assert_eq!(alphanumeric_value(b'a'), None);
        assert_eq!(alphanumeric_value(b'!'), None);
    }
}
