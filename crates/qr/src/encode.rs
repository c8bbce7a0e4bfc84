//! Top-level encoding pipeline: mode/version selection, bitstream assembly,
//! Reed-Solomon interleaving, module placement, and mask selection.

use crate::bit_buffer::BitBuffer;
use crate::ecc::CodeEcc;
use crate::error::QrError;
use crate::gf256;
use crate::mask;
use crate::matrix::{Matrix, Module};
use crate::mode::{self, Mode};
use crate::segment;
use crate::tables;
use crate::version::Version;

/// Encodes `payload` as a QR Code symbol at error-correction level `ec`.
///
/// Picks the narrowest mode and smallest version that can hold `payload`,
/// builds the bitstream, computes error correction, places every module,
/// and returns the matrix masked with whichever of the 8 mask patterns
/// scores lowest.
pub fn encode_qr(payload: &[u8], ec: CodeEcc) -> Result<Matrix, QrError> {
    if payload.is_empty() {
        return Err(QrError::EmptyInput);
    }
    let picked_mode = mode::pick_mode(payload);
    let version = mode::pick_version(payload.len(), ec, picked_mode).ok_or(QrError::TooLong)?;

    let data_codewords = build_data_codewords(payload, picked_mode, version, ec)?;
    let codewords = add_ecc_and_interleave(&data_codewords, version, ec);

    let (matrix, free_mask) = place_modules(version, &codewords);
    let (masked, _pattern) = mask::mask_modules_auto(&matrix, &free_mask, ec);
    Ok(masked)
}

/// Assembles the mode indicator, character-count indicator, packed body,
/// terminator, and byte-boundary/pad-byte padding into a full set of data
/// codewords for `version`.
fn build_data_codewords(
    payload: &[u8],
    mode: Mode,
    version: Version,
    ec: CodeEcc,
) -> Result<Vec<u8>, QrError> {
    let mut bb = BitBuffer(Vec::new());
    bb.append_bits(mode.mode_bits(), 4);
    let char_count = if mode == Mode::Kanji {
        payload.len() / 2
    } else {
        payload.len()
    };
    bb.append_bits(
        u32::try_from(char_count).map_err(|_| QrError::Internal("character count overflow"))?,
        mode.count_indicator_bits(version),
    );
    segment::encode_body(mode, payload, &mut bb);

    let capacity_bits = tables::data_codewords_len(version, ec) * 8;
    if bb.0.len() > capacity_bits {
        return Err(QrError::TooLong);
    }

    // Terminator: up to 4 zero bits, whatever is left before the byte
    // boundary.
    let terminator_len = (capacity_bits - bb.0.len()).min(4);
    bb.append_bits(0, terminator_len as u8);
    // Pad to a byte boundary with zero bits.
    while bb.0.len() % 8 != 0 {
        bb.0.push(false);
    }

    let mut codewords: Vec<u8> = bb
        .0
        .chunks(8)
        .map(|byte_bits| {
            byte_bits
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit))
        })
        .collect();

    // Alternate 0xEC/0x11 pad codewords until the data area is full.
    let target = capacity_bits / 8;
    let mut pad = 0xECu8;
    while codewords.len() < target {
        codewords.push(pad);
        pad ^= 0xFD;
    }

    Ok(codewords)
}

/// Splits `data` into the Reed-Solomon block layout for `version`/`ec`,
/// computes each block's error-correction codewords, and interleaves data
/// then EC codewords block-by-block, per ISO/IEC 18004 §8.7.
fn add_ecc_and_interleave(data: &[u8], version: Version, ec: CodeEcc) -> Vec<u8> {
    let layout = tables::rs_block_layout(version, ec);
    let generator = gf256::generator_polynomial(usize::from(layout.ec_per_block));

    let mut data_blocks: Vec<&[u8]> = Vec::new();
    let mut offset = 0;
    for _ in 0..layout.g1_blocks {
        let len = usize::from(layout.g1_data_per_block);
        data_blocks.push(&data[offset..offset + len]);
        offset += len;
    }
    for _ in 0..layout.g2_blocks {
        let len = usize::from(layout.g2_data_per_block);
        data_blocks.push(&data[offset..offset + len]);
        offset += len;
    }

    let ec_blocks: Vec<Vec<u8>> = data_blocks
        .iter()
        .map(|block| gf256::divide_polynomial(block, &generator))
        .collect();

    let max_data_len = data_blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let mut out = Vec::with_capacity(tables::total_codewords(version));
    for i in 0..max_data_len {
        for block in &data_blocks {
            if i < block.len() {
                out.push(block[i]);
            }
        }
    }
    for i in 0..usize::from(layout.ec_per_block) {
        for block in &ec_blocks {
            out.push(block[i]);
        }
    }
    out
}

/// Builds the matrix for `version`, draws all function patterns and
/// reserved format/version strips, then places `codewords` along the
/// zig-zag data path. Returns the matrix (still carrying `Module::None` in
/// no positions, but `Module::Reserved` where format/version info will
/// later be overwritten by masking) and the free mask marking which
/// modules are eligible to be inverted by a mask pattern.
fn place_modules(version: Version, codewords: &[u8]) -> (Matrix, Vec<bool>) {
    let mut matrix = Matrix::new(version);
    let side = matrix.side();
    let mut free = vec![true; (side * side) as usize];

    draw_finder_pattern(&mut matrix, &mut free, 3, 3);
    draw_finder_pattern(&mut matrix, &mut free, side - 4, 3);
    draw_finder_pattern(&mut matrix, &mut free, 3, side - 4);
    draw_alignment_patterns(&mut matrix, &mut free, version);
    draw_timing_patterns(&mut matrix, &mut free, side);
    set_function(&mut matrix, &mut free, side, 8, side - 8, true);
    reserve_format_info(&mut matrix, &mut free, side);
    if version.value() >= 7 {
        draw_version_info(&mut matrix, &mut free, version, side);
    }

    draw_codewords(&mut matrix, &free, side, codewords);

    (matrix, free)
}

fn set_function(matrix: &mut Matrix, free: &mut [bool], side: i32, x: i32, y: i32, dark: bool) {
    matrix.set(x, y, if dark { Module::Dark } else { Module::Light });
    free[(y * side + x) as usize] = false;
}

fn draw_finder_pattern(matrix: &mut Matrix, free: &mut [bool], cx: i32, cy: i32) {
    let side = matrix.side();
    for dy in -4..=4 {
        for dx in -4..=4 {
            let x = cx + dx;
            let y = cy + dy;
            if !(0..side).contains(&x) || !(0..side).contains(&y) {
                continue;
            }
            let r = dx.abs().max(dy.abs());
            let dark = r != 2 && r <= 3;
            set_function(matrix, free, side, x, y, dark);
        }
    }
}

fn draw_alignment_patterns(matrix: &mut Matrix, free: &mut [bool], version: Version) {
    let side = matrix.side();
    let positions = alignment_positions(version, side);
    for &cy in &positions {
        for &cx in &positions {
            // Skip only the three finder-adjacent corners; the bottom-right
            // corner (side-7, side-7) has no finder pattern and keeps its
            // alignment pattern.
            if (cx == 6 && cy == 6) || (cx == 6 && cy == side - 7) || (cx == side - 7 && cy == 6) {
                continue;
            }
            for dy in -2..=2 {
                for dx in -2..=2 {
                    let r = dx.abs().max(dy.abs());
                    set_function(matrix, free, side, cx + dx, cy + dy, r != 1);
                }
            }
        }
    }
}

/// Returns the alignment pattern center coordinates along one axis, per
/// ISO/IEC 18004 Annex E: always one at position 6 and one at `side - 7`,
/// with intermediate positions (for version 7 and up) spaced backward from
/// `side - 7` by the table gap.
fn alignment_positions(version: Version, side: i32) -> Vec<i32> {
    let v = i32::from(version.value());
    if v == 1 {
        return Vec::new();
    }
    let num_align = v / 7 + 2;
    let gap = tables::alignment_gap(version);
    let mut positions: Vec<i32> = (0..num_align - 1).map(|i| side - 7 - i * gap).collect();
    positions.push(6);
    positions.sort_unstable();
    positions.dedup();
    positions
}

fn draw_timing_patterns(matrix: &mut Matrix, free: &mut [bool], side: i32) {
    for i in 8..side - 8 {
        let dark = i % 2 == 0;
        set_function(matrix, free, side, i, 6, dark);
        set_function(matrix, free, side, 6, i, dark);
    }
}

fn reserve_format_info(matrix: &mut Matrix, free: &mut [bool], side: i32) {
    for i in 0..9 {
        if i != 6 {
            set_function_reserved(matrix, free, side, 8, i);
        }
    }
    for i in 0..8 {
        if i != 6 {
            set_function_reserved(matrix, free, side, i, 8);
        }
    }
    for i in 0..8 {
        set_function_reserved(matrix, free, side, side - 1 - i, 8);
    }
    for i in 0..7 {
        set_function_reserved(matrix, free, side, 8, side - 1 - i);
    }
}

fn set_function_reserved(matrix: &mut Matrix, free: &mut [bool], side: i32, x: i32, y: i32) {
    matrix.set(x, y, Module::Reserved);
    free[(y * side + x) as usize] = false;
}

fn draw_version_info(matrix: &mut Matrix, free: &mut [bool], version: Version, side: i32) {
    let bits = tables::version_info(version);
    for i in 0..18 {
        let dark = (bits >> i) & 1 != 0;
        let a = i / 3;
        let b = i % 3;
        set_function(matrix, free, side, side - 11 + b, a, dark);
        set_function(matrix, free, side, a, side - 11 + b, dark);
    }
}

/// Walks the zig-zag data path (two-module-wide columns, skipping the
/// timing column, alternating scan direction) and writes `codewords`' bits
/// into every module the free mask still marks as available.
fn draw_codewords(matrix: &mut Matrix, free: &[bool], side: i32, codewords: &[u8]) {
    let mut bit_index = 0usize;
    let total_bits = codewords.len() * 8;
    let mut x = side - 1;
    let mut upward = true;
    while x > 0 {
        if x == 6 {
            x -= 1;
        }
        let ys: Box<dyn Iterator<Item = i32>> = if upward {
            Box::new((0..side).rev())
        } else {
            Box::new(0..side)
        };
        for y in ys {
            for &xx in &[x, x - 1] {
                let idx = (y * side + xx) as usize;
                if !free[idx] {
                    continue;
                }
                let dark = if bit_index < total_bits {
                    let byte = codewords[bit_index / 8];
                    let bit = 7 - (bit_index % 8);
                    (byte >> bit) & 1 != 0
                } else {
                    false
                };
                matrix.set(xx, y, if dark { Module::Dark } else { Module::Light });
                bit_index += 1;
            }
        }
        upward = !upward;
        x -= 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_quartile_is_version_1() {
        let matrix = encode_qr(b"HELLO WORLD", CodeEcc::Quartile).unwrap();
        assert_eq!(matrix.version().value(), 1);
        assert!(matrix.is_fully_placed());
    }

    #[test]
    fn empty_payload_is_an_error() {
        assert_eq!(encode_qr(b"", CodeEcc::Low), Err(QrError::EmptyInput));
    }

    #[test]
    fn payload_over_capacity_is_too_long() {
        let data = vec![b'0'; 8000];
        assert_eq!(encode_qr(&data, CodeEcc::High), Err(QrError::TooLong));
    }

    #[test]
    fn larger_payload_needs_higher_version() {
        let small = encode_qr(b"1", CodeEcc::Low).unwrap();
        let big = encode_qr(&vec![b'1'; 500], CodeEcc::Low).unwrap();
        assert!(small.version().value() < big.version().value());
    }
}
