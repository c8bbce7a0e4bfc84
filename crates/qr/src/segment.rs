//! Packs a payload's characters into the bitstream body for a chosen mode.
//!
//! This only emits the body: numeric triplets, alphanumeric pairs, raw
//! bytes, or kanji 13-bit codes. The mode indicator, character-count
//! indicator, terminator, and padding are assembled by the message builder.

use crate::bit_buffer::BitBuffer;
use crate::mode::Mode;
use crate::tables;

/// Appends `payload`'s body bits to `bb`, packed according to `mode`.
///
/// Callers are expected to have already verified `payload` is representable
/// in `mode` (as `pick_mode` guarantees for its own result); this function
/// does not re-validate alphanumeric or kanji membership.
pub(crate) fn encode_body(mode: Mode, payload: &[u8], bb: &mut BitBuffer) {
    match mode {
        Mode::Numeric => encode_numeric(payload, bb),
        Mode::Alphanumeric => encode_alphanumeric(payload, bb),
        Mode::Byte => encode_byte(payload, bb),
        Mode::Kanji => encode_kanji(payload, bb),
    }
}

fn encode_numeric(payload: &[u8], bb: &mut BitBuffer) {
    let mut accum: u32 = 0;
    let mut count: u8 = 0;
    for &b in payload {
        accum = accum * 10 + u32::from(b - b'0');
        count += 1;
        if count == 3 {
            bb.append_bits(accum, 10);
            accum = 0;
            count = 0;
        }
    }
    if count > 0 {
        bb.append_bits(accum, count * 3 + 1);
    }
}

fn encode_alphanumeric(payload: &[u8], bb: &mut BitBuffer) {
    let mut accum: u32 = 0;
    let mut count: u32 = 0;
    for &b in payload {
        let value = tables::alphanumeric_value(b).expect("non-alphanumeric byte in alphanumeric segment");
        accum = accum * 45 + u32::from(value);
        count += 1;
        if count == 2 {
            bb.append_bits(accum, 11);
            accum = 0;
            count = 0;
        }
    }
    if count > 0 {
        bb.append_bits(accum, 6);
    }
}

fn encode_byte(payload: &[u8], bb: &mut BitBuffer) {
    for &b in payload {
        bb.append_bits(u32::from(b), 8);
    }
}

fn encode_kanji(payload: &[u8], bb: &mut BitBuffer) {
    for pair in payload.chunks_exact(2) {
        let code = (u32::from(pair[0]) << 8) | u32::from(pair[1]);
        let shifted = if code <= 0x9FFC {
            code - 0x8140
        } else {
            code - 0xC140
        };
        let packed = ((shifted >> 8) * 0xC0) + (shifted & 0xFF);
        bb.append_bits(packed, 13);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_to_string(bits: &[bool]) -> String {
        bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    #[test]
    fn numeric_packs_triplets() {
        let mut bb = BitBuffer(Vec::new());
        encode_numeric(b"12345", &mut bb);
        // "123" -> 10 bits of 123, "45" -> 7 bits of 45
        assert_eq!(bb.0.len(), 10 + 7);
        assert_eq!(
            bits_to_string(&bb.0),
            format!("{:010b}{:07b}", 123, 45)
        );
    }

    #[test]
    fn alphanumeric_packs_pairs() {
        let mut bb = BitBuffer(Vec::new());
        encode_alphanumeric(b"AB", &mut bb);
        // A=10, B=11 -> 10*45+11 = 461
        assert_eq!(bits_to_string(&bb.0), format!("{:011b}", 461));
    }

    #[test]
    fn byte_mode_is_one_byte_per_eight_bits() {
        let mut bb = BitBuffer(Vec::new());
        encode_byte(&[0xFF, 0x00], &mut bb);
        assert_eq!(bb.0.len(), 16);
    }
}
