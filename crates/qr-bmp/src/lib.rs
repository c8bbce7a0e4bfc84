//! Renders a [`qr::Matrix`] as a 1-bit-per-pixel Windows BMP.
//!
//! This crate knows nothing about encoding QR symbols; it only turns the
//! dark/light grid `qr::encode_qr` produces into the exact byte layout a
//! BMP viewer expects: `BITMAPFILEHEADER`, `BITMAPINFOHEADER`, a two-color
//! palette, and bottom-up, row-padded 1-bpp pixel data.

mod error;

pub use error::QrBmpError;

use qr::{Matrix, Module};

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const PALETTE_SIZE: u32 = 2 * 4;
const PIXEL_DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;

/// Encodes `matrix` as a BMP, surrounded by `quiet_zone` modules of light
/// border on every side (ISO/IEC 18004 recommends 4).
pub fn encode(matrix: &Matrix, quiet_zone: i32) -> Result<Vec<u8>, QrBmpError> {
    let side = matrix
        .side()
        .checked_add(quiet_zone.checked_mul(2).unwrap_or(i32::MAX))
        .filter(|&n| n > 0 && n <= i32::from(u16::MAX))
        .ok_or(QrBmpError::DimensionsTooLarge { side: matrix.side() })?;

    let row_stride = (((side + 31) & !31) / 8) as usize;
    let pixel_data_len = row_stride * side as usize;
    let file_size = PIXEL_DATA_OFFSET as usize + pixel_data_len;

    let mut out = Vec::with_capacity(file_size);

    // BITMAPFILEHEADER
    out.extend_from_slice(&0x4D42u16.to_le_bytes()); // bfType = "BM"
    out.extend_from_slice(&(file_size as u32).to_le_bytes()); // bfSize
    out.extend_from_slice(&0u16.to_le_bytes()); // bfReserved1
    out.extend_from_slice(&0u16.to_le_bytes()); // bfReserved2
    out.extend_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes()); // bfOffBits

    // BITMAPINFOHEADER
    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes()); // biSize
    out.extend_from_slice(&side.to_le_bytes()); // biWidth
    out.extend_from_slice(&side.to_le_bytes()); // biHeight
    out.extend_from_slice(&1u16.to_le_bytes()); // biPlanes
    out.extend_from_slice(&1u16.to_le_bytes()); // biBitCount
    out.extend_from_slice(&0u32.to_le_bytes()); // biCompression = BI_RGB
    out.extend_from_slice(&(pixel_data_len as u32).to_le_bytes()); // biSizeImage
    out.extend_from_slice(&0i32.to_le_bytes()); // biXPelsPerMeter
    out.extend_from_slice(&0i32.to_le_bytes()); // biYPelsPerMeter
    out.extend_from_slice(&0u32.to_le_bytes()); // biClrUsed
    out.extend_from_slice(&0u32.to_le_bytes()); // biClrImportant

    // Color table: index 0 white (light), index 1 black (dark).
    out.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0x00]);
    out.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

    // Pixel data, bottom-up, MSB-first within each byte.
    for row in (0..side).rev() {
        let mut byte = 0u8;
        let mut bits_in_byte = 0u32;
        for col in 0..side {
            let dark = is_dark(matrix, quiet_zone, col, row);
            byte = (byte << 1) | u8::from(dark);
            bits_in_byte += 1;
            if bits_in_byte == 8 {
                out.push(byte);
                byte = 0;
                bits_in_byte = 0;
            }
        }
        if bits_in_byte > 0 {
            byte <<= 8 - bits_in_byte;
            out.push(byte);
        }
        let written = ((side as usize) + 7) / 8;
        for _ in written..row_stride {
            out.push(0);
        }
    }

    Ok(out)
}

fn is_dark(matrix: &Matrix, quiet_zone: i32, col: i32, row: i32) -> bool {
    let x = col - quiet_zone;
    let y = row - quiet_zone;
    if x < 0 || y < 0 || x >= matrix.side() || y >= matrix.side() {
        return false;
    }
    matches!(matrix.get(x, y), Module::Dark)
}
