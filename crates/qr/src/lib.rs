//! Encodes arbitrary byte strings into QR Code symbols.
//!
//! This crate implements the ISO/IEC 18004 Model 2 encoding pipeline: pick the
//! narrowest encoding mode and smallest symbol version for a payload, pack it
//! into a bitstream, compute Reed-Solomon error correction codewords, place
//! every module (function patterns plus data), and choose the mask pattern
//! with the lowest penalty score.
//!
//! The crate has no knowledge of image formats or command-line arguments; it
//! maps a byte slice and an error-correction level to a 2-D grid of dark and
//! light modules. Turning that grid into pixels is the job of a sibling crate
//! (`qr-bmp` in this workspace).
//!
//! # Example
//!
//! ```
//! use qr::{encode_qr, CodeEcc};
//!
//! let matrix = encode_qr(b"HELLO WORLD", CodeEcc::Quartile).unwrap();
//! assert_eq!(matrix.version().value(), 1);
//! ```

mod bit_buffer;
mod ecc;
mod encode;
mod error;
mod finder_penalty;
mod gf256;
mod mask;
mod matrix;
mod mode;
mod segment;
mod tables;
mod version;

pub use ecc::*;
pub use encode::*;
pub use error::*;
pub use gf256::*;
pub use mask::*;
pub use matrix::*;
pub use mode::*;
pub use version::*;

pub use tables::data_codewords_len;

// Weights for the four mask-penalty rules, used by mask::evaluate_penalty.
pub(crate) const PENALTY_N1: i32 = 3;
pub(crate) const PENALTY_N2: i32 = 3;
pub(crate) const PENALTY_N3: i32 = 40;
pub(crate) const PENALTY_N4: i32 = 10;
