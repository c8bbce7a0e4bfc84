//! Reads up to 7089 bytes of payload from stdin, encodes it as a QR Code,
//! and writes a BMP to stdout.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use qr::CodeEcc;

/// Maximum payload size any QR Code version can hold (version 40, low EC,
/// numeric mode): reading past this is pointless since `qr::encode_qr`
/// will reject it anyway, but bounds how much memory a hostile or
/// mistaken caller can make this process buffer.
const MAX_PAYLOAD_BYTES: usize = 7089;

const DEFAULT_QUIET_ZONE: i32 = 4;

/// Encodes data from stdin into a QR Code BMP on stdout.
#[derive(Parser, Debug)]
#[command(name = "qr-cli", about = "Encode stdin as a QR Code BMP")]
struct Args {
    /// Error correction level: L (low), M (medium), Q (quartile), or H (high).
    #[arg(short = 'e', value_name = "LEVEL", default_value = "L")]
    ec: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let ec = match args.ec.chars().next().and_then(CodeEcc::from_letter) {
        Some(ec) if args.ec.len() == 1 => ec,
        _ => {
            eprintln!("error: -e must be one of L, M, Q, H (got \"{}\")", args.ec);
            return ExitCode::FAILURE;
        }
    };

    let mut payload = Vec::new();
    match io::stdin()
        .lock()
        .take(MAX_PAYLOAD_BYTES as u64 + 1)
        .read_to_end(&mut payload)
    {
        Ok(_) => {}
        Err(err) => {
            eprintln!("error: failed to read stdin: {err}");
            return ExitCode::FAILURE;
        }
    }
    if payload.len() > MAX_PAYLOAD_BYTES {
        eprintln!("error: input exceeds {MAX_PAYLOAD_BYTES} bytes");
        return ExitCode::FAILURE;
    }

    let matrix = match qr::encode_qr(&payload, ec) {
        Ok(matrix) => matrix,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let bmp = match qr_bmp::encode(&matrix, DEFAULT_QUIET_ZONE) {
        Ok(bmp) => bmp,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match io::stdout().write_all(&bmp) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: failed to write stdout: {err}");
            ExitCode::FAILURE
        }
    }
}
