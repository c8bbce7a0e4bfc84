use thiserror::Error;

/// Ways turning a [`qr::Matrix`] into a BMP byte stream can fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QrBmpError {
    /// The matrix side length, after adding the quiet zone, would overflow
    /// the 32-bit width/height fields BMP uses.
    #[error("image dimensions too large for BMP: {side} modules plus quiet zone")]
    DimensionsTooLarge { side: i32 },
}
