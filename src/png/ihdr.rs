use super::*;

/// Image Header
///
/// The encoder only writes one pixel format, so only the dimensions vary. The
/// rest of the header is always 8-bit truecolor, zlib compression, adaptive
/// filter method, no interlacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
}
impl IHDR {
  /// Size of the header's chunk payload.
  pub const PAYLOAD_LEN: usize = 13;
  /// bits per channel
  pub const BIT_DEPTH: u8 = 8;
  /// The "truecolor" color type, three channels per pixel.
  pub const COLOR_TYPE_RGB: u8 = 2;
  /// zlib/deflate, the only method PNG defines.
  pub const COMPRESSION_METHOD: u8 = 0;
  /// Per-scanline filter bytes, the only method PNG defines.
  pub const FILTER_METHOD: u8 = 0;
  /// Non-interlaced.
  pub const INTERLACE_METHOD: u8 = 0;

  /// The `IHDR` chunk payload.
  #[inline]
  #[must_use]
  pub const fn to_bytes(&self) -> [u8; Self::PAYLOAD_LEN] {
    let [w0, w1, w2, w3] = self.width.to_be_bytes();
    let [h0, h1, h2, h3] = self.height.to_be_bytes();
    [
      w0,
      w1,
      w2,
      w3,
      h0,
      h1,
      h2,
      h3,
      Self::BIT_DEPTH,
      Self::COLOR_TYPE_RGB,
      Self::COMPRESSION_METHOD,
      Self::FILTER_METHOD,
      Self::INTERLACE_METHOD,
    ]
  }

  /// Each line is a filter byte plus three bytes per pixel.
  #[inline]
  pub fn bytes_per_filterline(&self) -> Result<usize, EncodeError> {
    (self.width as usize).checked_mul(3).and_then(|b| b.checked_add(1)).ok_or(EncodeError::CheckedMath)
  }

  /// Length of the uncompressed, filtered image data.
  #[inline]
  pub fn scanline_stream_len(&self) -> Result<usize, EncodeError> {
    self.bytes_per_filterline()?.checked_mul(self.height as usize).ok_or(EncodeError::CheckedMath)
  }
}

#[test]
fn test_ihdr_to_bytes() {
  let ihdr = IHDR { width: 0x0102_0304, height: 2 };
  assert_eq!(ihdr.to_bytes(), [1, 2, 3, 4, 0, 0, 0, 2, 8, 2, 0, 0, 0]);
  assert_eq!(ihdr.bytes_per_filterline(), Ok(1 + 3 * 0x0102_0304));
}
