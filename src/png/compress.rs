use super::*;

/// A lossless general purpose compressor for the `IDAT` data.
///
/// PNG requires the image data to be a zlib stream, so that's what any
/// implementation used for real PNG output must produce. The encoder itself
/// doesn't look inside the compressed bytes, it only splits them across
/// chunks.
///
/// Implementations must be deterministic: the same input gives the same
/// output every time. That's what makes the encoder's output reproducible.
pub trait Compressor {
  /// Compresses all of `raw` into a single stream.
  fn compress(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError>;

  /// Reverses [`compress`](Compressor::compress).
  fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CompressionError>;
}

impl<C: Compressor + ?Sized> Compressor for &C {
  #[inline]
  fn compress(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
    (**self).compress(raw)
  }
  #[inline]
  fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CompressionError> {
    (**self).decompress(compressed)
  }
}

/// Zlib compression provided by the `miniz_oxide` crate.
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZlibCompressor {
  level: u8,
}
#[cfg(feature = "miniz_oxide")]
impl ZlibCompressor {
  /// The highest level that `miniz_oxide` understands.
  pub const MAX_LEVEL: u8 = 10;

  /// Makes a compressor at the given level, `0` (store only) to
  /// [`MAX_LEVEL`](Self::MAX_LEVEL). Higher levels are clamped.
  #[inline]
  #[must_use]
  pub const fn new(level: u8) -> Self {
    Self { level: if level > Self::MAX_LEVEL { Self::MAX_LEVEL } else { level } }
  }

  /// The compression level.
  #[inline]
  #[must_use]
  pub const fn level(&self) -> u8 {
    self.level
  }
}
#[cfg(feature = "miniz_oxide")]
impl Default for ZlibCompressor {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self::new(DEFAULT_COMPRESSION_LEVEL)
  }
}
#[cfg(feature = "miniz_oxide")]
impl Compressor for ZlibCompressor {
  #[inline]
  fn compress(&self, raw: &[u8]) -> Result<Vec<u8>, CompressionError> {
    Ok(miniz_oxide::deflate::compress_to_vec_zlib(raw, self.level))
  }

  fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CompressionError> {
    miniz_oxide::inflate::decompress_to_vec_zlib(compressed)
      .map_err(|e| CompressionError::new(format!("zlib inflate failed: {e:?}")))
  }
}
