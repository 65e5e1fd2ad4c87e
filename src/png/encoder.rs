use super::*;

#[cfg(feature = "std")]
use std::{io::Write as _, path::Path};

/// Compression level used when you don't pick one.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 9;

/// Default limit on a single `IDAT` chunk's payload (1 MiB).
pub const DEFAULT_MAX_IDAT_LEN: usize = 1 << 20;

/// The largest chunk payload the PNG format allows (`2^31 - 1`).
pub const MAX_IDAT_LEN: usize = i32::MAX as usize;

/// Settings for a [`PngEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncoderConfig {
  compression_level: u8,
  max_idat_len: usize,
}
impl Default for EncoderConfig {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self { compression_level: DEFAULT_COMPRESSION_LEVEL, max_idat_len: DEFAULT_MAX_IDAT_LEN }
  }
}
impl EncoderConfig {
  /// Sets the compression level handed to the default compressor.
  ///
  /// A custom [`Compressor`] picks its own level, so this only matters to
  /// [`PngEncoder::from_config`].
  #[inline]
  #[must_use]
  pub const fn with_compression_level(mut self, level: u8) -> Self {
    self.compression_level = level;
    self
  }

  /// Sets the most compressed bytes that go in one `IDAT` chunk.
  ///
  /// Longer compressed data is split over several `IDAT` chunks in a row. The
  /// value is clamped to `1..=MAX_IDAT_LEN`.
  #[inline]
  #[must_use]
  pub const fn with_max_idat_len(mut self, len: usize) -> Self {
    self.max_idat_len = if len == 0 {
      1
    } else if len > MAX_IDAT_LEN {
      MAX_IDAT_LEN
    } else {
      len
    };
    self
  }

  /// The compression level.
  #[inline]
  #[must_use]
  pub const fn compression_level(&self) -> u8 {
    self.compression_level
  }

  /// The `IDAT` payload limit.
  #[inline]
  #[must_use]
  pub const fn max_idat_len(&self) -> usize {
    self.max_idat_len
  }
}

/// Turns pixel rows into PNG bytes.
///
/// The encoder holds only settings and a compressor, all of the work for an
/// image happens inside one call. A single encoder can encode any number of
/// images, from any number of threads if the compressor is `Sync`.
#[derive(Debug, Clone)]
pub struct PngEncoder<C> {
  config: EncoderConfig,
  compressor: C,
}
#[cfg(feature = "miniz_oxide")]
impl Default for PngEncoder<ZlibCompressor> {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self::from_config(EncoderConfig::default())
  }
}
#[cfg(feature = "miniz_oxide")]
impl PngEncoder<ZlibCompressor> {
  /// An encoder using `miniz_oxide` at the config's compression level.
  #[inline]
  #[must_use]
  pub fn from_config(config: EncoderConfig) -> Self {
    Self { config, compressor: ZlibCompressor::new(config.compression_level) }
  }
}
impl<C: Compressor> PngEncoder<C> {
  /// An encoder using your own compressor.
  #[inline]
  #[must_use]
  pub const fn with_compressor(config: EncoderConfig, compressor: C) -> Self {
    Self { config, compressor }
  }

  /// The settings of this encoder.
  #[inline]
  #[must_use]
  pub const fn config(&self) -> &EncoderConfig {
    &self.config
  }

  /// The compressor of this encoder.
  #[inline]
  #[must_use]
  pub const fn compressor(&self) -> &C {
    &self.compressor
  }

  /// Encodes the rows as a complete PNG.
  ///
  /// The output is the signature, an `IHDR`, one or more `IDAT`, then an
  /// `IEND`. The same rows and compressor always give the same bytes.
  ///
  /// ## Failure
  /// * [`EncodeError::InvalidPixelBuffer`] if the rows aren't a non-empty
  ///   rectangle. This is checked before anything else happens.
  /// * [`EncodeError::CompressionFailed`] with the compressor's own error.
  /// * [`EncodeError::Alloc`] / [`EncodeError::CheckedMath`] if the image is
  ///   too big to buffer.
  pub fn encode<R: AsRef<[RGB888]>>(&self, rows: &[R]) -> Result<Vec<u8>, EncodeError> {
    let (ihdr, raw) = prepare_scanlines(rows)?;
    let compressed = self.compressor.compress(&raw)?;
    drop(raw);
    let idat_count = compressed.len().div_ceil(self.config.max_idat_len).max(1);
    let total = idat_count
      .checked_mul(CHUNK_OVERHEAD)
      .and_then(|t| t.checked_add(compressed.len()))
      .and_then(|t| t.checked_add(PNG_SIGNATURE.len() + 2 * CHUNK_OVERHEAD + IHDR::PAYLOAD_LEN))
      .ok_or(EncodeError::CheckedMath)?;

    let mut out: Vec<u8> = Vec::new();
    out.try_reserve_exact(total)?;
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut out, PngChunkTy::IHDR, &ihdr.to_bytes())?;
    if compressed.is_empty() {
      write_chunk(&mut out, PngChunkTy::IDAT, &[])?;
    } else {
      for data in compressed.chunks(self.config.max_idat_len) {
        write_chunk(&mut out, PngChunkTy::IDAT, data)?;
      }
    }
    write_chunk(&mut out, PngChunkTy::IEND, &[])?;
    debug_assert_eq!(out.len(), total);
    debug!(
      "encoded {}x{} PNG: {} compressed bytes in {idat_count} IDAT, {} bytes total",
      ihdr.width,
      ihdr.height,
      compressed.len(),
      out.len()
    );
    Ok(out)
  }

  /// Encodes a [`Bitmap`](crate::image::Bitmap) as a complete PNG.
  ///
  /// Same as [`encode`](Self::encode) on the bitmap's rows.
  pub fn encode_bitmap(&self, bitmap: &crate::image::Bitmap<RGB888>) -> Result<Vec<u8>, EncodeError> {
    if bitmap.width() == 0 && bitmap.height() != 0 {
      return Err(BufferFault::ZeroWidth.into());
    }
    let mut rows: Vec<&[RGB888]> = Vec::new();
    rows.try_reserve_exact(bitmap.height() as usize)?;
    rows.extend(bitmap.rows());
    self.encode(&rows)
  }

  /// Encodes the rows, then writes all of the PNG to `w`.
  ///
  /// Nothing is written unless the encode succeeds. If the writer itself fails
  /// part way then it might have taken some of the bytes, that's up to the
  /// writer. Use [`save`](Self::save) to avoid partial files.
  #[cfg(feature = "std")]
  #[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
  pub fn encode_to_writer<R: AsRef<[RGB888]>, W: std::io::Write>(
    &self, rows: &[R], mut w: W,
  ) -> Result<(), EncodeError> {
    let png = self.encode(rows)?;
    w.write_all(&png)?;
    w.flush()?;
    Ok(())
  }

  /// Encodes the rows and stores them as the file at `path`.
  ///
  /// The PNG goes to a uniquely named temporary file next to `path` that's
  /// then renamed over `path`, so the file at `path` is either the old file or
  /// a complete new one, never a partial PNG. Concurrent saves to the same
  /// path each get their own temporary file, and the last rename wins.
  #[cfg(feature = "std")]
  #[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
  pub fn save<R: AsRef<[RGB888]>, P: AsRef<Path>>(&self, rows: &[R], path: P) -> Result<(), EncodeError> {
    let png = self.encode(rows)?;
    commit_file(path.as_ref(), &png)
  }
}

/// Encodes rows as a PNG with the default settings and `miniz_oxide`.
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
pub fn encode_png<R: AsRef<[RGB888]>>(rows: &[R]) -> Result<Vec<u8>, EncodeError> {
  PngEncoder::default().encode(rows)
}

/// Saves rows as a PNG file with the default settings and `miniz_oxide`.
///
/// See [`PngEncoder::save`].
#[cfg(all(feature = "std", feature = "miniz_oxide"))]
#[cfg_attr(docs_rs, doc(cfg(all(feature = "std", feature = "miniz_oxide"))))]
pub fn save_png<P: AsRef<Path>, R: AsRef<[RGB888]>>(path: P, rows: &[R]) -> Result<(), EncodeError> {
  PngEncoder::default().save(rows, path)
}

#[cfg(feature = "std")]
fn commit_file(path: &Path, bytes: &[u8]) -> Result<(), EncodeError> {
  let dir = match path.parent() {
    Some(dir) if !dir.as_os_str().is_empty() => dir,
    _ => Path::new("."),
  };
  // the temp file is deleted on drop if anything below fails
  let mut temp = tempfile::NamedTempFile::new_in(dir)?;
  temp.write_all(bytes)?;
  temp.as_file().sync_all()?;
  temp.persist(path).map_err(|e| e.error)?;
  debug!("wrote {} bytes to {}", bytes.len(), path.display());
  Ok(())
}
