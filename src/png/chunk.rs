use super::*;

/// The 4-byte type tag of a PNG chunk.
///
/// The case of each letter has meaning to PNG readers (critical, public,
/// reserved, and safe-to-copy bits), but it's not checked here. Any 4 bytes
/// can be framed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkTy(pub [u8; 4]);
impl PngChunkTy {
  /// Image header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Image data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image end
  pub const IEND: Self = Self(*b"IEND");

  /// The tag as bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; 4] {
    &self.0
  }
}
impl Debug for PngChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('"')?;
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    f.write_char('"')?;
    Ok(())
  }
}
impl From<[u8; 4]> for PngChunkTy {
  #[inline]
  #[must_use]
  fn from(tag: [u8; 4]) -> Self {
    Self(tag)
  }
}

/// Bytes that framing adds around a payload: length, tag, and CRC.
pub const CHUNK_OVERHEAD: usize = 12;

/// Converts a payload length into the value of a chunk's length field.
///
/// ## Failure
/// * [`EncodeError::PayloadTooLarge`] if `len` doesn't fit in a `u32`.
#[inline]
pub fn chunk_length_field(len: usize) -> Result<u32, EncodeError> {
  u32::try_from(len).map_err(|_| EncodeError::PayloadTooLarge { len })
}

/// The CRC that goes on the end of a chunk: it covers the tag and payload, but
/// not the length.
#[inline]
#[must_use]
pub fn chunk_crc(ty: PngChunkTy, payload: &[u8]) -> u32 {
  let mut crc = Crc32::new();
  crc.update(ty.as_bytes());
  crc.update(payload);
  crc.finish()
}

/// Appends one framed chunk to the end of `out`.
///
/// The layout is `length || tag || payload || crc`, with the length and crc as
/// big-endian `u32` values. Exactly `12 + payload.len()` bytes are added.
///
/// ## Failure
/// * [`EncodeError::PayloadTooLarge`] if the payload length doesn't fit in the
///   length field.
/// * [`EncodeError::Alloc`] if `out` can't grow enough.
///
/// If this fails then `out` is not changed.
pub fn write_chunk(out: &mut Vec<u8>, ty: PngChunkTy, payload: &[u8]) -> Result<(), EncodeError> {
  let len = chunk_length_field(payload.len())?;
  out.try_reserve(payload.len().checked_add(CHUNK_OVERHEAD).ok_or(EncodeError::CheckedMath)?)?;
  out.extend_from_slice(&len.to_be_bytes());
  out.extend_from_slice(ty.as_bytes());
  out.extend_from_slice(payload);
  out.extend_from_slice(&chunk_crc(ty, payload).to_be_bytes());
  trace!("framed {ty:?} chunk, {len} byte payload");
  Ok(())
}

/// Frames a chunk into a new vec.
///
/// Same as [`write_chunk`], but with a fresh output buffer.
pub fn frame_chunk(ty: PngChunkTy, payload: &[u8]) -> Result<Vec<u8>, EncodeError> {
  let mut out = Vec::new();
  write_chunk(&mut out, ty, payload)?;
  Ok(out)
}
